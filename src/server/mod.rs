//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto y acepta conexiones
//! 2. Las encola para el pool de workers
//! 3. En cada worker: lee, parsea y valida el request
//! 4. Responde con el archivo pedido o con `400 Bad Request`

pub mod dispatcher;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use dispatcher::{Connection, Dispatcher, Limits};
pub use tcp::{Server, Task};
