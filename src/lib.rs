//! # Static Server
//! src/lib.rs
//!
//! Servidor HTTP/0.9-1.0 de archivos estáticos implementado desde cero:
//! parser descendente recursivo sobre un cursor de bytes, cola de tareas con
//! mutex y condvar, y un pool fijo de workers.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Cursor, predicados léxicos, parser de request line y headers, responses
//! - `pool`: Cola FIFO de tareas y pool fijo de workers
//! - `server`: Acceptor TCP y dispatcher de requests
//! - `store`: Carga de archivos desde un directorio raíz
//! - `config`: Configuración por CLI y variables de entorno
//! - `error`: Errores del servidor
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use static_server::config::Config;
//! use static_server::server::Server;
//!
//! let config = Config::default();
//! let server = Server::bind(config).expect("Error al hacer bind");
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod pool;
pub mod server;
pub mod store;
