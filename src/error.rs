//! # Errores del Servidor
//! src/error.rs
//!
//! Errores estructurados del camino de servicio. El parser nunca los usa:
//! reporta validez con un flag. Estos errores los produce el dispatcher, el
//! store y el codificador de respuestas, y el dispatcher los convierte en un
//! `400` salvo los de escritura al socket.

use quick_error::quick_error;
use std::io;

quick_error! {
    /// Falla al servir una conexión
    #[derive(Debug)]
    pub enum ServeError {
        /// Falla de E/S del socket o del disco
        Io(err: io::Error) {
            from()
            display("i/o error: {}", err)
            source(err)
        }
        /// El store no tiene ese recurso
        NotFound(path: String) {
            display("resource not found: {}", path)
        }
        /// El path sale de la raíz o no es UTF-8
        Forbidden(path: String) {
            display("path not allowed: {}", path)
        }
        /// Se recibieron más bytes que el buffer de request
        RequestTooLarge(limit: usize) {
            display("request exceeds {} bytes", limit)
        }
        /// La respuesta codificada no cabe en el límite configurado
        ResponseTooLarge(needed: usize, limit: usize) {
            display("response needs {} bytes, limit is {}", needed, limit)
        }
        /// El request no pasó la validación
        BadRequest(reason: String) {
            display("bad request: {}", reason)
        }
    }
}

impl ServeError {
    /// ¿El error viene del disco o del socket?
    pub fn is_io(&self) -> bool {
        matches!(self, ServeError::Io(_))
    }
}
