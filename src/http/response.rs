//! # Construcción de Respuestas HTTP
//!
//! API para construir respuestas HTTP/1.0 y codificarlas a bytes con un
//! límite de tamaño explícito.
//!
//! ## Formato de una respuesta HTTP/1.0
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-Length: 13\r\n
//! Content-Type: text/html; charset=utf-8\r\n
//! \r\n
//! <h1>hola</h1>
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use static_server::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_body_bytes(b"<h1>hola</h1>".to_vec())
//!     .with_header("Content-Type", "text/html; charset=utf-8");
//!
//! let bytes = response.encode_within(8192).unwrap();
//! assert!(bytes.starts_with(b"HTTP/1.0 200 OK\r\nContent-Length: 13\r\n"));
//! ```

use super::StatusCode;
use crate::error::ServeError;

/// Representa una respuesta HTTP/1.0 completa
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Código de estado HTTP
    status: StatusCode,

    /// Headers en el orden en que se escriben
    headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Respuesta fija para cualquier request que no se puede servir
    ///
    /// Solo status line y línea vacía, sin body.
    pub fn bad_request() -> Self {
        Self::new(StatusCode::BadRequest)
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe en su posición original.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some((_, existing_value)) => *existing_value = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// Automáticamente calcula y agrega el header `Content-Length`.
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        let length = self.body.len().to_string();
        self.add_header("Content-Length", &length);
        self
    }

    /// Descarta el body conservando los headers (respuesta a `HEAD`)
    pub fn without_body(mut self) -> Self {
        self.body.clear();
        self
    }

    /// Tamaño exacto en bytes que ocupa la respuesta codificada
    pub fn encoded_len(&self) -> usize {
        let status_line = "HTTP/1.0 ".len() + self.status.to_string().len() + 2;
        let headers: usize = self
            .headers
            .iter()
            .map(|(name, value)| name.len() + 2 + value.len() + 2)
            .sum();
        status_line + headers + 2 + self.body.len()
    }

    /// Codifica la respuesta sin límite de tamaño
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = BoundedWriter::new(usize::MAX);
        // sin límite la escritura no puede fallar
        let _ = self.write_to(&mut writer);
        writer.into_inner()
    }

    /// Codifica la respuesta si cabe en `limit` bytes
    ///
    /// # Errores
    ///
    /// `ServeError::ResponseTooLarge` con el tamaño que habría hecho falta.
    pub fn encode_within(&self, limit: usize) -> Result<Vec<u8>, ServeError> {
        let mut writer = BoundedWriter::new(limit);
        self.write_to(&mut writer)
            .map_err(|WouldNotFit| ServeError::ResponseTooLarge(self.encoded_len(), limit))?;
        Ok(writer.into_inner())
    }

    fn write_to(&self, writer: &mut BoundedWriter) -> Result<(), WouldNotFit> {
        // 1. Status line: HTTP/1.0 200 OK\r\n
        writer.write(b"HTTP/1.0 ")?;
        writer.write(self.status.to_string().as_bytes())?;
        writer.write(b"\r\n")?;

        // 2. Headers: Header-Name: Value\r\n
        for (name, value) in &self.headers {
            writer.write(name.as_bytes())?;
            writer.write(b": ")?;
            writer.write(value.as_bytes())?;
            writer.write(b"\r\n")?;
        }

        // 3. Línea vacía que separa headers del body
        writer.write(b"\r\n")?;

        // 4. Body (si existe)
        writer.write(&self.body)
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene los headers en orden
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Valor de un header (sin distinguir mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// La escritura no cabe en el límite del writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WouldNotFit;

/// Buffer creciente que nunca supera `limit` bytes
struct BoundedWriter {
    buffer: Vec<u8>,
    limit: usize,
}

impl BoundedWriter {
    fn new(limit: usize) -> Self {
        Self {
            buffer: Vec::new(),
            limit,
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), WouldNotFit> {
        let remaining = self.limit - self.buffer.len();
        if bytes.len() > remaining {
            return Err(WouldNotFit);
        }
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}
