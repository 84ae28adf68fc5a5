//! # Módulo HTTP
//!
//! Este módulo implementa el protocolo HTTP/0.9 y HTTP/1.0 desde cero, sin
//! tokenizer ni expresiones regulares. Incluye:
//!
//! - Cursor de bytes y predicados léxicos (RFC 1945 §2.2, §3.2)
//! - Parser descendente recursivo de la request line y el path relativo
//! - Parser del bloque de headers
//! - Construcción y codificación acotada de responses
//! - Manejo de status codes
//!
//! ## Especificación HTTP/1.0
//!
//! El protocolo HTTP/1.0 (RFC 1945) es más simple que HTTP/1.1:
//! - No requiere el header `Host`
//! - No tiene chunked transfer encoding
//! - No mantiene conexiones persistentes por defecto
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path;params?query HTTP/1.0\r\n
//! Header-Name: Header-Value\r\n
//! Another-Header: Value\r\n
//! \r\n
//! ```
//!
//! Un Simple-Request de HTTP/0.9 es solo `GET /path\r\n`.
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-Length: 13\r\n
//! Content-Type: text/html; charset=utf-8\r\n
//! \r\n
//! <h1>hola</h1>
//! ```

pub mod cursor;       // Posición + marca sobre el buffer
pub mod lexical;      // Clases de caracteres
pub mod request_line; // Método, path relativo y versión
pub mod headers;      // Bloque de headers
pub mod request;      // Request completo
pub mod response;     // Construcción de HTTP responses
pub mod status;       // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use cursor::{ByteCursor, Span};
pub use headers::{next_header, parse_headers, Header, HeaderBlock, HeaderList, HeaderStep, KnownHeader};
pub use request::{HttpRequest, Method, Rejection};
pub use request_line::{parse_relative_path, parse_request_line, RelativePath, RequestLine};
pub use response::Response;
pub use status::StatusCode;
