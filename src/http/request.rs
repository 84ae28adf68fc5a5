//! # Parsing de Requests HTTP/0.9 y HTTP/1.0
//! src/http/request.rs
//!
//! Une la request line y el bloque de headers sobre un mismo buffer.
//!
//! ## Formato de un Request
//!
//! ```text
//! GET /path;params?query HTTP/1.0\r\n     <- Full-Request (HTTP/1.0)
//! Host: localhost:5556\r\n
//! User-Agent: curl/7.68.0\r\n
//! \r\n
//!
//! GET /path\r\n                           <- Simple-Request (HTTP/0.9, sin headers)
//! ```
//!
//! Nada de esto copia bytes: el `HttpRequest` presta el buffer recibido y
//! guarda spans dentro de él.

use super::cursor::{ByteCursor, Span};
use super::headers::{next_header, HeaderList, HeaderStep};
use super::request_line::{parse_request_line, RequestLine};

/// Métodos HTTP reconocidos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// HEAD - Como GET pero solo retorna headers
    HEAD,

    /// POST - Reconocido pero no servido por un servidor de archivos
    POST,
}

/// Tabla de métodos; los métodos distinguen mayúsculas (RFC 1945 §5.1.1)
const METHODS: &[(&[u8], Method)] = &[
    (b"GET", Method::GET),
    (b"HEAD", Method::HEAD),
    (b"POST", Method::POST),
];

impl Method {
    /// Busca el token exacto en la tabla de métodos
    ///
    /// Un token desconocido es un caso explícito (`None`), no un error.
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::http::Method;
    ///
    /// assert_eq!(Method::lookup(b"HEAD"), Some(Method::HEAD));
    /// assert_eq!(Method::lookup(b"get"), None);
    /// ```
    pub fn lookup(token: &[u8]) -> Option<Self> {
        METHODS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|&(_, method)| method)
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
        }
    }
}

/// Motivo por el que un request quedó inválido
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Request line malformada (target, versión o CRLF)
    RequestLine,
    /// Línea de header sin `:`, sin nombre o bloque sin línea vacía
    HeaderBlock,
    /// Se superó el máximo de headers permitido
    TooManyHeaders,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::RequestLine => write!(f, "invalid request line"),
            Rejection::HeaderBlock => write!(f, "malformed header block"),
            Rejection::TooManyHeaders => write!(f, "too many headers"),
        }
    }
}

/// Request parseado sobre un buffer prestado
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest<'a> {
    buffer: &'a [u8],
    request_line: RequestLine,
    headers: HeaderList,
    rejection: Option<Rejection>,
}

impl<'a> HttpRequest<'a> {
    /// Parsea un request completo desde bytes
    ///
    /// `max_headers` limita cuántos headers se guardan: uno más invalida el
    /// request. Si el request es inválido la lista de headers queda vacía.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use static_server::http::{HttpRequest, Method};
    ///
    /// let raw = b"GET /index.html HTTP/1.0\r\nHost: localhost\r\n\r\n";
    /// let request = HttpRequest::parse(raw, 64);
    ///
    /// assert!(request.is_valid());
    /// assert_eq!(request.method(), Some(Method::GET));
    /// assert_eq!(request.path(), b"/index.html");
    /// assert_eq!(request.header("host"), Some(&b"localhost"[..]));
    /// ```
    pub fn parse(buffer: &'a [u8], max_headers: usize) -> Self {
        let mut cursor = ByteCursor::new(buffer);
        let request_line = parse_request_line(&mut cursor);

        let mut request = Self {
            buffer,
            request_line,
            headers: HeaderList::new(),
            rejection: None,
        };

        if !request_line.is_valid() {
            request.rejection = Some(Rejection::RequestLine);
            return request;
        }

        // HTTP/0.9 no tiene bloque de headers
        if request_line.is_simple() {
            return request;
        }

        loop {
            match next_header(&mut cursor) {
                HeaderStep::Field(header) => {
                    if request.headers.len() == max_headers {
                        request.reject(Rejection::TooManyHeaders);
                        break;
                    }
                    request.headers.push(header);
                }
                HeaderStep::End => break,
                HeaderStep::Malformed => {
                    request.reject(Rejection::HeaderBlock);
                    break;
                }
            }
        }

        request
    }

    fn reject(&mut self, rejection: Rejection) {
        self.rejection = Some(rejection);
        self.headers.clear();
    }

    /// `true` si la request line y el bloque de headers son válidos
    pub fn is_valid(&self) -> bool {
        self.rejection.is_none()
    }

    pub fn rejection(&self) -> Option<Rejection> {
        self.rejection
    }

    pub fn buffer(&self) -> &'a [u8] {
        self.buffer
    }

    pub fn request_line(&self) -> &RequestLine {
        &self.request_line
    }

    pub fn headers(&self) -> &HeaderList {
        &self.headers
    }

    /// Bytes del token de método, tal como llegaron
    pub fn method_token(&self) -> &'a [u8] {
        self.request_line.method().resolve(self.buffer)
    }

    /// Método reconocido, `None` si el token no está en la tabla
    pub fn method(&self) -> Option<Method> {
        Method::lookup(self.method_token())
    }

    /// Path sin params ni query, sin decodificar
    pub fn path(&self) -> &'a [u8] {
        self.resolve(self.request_line.relative_path().path())
    }

    pub fn params(&self) -> Option<&'a [u8]> {
        self.request_line.relative_path().params().map(|s| self.resolve(s))
    }

    pub fn query(&self) -> Option<&'a [u8]> {
        self.request_line.relative_path().query().map(|s| self.resolve(s))
    }

    /// Versión como `(major, minor)`; `(0, 9)` para un Simple-Request
    pub fn version(&self) -> (u32, u32) {
        (self.request_line.http_major(), self.request_line.http_minor())
    }

    /// Primer header con ese nombre (sin distinguir mayúsculas)
    pub fn header(&self, name: &str) -> Option<&'a [u8]> {
        self.headers.get(self.buffer, name)
    }

    fn resolve(&self, span: Span) -> &'a [u8] {
        span.resolve(self.buffer)
    }
}
