//! # Parsing de la Request Line
//! src/http/request_line.rs
//!
//! Parser descendente recursivo de la primera línea del request
//! (RFC 1945 §5.1):
//!
//! ```text
//! Simple-Request = "GET" SP Request-URI CRLF                 ; HTTP/0.9
//! Request-Line   = Method SP Request-URI SP HTTP-Version CRLF ; HTTP/1.0
//! ```
//!
//! Solo se aceptan targets en forma de path absoluto (`/...`). Esquemas,
//! authority y `*` se rechazan.
//!
//! El parser es terminal en el primer fallo: retorna una `RequestLine` con
//! `valid == false` y los spans que alcanzó a capturar, que no son
//! confiables.

use super::cursor::{ByteCursor, Span};
use super::lexical::{
    is_method_char, is_param_char, is_query_char, is_segment_char, is_whitespace,
};

/// Target del request: `path [";" params] ["?" query]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelativePath {
    pub(crate) path: Span,
    pub(crate) params: Option<Span>,
    pub(crate) query: Option<Span>,
    pub(crate) valid: bool,
}

impl RelativePath {
    pub fn path(&self) -> Span {
        self.path
    }

    /// Span de `params`, sin el `;` inicial
    pub fn params(&self) -> Option<Span> {
        self.params
    }

    /// Span de `query`, sin el `?` inicial
    pub fn query(&self) -> Option<Span> {
        self.query
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Request line parseada
///
/// Los spans apuntan al buffer del request; la estructura se descarta junto
/// con él.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestLine {
    pub(crate) method: Span,
    pub(crate) relative_path: RelativePath,
    pub(crate) http_major: u32,
    pub(crate) http_minor: u32,
    pub(crate) is_simple: bool,
    pub(crate) valid: bool,
}

impl RequestLine {
    pub fn method(&self) -> Span {
        self.method
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    pub fn http_major(&self) -> u32 {
        self.http_major
    }

    pub fn http_minor(&self) -> u32 {
        self.http_minor
    }

    /// `true` para un request HTTP/0.9 sin token de versión
    pub fn is_simple(&self) -> bool {
        self.is_simple
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Parsea la request line desde la posición actual del cursor
///
/// Al retornar una línea válida el cursor queda justo después del CRLF.
///
/// # Ejemplo
/// ```
/// use static_server::http::{parse_request_line, ByteCursor};
///
/// let raw = b"GET /docs/index.html?lang=es HTTP/1.0\r\n";
/// let mut cursor = ByteCursor::new(raw);
/// let line = parse_request_line(&mut cursor);
///
/// assert!(line.is_valid());
/// assert_eq!(line.method().resolve(raw), b"GET");
/// assert_eq!(line.relative_path().path().resolve(raw), b"/docs/index.html");
/// assert_eq!((line.http_major(), line.http_minor()), (1, 0));
/// ```
pub fn parse_request_line(cursor: &mut ByteCursor<'_>) -> RequestLine {
    let mut line = RequestLine::default();

    // Tolerado aunque RFC 1945 no lo permite
    cursor.skip_whitespace();

    // Cualquier token sirve: el dispatcher es quien valida el método
    cursor.mark();
    cursor.advance_while(is_method_char);
    line.method = cursor.span();

    // Un SP según la RFC; aceptamos cualquier cantidad
    cursor.skip_whitespace();

    if !cursor.at_byte(b'/') {
        return line;
    }

    line.relative_path = parse_relative_path(cursor);
    if !line.relative_path.valid {
        return line;
    }

    cursor.skip_whitespace();

    // Sin versión: Simple-Request de HTTP/0.9
    if cursor.consume_crlf() {
        line.is_simple = true;
        line.http_major = 0;
        line.http_minor = 9;
        line.valid = true;
        return line;
    }

    cursor.mark();
    cursor.advance_while(is_method_char);
    if cursor.marked_bytes() != b"HTTP" {
        return line;
    }

    if !cursor.consume_byte(b'/') {
        return line;
    }
    line.http_major = cursor.read_decimal();

    if !cursor.consume_byte(b'.') {
        return line;
    }
    line.http_minor = cursor.read_decimal();

    cursor.skip_whitespace();
    if !cursor.consume_crlf() {
        return line;
    }

    line.valid = true;
    line
}

/// Parsea `path [";" params] ["?" query]` empezando en el `/` inicial
///
/// El resultado solo es válido si el scan termina sobre un espacio o tab, o
/// sobre el CRLF de un Simple-Request. Así se rechazan targets con bytes de
/// control o fragmentos `#` sin una gramática aparte.
pub fn parse_relative_path(cursor: &mut ByteCursor<'_>) -> RelativePath {
    let mut relative = RelativePath::default();

    cursor.mark();
    cursor.advance_while(is_segment_char);
    relative.path = cursor.span();

    if cursor.consume_byte(b';') {
        cursor.mark();
        cursor.advance_while(is_param_char);
        relative.params = Some(cursor.span());
    }

    if cursor.consume_byte(b'?') {
        cursor.mark();
        cursor.advance_while(is_query_char);
        relative.query = Some(cursor.span());
    }

    relative.valid = cursor.at(is_whitespace) || cursor.check_crlf();
    relative
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &[u8]) -> RequestLine {
        parse_request_line(&mut ByteCursor::new(raw))
    }

    #[test]
    fn test_full_request_line() {
        let raw = b"GET /index.html HTTP/1.0\r\n";
        let line = parse(raw);

        assert!(line.is_valid());
        assert!(!line.is_simple());
        assert_eq!(line.method().resolve(raw), b"GET");
        assert_eq!(line.relative_path().path().resolve(raw), b"/index.html");
        assert_eq!(line.http_major(), 1);
        assert_eq!(line.http_minor(), 0);
    }

    #[test]
    fn test_cursor_ends_after_crlf() {
        let raw = b"GET / HTTP/1.0\r\nHost: x\r\n\r\n";
        let mut cursor = ByteCursor::new(raw);
        assert!(parse_request_line(&mut cursor).is_valid());
        assert_eq!(&raw[cursor.position()..], b"Host: x\r\n\r\n");
    }

    #[test]
    fn test_simple_request() {
        let raw = b"GET /readme.txt\r\n";
        let line = parse(raw);

        assert!(line.is_valid());
        assert!(line.is_simple());
        assert_eq!(line.http_minor(), 9);
        assert_eq!(line.relative_path().path().resolve(raw), b"/readme.txt");
    }

    #[test]
    fn test_simple_request_with_trailing_whitespace() {
        let line = parse(b"GET /  \t\r\n");
        assert!(line.is_valid());
        assert!(line.is_simple());
    }

    #[test]
    fn test_leading_and_repeated_whitespace_tolerated() {
        let raw = b" \tGET \t /a  HTTP/1.1 \r\n";
        let line = parse(raw);

        assert!(line.is_valid());
        assert_eq!(line.method().resolve(raw), b"GET");
        assert_eq!(line.relative_path().path().resolve(raw), b"/a");
        assert_eq!((line.http_major(), line.http_minor()), (1, 1));
    }

    #[test]
    fn test_any_method_token_accepted() {
        let raw = b"BREW /pot HTTP/1.0\r\n";
        let line = parse(raw);
        assert!(line.is_valid());
        assert_eq!(line.method().resolve(raw), b"BREW");
    }

    #[test]
    fn test_params_and_query() {
        let raw = b"GET /a/b;type=a?x=1&y=/z HTTP/1.0\r\n";
        let line = parse(raw);
        let relative = line.relative_path();

        assert!(line.is_valid());
        assert_eq!(relative.path().resolve(raw), b"/a/b");
        assert_eq!(relative.params().map(|s| s.resolve(raw)), Some(&b"type=a"[..]));
        assert_eq!(relative.query().map(|s| s.resolve(raw)), Some(&b"x=1&y=/z"[..]));
    }

    #[test]
    fn test_query_without_params() {
        let raw = b"GET /search?q=rust HTTP/1.0\r\n";
        let line = parse(raw);

        assert!(line.relative_path().params().is_none());
        assert_eq!(line.relative_path().query().map(|s| s.resolve(raw)), Some(&b"q=rust"[..]));
    }

    #[test]
    fn test_empty_query() {
        let raw = b"GET /x? HTTP/1.0\r\n";
        let line = parse(raw);
        assert!(line.is_valid());
        assert_eq!(line.relative_path().query(), Some(Span::new(7, 0)));
    }

    #[test]
    fn test_escapes_are_not_decoded() {
        let raw = b"GET /hello%20world HTTP/1.0\r\n";
        let line = parse(raw);
        assert_eq!(line.relative_path().path().resolve(raw), b"/hello%20world");
    }

    #[test]
    fn test_absolute_uri_rejected() {
        assert!(!parse(b"GET http://x/ HTTP/1.0\r\n").is_valid());
    }

    #[test]
    fn test_asterisk_rejected() {
        assert!(!parse(b"OPTIONS * HTTP/1.0\r\n").is_valid());
    }

    #[test]
    fn test_fragment_rejected() {
        let line = parse(b"GET /page#top HTTP/1.0\r\n");
        assert!(!line.is_valid());
        assert!(!line.relative_path().is_valid());
    }

    #[test]
    fn test_control_byte_in_path_rejected() {
        assert!(!parse(b"GET /a\x01b HTTP/1.0\r\n").is_valid());
    }

    #[test]
    fn test_missing_crlf_rejected() {
        assert!(!parse(b"GET / HTTP/1.0").is_valid());
        assert!(!parse(b"GET / HTTP/1.0\n").is_valid());
        assert!(!parse(b"GET /").is_valid());
    }

    #[test]
    fn test_bad_http_literal() {
        assert!(!parse(b"GET / HTTPS/1.0\r\n").is_valid());
        assert!(!parse(b"GET / http/1.0\r\n").is_valid());
        assert!(!parse(b"GET / FOO\r\n").is_valid());
    }

    #[test]
    fn test_missing_version_separators() {
        assert!(!parse(b"GET / HTTP1.0\r\n").is_valid());
        assert!(!parse(b"GET / HTTP/10\r\n").is_valid());
        assert!(!parse(b"GET / HTTP/1.x\r\n").is_valid());
    }

    #[test]
    fn test_empty_digit_runs_are_zero() {
        let line = parse(b"GET / HTTP/.\r\n");
        assert!(line.is_valid());
        assert_eq!((line.http_major(), line.http_minor()), (0, 0));
    }

    #[test]
    fn test_relative_path_terminates_on_crlf() {
        let raw = b"/a;b?c\r\n";
        let relative = parse_relative_path(&mut ByteCursor::new(raw));
        assert!(relative.is_valid());
        assert_eq!(relative.path().resolve(raw), b"/a");
    }

    #[test]
    fn test_relative_path_at_end_of_buffer_is_invalid() {
        let relative = parse_relative_path(&mut ByteCursor::new(b"/a"));
        assert!(!relative.is_valid());
    }
}
