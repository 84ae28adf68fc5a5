//! # Parsing de Headers
//! src/http/headers.rs
//!
//! Bloque de headers `Name: value` terminado por una línea vacía
//! (`CRLF CRLF`). Se preserva el orden del wire y los duplicados.
//!
//! El parser avanza línea a línea con [`next_header`], así que el llamador
//! puede cortar cuando llega a su límite de headers sin que el parser
//! necesite conocerlo.

use super::cursor::{ByteCursor, Span};
use super::lexical::{is_header_name_char, is_header_value_char, is_whitespace};

/// Un header: spans de nombre y valor dentro del buffer del request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    name: Span,
    value: Span,
}

impl Header {
    pub fn new(name: Span, value: Span) -> Self {
        Self { name, value }
    }

    pub fn name(&self) -> Span {
        self.name
    }

    /// Valor sin espacios iniciales ni finales
    pub fn value(&self) -> Span {
        self.value
    }

    /// Clasifica el nombre contra la tabla de headers conocidos
    pub fn kind(&self, buffer: &[u8]) -> KnownHeader {
        KnownHeader::lookup(self.name.resolve(buffer))
    }
}

/// Headers que el servidor reconoce por nombre
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownHeader {
    Host,
    UserAgent,
    /// Cualquier nombre fuera de la tabla
    Other,
}

/// Tabla de nombres conocidos; la comparación ignora mayúsculas
const KNOWN_HEADERS: &[(&str, KnownHeader)] = &[
    ("Host", KnownHeader::Host),
    ("User-Agent", KnownHeader::UserAgent),
];

impl KnownHeader {
    /// Busca un nombre de header en la tabla
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::http::KnownHeader;
    ///
    /// assert_eq!(KnownHeader::lookup(b"user-agent"), KnownHeader::UserAgent);
    /// assert_eq!(KnownHeader::lookup(b"X-Custom"), KnownHeader::Other);
    /// ```
    pub fn lookup(name: &[u8]) -> Self {
        KNOWN_HEADERS
            .iter()
            .find(|(known, _)| known.as_bytes().eq_ignore_ascii_case(name))
            .map(|&(_, kind)| kind)
            .unwrap_or(KnownHeader::Other)
    }
}

/// Lista ordenada de headers (orden del wire, con duplicados)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderList {
    headers: Vec<Header>,
}

impl HeaderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, header: Header) {
        self.headers.push(header);
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn clear(&mut self) {
        self.headers.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Header> {
        self.headers.iter()
    }

    /// Primer header con ese nombre (sin distinguir mayúsculas)
    pub fn get<'a>(&self, buffer: &'a [u8], name: &str) -> Option<&'a [u8]> {
        self.headers
            .iter()
            .find(|h| h.name.resolve(buffer).eq_ignore_ascii_case(name.as_bytes()))
            .map(|h| h.value.resolve(buffer))
    }

    /// Primer header de un tipo conocido
    pub fn find<'a>(&self, buffer: &'a [u8], kind: KnownHeader) -> Option<&'a [u8]> {
        self.headers
            .iter()
            .find(|h| h.kind(buffer) == kind)
            .map(|h| h.value.resolve(buffer))
    }
}

impl<'l> IntoIterator for &'l HeaderList {
    type Item = &'l Header;
    type IntoIter = std::slice::Iter<'l, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.iter()
    }
}

/// Resultado de intentar parsear una línea del bloque
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStep {
    /// Se leyó un header completo
    Field(Header),
    /// Línea vacía: el bloque terminó y su CRLF fue consumido
    End,
    /// Línea sin `:` o sin nombre; el bloque entero es inválido
    Malformed,
}

/// Parsea la siguiente línea del bloque de headers
///
/// Las líneas sin CRLF final se toleran: la siguiente llamada seguirá desde
/// donde quedó el cursor. Al final del buffer sin línea vacía el resultado es
/// `Malformed`, porque no hay `:` que consumir.
pub fn next_header(cursor: &mut ByteCursor<'_>) -> HeaderStep {
    if cursor.consume_crlf() {
        return HeaderStep::End;
    }

    cursor.mark();
    cursor.advance_while(is_header_name_char);
    let name = cursor.span();
    if name.is_empty() {
        return HeaderStep::Malformed;
    }

    cursor.skip_whitespace();
    if !cursor.consume_byte(b':') {
        return HeaderStep::Malformed;
    }
    cursor.skip_whitespace();

    cursor.mark();
    cursor.advance_while(is_header_value_char);
    let value = cursor.span().trim_end_matching(cursor.buffer(), is_whitespace);

    // Sin line folding: una línea que empieza con espacio no tiene nombre
    cursor.consume_crlf();

    HeaderStep::Field(Header::new(name, value))
}

/// Bloque de headers completo
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderBlock {
    pub headers: HeaderList,
    /// `true` solo si el bloque terminó con su línea vacía
    pub valid: bool,
}

/// Parsea headers hasta la línea vacía, sin límite de cantidad
///
/// Con un bloque malformado se retornan los headers leídos hasta el fallo
/// y `valid == false`; el llamador debe descartarlos.
///
/// # Ejemplo
/// ```
/// use static_server::http::{parse_headers, ByteCursor};
///
/// let raw = b"A: 1\r\nB: 2\r\n\r\n";
/// let block = parse_headers(&mut ByteCursor::new(raw));
///
/// assert!(block.valid);
/// assert_eq!(block.headers.len(), 2);
/// assert_eq!(block.headers.get(raw, "b"), Some(&b"2"[..]));
/// ```
pub fn parse_headers(cursor: &mut ByteCursor<'_>) -> HeaderBlock {
    let mut block = HeaderBlock::default();

    loop {
        match next_header(cursor) {
            HeaderStep::Field(header) => block.headers.push(header),
            HeaderStep::End => {
                block.valid = true;
                return block;
            }
            HeaderStep::Malformed => return block,
        }
    }
}
