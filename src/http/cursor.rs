//! # Cursor de Bytes
//! src/http/cursor.rs
//!
//! Posición de lectura más una "marca" sobre un buffer inmutable. Todos los
//! parsers del módulo `http` se construyen sobre estas primitivas.
//!
//! El patrón de uso es siempre el mismo:
//!
//! ```text
//! cursor.mark();                  // inicio del span
//! cursor.advance_while(pred);     // while (pred) advance()
//! let span = cursor.span();       // (mark, position - mark)
//! ```
//!
//! Invariante: `0 <= mark <= position <= buffer.len()`.

use std::fmt;

/// Referencia `(offset, len)` a un rango del buffer original
///
/// Nunca es una copia: para leer su contenido hay que resolverla contra el
/// mismo buffer que se parseó.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    offset: usize,
    len: usize,
}

impl Span {
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Posición del primer byte después del span
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Obtiene los bytes del span dentro de `buffer`
    ///
    /// Si el span no cabe en el buffer (buffer distinto al parseado) se
    /// retorna un slice vacío en vez de hacer panic.
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::http::Span;
    ///
    /// let span = Span::new(4, 5);
    /// assert_eq!(span.resolve(b"GET /index HTTP/1.0"), b"/inde");
    /// ```
    pub fn resolve<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        buffer.get(self.offset..self.end()).unwrap_or(&[])
    }

    /// Recorta bytes del final mientras cumplan el predicado
    pub(crate) fn trim_end_matching(self, buffer: &[u8], pred: fn(u8) -> bool) -> Self {
        let bytes = self.resolve(buffer);
        let trailing = bytes.iter().rev().take_while(|&&b| pred(b)).count();
        Self::new(self.offset, self.len - trailing)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.offset, self.end())
    }
}

/// Cursor mutable sobre un buffer de request
///
/// Cada llamada de parsing es dueña de su propio cursor: no hay estado global
/// compartido, así que parsear es reentrante y seguro entre workers.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    buffer: &'a [u8],
    position: usize,
    mark: usize,
}

impl<'a> ByteCursor<'a> {
    /// Crea un cursor al inicio del buffer
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
            mark: 0,
        }
    }

    pub fn buffer(&self) -> &'a [u8] {
        self.buffer
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.buffer.len()
    }

    /// Byte en la posición actual, sin consumirlo
    ///
    /// Al final del buffer retorna `None`, el equivalente al NUL terminal:
    /// ningún predicado lo acepta.
    pub fn peek(&self) -> Option<u8> {
        self.buffer.get(self.position).copied()
    }

    /// Byte `offset` posiciones más adelante, sin consumir nada
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.buffer.get(self.position + offset).copied()
    }

    /// ¿El byte actual cumple el predicado?
    pub fn at(&self, pred: fn(u8) -> bool) -> bool {
        self.peek().map_or(false, pred)
    }

    /// ¿El byte actual es exactamente `byte`?
    pub fn at_byte(&self, byte: u8) -> bool {
        self.peek() == Some(byte)
    }

    /// Avanza un byte; al final del buffer no hace nada
    pub fn advance(&mut self) {
        if !self.is_at_end() {
            self.position += 1;
        }
    }

    /// `while (pred) advance()`
    pub fn advance_while(&mut self, pred: fn(u8) -> bool) {
        while self.at(pred) {
            self.position += 1;
        }
    }

    /// Registra la posición actual como inicio del próximo span
    pub fn mark(&mut self) {
        self.mark = self.position;
    }

    /// `position - mark`
    pub fn span_len(&self) -> usize {
        self.position - self.mark
    }

    /// Span desde la marca hasta la posición actual
    pub fn span(&self) -> Span {
        Span::new(self.mark, self.span_len())
    }

    /// Bytes desde la marca hasta la posición actual
    pub fn marked_bytes(&self) -> &'a [u8] {
        &self.buffer[self.mark..self.position]
    }

    /// Salta espacios y tabs (nunca CR/LF ni tab vertical)
    pub fn skip_whitespace(&mut self) {
        self.advance_while(super::lexical::is_whitespace);
    }

    /// Lookahead de dos bytes: ¿estamos sobre `\r\n`? No consume nada.
    pub fn check_crlf(&self) -> bool {
        self.peek() == Some(b'\r') && self.peek_at(1) == Some(b'\n')
    }

    /// Consume exactamente `\r\n`
    ///
    /// Si alguno de los dos bytes no coincide retorna `false` y el cursor
    /// queda donde estaba: así el llamador puede distinguir "fin de headers"
    /// de "línea malformada" con la misma primitiva.
    pub fn consume_crlf(&mut self) -> bool {
        if self.check_crlf() {
            self.position += 2;
            true
        } else {
            false
        }
    }

    /// Consume `byte` si es el byte actual
    pub fn consume_byte(&mut self, byte: u8) -> bool {
        if self.at_byte(byte) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Lee un entero decimal sin signo
    ///
    /// Una racha vacía de dígitos vale `0`. El valor satura en `u32::MAX` en
    /// vez de desbordar.
    pub fn read_decimal(&mut self) -> u32 {
        self.mark();
        self.advance_while(super::lexical::is_digit);
        self.marked_bytes()
            .iter()
            .fold(0u32, |acc, &d| acc.saturating_mul(10).saturating_add(u32::from(d - b'0')))
    }
}
