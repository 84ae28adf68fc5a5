//! # Predicados Léxicos
//! src/http/lexical.rs
//!
//! Clasificadores de bytes usados por todos los parsers. Siguen las clases
//! de caracteres de RFC 1945 §3.2.1:
//!
//! ```text
//! safe       = "$" | "-" | "_" | "."
//! extra      = "!" | "*" | "'" | "(" | ")" | ","
//! reserved   = ";" | "/" | "?" | ":" | "@" | "&" | "=" | "+"
//! unreserved = ALPHA | DIGIT | safe | extra
//! pchar      = unreserved | escape | ":" | "@" | "&" | "=" | "+"
//! ```
//!
//! No se decodifica nada: un escape `%XX` se acepta como bytes crudos.

/// Letras, `-` y `_`: tokens de método y keywords como `HTTP`
pub fn is_method_char(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'-' || c == b'_'
}

pub fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

/// Solo espacio y tab
pub fn is_whitespace(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

pub fn is_safe(c: u8) -> bool {
    matches!(c, b'$' | b'-' | b'_' | b'.')
}

pub fn is_extra(c: u8) -> bool {
    matches!(c, b'!' | b'*' | b'\'' | b'(' | b')' | b',')
}

pub fn is_reserved(c: u8) -> bool {
    matches!(c, b';' | b'/' | b'?' | b':' | b'@' | b'&' | b'=' | b'+')
}

pub fn is_unreserved(c: u8) -> bool {
    c.is_ascii_alphanumeric() || is_safe(c) || is_extra(c)
}

/// `pchar`, con `%` aceptado tal cual para los escapes
pub fn is_path_char(c: u8) -> bool {
    is_unreserved(c) || matches!(c, b'%' | b':' | b'@' | b'&' | b'=' | b'+')
}

/// Bytes de un segmento de path: `pchar` más el separador `/`
pub fn is_segment_char(c: u8) -> bool {
    is_path_char(c) || c == b'/'
}

/// Bytes de `;params`: `pchar`, `/` y `;` entre parámetros
pub fn is_param_char(c: u8) -> bool {
    is_segment_char(c) || c == b';'
}

/// Bytes de `?query`: `pchar` más todo `reserved`
pub fn is_query_char(c: u8) -> bool {
    is_path_char(c) || is_reserved(c)
}

/// ASCII imprimible: `0x21..=0x7E`
pub fn is_printable(c: u8) -> bool {
    (0x21..=0x7E).contains(&c)
}

/// Nombre de header tolerante: cualquier imprimible salvo `:`
pub fn is_header_name_char(c: u8) -> bool {
    is_printable(c) && c != b':'
}

/// Valor de header: imprimibles más espacios y tabs interiores
pub fn is_header_value_char(c: u8) -> bool {
    is_printable(c) || is_whitespace(c)
}
