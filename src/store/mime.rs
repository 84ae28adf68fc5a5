//! # Tipos de Contenido
//! src/store/mime.rs
//!
//! Tabla estática extensión → `Content-Type`. La búsqueda es por igualdad
//! exacta (sin distinguir mayúsculas) sobre la extensión del último segmento.

/// Tipo para archivos sin extensión o con una extensión desconocida
pub const DEFAULT_CONTENT_TYPE: &str = "text/html; charset=utf-8";

const CONTENT_TYPES: &[(&str, &str)] = &[
    ("html", "text/html; charset=utf-8"),
    ("htm", "text/html; charset=utf-8"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("txt", "text/plain; charset=utf-8"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
];

/// Elige el `Content-Type` para un path de request
///
/// # Ejemplo
/// ```
/// use static_server::store::content_type_for;
///
/// assert_eq!(content_type_for(b"/favicon.ico"), "image/x-icon");
/// assert_eq!(content_type_for(b"/"), "text/html; charset=utf-8");
/// ```
pub fn content_type_for(path: &[u8]) -> &'static str {
    let file_name = path.rsplit(|&b| b == b'/').next().unwrap_or(path);

    let extension = match file_name.iter().rposition(|&b| b == b'.') {
        Some(dot) => &file_name[dot + 1..],
        None => return DEFAULT_CONTENT_TYPE,
    };

    CONTENT_TYPES
        .iter()
        .find(|(ext, _)| ext.as_bytes().eq_ignore_ascii_case(extension))
        .map(|&(_, content_type)| content_type)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
