//! # Almacén de Archivos
//! src/store/mod.rs
//!
//! Colaborador que, dado el path de un request, retorna los bytes del
//! archivo o una señal de "no encontrado". El dispatcher solo conoce el
//! trait [`FileStore`]; [`DirectoryStore`] lo implementa sobre un directorio
//! del disco.
//!
//! ## Resolución de paths
//!
//! ```text
//! /                 -> <root>/index.html
//! /docs/            -> <root>/docs/index.html
//! /docs             -> <root>/docs/index.html   (si docs es un directorio)
//! /css/site.css     -> <root>/css/site.css
//! /../etc/passwd    -> Forbidden
//! ```
//!
//! Los escapes `%XX` no se decodifican: el path se usa tal como llegó.

pub mod mime;

pub use mime::content_type_for;

use crate::error::ServeError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Fuente de archivos para el dispatcher
pub trait FileStore: Send + Sync {
    /// Carga el recurso para `path` (el span de path del request)
    fn load(&self, path: &[u8]) -> Result<Vec<u8>, ServeError>;
}

/// Sirve archivos desde un directorio raíz
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    index_file: String,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>, index_file: &str) -> Self {
        Self {
            root: root.into(),
            index_file: index_file.to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Traduce un path de request a un archivo dentro de la raíz
    ///
    /// # Errores
    ///
    /// `ServeError::Forbidden` si el path no es UTF-8 o tiene un segmento
    /// `..` o una barra invertida.
    pub fn resolve(&self, path: &[u8]) -> Result<PathBuf, ServeError> {
        let text = std::str::from_utf8(path)
            .map_err(|_| ServeError::Forbidden(String::from_utf8_lossy(path).into_owned()))?;

        let mut resolved = self.root.clone();
        for segment in text.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return Err(ServeError::Forbidden(text.to_string())),
                s if s.contains('\\') => return Err(ServeError::Forbidden(text.to_string())),
                s => resolved.push(s),
            }
        }

        if text.ends_with('/') || resolved.is_dir() {
            resolved.push(&self.index_file);
        }

        Ok(resolved)
    }
}

impl FileStore for DirectoryStore {
    fn load(&self, path: &[u8]) -> Result<Vec<u8>, ServeError> {
        let file = self.resolve(path)?;

        fs::read(&file).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                ServeError::NotFound(String::from_utf8_lossy(path).into_owned())
            }
            _ => ServeError::Io(e),
        })
    }
}
