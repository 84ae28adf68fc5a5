//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor de archivos con soporte para argumentos CLI y
//! variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./static_server --port 5556 \
//!   --root ./files_to_serve \
//!   --workers 4 \
//!   --max-request-bytes 8192
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_HOST=0.0.0.0 WORKERS=8 ./static_server
//! ```

use clap::Parser;
use log::info;

/// Tamaño mínimo del buffer de request: cabe `GET / HTTP/1.0\r\n\r\n`
const MIN_REQUEST_BYTES: usize = 16;

/// Configuración del servidor HTTP
#[derive(Debug, Clone, Parser)]
#[command(name = "static_server")]
#[command(about = "Servidor HTTP/0.9-1.0 de archivos estáticos con pool fijo de workers")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "5556", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio desde el que se sirven los archivos
    #[arg(long = "root", default_value = "./files_to_serve", env = "ROOT_DIR")]
    pub root_dir: String,

    /// Archivo que se sirve para `/` y para directorios
    #[arg(long = "index", default_value = "index.html", env = "INDEX_FILE")]
    pub index_file: String,

    // === Workers ===
    /// Número fijo de workers que atienden conexiones
    #[arg(short, long, default_value = "2", env = "WORKERS")]
    pub workers: usize,

    // === Límites ===
    /// Máximo de bytes aceptados en un request
    #[arg(long = "max-request-bytes", default_value = "4096", env = "MAX_REQUEST_BYTES")]
    pub max_request_bytes: usize,

    /// Máximo de bytes de una respuesta codificada (headers + body)
    #[arg(long = "max-response-bytes", default_value = "1048576", env = "MAX_RESPONSE_BYTES")]
    pub max_response_bytes: usize,

    /// Máximo de headers por request
    #[arg(long = "max-headers", default_value = "64", env = "MAX_HEADERS")]
    pub max_headers: usize,

    // === Logging ===
    /// Nivel de log por defecto (RUST_LOG tiene prioridad)
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use static_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:5556");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Workers must be >= 1".to_string());
        }

        if self.max_request_bytes < MIN_REQUEST_BYTES {
            return Err(format!("Max request bytes must be >= {}", MIN_REQUEST_BYTES));
        }

        if self.max_response_bytes == 0 {
            return Err("Max response bytes must be > 0".to_string());
        }

        if self.max_headers == 0 {
            return Err("Max headers must be >= 1".to_string());
        }

        if self.index_file.is_empty() || self.index_file.contains('/') {
            return Err("Index file must be a plain file name".to_string());
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn log_summary(&self) {
        info!("Static HTTP/1.0 Server Configuration");
        info!("  Address:        {}", self.address());
        info!("  Root dir:       {}", self.root_dir);
        info!("  Index file:     {}", self.index_file);
        info!("  Workers:        {}", self.workers);
        info!("  Max request:    {} bytes", self.max_request_bytes);
        info!("  Max response:   {} bytes", self.max_response_bytes);
        info!("  Max headers:    {}", self.max_headers);
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 5556,
            host: "127.0.0.1".to_string(),
            root_dir: "./files_to_serve".to_string(),
            index_file: "index.html".to_string(),
            workers: 2,
            max_request_bytes: 4096,
            max_response_bytes: 1_048_576,
            max_headers: 64,
            log_level: "info".to_string(),
        }
    }
}
