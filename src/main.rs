//! # Static Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor de archivos HTTP/1.0.

use env_logger::{Builder, Env};
use log::error;
use static_server::config::Config;
use static_server::server::Server;

fn main() {
    // Crear configuración desde CLI y variables de entorno
    let config = Config::new();

    Builder::from_env(Env::default().default_filter_or(config.log_level.as_str())).init();

    if let Err(e) = config.validate() {
        error!("configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.log_summary();

    let server = match Server::bind(config.clone()) {
        Ok(server) => server,
        Err(e) => {
            error!("no se pudo hacer bind en {}: {}", config.address(), e);
            std::process::exit(1);
        }
    };

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        error!("error fatal: {}", e);
        std::process::exit(1);
    }
}
