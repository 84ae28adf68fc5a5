//! # Servidor TCP con Pool de Workers
//! src/server/tcp.rs
//!
//! El thread principal solo acepta conexiones y las encola. Un pool fijo de
//! workers las desencola y cada uno atiende su conexión completa con el
//! [`Dispatcher`].
//!
//! ```text
//! listener.accept() ─▶ Task ─▶ TaskQueue ─▶ worker-N ─▶ Dispatcher::serve
//! ```

use super::dispatcher::{Dispatcher, Limits};
use crate::config::Config;
use crate::pool::{TaskQueue, WorkerPool};
use crate::store::{DirectoryStore, FileStore};
use log::{debug, error, info, warn};
use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;

/// Una conexión aceptada esperando a un worker
///
/// El worker que la desencola es su único dueño.
pub struct Task {
    pub id: u64,
    pub stream: TcpStream,
    pub peer: SocketAddr,
}

/// Servidor HTTP/1.0 de archivos estáticos
pub struct Server {
    config: Config,
    listener: TcpListener,
    queue: TaskQueue<Task>,
    dispatcher: Arc<Dispatcher>,
    next_task_id: u64,
}

impl Server {
    /// Hace bind en `config.address()` y sirve archivos desde `config.root_dir`
    pub fn bind(config: Config) -> io::Result<Self> {
        let store = DirectoryStore::new(&config.root_dir, &config.index_file);
        if !store.root().is_dir() {
            warn!("el directorio raíz {} no existe", store.root().display());
        }

        Self::with_store(config, Arc::new(store))
    }

    /// Igual que [`Server::bind`] pero con un store arbitrario
    pub fn with_store(config: Config, store: Arc<dyn FileStore>) -> io::Result<Self> {
        let listener = TcpListener::bind(config.address())?;
        let dispatcher = Dispatcher::new(store, Limits::from_config(&config));

        Ok(Self {
            config,
            listener,
            queue: TaskQueue::new(),
            dispatcher: Arc::new(dispatcher),
            next_task_id: 0,
        })
    }

    /// Dirección real del listener (útil con el puerto 0)
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Lanza los workers y acepta conexiones para siempre
    ///
    /// Solo retorna si no se pudo crear el pool.
    pub fn run(mut self) -> io::Result<()> {
        let dispatcher = Arc::clone(&self.dispatcher);
        let pool = WorkerPool::spawn(self.config.workers, self.queue.clone(), move |task: Task| {
            debug!("task {} de {}", task.id, task.peer);
            dispatcher.serve(task.stream)
        })?;

        info!(
            "escuchando en {} con {} workers",
            self.local_addr()?,
            pool.size()
        );

        loop {
            match self.listener.accept() {
                Ok((stream, peer)) => {
                    let task = Task {
                        id: self.next_task_id,
                        stream,
                        peer,
                    };
                    self.next_task_id += 1;

                    debug!("conexión {} desde {}", task.id, peer);
                    self.queue.enqueue(task);
                }
                Err(e) => {
                    // Una conexión fallida no detiene el acceptor
                    error!("error al aceptar conexión: {}", e);
                }
            }
        }
    }
}
