//! # Pool de Workers
//! src/pool/worker.rs
//!
//! Conjunto fijo de threads de larga vida. Cada worker repite para siempre:
//! desencolar (bloqueando), ejecutar el handler, descartar la tarea.
//!
//! Un handler que falla o hace panic nunca tumba al worker: el error se
//! registra y el worker vuelve a la cola.

use super::queue::TaskQueue;
use crate::error::ServeError;
use log::{error, info, warn};
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Pool de tamaño fijo atado a una sola cola
///
/// No hay shutdown: los workers viven lo que vive el proceso.
pub struct WorkerPool {
    /// Un thread por worker, en orden de id
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Lanza `size` workers que consumen `queue` con `handler`
    ///
    /// # Errores
    ///
    /// Falla si el sistema operativo no puede crear alguno de los threads.
    ///
    /// # Ejemplo
    /// ```
    /// use static_server::pool::{TaskQueue, WorkerPool};
    /// use std::sync::mpsc;
    ///
    /// let queue = TaskQueue::new();
    /// let (done, results) = mpsc::channel();
    /// let done = std::sync::Mutex::new(done);
    ///
    /// let pool = WorkerPool::spawn(2, queue.clone(), move |n: u32| {
    ///     done.lock().unwrap().send(n * 2).unwrap();
    ///     Ok(())
    /// }).unwrap();
    ///
    /// queue.enqueue(21);
    /// assert_eq!(results.recv().unwrap(), 42);
    /// assert_eq!(pool.size(), 2);
    /// ```
    pub fn spawn<T, F>(size: usize, queue: TaskQueue<T>, handler: F) -> io::Result<Self>
    where
        T: Send + 'static,
        F: Fn(T) -> Result<(), ServeError> + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        let mut workers = Vec::with_capacity(size);

        for id in 0..size {
            let queue = queue.clone();
            let handler = Arc::clone(&handler);

            let handle = thread::Builder::new()
                .name(format!("worker-{}", id))
                .spawn(move || Self::worker_loop(id, queue, handler))?;

            workers.push(handle);
        }

        Ok(Self { workers })
    }

    /// Loop principal del worker
    fn worker_loop<T, F>(id: usize, queue: TaskQueue<T>, handler: Arc<F>)
    where
        F: Fn(T) -> Result<(), ServeError>,
    {
        info!("worker-{} iniciado", id);

        loop {
            // Esperar por una tarea
            let task = queue.dequeue();

            match panic::catch_unwind(AssertUnwindSafe(|| (*handler)(task))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) if e.is_io() => error!("worker-{}: {}", id, e),
                Ok(Err(e)) => warn!("worker-{}: {}", id, e),
                Err(_) => error!("worker-{}: el handler hizo panic, tarea descartada", id),
            }
        }
    }

    /// Cantidad de workers
    pub fn size(&self) -> usize {
        self.workers.len()
    }
}
