//! # Cola de Tareas
//! src/pool/queue.rs
//!
//! Cola FIFO thread-safe que pasa conexiones aceptadas del acceptor a los
//! workers. Un mutex protege la cola y una condvar despierta a un worker por
//! cada tarea encolada.
//!
//! `enqueue` nunca bloquea esperando workers; `dequeue` duerme mientras la
//! cola esté vacía.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

/// Cola FIFO compartida entre threads
///
/// Clonar la cola produce otro handle a la misma cola.
pub struct TaskQueue<T> {
    /// Tareas pendientes, la más antigua al frente
    tasks: Arc<Mutex<VecDeque<T>>>,

    /// Se notifica una vez por cada tarea encolada
    available: Arc<Condvar>,
}

impl<T> TaskQueue<T> {
    /// Crea una cola vacía
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(Mutex::new(VecDeque::new())),
            available: Arc::new(Condvar::new()),
        }
    }

    /// Ninguna sección crítica hace panic con el lock tomado, así que un
    /// mutex envenenado sigue teniendo una cola consistente.
    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Encola una tarea al final, en O(1)
    pub fn enqueue(&self, task: T) {
        let mut tasks = self.lock();
        tasks.push_back(task);

        // Una tarea nueva alcanza para despertar a un solo worker
        self.available.notify_one();
    }

    /// Desencola la tarea más antigua
    ///
    /// Bloquea hasta que haya una tarea disponible. Un despertar espurio con
    /// la cola vacía vuelve a esperar.
    pub fn dequeue(&self) -> T {
        let mut tasks = self.lock();

        loop {
            if let Some(task) = tasks.pop_front() {
                return task;
            }

            // Esperar a que haya tareas
            tasks = self
                .available
                .wait(tasks)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Retorna el tamaño actual de la cola
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Verifica si la cola está vacía
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TaskQueue<T> {
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            available: Arc::clone(&self.available),
        }
    }
}
