//! # Pool de Workers
//! src/pool/mod.rs
//!
//! Núcleo productor/consumidor del servidor:
//!
//! ```text
//! acceptor ──enqueue──▶ TaskQueue ──dequeue──▶ worker-0 ─┐
//!                                   └────────▶ worker-1 ─┴─▶ handler(task)
//! ```
//!
//! El único estado compartido es la cola. Todo lo que hace un worker con su
//! tarea (leer, parsear, responder) es exclusivo de ese worker.

pub mod queue;
pub mod worker;

pub use queue::TaskQueue;
pub use worker::WorkerPool;
