//! Infrastructure adapters: the queue container behind the scheduler.

pub mod queue;
pub use queue::InMemoryQueue;
