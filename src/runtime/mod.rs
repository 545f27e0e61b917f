//! Runtime adapters bridging scheduler events into async code.

pub mod event_stream;

pub use event_stream::{event_stream, wait_for_outcome};
