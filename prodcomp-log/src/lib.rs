//! Delivery of session data to the logging endpoint.
//!
//! Every sink is fire-and-forget: `submit` never blocks on the network and
//! never reports failure to the caller. Transport problems end up in the
//! local `tracing` output and the entry is dropped.

pub mod http;
pub mod sink;

pub use http::{HttpLogSink, LOG_PATH, LogError};
pub use sink::{LogSink, MemorySink, NullSink, submit_serialized};
