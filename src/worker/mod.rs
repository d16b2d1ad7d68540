//! Background worker thread for dataset file reads.
//!
//! File-backed catalogs are read and parsed here so a slow or large read never
//! blocks the plugin thread. Messages carry the load ticket and a trace
//! context so worker spans join the plugin trace that requested them.
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing

pub mod handler;
pub mod messages;

pub use handler::FlowboardWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
