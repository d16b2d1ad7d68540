//! Worker thread implementation for dataset file reads.
//!
//! Runs on a thread spawned by Zellij. Each `LoadDataset` message is answered
//! with exactly one response carrying the same ticket.

use crate::domain::{parse_dataset, Dataset, LoadError};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state. Stateless between messages.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct FlowboardWorker {}

impl FlowboardWorker {
    /// Reads and parses the catalog file at `path`.
    ///
    /// # Errors
    ///
    /// [`LoadError::Io`] if the file cannot be read, [`LoadError::Malformed`]
    /// if its contents are not a catalog.
    pub fn read_dataset(path: &Path) -> std::result::Result<Dataset, LoadError> {
        let bytes = fs::read(path).map_err(|e| LoadError::Io(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "dataset file read");
        parse_dataset(&bytes)
    }

    /// Reconstructs the plugin span context carried by `message` and attaches
    /// it to this thread, so worker spans become its children.
    ///
    /// The returned guard must be held while the message is processed.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let span_context = SpanContext::new(
            TraceId::from_hex(&trace_context.trace_id).ok()?,
            SpanId::from_hex(&trace_context.parent_span_id).ok()?,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Processes one message and builds its response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        match message {
            WorkerMessage::LoadDataset { path, ticket, .. } => {
                let _span = tracing::debug_span!("worker_load_dataset", path = %path, ticket).entered();
                match Self::read_dataset(Path::new(&path)) {
                    Ok(categories) => {
                        tracing::debug!(categories = categories.len(), "dataset parsed");
                        WorkerResponse::DatasetLoaded { ticket, categories }
                    }
                    Err(error) => {
                        tracing::warn!(error = %error, "dataset load failed");
                        WorkerResponse::LoadFailed { ticket, error }
                    }
                }
            }
        }
    }
}

/// Set once the worker thread has its own tracing subscriber.
static WORKER_TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

fn init_worker_tracing() {
    if WORKER_TRACING_INITIALIZED.swap(true, Ordering::Relaxed) {
        return;
    }
    crate::observability::init_tracing(&crate::Config::default());
}

fn reply(name: String, response: &WorkerResponse) {
    match serde_json::to_string(response) {
        Ok(payload) => post_message_to_plugin(PluginMessage {
            name,
            payload,
            worker_name: None,
        }),
        Err(e) => tracing::warn!(error = %e, "failed to serialize worker response"),
    }
}

impl ZellijWorker<'_> for FlowboardWorker {
    /// Deserializes a [`WorkerMessage`], handles it, and posts the response
    /// back under the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        init_worker_tracing();

        let response = match serde_json::from_str::<WorkerMessage>(&payload) {
            Ok(worker_message) => self.handle_message(worker_message),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                WorkerResponse::Error {
                    message: format!("invalid worker message: {e}"),
                }
            }
        };

        reply(message, &response);
    }
}
