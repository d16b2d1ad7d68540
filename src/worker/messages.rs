//! Plugin/worker message protocol and trace context propagation.

use crate::domain::{Dataset, LoadError};
use serde::{Deserialize, Serialize};

/// Trace and span IDs of the sending span, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the active span.
    ///
    /// Returns `None` when no OpenTelemetry span is active, e.g. before
    /// tracing is initialized or in tests.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_context = otel_context.span().span_context().clone();
        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_dataset(LoadDataset { path: String, ticket: u64 }),
}

/// Messages sent from the plugin thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read and parse the catalog file at `path`.
    LoadDataset {
        /// Sandbox path of the catalog file.
        path: String,

        /// Load attempt this read belongs to; echoed in the response.
        ticket: u64,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Trace context of the plugin span that sent this message.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadDataset { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker thread back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The catalog was read and parsed.
    DatasetLoaded {
        ticket: u64,
        categories: Dataset,
    },

    /// Reading or parsing the catalog failed.
    LoadFailed {
        ticket: u64,
        error: LoadError,
    },

    /// The worker could not process a message at all.
    Error {
        /// Human-readable error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_leaves_trace_context_empty_without_a_span() {
        let message = WorkerMessage::load_dataset("/host/flows.json".into(), 3);
        assert_eq!(message.trace_context(), None);
    }

    #[test]
    fn messages_omit_missing_trace_context() {
        let message = WorkerMessage::LoadDataset {
            path: "/host/flows.json".into(),
            ticket: 3,
            trace_context: None,
        };
        let payload = serde_json::to_string(&message).unwrap();
        assert!(!payload.contains("trace_context"));
        assert_eq!(serde_json::from_str::<WorkerMessage>(&payload).unwrap(), message);
    }

    #[test]
    fn load_failures_keep_their_cause_across_threads() {
        let response = WorkerResponse::LoadFailed {
            ticket: 9,
            error: LoadError::Malformed("expected an array".into()),
        };
        let payload = serde_json::to_string(&response).unwrap();
        assert_eq!(serde_json::from_str::<WorkerResponse>(&payload).unwrap(), response);
    }
}
