//! Tracing with OpenTelemetry spans exported to a local file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → opentelemetry_sdk → FileSpanExporter → JSON lines
//! ```
//!
//! Spans are written as OTLP JSON, one batch per line, to
//! `~/.local/share/zellij/flowboard/flowboard-otlp.json` (inside the sandbox:
//! `/host/.local/share/zellij/flowboard/`). The file rotates at 10 MiB and
//! keeps 3 numbered backups. Verbosity comes from the `trace_level` plugin
//! option.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, trace_file_path, TRACE_FILE_NAME};
