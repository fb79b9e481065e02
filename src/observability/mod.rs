//! OpenTelemetry-based observability with file-based span export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! Spans land in `<data dir>/treefocus-spans.json`, rotated at 10 MiB with
//! three backups kept. The level is taken from `RUST_LOG`, then the
//! `trace_level` configuration option, then `"info"`. Warnings and errors
//! are additionally printed to stderr.
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `tracer`: tracer provider and span exporter
//! - `file_writer`: rotating line writer

mod file_writer;
mod init;
mod tracer;

pub use init::{init_tracing, SPAN_FILE_NAME};
