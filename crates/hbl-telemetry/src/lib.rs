//! Observability infrastructure for hbl-dash.
//!
//! Structured logging via the `tracing` ecosystem, with human-readable
//! output through `tracing-subscriber`.

pub mod logging;
