//! Observability infrastructure for TurboCommerce browser workloads.
//!
//! This crate provides:
//! - `InteractionId` - Correlation ID for a single user interaction
//! - `StructuredLogger` - Structured logging with interaction context
//! - `LogSink` - Pluggable log output (stderr, in-memory)

mod id;
mod logging;
mod sink;

pub use id::*;
pub use logging::*;
pub use sink::*;
