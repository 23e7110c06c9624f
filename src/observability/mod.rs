//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher operations produce:
//!     → logging.rs (structured log events, one span per dispatch)
//!     → metrics.rs (counters, histograms)
//! ```
//!
//! # Design Decisions
//! - Dispatch ID (UUID v4) flows through every log line of an operation
//! - Metrics are cheap and go through the `metrics` facade

pub mod logging;
pub mod metrics;
