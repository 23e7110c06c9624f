//! Dispatch metrics.
//!
//! # Metrics
//! - `wax_dispatch_total` (counter): dispatches by operation, outcome
//! - `wax_dispatch_duration_seconds` (histogram): end-to-end latency by operation
//! - `wax_dispatch_actions` (histogram): actions per transaction by operation
//!
//! Recording goes through the `metrics` facade and is a no-op unless the
//! embedding application installs a recorder.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

static ENABLED: AtomicBool = AtomicBool::new(true);

/// Turn metric recording on or off process-wide.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Record one completed dispatch.
pub fn record_dispatch(operation: &'static str, outcome: &'static str, elapsed: Duration) {
    if !is_enabled() {
        return;
    }
    metrics::counter!("wax_dispatch_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
    metrics::histogram!("wax_dispatch_duration_seconds", "operation" => operation)
        .record(elapsed.as_secs_f64());
}

/// Record the size of a built batch.
pub fn record_batch_size(operation: &'static str, actions: usize) {
    if !is_enabled() {
        return;
    }
    metrics::histogram!("wax_dispatch_actions", "operation" => operation).record(actions as f64);
}
