//! Per-call latency observation.
//!
//! Instrumentation is injected, not ambient: the connector holds an
//! optional [`CallObserver`] and invokes it around every remote call with
//! the operation name and wall-clock elapsed time. The config `timing`
//! flag only selects the default [`TracingObserver`]; it never changes
//! request semantics.

use std::time::Duration;

use tracing::debug;

/// Observer invoked after each remote call completes (success or failure).
pub trait CallObserver: Send + Sync {
    /// `operation` is a stable dotted name like `"audio.speech"` or
    /// `"threads.runs.retrieve"`.
    fn record(&self, operation: &str, elapsed: Duration);
}

/// Default observer — emits a `tracing` debug event per call.
pub struct TracingObserver;

impl CallObserver for TracingObserver {
    fn record(&self, operation: &str, elapsed: Duration) {
        debug!(
            operation,
            elapsed_ms = elapsed.as_millis() as u64,
            "remote call completed"
        );
    }
}
