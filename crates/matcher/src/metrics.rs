// Metrics hooks for the `channel-matcher` crate.
//
// Callers install a global `MatchMetrics` implementation via
// [`set_match_metrics`], then `ChannelMatcher` reports per-call latency and
// match counts for both entry points. This keeps instrumentation decoupled
// from any specific metrics backend.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::types::MatchMode;

/// Metrics observer for matching operations.
pub trait MatchMetrics: Send + Sync {
    /// Record the outcome of one matching call.
    ///
    /// `mode` is the entry point, `latency` the wall-clock duration of the
    /// call, and `matched` the number of accepted subscribers (`0` or `1`
    /// for existence mode).
    fn record_match(&self, mode: &MatchMode, latency: Duration, matched: usize);
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn MatchMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn MatchMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn MatchMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global match metrics recorder.
///
/// Typically called once during service startup so all `ChannelMatcher`
/// instances share the same metrics backend.
pub fn set_match_metrics(recorder: Option<Arc<dyn MatchMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
