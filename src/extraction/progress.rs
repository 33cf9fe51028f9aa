//! Progress signals and cancellation for chunked traversal

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Receives progress percentages in `[0, 100]`.
///
/// Progress is observational only; stopping a run goes through
/// [`CancellationToken`].
pub trait ProgressSink {
    fn report(&mut self, percent: f64);
}

impl<F> ProgressSink for F
where
    F: FnMut(f64),
{
    fn report(&mut self, percent: f64) {
        self(percent)
    }
}

/// Sink that drops every signal
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _percent: f64) {}
}

/// Shared flag checked by the traverser at every suspension point
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; takes effect at the next suspension point
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
