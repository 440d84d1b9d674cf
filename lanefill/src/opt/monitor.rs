use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::info;

use marker_core::entities::PlacedPanel;

/// Observer of a run: receives progress reports and can request cancellation.
/// These are the only points at which a run hands control back to its host.
pub trait RunMonitor {
    /// Called after every processed panel (placed or not) with the placements so far,
    /// the number of processed panels and the total number of panels.
    fn report(&mut self, _placed: &[PlacedPanel], _n_processed: usize, _n_total: usize) {}

    /// Polled before every panel (and, if configured, before every orientation).
    fn cancel_requested(&mut self) -> bool {
        false
    }
}

/// Monitor that ignores all progress and never cancels.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMonitor;

impl RunMonitor for NoMonitor {}

/// Adapts a pair of closures into a [`RunMonitor`].
pub struct FnMonitor<P, C>
where
    P: FnMut(&[PlacedPanel], usize, usize),
    C: FnMut() -> bool,
{
    pub on_progress: P,
    pub cancel: C,
}

impl<P, C> FnMonitor<P, C>
where
    P: FnMut(&[PlacedPanel], usize, usize),
    C: FnMut() -> bool,
{
    pub fn new(on_progress: P, cancel: C) -> Self {
        Self {
            on_progress,
            cancel,
        }
    }
}

impl<P, C> RunMonitor for FnMonitor<P, C>
where
    P: FnMut(&[PlacedPanel], usize, usize),
    C: FnMut() -> bool,
{
    fn report(&mut self, placed: &[PlacedPanel], n_processed: usize, n_total: usize) {
        (self.on_progress)(placed, n_processed, n_total)
    }

    fn cancel_requested(&mut self) -> bool {
        (self.cancel)()
    }
}

/// Cancellation flag that can be shared across threads.
/// All clones refer to the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl RunMonitor for CancelToken {
    fn cancel_requested(&mut self) -> bool {
        self.is_cancelled()
    }
}

/// Logs progress and cancels the run once its time budget is spent.
#[derive(Clone, Debug)]
pub struct TimeLimit {
    pub name: String,
    pub deadline: Option<Instant>,
}

impl TimeLimit {
    pub fn new(name: impl Into<String>, limit: Option<Duration>) -> Self {
        Self {
            name: name.into(),
            deadline: limit.map(|l| Instant::now() + l),
        }
    }
}

impl RunMonitor for TimeLimit {
    fn report(&mut self, placed: &[PlacedPanel], n_processed: usize, n_total: usize) {
        let used_length = placed
            .iter()
            .map(|p| p.shape.bbox.x_max)
            .fold(0.0, f64::max);
        info!(
            "[{}] {n_processed}/{n_total} panels processed, used length: {used_length:.1} cm",
            self.name
        );
    }

    fn cancel_requested(&mut self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}
