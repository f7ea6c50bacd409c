//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the assessment engine and the
//! tool embedding it.

/// Receives synchronous progress notifications during long-running work
///
/// Implemented by whatever drives the assessment (a progress bar, a pipeline
/// step, a test). Any `FnMut(usize, usize)` closure is a monitor.
pub trait ProgressMonitor {
    /// Report that `done` out of `total` steps have finished
    fn report_progress(&mut self, done: usize, total: usize);
}

impl<F> ProgressMonitor for F
where
    F: FnMut(usize, usize),
{
    fn report_progress(&mut self, done: usize, total: usize) {
        self(done, total)
    }
}
