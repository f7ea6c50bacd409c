//! Step counting for progress reports

use archguard_domain::ProgressMonitor;

/// Counts finished steps against a precomputed total
///
/// Exceeding the total is an accounting bug in the engine and panics.
pub(crate) struct ProgressTracker<'m> {
    done: usize,
    total: usize,
    monitor: Option<&'m mut dyn ProgressMonitor>,
}

impl<'m> ProgressTracker<'m> {
    pub(crate) fn new(total: usize, monitor: Option<&'m mut dyn ProgressMonitor>) -> Self {
        Self {
            done: 0,
            total,
            monitor,
        }
    }

    /// Finish one step and report it
    pub(crate) fn step(&mut self) {
        self.done += 1;
        assert!(
            self.done <= self.total,
            "The work that has been done ({}) exceeds the maximum amount ({}) that has been specified before.",
            self.done,
            self.total
        );
        if let Some(monitor) = self.monitor.as_deref_mut() {
            monitor.report_progress(self.done, self.total);
        }
    }

    pub(crate) fn done(&self) -> usize {
        self.done
    }
}
