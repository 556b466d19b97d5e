use log::{log_enabled, Level};
use std::time::Instant;

/// Trace-level timer for a scene pass. Records how many items the pass
/// touched and reports both on drop.
pub struct ScopedTimer {
    label: &'static str,
    start: Option<Instant>,
    items: usize,
}

impl ScopedTimer {
    pub fn new(label: &'static str) -> Self {
        let start = log_enabled!(Level::Trace).then(Instant::now);
        Self {
            label,
            start,
            items: 0,
        }
    }

    pub fn record(&mut self, items: usize) {
        self.items += items;
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if let Some(start) = self.start {
            log::trace!(
                "{} touched {} item(s) in {} µs",
                self.label,
                self.items,
                start.elapsed().as_micros()
            );
        }
    }
}
