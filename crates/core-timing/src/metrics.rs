//! Running render statistics.

use std::fmt;

/// Snapshot of one instance's render statistics. Durations are in milliseconds.
///
/// `render_time` mirrors `last_render_time` for consumers that read either name.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderMetrics {
    pub render_count: u64,
    pub last_render_time: f64,
    pub average_render_time: f64,
    pub render_time: f64,
}

impl RenderMetrics {
    /// Fold one sample into the record using the incremental mean, which equals
    /// the arithmetic mean of all samples seen since the last reset.
    pub(crate) fn record(&mut self, duration_ms: f64) {
        self.render_count += 1;
        self.last_render_time = duration_ms;
        self.render_time = duration_ms;
        let n = self.render_count as f64;
        self.average_render_time = (self.average_render_time * (n - 1.0) + duration_ms) / n;
    }
}

impl fmt::Display for RenderMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} renders, avg {:.2}ms, last {:.2}ms",
            self.render_count, self.average_render_time, self.last_render_time
        )
    }
}
