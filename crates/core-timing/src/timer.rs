//! Render timer: start/end bracketing plus running statistics.

use crate::clock::{Clock, MonotonicClock};
use crate::metrics::RenderMetrics;
use core_config::{OptionsError, RuntimeMode, TimerConfig, TimerOptions, TimingSection};
use tracing::{info, warn};

/// Measures render cycles for a single component instance.
///
/// Every operation is a no-op when the timer is disabled. Durations are clamped
/// at zero; calling `end_render` without a preceding `start_render` measures
/// from the timer's construction instant.
#[derive(Debug)]
pub struct RenderTimer<C: Clock = MonotonicClock> {
    config: TimerConfig,
    clock: C,
    start_ms: f64,
    timing: bool,
    metrics: RenderMetrics,
}

impl RenderTimer<MonotonicClock> {
    /// Resolve `options` and build a timer on the wall clock.
    pub fn from_options(
        options: TimerOptions,
        mode: RuntimeMode,
        defaults: &TimingSection,
    ) -> Result<Self, OptionsError> {
        Ok(Self::new(options.resolve(mode, defaults)?, MonotonicClock::new()))
    }
}

impl<C: Clock> RenderTimer<C> {
    pub fn new(config: TimerConfig, clock: C) -> Self {
        let start_ms = clock.now_ms();
        Self {
            config,
            clock,
            start_ms,
            timing: false,
            metrics: RenderMetrics::default(),
        }
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// True between `start_render` and the matching `end_render`.
    pub fn is_timing(&self) -> bool {
        self.timing
    }

    pub fn start_render(&mut self) {
        if !self.config.enabled {
            return;
        }
        self.start_ms = self.clock.now_ms();
        self.timing = true;
    }

    pub fn end_render(&mut self) {
        if !self.config.enabled {
            return;
        }
        let duration = (self.clock.now_ms() - self.start_ms).max(0.0);
        self.timing = false;
        self.metrics.record(duration);

        if !self.config.log_to_console {
            return;
        }
        let name = self.config.component_name.as_str();
        let threshold = self.config.threshold_ms;
        if duration > threshold {
            warn!(
                target: "render.timing",
                component = name,
                duration_ms = duration,
                threshold_ms = threshold,
                "{name} render took {duration:.2}ms (threshold: {threshold:.2}ms)"
            );
        }
        if self.config.mode.is_development() {
            let count = self.metrics.render_count;
            let average = self.metrics.average_render_time;
            info!(
                target: "render.timing",
                component = name,
                render = count,
                duration_ms = duration,
                average_ms = average,
                "{name} render #{count}: {duration:.2}ms (avg: {average:.2}ms)"
            );
        }
    }

    /// Zero the statistics. No-op when disabled.
    pub fn reset_metrics(&mut self) {
        if !self.config.enabled {
            return;
        }
        self.metrics = RenderMetrics::default();
        tracing::debug!(target: "render.timing", component = self.config.component_name.as_str(), "metrics_reset");
    }

    /// Independent copy of the current statistics.
    pub fn metrics(&self) -> RenderMetrics {
        self.metrics
    }

    pub fn log_summary(&self) {
        if !self.config.enabled || !self.config.log_to_console {
            return;
        }
        let name = self.config.component_name.as_str();
        let m = self.metrics;
        info!(
            target: "render.timing",
            component = name,
            renders = m.render_count,
            average_ms = m.average_render_time,
            last_ms = m.last_render_time,
            "{name} render summary: {m}"
        );
    }
}
