//! Per-instance timer options and their resolved form.

use crate::{RuntimeMode, TimingSection};
use thiserror::Error;

/// Built-in threshold: one frame at 60 Hz.
pub const DEFAULT_THRESHOLD_MS: f64 = 16.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptionsError {
    #[error("component name must not be empty")]
    EmptyComponentName,
    #[error("threshold must be a finite, non-negative duration (got {0})")]
    InvalidThreshold(f64),
}

/// Caller-supplied options. Unset fields are filled during [`TimerOptions::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct TimerOptions {
    component_name: String,
    enabled: Option<bool>,
    log_to_console: Option<bool>,
    threshold_ms: Option<f64>,
}

impl TimerOptions {
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
            enabled: None,
            log_to_console: None,
            threshold_ms: None,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn log_to_console(mut self, log_to_console: bool) -> Self {
        self.log_to_console = Some(log_to_console);
        self
    }

    pub fn threshold_ms(mut self, threshold_ms: f64) -> Self {
        self.threshold_ms = Some(threshold_ms);
        self
    }

    /// Resolve against the runtime mode and file-level defaults.
    ///
    /// `enabled` defaults to "mode is development", `log_to_console` to true and
    /// `threshold_ms` to [`DEFAULT_THRESHOLD_MS`].
    pub fn resolve(
        self,
        mode: RuntimeMode,
        defaults: &TimingSection,
    ) -> Result<TimerConfig, OptionsError> {
        if self.component_name.trim().is_empty() {
            return Err(OptionsError::EmptyComponentName);
        }
        let threshold_ms = self
            .threshold_ms
            .or(defaults.threshold_ms)
            .unwrap_or(DEFAULT_THRESHOLD_MS);
        if !threshold_ms.is_finite() || threshold_ms < 0.0 {
            return Err(OptionsError::InvalidThreshold(threshold_ms));
        }
        Ok(TimerConfig {
            component_name: self.component_name,
            enabled: self
                .enabled
                .or(defaults.enabled)
                .unwrap_or_else(|| mode.is_development()),
            log_to_console: self.log_to_console.or(defaults.log_to_console).unwrap_or(true),
            threshold_ms,
            mode,
        })
    }
}

/// Immutable configuration of one timer instance.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerConfig {
    pub component_name: String,
    pub enabled: bool,
    pub log_to_console: bool,
    pub threshold_ms: f64,
    pub mode: RuntimeMode,
}
