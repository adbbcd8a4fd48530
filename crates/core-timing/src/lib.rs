//! Per-instance render timing.
//!
//! A [`RenderTimer`] brackets one render cycle of a component instance: the
//! start timestamp is taken when the host begins the cycle and the end timestamp
//! once the frame has been painted, so the sample reflects the full cost of
//! producing visible output rather than just building a render description.
//! Samples fold into [`RenderMetrics`] (count, last, running mean).
//!
//! [`RenderTimeHook`] wires a timer into any host implementing the
//! `core-host` contract. It schedules `end_render` as a post-paint callback and
//! cancels a still-pending callback whenever a new cycle starts or the instance
//! unmounts, so at most one measurement is outstanding and stale samples are
//! never recorded. [`RenderTimerHandle`] is the surface left with the component:
//! metrics plus reset / snapshot / summary.
//!
//! Logging goes through `tracing` under target `render.timing`:
//! - WARN when a sample exceeds the threshold (`log_to_console` only).
//! - INFO per sample in development mode (`log_to_console` only).
//! - INFO summary on request.

pub mod clock;
pub mod hook;
pub mod metrics;
pub mod timer;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use hook::{RenderTimeHook, RenderTimerHandle};
pub use metrics::RenderMetrics;
pub use timer::RenderTimer;
