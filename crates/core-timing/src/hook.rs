//! Host integration: brackets each render cycle with start / post-paint end.

use crate::clock::{Clock, MonotonicClock};
use crate::metrics::RenderMetrics;
use crate::timer::RenderTimer;
use core_host::{CycleHook, PaintHandle, PaintScheduler};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Cycle hook that times every render cycle of one instance.
///
/// On each cycle start the hook cancels any measurement still waiting for its
/// paint, starts the timer and schedules `end_render` after the next paint.
/// Teardown cancels the pending measurement as well.
pub struct RenderTimeHook<C: Clock = MonotonicClock> {
    timer: Rc<RefCell<RenderTimer<C>>>,
    pending: Rc<Cell<Option<PaintHandle>>>,
}

impl<C: Clock + 'static> RenderTimeHook<C> {
    pub fn new(timer: RenderTimer<C>) -> Self {
        Self {
            timer: Rc::new(RefCell::new(timer)),
            pending: Rc::new(Cell::new(None)),
        }
    }

    /// Surface handed back to the component.
    pub fn handle(&self) -> RenderTimerHandle<C> {
        RenderTimerHandle {
            timer: Rc::clone(&self.timer),
            pending: Rc::clone(&self.pending),
        }
    }

    fn cancel_pending(&self, scheduler: &mut dyn PaintScheduler) {
        if let Some(handle) = self.pending.take() {
            let cancelled = scheduler.cancel(handle);
            tracing::debug!(
                target: "render.timing",
                component = self.timer.borrow().config().component_name.as_str(),
                cancelled,
                "pending_measurement_dropped"
            );
        }
    }
}

impl<C: Clock + 'static> CycleHook for RenderTimeHook<C> {
    fn on_cycle_start(&mut self, scheduler: &mut dyn PaintScheduler) {
        self.cancel_pending(scheduler);
        if !self.timer.borrow().is_enabled() {
            return;
        }
        self.timer.borrow_mut().start_render();

        let timer = Rc::clone(&self.timer);
        let pending = Rc::clone(&self.pending);
        let handle = scheduler.schedule_post_paint(Box::new(move || {
            pending.set(None);
            timer.borrow_mut().end_render();
        }));
        self.pending.set(Some(handle));
    }

    fn on_teardown(&mut self, scheduler: &mut dyn PaintScheduler) {
        self.cancel_pending(scheduler);
    }
}

/// Component-side view of a mounted timer: current metrics plus
/// reset / snapshot / summary.
pub struct RenderTimerHandle<C: Clock = MonotonicClock> {
    timer: Rc<RefCell<RenderTimer<C>>>,
    pending: Rc<Cell<Option<PaintHandle>>>,
}

impl<C: Clock> Clone for RenderTimerHandle<C> {
    fn clone(&self) -> Self {
        Self {
            timer: Rc::clone(&self.timer),
            pending: Rc::clone(&self.pending),
        }
    }
}

impl<C: Clock> RenderTimerHandle<C> {
    pub fn metrics(&self) -> RenderMetrics {
        self.timer.borrow().metrics()
    }

    pub fn reset_metrics(&self) {
        self.timer.borrow_mut().reset_metrics();
    }

    pub fn log_summary(&self) {
        self.timer.borrow().log_summary();
    }

    /// True while a post-paint measurement is outstanding.
    pub fn has_pending_measurement(&self) -> bool {
        self.pending.get().is_some()
    }
}
