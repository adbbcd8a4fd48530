//! Host frame lifecycle contract.
//!
//! Instrumentation that measures rendering cost needs three things from the UI
//! host: a hook invoked at the start of every render cycle, a way to run a
//! callback once the frame has been painted, and a way to cancel such a callback
//! before it fires. [`CycleHook`] and [`PaintScheduler`] capture that contract
//! without tying consumers to a particular UI framework.
//!
//! [`PaintQueue`] and [`FrameLoop`] are a deterministic single-threaded host:
//! `render_cycle` runs every mounted hook, `paint` commits the frame and fires
//! the post-paint callbacks registered so far. Callbacks are `!Send` closures;
//! the whole model is cooperative and lives on one thread.

use std::collections::BTreeMap;
use std::fmt;

/// Opaque identifier of a scheduled post-paint callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaintHandle(u64);

/// Identifier of a hook mounted on a [`FrameLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(u64);

pub type PaintCallback = Box<dyn FnOnce() + 'static>;

/// Scheduling half of the host contract.
pub trait PaintScheduler {
    /// Run `callback` after the next paint. The returned handle stays valid until
    /// the callback fires or is cancelled.
    fn schedule_post_paint(&mut self, callback: PaintCallback) -> PaintHandle;
    /// Cancel a pending callback. Returns false if it already fired or was cancelled.
    fn cancel(&mut self, handle: PaintHandle) -> bool;
}

/// Per-instance lifecycle hook driven by the host.
pub trait CycleHook {
    /// Invoked synchronously at the start of every render cycle.
    fn on_cycle_start(&mut self, scheduler: &mut dyn PaintScheduler);
    /// Invoked once when the owning instance unmounts.
    fn on_teardown(&mut self, _scheduler: &mut dyn PaintScheduler) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaintQueueStats {
    pub scheduled: u64,
    pub cancelled: u64,
    pub fired: u64,
}

/// Ordered queue of post-paint callbacks.
#[derive(Default)]
pub struct PaintQueue {
    next_handle: u64,
    pending: BTreeMap<PaintHandle, PaintCallback>,
    stats: PaintQueueStats,
}

impl fmt::Debug for PaintQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaintQueue")
            .field("next_handle", &self.next_handle)
            .field("pending", &self.pending.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl PaintQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: PaintHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    pub fn stats(&self) -> PaintQueueStats {
        self.stats
    }

    /// Fire every callback registered before this call, in scheduling order.
    /// Returns the number of callbacks run.
    pub fn flush(&mut self) -> usize {
        let due = std::mem::take(&mut self.pending);
        let count = due.len();
        for (_, callback) in due {
            callback();
        }
        self.stats.fired += count as u64;
        count
    }
}

impl PaintScheduler for PaintQueue {
    fn schedule_post_paint(&mut self, callback: PaintCallback) -> PaintHandle {
        let handle = PaintHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.pending.insert(handle, callback);
        self.stats.scheduled += 1;
        tracing::trace!(target: "host.frame", ?handle, "post_paint_scheduled");
        handle
    }

    fn cancel(&mut self, handle: PaintHandle) -> bool {
        let removed = self.pending.remove(&handle).is_some();
        if removed {
            self.stats.cancelled += 1;
            tracing::trace!(target: "host.frame", ?handle, "post_paint_cancelled");
        }
        removed
    }
}

/// Minimal single-threaded host: mounted hooks plus a paint queue.
#[derive(Default)]
pub struct FrameLoop {
    hooks: Vec<(HookId, Box<dyn CycleHook>)>,
    queue: PaintQueue,
    next_hook: u64,
    frame_index: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a hook; it participates in every subsequent render cycle.
    pub fn mount(&mut self, hook: Box<dyn CycleHook>) -> HookId {
        let id = HookId(self.next_hook);
        self.next_hook += 1;
        self.hooks.push((id, hook));
        tracing::debug!(target: "host.frame", ?id, "hook_mounted");
        id
    }

    /// Unmount a hook, running its teardown. Returns false for unknown ids.
    pub fn unmount(&mut self, id: HookId) -> bool {
        let Some(pos) = self.hooks.iter().position(|(hid, _)| *hid == id) else {
            return false;
        };
        let (_, mut hook) = self.hooks.remove(pos);
        hook.on_teardown(&mut self.queue);
        tracing::debug!(target: "host.frame", ?id, "hook_unmounted");
        true
    }

    /// Start a render cycle: every mounted hook observes it.
    pub fn render_cycle(&mut self) {
        self.frame_index = self.frame_index.wrapping_add(1);
        tracing::trace!(target: "host.frame", frame = self.frame_index, "render_cycle");
        for (_, hook) in self.hooks.iter_mut() {
            hook.on_cycle_start(&mut self.queue);
        }
    }

    /// Commit the frame and fire pending post-paint callbacks.
    pub fn paint(&mut self) -> usize {
        let fired = self.queue.flush();
        tracing::trace!(target: "host.frame", frame = self.frame_index, fired, "paint");
        fired
    }

    /// One full cycle: render then paint.
    pub fn frame(&mut self) -> usize {
        self.render_cycle();
        self.paint()
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn mounted(&self) -> usize {
        self.hooks.len()
    }

    pub fn queue(&self) -> &PaintQueue {
        &self.queue
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        for (_, mut hook) in self.hooks.drain(..) {
            hook.on_teardown(&mut self.queue);
        }
    }
}
