#![allow(dead_code)]

use core_config::{RuntimeMode, TimerOptions, TimingSection};
use core_host::FrameLoop;
use core_timing::{ManualClock, RenderTimeHook, RenderTimer, RenderTimerHandle};
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::Level;
use tracing::subscriber::with_default;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone)]
pub struct BufferWriter {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl BufferWriter {
    pub fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        (Self { inner: buf.clone() }, buf)
    }
}

pub struct LockedWriter<'a> {
    guard: MutexGuard<'a, Vec<u8>>,
}

impl<'a> Write for LockedWriter<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = LockedWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LockedWriter {
            guard: self.inner.lock().expect("log buffer poisoned"),
        }
    }
}

/// Run `f` with a plain-text INFO subscriber and return whatever it logged.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let (writer, buffer) = BufferWriter::new();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(true)
        .with_ansi(false)
        .without_time()
        .with_writer(writer)
        .finish();
    let out = with_default(subscriber, f);
    let logs = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
    (out, logs)
}

pub fn count_lines(logs: &str, needle: &str) -> usize {
    logs.lines().filter(|l| l.contains(needle)).count()
}

/// A timer mounted on a fresh host with a manual clock.
pub struct Harness {
    pub host: FrameLoop,
    pub clock: ManualClock,
    pub handle: RenderTimerHandle<ManualClock>,
}

impl Harness {
    pub fn new(options: TimerOptions, mode: RuntimeMode) -> Self {
        let clock = ManualClock::new();
        let config = options
            .resolve(mode, &TimingSection::default())
            .expect("valid options");
        let hook = RenderTimeHook::new(RenderTimer::new(config, clock.clone()));
        let handle = hook.handle();
        let mut host = FrameLoop::new();
        host.mount(Box::new(hook));
        Self {
            host,
            clock,
            handle,
        }
    }

    /// One render cycle whose paint lands `ms` after the cycle starts.
    pub fn cycle(&mut self, ms: f64) {
        self.clock.set(0.0);
        self.host.render_cycle();
        self.clock.set(ms);
        self.host.paint();
    }
}
