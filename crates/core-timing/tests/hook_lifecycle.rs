mod common;

use common::Harness;
use core_config::{RuntimeMode, TimerOptions, TimingSection};
use core_host::FrameLoop;
use core_timing::{ManualClock, RenderMetrics, RenderTimeHook, RenderTimer};

fn quiet(name: &str) -> TimerOptions {
    TimerOptions::new(name).enabled(true).log_to_console(false)
}

#[test]
fn back_to_back_cycles_keep_one_pending_measurement() {
    let mut h = Harness::new(quiet("List"), RuntimeMode::Test);
    h.clock.set(0.0);
    h.host.render_cycle();
    h.host.render_cycle();
    h.host.render_cycle();
    assert_eq!(h.host.queue().pending_len(), 1);
    assert_eq!(h.host.queue().stats().cancelled, 2);
    h.clock.set(5.0);
    assert_eq!(h.host.paint(), 1);
    assert_eq!(h.handle.metrics().render_count, 1);
    assert_eq!(h.handle.metrics().last_render_time, 5.0);
}

#[test]
fn stale_cycle_duration_is_never_recorded() {
    let mut h = Harness::new(quiet("List"), RuntimeMode::Test);
    h.clock.set(0.0);
    h.host.render_cycle(); // superseded before paint
    h.clock.set(500.0);
    h.host.render_cycle();
    h.clock.set(502.0);
    h.host.paint();
    let m = h.handle.metrics();
    assert_eq!(m.render_count, 1);
    assert_eq!(m.average_render_time, 2.0);
}

#[test]
fn paint_without_cycle_records_nothing() {
    let mut h = Harness::new(quiet("Idle"), RuntimeMode::Test);
    assert_eq!(h.host.paint(), 0);
    assert_eq!(h.handle.metrics(), RenderMetrics::default());
}

#[test]
fn handle_outlives_host() {
    let h = Harness::new(quiet("Gone"), RuntimeMode::Test);
    let Harness {
        mut host,
        clock,
        handle,
    } = h;
    clock.set(0.0);
    host.render_cycle();
    clock.set(3.0);
    host.paint();
    host.render_cycle();
    assert!(handle.has_pending_measurement());
    drop(host);
    assert!(!handle.has_pending_measurement());
    assert_eq!(handle.metrics().render_count, 1);
}

#[test]
fn instances_do_not_share_metrics() {
    let clock = ManualClock::new();
    let mk = |name: &str| {
        let cfg = quiet(name)
            .resolve(RuntimeMode::Test, &TimingSection::default())
            .unwrap();
        RenderTimeHook::new(RenderTimer::new(cfg, clock.clone()))
    };
    let a = mk("A");
    let b = mk("B");
    let ha = a.handle();
    let hb = b.handle();

    let mut host = FrameLoop::new();
    let id_a = host.mount(Box::new(a));
    host.mount(Box::new(b));

    clock.set(0.0);
    host.render_cycle();
    clock.set(4.0);
    host.paint();

    host.unmount(id_a);
    clock.set(10.0);
    host.render_cycle();
    clock.set(18.0);
    host.paint();

    hb.reset_metrics();
    clock.set(20.0);
    host.render_cycle();
    clock.set(21.0);
    host.paint();

    assert_eq!(ha.metrics().render_count, 1);
    assert_eq!(ha.metrics().last_render_time, 4.0);
    assert_eq!(hb.metrics().render_count, 1);
    assert_eq!(hb.metrics().last_render_time, 1.0);
}
