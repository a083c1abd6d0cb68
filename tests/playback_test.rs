// Integration tests for the playback controller state machine

use std::time::{Duration, Instant};

use tracetty::playback::{Controller, Mode};
use tracetty::trace::diff::VarStatus;
use tracetty::trace::Step;

fn step(json: &str) -> Step {
    serde_json::from_str(json).expect("step fixture")
}

/// Three steps of a tiny run: `x` appears, `y` appears, `y` changes.
fn three_step_trace() -> Vec<Step> {
    vec![
        step(r#"{"line": 1, "locals": {"x": {"type": "int", "value": "1"}}}"#),
        step(
            r#"{"line": 2, "locals": {
                "x": {"type": "int", "value": "1"},
                "y": {"type": "int", "value": "5"}
            }}"#,
        ),
        step(
            r#"{"line": 3, "locals": {
                "x": {"type": "int", "value": "1"},
                "y": {"type": "int", "value": "6"}
            }}"#,
        ),
    ]
}

fn controller_with(trace: Vec<Step>, speed_ms: u64) -> Controller {
    let mut controller = Controller::new(Duration::from_millis(speed_ms));
    controller.install(trace);
    controller
}

#[test]
fn install_resets_to_idle_at_index_zero() {
    let mut controller = controller_with(three_step_trace(), 100);
    assert_eq!(controller.index(), 0);
    assert_eq!(controller.mode(), Mode::Idle);
    assert_eq!(controller.len(), 3);

    // Reinstalling after stepping resets again.
    controller.show_step(2).expect("in range");
    controller.install(three_step_trace());
    assert_eq!(controller.index(), 0);
    assert_eq!(controller.mode(), Mode::Idle);
}

#[test]
fn show_step_out_of_range_is_a_silent_noop() {
    let mut controller = controller_with(three_step_trace(), 100);
    controller.show_step(1).expect("in range");
    assert!(controller.show_step(3).is_none());
    assert!(controller.show_step(usize::MAX).is_none());
    assert_eq!(controller.index(), 1, "index untouched by the no-op");
}

#[test]
fn show_step_is_idempotent_and_self_diff_is_unchanged() {
    let mut controller = controller_with(three_step_trace(), 100);
    let first = controller.show_step(1).expect("in range");
    let second = controller.show_step(1).expect("in range");

    assert_eq!(first.index, second.index);
    assert_eq!(first.line, second.line);
    assert_eq!(first.structures, second.structures);
    assert!(second
        .variables
        .iter()
        .all(|v| v.status == VarStatus::Unchanged));
}

#[test]
fn diff_classifies_new_changed_and_unchanged() {
    let mut controller = controller_with(three_step_trace(), 100);

    let v0 = controller.show_step(0).expect("in range");
    assert_eq!(v0.variables[0].status, VarStatus::New);

    let v1 = controller.show_step(1).expect("in range");
    assert_eq!(v1.variables[0].name, "x");
    assert_eq!(v1.variables[0].status, VarStatus::Unchanged);
    assert_eq!(v1.variables[1].name, "y");
    assert_eq!(v1.variables[1].status, VarStatus::New);

    let v2 = controller.show_step(2).expect("in range");
    assert_eq!(v2.variables[0].status, VarStatus::Unchanged);
    assert_eq!(v2.variables[1].status, VarStatus::Changed);
}

#[test]
fn stepping_clamps_at_both_boundaries() {
    let mut controller = controller_with(three_step_trace(), 100);
    controller.show_step(0).expect("in range");
    assert!(controller.step_back().is_none());
    assert_eq!(controller.index(), 0);

    controller.show_step(2).expect("in range");
    assert!(controller.step_forward().is_none());
    assert_eq!(controller.index(), 2);
}

#[test]
fn play_advances_each_interval_then_pauses_at_the_end() {
    let mut controller = controller_with(three_step_trace(), 100);
    let t0 = Instant::now();

    assert!(controller.play(t0).is_none(), "no rewind needed from start");
    assert_eq!(controller.mode(), Mode::Playing);

    // Before the deadline nothing fires.
    assert!(controller.advance(t0).is_none());
    assert!(controller.advance(t0 + Duration::from_millis(99)).is_none());

    let tick1 = controller.advance(t0 + Duration::from_millis(100));
    assert_eq!(tick1.expect("first tick").index, 1);
    assert_eq!(controller.mode(), Mode::Playing);

    let tick2 = controller.advance(t0 + Duration::from_millis(200));
    assert_eq!(tick2.expect("second tick").index, 2);
    assert_eq!(
        controller.mode(),
        Mode::Paused,
        "reaching the last step pauses in the same tick"
    );

    // Never advances past the end.
    assert!(controller.advance(t0 + Duration::from_millis(400)).is_none());
    assert_eq!(controller.index(), 2);
}

#[test]
fn play_at_the_end_rewinds_to_the_start_first() {
    let mut controller = controller_with(three_step_trace(), 100);
    controller.show_step(2).expect("in range");

    let t0 = Instant::now();
    let rewound = controller.play(t0).expect("rewind view");
    assert_eq!(rewound.index, 0);
    assert_eq!(controller.mode(), Mode::Playing);
}

#[test]
fn play_works_directly_from_idle() {
    let mut controller = controller_with(three_step_trace(), 100);
    assert_eq!(controller.mode(), Mode::Idle);

    let t0 = Instant::now();
    controller.play(t0);
    assert_eq!(controller.mode(), Mode::Playing);
    let tick = controller.advance(t0 + Duration::from_millis(100));
    assert_eq!(tick.expect("tick").index, 1);
}

#[test]
fn no_tick_fires_after_pause_returns() {
    let mut controller = controller_with(three_step_trace(), 100);
    let t0 = Instant::now();
    controller.play(t0);
    controller.pause();
    assert_eq!(controller.mode(), Mode::Paused);
    assert!(controller.advance(t0 + Duration::from_secs(60)).is_none());
    assert_eq!(controller.index(), 0);
}

#[test]
fn set_speed_while_playing_rearms_exactly_one_deadline() {
    let mut controller = controller_with(three_step_trace(), 100);
    let t0 = Instant::now();
    controller.play(t0);

    // Halve the interval shortly after starting; the old deadline at
    // t0+100 must be replaced, not kept alongside the new one.
    controller.set_speed(Duration::from_millis(50), t0 + Duration::from_millis(10));
    assert!(controller.advance(t0 + Duration::from_millis(59)).is_none());

    let tick = controller.advance(t0 + Duration::from_millis(60));
    assert_eq!(tick.expect("tick").index, 1, "exactly one step fired");
    assert!(
        controller.advance(t0 + Duration::from_millis(60)).is_none(),
        "no duplicate tick from the superseded deadline"
    );
}

#[test]
fn speed_is_clamped_to_a_positive_interval() {
    let mut controller = controller_with(three_step_trace(), 100);
    controller.set_speed(Duration::ZERO, Instant::now());
    assert!(controller.speed() >= Duration::from_millis(1));
}

#[test]
fn restart_pauses_then_shows_the_first_step() {
    let mut controller = controller_with(three_step_trace(), 100);
    let t0 = Instant::now();
    controller.show_step(2).expect("in range");
    controller.play(t0);

    let view = controller.restart().expect("first step");
    assert_eq!(view.index, 0);
    assert_eq!(controller.mode(), Mode::Paused);
    assert!(controller.advance(t0 + Duration::from_secs(1)).is_none());
}

#[test]
fn single_step_trace_pauses_on_the_first_tick() {
    let mut controller = controller_with(
        vec![step(r#"{"line": 1}"#)],
        100,
    );
    let t0 = Instant::now();

    // Index 0 is also the last index, so play() rewinds (a no-op move)
    // and the first tick finds nowhere to go.
    let rewound = controller.play(t0).expect("rewind view");
    assert_eq!(rewound.index, 0);
    assert!(controller.advance(t0 + Duration::from_millis(100)).is_none());
    assert_eq!(controller.mode(), Mode::Paused);
}

#[test]
fn empty_trace_disables_every_control() {
    let mut controller = controller_with(Vec::new(), 100);
    let t0 = Instant::now();

    assert!(controller.is_empty());
    assert!(controller.show_step(0).is_none());
    assert!(controller.step_forward().is_none());
    assert!(controller.step_back().is_none());
    assert!(controller.play(t0).is_none());
    assert_eq!(controller.mode(), Mode::Idle, "play on empty is a no-op");
    assert!(controller.advance(t0 + Duration::from_secs(1)).is_none());
    assert!(controller.restart().is_none());
}

#[test]
fn clear_returns_to_the_empty_state() {
    let mut controller = controller_with(three_step_trace(), 100);
    controller.show_step(2).expect("in range");
    controller.clear();
    assert!(controller.is_empty());
    assert_eq!(controller.index(), 0);
    assert_eq!(controller.mode(), Mode::Idle);
    assert!(controller.show_step(0).is_none());
}
