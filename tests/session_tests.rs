//! Integration tests for Session::tick

mod common;
use common::*;

use core::num::NonZeroU16;

use embassy_futures::block_on;
use embassy_time::Duration;
use pronoun_badge::{
    AnimationState,
    BadgeConfig,
    Brightness,
    ButtonMask,
    Clock,
    Direction,
    Session,
    Speed,
    TickError,
    WordList,
    color_wheel::hue_to_rgb,
};

const WORDS: WordList<'static> = WordList::new(&["HIS", "HIM", "HE"]);

fn frames(n: u16) -> BadgeConfig {
    BadgeConfig::new().with_frames_per_tick(NonZeroU16::new(n).unwrap())
}

fn session<const N: usize>(config: BadgeConfig, clock: &MockClock) -> Session<'static, N> {
    Session::new(WORDS, config, clock.now(), ButtonMask::NONE)
}

// ============================================================================
// Animation
// ============================================================================

#[test]
fn first_frame_spreads_wheel_over_leds() {
    let clock = MockClock::frozen();
    let mut session = session::<5>(frames(1), &clock);
    let mut buttons = ScriptedButtons::constant(ButtonMask::NONE);
    let mut leds = RecordingLeds::<5>::new();
    let mut label = RecordingLabel::new();

    let report = block_on(session.tick(&clock, &mut buttons, &mut leds, &mut label)).unwrap();

    assert_eq!(report.frames, 1);
    let expected: Vec<_> = [0u16, 72, 144, 216, 288]
        .iter()
        .map(|&degree| hue_to_rgb(f32::from(degree)))
        .collect();
    assert_eq!(leds.frames[0].to_vec(), expected);
    assert_eq!(leds.brightness_history, vec![Brightness::default()]);
    assert_eq!(session.animation().rotation, 1);
}

#[test]
fn rotation_advances_by_speed_each_frame() {
    let clock = MockClock::frozen();
    let start = AnimationState {
        speed: Speed::new(7),
        ..AnimationState::default()
    };
    let mut session = session::<5>(frames(3).with_animation(start), &clock);
    let mut leds = RecordingLeds::<5>::new();

    block_on(session.tick(
        &clock,
        &mut ScriptedButtons::constant(ButtonMask::NONE),
        &mut leds,
        &mut RecordingLabel::new(),
    ))
    .unwrap();

    assert_eq!(session.animation().rotation, 21);
    let table = session.hue_table();
    for (frame, colors) in leds.frames.iter().enumerate() {
        for (&phase, &color) in session.phases().offsets().iter().zip(colors) {
            let angle = (phase + 7 * frame as u16) % 360;
            assert_eq!(color, table.color(angle));
        }
    }
}

#[test]
fn reverse_direction_subtracts_rotation() {
    let clock = MockClock::frozen();
    let start = AnimationState {
        rotation: 100,
        direction: Direction::Reverse,
        ..AnimationState::default()
    };
    let mut session = session::<5>(frames(1).with_animation(start), &clock);
    let mut leds = RecordingLeds::<5>::new();

    block_on(session.tick(
        &clock,
        &mut ScriptedButtons::constant(ButtonMask::NONE),
        &mut leds,
        &mut RecordingLabel::new(),
    ))
    .unwrap();

    let table = session.hue_table();
    let expected: Vec<_> = [260, 332, 44, 116, 188].iter().map(|&a| table.color(a)).collect();
    assert_eq!(leds.frames[0].to_vec(), expected);
    // The rotation itself always moves forward.
    assert_eq!(session.animation().rotation, 101);
}

#[test]
fn default_tick_runs_one_revolution() {
    let clock = MockClock::frozen();
    let mut session = session::<10>(BadgeConfig::new(), &clock);
    let mut leds = RecordingLeds::<10>::new();

    let report = block_on(session.tick(
        &clock,
        &mut ScriptedButtons::constant(ButtonMask::NONE),
        &mut leds,
        &mut RecordingLabel::new(),
    ))
    .unwrap();

    assert_eq!(report.frames, 360);
    assert_eq!(leds.frames.len(), 360);
    assert_eq!(session.animation().rotation, 0);
}

#[test]
fn revolution_length_uses_speed_at_tick_start() {
    let clock = MockClock::frozen();
    let start = AnimationState {
        speed: Speed::new(7),
        ..AnimationState::default()
    };
    let mut session = session::<10>(BadgeConfig::new().with_animation(start), &clock);

    let report = block_on(session.tick(
        &clock,
        &mut ScriptedButtons::constant(ButtonMask::NONE),
        &mut RecordingLeds::<10>::new(),
        &mut RecordingLabel::new(),
    ))
    .unwrap();

    assert_eq!(report.frames, 52);
    assert_eq!(session.animation().rotation, (52 * 7) % 360);
}

// ============================================================================
// Buttons
// ============================================================================

#[test]
fn held_right_flips_direction_once() {
    // Every clock read is 60 ms after the previous one, so the second frame
    // falls inside the debounce window and the third reads RIGHT again.
    let clock = MockClock::new(Duration::from_millis(60));
    let mut session = session::<5>(frames(3), &clock);
    let mut buttons = ScriptedButtons::constant(ButtonMask::RIGHT);

    let report = block_on(session.tick(
        &clock,
        &mut buttons,
        &mut RecordingLeds::<5>::new(),
        &mut RecordingLabel::new(),
    ))
    .unwrap();

    assert_eq!(session.animation().direction, Direction::Reverse);
    assert_eq!(report.actions, 1);
    assert_eq!(buttons.reads, 2);
}

#[test]
fn held_button_does_not_repeat_across_ticks() {
    let clock = MockClock::new(Duration::from_millis(150));
    let mut session = session::<5>(frames(2), &clock);
    let mut buttons = ScriptedButtons::constant(ButtonMask::UP);
    let mut leds = RecordingLeds::<5>::new();
    let mut label = RecordingLabel::new();

    let mut actions = 0;
    for _ in 0..4 {
        actions += block_on(session.tick(&clock, &mut buttons, &mut leds, &mut label))
            .unwrap()
            .actions;
    }

    assert_eq!(actions, 1);
    assert_eq!(session.animation().speed, Speed::new(2));
}

#[test]
fn button_held_at_startup_is_not_an_edge() {
    let clock = MockClock::new(Duration::from_millis(150));
    let mut session: Session<'static, 5> =
        Session::new(WORDS, frames(4), clock.now(), ButtonMask::A);

    let report = block_on(session.tick(
        &clock,
        &mut ScriptedButtons::constant(ButtonMask::A),
        &mut RecordingLeds::<5>::new(),
        &mut RecordingLabel::new(),
    ))
    .unwrap();

    assert_eq!(report.actions, 0);
    assert_eq!(session.animation().brightness, Brightness::default());
}

#[test]
fn brightness_change_applies_to_next_push() {
    let clock = MockClock::new(Duration::from_millis(150));
    let mut session = session::<5>(frames(2), &clock);
    let mut leds = RecordingLeds::<5>::new();

    block_on(session.tick(
        &clock,
        &mut ScriptedButtons::constant(ButtonMask::A),
        &mut leds,
        &mut RecordingLabel::new(),
    ))
    .unwrap();

    assert_eq!(
        leds.brightness_history,
        vec![Brightness::from_steps(8), Brightness::from_steps(9)]
    );
}

// ============================================================================
// Clamping
// ============================================================================

fn press_repeatedly(button: ButtonMask, start: AnimationState) -> AnimationState {
    let clock = MockClock::new(Duration::from_millis(150));
    let mut session = session::<5>(frames(80).with_animation(start), &clock);
    let mut buttons = ScriptedButtons::presses(button, 40);

    block_on(session.tick(
        &clock,
        &mut buttons,
        &mut RecordingLeds::<5>::new(),
        &mut RecordingLabel::new(),
    ))
    .unwrap();

    *session.animation()
}

#[test]
fn speed_never_exceeds_ten() {
    let end = press_repeatedly(ButtonMask::UP, AnimationState::default());
    assert_eq!(end.speed, Speed::MAX);
    assert_eq!(end.speed.get(), 10);
}

#[test]
fn speed_never_drops_below_one() {
    let start = AnimationState {
        speed: Speed::MAX,
        ..AnimationState::default()
    };
    let end = press_repeatedly(ButtonMask::DOWN, start);
    assert_eq!(end.speed.get(), 1);
}

#[test]
fn brightness_never_exceeds_half() {
    let end = press_repeatedly(ButtonMask::A, AnimationState::default());
    assert_eq!(end.brightness, Brightness::MAX);
    assert_eq!(end.brightness.as_f32(), 0.5);
}

#[test]
fn brightness_never_drops_below_minimum() {
    let end = press_repeatedly(ButtonMask::B, AnimationState::default());
    assert_eq!(end.brightness, Brightness::MIN);
    assert_eq!(end.brightness.as_f32(), 0.025);
}

// ============================================================================
// Label
// ============================================================================

#[test]
fn label_cycles_and_wraps() {
    let clock = MockClock::frozen();
    let mut session = session::<5>(frames(1), &clock);
    let mut buttons = ScriptedButtons::constant(ButtonMask::NONE);
    let mut leds = RecordingLeds::<5>::new();
    let mut label = RecordingLabel::new();

    session.show_first_word(&mut label).unwrap();
    let mut indices = vec![session.label_index()];
    for _ in 0..3 {
        clock.advance(Duration::from_millis(1_001));
        let report = block_on(session.tick(&clock, &mut buttons, &mut leds, &mut label)).unwrap();
        indices.push(report.label_index.unwrap());
    }

    assert_eq!(indices, vec![0, 1, 2, 0]);
    assert_eq!(label.shown, vec!["HIS", "HIM", "HE", "HIS"]);
}

#[test]
fn label_waits_for_interval() {
    let clock = MockClock::frozen();
    let mut session = session::<5>(frames(1), &clock);
    let mut label = RecordingLabel::new();

    clock.advance(Duration::from_millis(1_000));
    let report = block_on(session.tick(
        &clock,
        &mut ScriptedButtons::constant(ButtonMask::NONE),
        &mut RecordingLeds::<5>::new(),
        &mut label,
    ))
    .unwrap();

    assert_eq!(report.label_index, None);
    assert!(label.shown.is_empty());
    assert_eq!(session.current_word(), "HIS");
}

#[test]
fn custom_label_interval() {
    let clock = MockClock::frozen();
    let config = frames(1).with_label_interval(Duration::from_millis(250));
    let mut session = session::<5>(config, &clock);
    let mut label = RecordingLabel::new();

    clock.advance(Duration::from_millis(251));
    block_on(session.tick(
        &clock,
        &mut ScriptedButtons::constant(ButtonMask::NONE),
        &mut RecordingLeds::<5>::new(),
        &mut label,
    ))
    .unwrap();

    assert_eq!(label.shown, vec!["HIM"]);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn label_failure_stops_before_any_frame() {
    let clock = MockClock::frozen();
    let mut session = session::<5>(frames(3), &clock);
    let mut leds = RecordingLeds::<5>::new();

    clock.advance(Duration::from_secs(2));
    let result = block_on(session.tick(
        &clock,
        &mut ScriptedButtons::constant(ButtonMask::NONE),
        &mut leds,
        &mut RecordingLabel::failing(),
    ));

    assert_eq!(result, Err(TickError::Label(MockFailure)));
    assert!(leds.frames.is_empty());
}

#[test]
fn led_failure_stops_the_tick() {
    let clock = MockClock::frozen();
    let mut session = session::<5>(frames(5), &clock);
    let mut leds = RecordingLeds::<5>::failing_on(1);

    let result = block_on(session.tick(
        &clock,
        &mut ScriptedButtons::constant(ButtonMask::NONE),
        &mut leds,
        &mut RecordingLabel::new(),
    ));

    assert_eq!(result, Err(TickError::Leds(MockFailure)));
    assert_eq!(leds.frames.len(), 1);
    assert_eq!(session.animation().rotation, 1);
}

#[test]
fn tick_error_messages() {
    let leds: TickError<MockFailure, MockFailure> = TickError::Leds(MockFailure);
    let label: TickError<MockFailure, MockFailure> = TickError::Label(MockFailure);
    assert_eq!(leds.to_string(), "LED update failed: MockFailure");
    assert_eq!(label.to_string(), "label draw failed: MockFailure");
}
