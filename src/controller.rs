//! Button edges to animation parameter changes.
//!
//! Rules are checked in a fixed order and only the first one that applies
//! fires, so pressing several buttons in the same sample changes a single
//! parameter. A held button whose limit is already reached does not block
//! the rules after it.

use crate::{
    animation::{
        AnimationState,
        Direction,
    },
    input::{
        ButtonMask,
        Sample,
    },
};

/// Parameter change made in response to a button edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// RIGHT: turn the rainbow backwards.
    Reverse,
    /// LEFT: turn the rainbow forwards.
    Forward,
    /// UP: one degree per frame faster.
    SpeedUp,
    /// DOWN: one degree per frame slower.
    SlowDown,
    /// A: one brightness step up.
    Brighten,
    /// B: one brightness step down.
    Dim,
}

/// Apply the first matching rule for a changed sample.
///
/// Returns the action taken, or `None` if the mask did not change or no rule
/// applied.
pub fn apply(state: &mut AnimationState, sample: Sample) -> Option<Action> {
    if !sample.changed {
        return None;
    }

    let held = |button| sample.mask.contains(button);

    let action = if held(ButtonMask::RIGHT) {
        state.direction = Direction::Reverse;
        Action::Reverse
    } else if held(ButtonMask::LEFT) {
        state.direction = Direction::Forward;
        Action::Forward
    } else if let Some(speed) = state.speed.faster().filter(|_| held(ButtonMask::UP)) {
        state.speed = speed;
        Action::SpeedUp
    } else if let Some(speed) = state.speed.slower().filter(|_| held(ButtonMask::DOWN)) {
        state.speed = speed;
        Action::SlowDown
    } else if let Some(level) = state.brightness.brighter().filter(|_| held(ButtonMask::A)) {
        state.brightness = level;
        Action::Brighten
    } else if let Some(level) = state.brightness.dimmer().filter(|_| held(ButtonMask::B)) {
        state.brightness = level;
        Action::Dim
    } else {
        return None;
    };

    debug!("button action: {}", action);
    Some(action)
}
