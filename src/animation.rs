//! Rotating rainbow across the LED ring.
//!
//! [`AnimationState`] holds the knobs the buttons turn (direction, speed,
//! brightness) plus the current rotation. Each call to
//! [`render`](AnimationState::render) pushes one frame to an [`LedSink`]
//! and then advances the rotation by `speed` degrees.

use palette::Srgb;

use crate::{
    hue_table::{
        DEGREES,
        HueTable,
    },
    phase::PhaseMap,
};

/// Output side of the LED ring.
///
/// Writes are buffered; nothing is visible until [`update`](LedSink::update).
pub trait LedSink {
    type Error;

    /// Set a single LED in the buffer.
    fn set(&mut self, index: usize, color: Srgb<u8>);

    /// Brightness to apply on the next push.
    fn set_brightness(&mut self, brightness: Brightness);

    /// Push the buffer to the LEDs.
    async fn update(&mut self) -> Result<(), Self::Error>;
}

/// Which way the rainbow turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    /// `+1` or `-1`.
    #[must_use]
    pub const fn sign(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }
}

/// Degrees the rotation advances per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Speed(u16);

impl Speed {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(10);

    /// Clamps into `MIN..=MAX`.
    #[must_use]
    pub const fn new(degrees: u16) -> Self {
        if degrees < Self::MIN.0 {
            Self::MIN
        } else if degrees > Self::MAX.0 {
            Self::MAX
        } else {
            Self(degrees)
        }
    }

    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// One faster, or `None` at the limit.
    #[must_use]
    pub const fn faster(self) -> Option<Self> {
        if self.0 < Self::MAX.0 { Some(Self(self.0 + 1)) } else { None }
    }

    /// One slower, or `None` at the limit.
    #[must_use]
    pub const fn slower(self) -> Option<Self> {
        if self.0 > Self::MIN.0 { Some(Self(self.0 - 1)) } else { None }
    }

    /// Frames needed for one full turn of the wheel at this speed.
    #[must_use]
    pub const fn frames_per_revolution(self) -> u16 {
        DEGREES.div_ceil(self.0)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::MIN
    }
}

/// LED brightness in steps of 0.025, from 0.025 up to 0.5.
///
/// Kept as a step count so repeated adjustments land exactly on the limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness(u8);

impl Brightness {
    /// Size of one step as a fraction of full scale.
    pub const STEP: f32 = 0.025;
    /// Steps per full scale (1.0).
    const STEPS_PER_UNIT: u16 = 40;

    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(20);
    /// 0.2
    pub const INITIAL: Self = Self(8);

    /// Clamps into `MIN..=MAX`.
    #[must_use]
    pub const fn from_steps(steps: u8) -> Self {
        if steps < Self::MIN.0 {
            Self::MIN
        } else if steps > Self::MAX.0 {
            Self::MAX
        } else {
            Self(steps)
        }
    }

    #[must_use]
    pub const fn steps(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn as_f32(self) -> f32 {
        f32::from(self.0) * Self::STEP
    }

    /// One step brighter, or `None` at the limit.
    #[must_use]
    pub const fn brighter(self) -> Option<Self> {
        if self.0 < Self::MAX.0 { Some(Self(self.0 + 1)) } else { None }
    }

    /// One step dimmer, or `None` at the limit.
    #[must_use]
    pub const fn dimmer(self) -> Option<Self> {
        if self.0 > Self::MIN.0 { Some(Self(self.0 - 1)) } else { None }
    }

    /// Scale a color by this brightness.
    #[must_use]
    pub fn apply(self, color: Srgb<u8>) -> Srgb<u8> {
        let scale = |channel: u8| {
            let scaled = u16::from(channel) * u16::from(self.0) / Self::STEPS_PER_UNIT;
            // At most 255 * 20 / 40.
            scaled as u8
        };
        Srgb::new(scale(color.red), scale(color.green), scale(color.blue))
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Mutable animation parameters plus the current rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationState {
    /// Degrees in `0..360`.
    pub rotation: u16,
    pub direction: Direction,
    pub speed: Speed,
    pub brightness: Brightness,
}

impl AnimationState {
    /// Wheel angle for an LED with the given phase at the current rotation.
    #[must_use]
    pub fn angle_for(&self, phase: u16) -> u16 {
        let turned = i32::from(phase) + i32::from(self.rotation) * self.direction.sign();
        // rem_euclid keeps this in 0..360, so the cast is lossless.
        turned.rem_euclid(i32::from(DEGREES)) as u16
    }

    /// Emit one frame, then advance the rotation by `speed`.
    ///
    /// # Errors
    ///
    /// Returns the sink's error if the push fails. The rotation is left
    /// unchanged in that case.
    pub async fn render<L: LedSink, const N: usize>(
        &mut self,
        table: &HueTable,
        phases: &PhaseMap<N>,
        leds: &mut L,
    ) -> Result<(), L::Error> {
        for (index, &phase) in phases.offsets().iter().enumerate() {
            leds.set(index, table.color(self.angle_for(phase)));
        }
        leds.set_brightness(self.brightness);
        leds.update().await?;

        self.rotation = (self.rotation + self.speed.get()) % DEGREES;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_clamps() {
        assert_eq!(Speed::new(0), Speed::MIN);
        assert_eq!(Speed::new(11), Speed::MAX);
        assert_eq!(Speed::MAX.faster(), None);
        assert_eq!(Speed::MIN.slower(), None);
        assert_eq!(Speed::new(4).faster(), Some(Speed::new(5)));
    }

    #[test]
    fn frames_per_revolution_rounds_up() {
        assert_eq!(Speed::new(1).frames_per_revolution(), 360);
        assert_eq!(Speed::new(7).frames_per_revolution(), 52);
        assert_eq!(Speed::new(10).frames_per_revolution(), 36);
    }

    #[test]
    fn brightness_limits_are_exact() {
        assert_eq!(Brightness::default().as_f32(), 0.2);
        assert_eq!(Brightness::MAX.as_f32(), 0.5);
        assert_eq!(Brightness::MIN.as_f32(), 0.025);
        assert_eq!(Brightness::MAX.brighter(), None);
        assert_eq!(Brightness::MIN.dimmer(), None);
    }

    #[test]
    fn brightness_scales_channels() {
        let white = Srgb::new(255u8, 255, 255);
        assert_eq!(Brightness::MAX.apply(white), Srgb::new(127, 127, 127));
        assert_eq!(Brightness::default().apply(white), Srgb::new(51, 51, 51));
        assert_eq!(Brightness::MIN.apply(Srgb::new(40, 80, 0)), Srgb::new(1, 2, 0));
    }

    #[test]
    fn reverse_angles_wrap_into_range() {
        let state = AnimationState {
            rotation: 100,
            direction: Direction::Reverse,
            ..AnimationState::default()
        };
        assert_eq!(state.angle_for(0), 260);
        assert_eq!(state.angle_for(72), 332);
        assert_eq!(state.angle_for(288), 188);
    }

    #[test]
    fn forward_angles_wrap_into_range() {
        let state = AnimationState {
            rotation: 300,
            ..AnimationState::default()
        };
        assert_eq!(state.angle_for(0), 300);
        assert_eq!(state.angle_for(72), 12);
    }
}
