//! The control loop as an explicit, tickable context.
//!
//! [`Session`] owns every piece of mutable state: the animation parameters,
//! the button edge tracker and the label rotation. The firmware's `main` calls
//! [`tick`](Session::tick) forever, passing in the hardware each time, so the
//! only points where it waits are the LED pushes.

use core::num::NonZeroU16;

use embassy_time::{
    Duration,
    Instant,
};

use crate::{
    animation::{
        AnimationState,
        Brightness,
        Direction,
        LedSink,
        Speed,
    },
    clock::Clock,
    controller,
    error::TickError,
    hue_table::HueTable,
    input::{
        ButtonMask,
        ButtonSource,
        DEBOUNCE_INTERVAL,
        InputSampler,
    },
    label::{
        LABEL_INTERVAL,
        LabelRotator,
        LabelSink,
        WordList,
    },
    phase::PhaseMap,
};

/// Tunable timing for a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeConfig {
    pub debounce: Duration,
    pub label_interval: Duration,
    /// Fixed number of frames per tick. `None` runs one full revolution of
    /// the wheel at the speed in effect when the tick starts.
    pub frames_per_tick: Option<NonZeroU16>,
    pub animation: AnimationState,
}

impl BadgeConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            debounce: DEBOUNCE_INTERVAL,
            label_interval: LABEL_INTERVAL,
            frames_per_tick: None,
            animation: AnimationState {
                rotation: 0,
                direction: Direction::Forward,
                speed: Speed::MIN,
                brightness: Brightness::INITIAL,
            },
        }
    }

    #[must_use]
    pub const fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    #[must_use]
    pub const fn with_label_interval(mut self, interval: Duration) -> Self {
        self.label_interval = interval;
        self
    }

    #[must_use]
    pub const fn with_frames_per_tick(mut self, frames: NonZeroU16) -> Self {
        self.frames_per_tick = Some(frames);
        self
    }

    #[must_use]
    pub const fn with_animation(mut self, animation: AnimationState) -> Self {
        self.animation = animation;
        self
    }
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// What one [`Session::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Frames pushed to the LEDs.
    pub frames: u16,
    /// Button actions applied.
    pub actions: u16,
    /// New label index, if the label switched.
    pub label_index: Option<usize>,
}

/// All state of the running badge.
pub struct Session<'w, const N: usize> {
    config: BadgeConfig,
    table: HueTable,
    phases: PhaseMap<N>,
    animation: AnimationState,
    sampler: InputSampler,
    rotator: LabelRotator<'w>,
}

impl<'w, const N: usize> Session<'w, N> {
    /// Build the palette and phase map and start the label timer at `now`.
    ///
    /// `initial_buttons` is the mask read once at startup.
    #[must_use]
    pub fn new(
        words: WordList<'w>,
        config: BadgeConfig,
        now: Instant,
        initial_buttons: ButtonMask,
    ) -> Self {
        info!("session start: {=usize} LEDs, {=usize} words", N, words.len());
        Self {
            config,
            table: HueTable::new(),
            phases: PhaseMap::new(),
            animation: config.animation,
            sampler: InputSampler::new(config.debounce, initial_buttons),
            rotator: LabelRotator::new(words, now, config.label_interval),
        }
    }

    /// Put the first word on the label. Call once before the first tick.
    ///
    /// # Errors
    ///
    /// Returns the label's error if drawing fails.
    pub fn show_first_word<T: LabelSink>(&self, label: &mut T) -> Result<(), T::Error> {
        label.set_text(self.rotator.current())
    }

    /// One pass of the outer loop.
    ///
    /// Switches the label if its interval has passed, then runs the frame
    /// loop. Every frame is pushed, then input is sampled, then any button
    /// action is applied, in that order.
    ///
    /// # Errors
    ///
    /// Stops at the first LED or label failure.
    pub async fn tick<C, B, L, T>(
        &mut self,
        clock: &C,
        buttons: &mut B,
        leds: &mut L,
        label: &mut T,
    ) -> Result<TickReport, TickError<L::Error, T::Error>>
    where
        C: Clock,
        B: ButtonSource,
        L: LedSink,
        T: LabelSink,
    {
        let mut report = TickReport::default();

        if let Some(word) = self.rotator.poll(clock.now()) {
            label.set_text(word).map_err(TickError::Label)?;
            report.label_index = Some(self.rotator.index());
        }

        let frames = self
            .config
            .frames_per_tick
            .map_or_else(|| self.animation.speed.frames_per_revolution(), NonZeroU16::get);

        for _ in 0..frames {
            self.animation
                .render(&self.table, &self.phases, leds)
                .await
                .map_err(TickError::Leds)?;
            report.frames += 1;

            let sample = self.sampler.sample(clock.now(), buttons);
            if controller::apply(&mut self.animation, sample).is_some() {
                report.actions += 1;
            }
        }

        Ok(report)
    }

    #[must_use]
    pub const fn animation(&self) -> &AnimationState {
        &self.animation
    }

    #[must_use]
    pub const fn label_index(&self) -> usize {
        self.rotator.index()
    }

    #[must_use]
    pub const fn current_word(&self) -> &'w str {
        self.rotator.current()
    }

    #[must_use]
    pub const fn phases(&self) -> &PhaseMap<N> {
        &self.phases
    }

    #[must_use]
    pub const fn hue_table(&self) -> &HueTable {
        &self.table
    }

    #[must_use]
    pub const fn config(&self) -> &BadgeConfig {
        &self.config
    }
}
