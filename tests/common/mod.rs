//! Shared test infrastructure for pronoun-badge integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::Cell;

use embassy_time::{
    Duration,
    Instant,
};
use palette::Srgb;
use pronoun_badge::{
    Brightness,
    ButtonMask,
    ButtonSource,
    Clock,
    LabelSink,
    LedSink,
};

// ============================================================================
// Mock Clock
// ============================================================================

/// Clock that moves forward by `step` every time it is read.
pub struct MockClock {
    now: Cell<Instant>,
    step: Duration,
}

impl MockClock {
    pub fn new(step: Duration) -> Self {
        Self {
            now: Cell::new(Instant::from_millis(0)),
            step,
        }
    }

    /// Clock that only moves when told to.
    pub fn frozen() -> Self {
        Self::new(Duration::from_ticks(0))
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn peek(&self) -> Instant {
        self.now.get()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}

// ============================================================================
// Scripted Buttons
// ============================================================================

/// Button source that plays back a list of masks, repeating the last one.
pub struct ScriptedButtons {
    script: Vec<ButtonMask>,
    pub reads: usize,
}

impl ScriptedButtons {
    pub fn new(script: impl IntoIterator<Item = ButtonMask>) -> Self {
        let script: Vec<_> = script.into_iter().collect();
        assert!(!script.is_empty());
        Self { script, reads: 0 }
    }

    pub fn constant(mask: ButtonMask) -> Self {
        Self::new([mask])
    }

    /// `button`, released, `button`, released, ... `presses` times.
    pub fn presses(button: ButtonMask, presses: usize) -> Self {
        Self::new(
            (0..presses)
                .flat_map(|_| [button, ButtonMask::NONE])
                .collect::<Vec<_>>(),
        )
    }
}

impl ButtonSource for ScriptedButtons {
    fn read_mask(&mut self) -> ButtonMask {
        let mask = self.script[self.reads.min(self.script.len() - 1)];
        self.reads += 1;
        mask
    }
}

// ============================================================================
// Recording LEDs
// ============================================================================

/// LED sink that keeps every pushed frame.
pub struct RecordingLeds<const N: usize> {
    buffer: [Srgb<u8>; N],
    brightness: Option<Brightness>,
    pub frames: Vec<[Srgb<u8>; N]>,
    pub brightness_history: Vec<Brightness>,
    /// Fail the push with this index (0-based).
    pub fail_on: Option<usize>,
}

/// Error returned by the failing mocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockFailure;

impl<const N: usize> RecordingLeds<N> {
    pub fn new() -> Self {
        Self {
            buffer: [Srgb::new(0, 0, 0); N],
            brightness: None,
            frames: Vec::new(),
            brightness_history: Vec::new(),
            fail_on: None,
        }
    }

    pub fn failing_on(push: usize) -> Self {
        Self {
            fail_on: Some(push),
            ..Self::new()
        }
    }
}

impl<const N: usize> LedSink for RecordingLeds<N> {
    type Error = MockFailure;

    fn set(&mut self, index: usize, color: Srgb<u8>) {
        self.buffer[index] = color;
    }

    fn set_brightness(&mut self, brightness: Brightness) {
        self.brightness = Some(brightness);
    }

    async fn update(&mut self) -> Result<(), MockFailure> {
        if self.fail_on == Some(self.frames.len()) {
            return Err(MockFailure);
        }
        let brightness = self
            .brightness
            .expect("brightness must be set before every push");
        self.frames.push(self.buffer);
        self.brightness_history.push(brightness);
        Ok(())
    }
}

// ============================================================================
// Recording Label
// ============================================================================

/// Label sink that keeps every word it was asked to show.
#[derive(Default)]
pub struct RecordingLabel {
    pub shown: Vec<String>,
    pub fail: bool,
}

impl RecordingLabel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl LabelSink for RecordingLabel {
    type Error = MockFailure;

    fn set_text(&mut self, text: &str) -> Result<(), MockFailure> {
        if self.fail {
            return Err(MockFailure);
        }
        self.shown.push(text.to_owned());
        Ok(())
    }
}
