//! Throttled, edge-detecting button input.
//!
//! The buttons are read as an 8-bit mask. Reading the hardware faster than it
//! settles returns garbage (an all-released mask on shift-register pads), so
//! [`InputSampler`] only touches the source once per debounce interval and
//! hands back the last-known mask in between.

use core::ops::{
    BitOr,
    BitOrAssign,
};

use embassy_time::{
    Duration,
    Instant,
};

/// Minimum time between two raw button reads.
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(100);

/// Pressed buttons, one bit each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMask(u8);

impl ButtonMask {
    pub const NONE: Self = Self(0);
    pub const LEFT: Self = Self(0x80);
    pub const UP: Self = Self(0x40);
    pub const DOWN: Self = Self(0x20);
    pub const RIGHT: Self = Self(0x10);
    pub const SELECT: Self = Self(0x08);
    pub const START: Self = Self(0x04);
    pub const A: Self = Self(0x02);
    pub const B: Self = Self(0x01);

    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True if every button in `other` is pressed.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ButtonMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ButtonMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Raw button state from the hardware.
pub trait ButtonSource {
    fn read_mask(&mut self) -> ButtonMask;
}

/// Result of one [`InputSampler::sample`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub mask: ButtonMask,
    /// The mask differs from the one returned by the previous sample.
    pub changed: bool,
}

/// Debounced reader that reports when the button mask changes.
#[derive(Debug, Clone)]
pub struct InputSampler {
    debounce: Duration,
    previous: ButtonMask,
    latest: ButtonMask,
    last_read: Option<Instant>,
}

impl InputSampler {
    /// `initial` is the mask read at startup. A button already held then
    /// does not count as an edge.
    #[must_use]
    pub const fn new(debounce: Duration, initial: ButtonMask) -> Self {
        Self {
            debounce,
            previous: initial,
            latest: initial,
            last_read: None,
        }
    }

    /// Whether a raw read is allowed at `now`.
    #[must_use]
    pub fn read_due(&self, now: Instant) -> bool {
        self.last_read
            .is_none_or(|last| now.saturating_duration_since(last) > self.debounce)
    }

    /// Current mask, reading the source only if the debounce interval has
    /// passed since the last read.
    pub fn sample(&mut self, now: Instant, source: &mut impl ButtonSource) -> Sample {
        if self.read_due(now) {
            self.latest = source.read_mask();
            self.last_read = Some(now);
        }

        let changed = self.latest != self.previous;
        self.previous = self.latest;
        if changed {
            debug!("buttons changed: {=u8:#b}", self.latest.bits());
        }

        Sample {
            mask: self.latest,
            changed,
        }
    }

    /// Mask from the most recent raw read.
    #[must_use]
    pub const fn latest(&self) -> ButtonMask {
        self.latest
    }
}
