//! Errors surfaced by [`Session::tick`](crate::Session::tick).

use core::fmt;

/// A hardware collaborator failed during a tick.
///
/// Nothing retries these; the firmware treats them as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickError<L, T> {
    /// Pushing a frame to the LEDs failed.
    Leds(L),
    /// Drawing the label failed.
    Label(T),
}

impl<L: fmt::Debug, T: fmt::Debug> fmt::Display for TickError<L, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leds(err) => write!(f, "LED update failed: {err:?}"),
            Self::Label(err) => write!(f, "label draw failed: {err:?}"),
        }
    }
}

impl<L: fmt::Debug, T: fmt::Debug> core::error::Error for TickError<L, T> {}
