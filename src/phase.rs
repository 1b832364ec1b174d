//! Per-LED angular offsets around the color wheel.

use crate::hue_table::DEGREES;

/// Evenly spaced hue offsets for `N` LEDs: `i * 360 / N`, truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseMap<const N: usize> {
    offsets: [u16; N],
}

impl<const N: usize> PhaseMap<N> {
    const NOT_EMPTY: () = assert!(N > 0, "PhaseMap needs at least one LED");

    #[must_use]
    pub const fn new() -> Self {
        let () = Self::NOT_EMPTY;

        let mut offsets = [0u16; N];
        let mut i = 0;
        while i < N {
            offsets[i] = (i * DEGREES as usize / N) as u16;
            i += 1;
        }
        Self { offsets }
    }

    #[must_use]
    pub const fn offsets(&self) -> &[u16; N] {
        &self.offsets
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl<const N: usize> Default for PhaseMap<N> {
    fn default() -> Self {
        Self::new()
    }
}
