//! Precomputed color wheel, one entry per whole degree.

use palette::Srgb;

use crate::color_wheel::hue_to_rgb;

/// Number of entries in the table, one per degree.
pub const DEGREES: u16 = 360;

/// Color wheel lookup table.
///
/// Built once before the main loop starts; read-only afterwards.
pub struct HueTable {
    colors: [Srgb<u8>; DEGREES as usize],
}

impl HueTable {
    #[must_use]
    pub fn new() -> Self {
        let mut colors = [Srgb::new(0, 0, 0); DEGREES as usize];
        for (degree, color) in (0u16..).zip(colors.iter_mut()) {
            *color = hue_to_rgb(f32::from(degree));
        }
        Self { colors }
    }

    /// Color at `degree`, taken modulo 360.
    #[must_use]
    pub fn color(&self, degree: u16) -> Srgb<u8> {
        self.colors[usize::from(degree % DEGREES)]
    }

    /// All 360 entries in degree order.
    #[must_use]
    pub fn as_slice(&self) -> &[Srgb<u8>] {
        &self.colors
    }
}

impl Default for HueTable {
    fn default() -> Self {
        Self::new()
    }
}
