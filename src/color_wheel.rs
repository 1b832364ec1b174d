//! Hue rotation around the grey axis of the RGB cube.
//!
//! Red sits at 0°, with green and blue a third of a turn either side. The
//! resulting channels are remapped into a slightly washed-out 8-bit range,
//! which looks better on WS2812s than fully saturated primaries.

use palette::Srgb;

const ONE_THIRD: f32 = 1.0 / 3.0;

/// Remap a rotated channel (nominally `-1/3..=1`) onto `0..=255`.
fn remap(value: f32) -> u8 {
    let scaled = 0.75 * (255.0 * value + 85.0) + 0.5;
    // Float to int `as` saturates, but clamp anyway so the intent is visible.
    scaled.clamp(0.0, 255.0) as u8
}

/// Color of the wheel at `degrees`, interpreted modulo 360.
#[must_use]
pub fn hue_to_rgb(degrees: f32) -> Srgb<u8> {
    let mut degrees = degrees % 360.0;
    if degrees < 0.0 {
        degrees += 360.0;
    }

    let radians = degrees.to_radians();
    let cos_a = libm::cosf(radians);
    let sin_a = libm::sinf(radians);
    let grey = (1.0 - cos_a) * ONE_THIRD;
    let skew = libm::sqrtf(ONE_THIRD) * sin_a;

    let red = cos_a + grey;
    let green = grey + skew;
    let blue = grey - skew;

    Srgb::new(remap(red), remap(green), remap(blue))
}
