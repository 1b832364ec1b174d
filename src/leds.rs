//! WS2812 LED ring driver using the RMT peripheral.
//!
//! The badge has 10 RGB LEDs in two bars of five. Indexing runs counter
//! clockwise from the bottom right, so the indices already go round the
//! board as a ring.

extern crate alloc;

use embassy_time::{
    Duration,
    Timer,
};
use esp_hal::{
    Blocking,
    gpio::Level,
    rmt::{
        PulseCode,
        Tx,
    },
};
use palette::Srgb;

use crate::animation::{
    Brightness,
    LedSink,
};

/// Number of WS2812 LEDs on the badge.
pub const LED_COUNT: usize = 10;

/// Why a push to the LEDs failed.
#[derive(Debug, defmt::Format)]
pub enum LedError {
    /// The RMT channel was not returned by an earlier failed transmission.
    ChannelLost,
    /// The RMT peripheral rejected or aborted the transmission.
    Transmit(esp_hal::rmt::Error),
}

/// WS2812 LED ring driver.
///
/// Keeps an unscaled framebuffer; brightness is applied when the frame is
/// flushed with [`update`](LedSink::update).
pub struct Leds<'a> {
    channel: Option<esp_hal::rmt::Channel<'a, Blocking, Tx>>,
    framebuffer: [Srgb<u8>; LED_COUNT],
    brightness: Brightness,
}

impl<'a> Leds<'a> {
    pub const fn new(channel: esp_hal::rmt::Channel<'a, Blocking, Tx>) -> Self {
        Self {
            channel: Some(channel),
            framebuffer: [Srgb::new(0, 0, 0); LED_COUNT],
            brightness: Brightness::INITIAL,
        }
    }

    /// Number of LEDs on the ring.
    pub const fn len(&self) -> usize {
        LED_COUNT
    }

    // ── Internal helpers ────────────────────────────────────────────────

    /// WS2812 bit timing at 40 MHz RMT clock.
    const fn bit_to_pulse(bit: bool) -> PulseCode {
        if bit {
            // '1': 0.8 µs high (32 ticks), 0.45 µs low (18 ticks)
            PulseCode::new(Level::High, 32, Level::Low, 18)
        } else {
            // '0': 0.4 µs high (16 ticks), 0.85 µs low (34 ticks)
            PulseCode::new(Level::High, 16, Level::Low, 34)
        }
    }

    fn byte_to_pulses(byte: u8) -> [PulseCode; 8] {
        let mut pulses = [PulseCode::default(); 8];
        for (i, pulse) in pulses.iter_mut().enumerate() {
            *pulse = Self::bit_to_pulse((byte >> (7 - i)) & 1 != 0);
        }
        pulses
    }
}

impl LedSink for Leds<'_> {
    type Error = LedError;

    fn set(&mut self, index: usize, color: Srgb<u8>) {
        self.framebuffer[index] = color;
    }

    fn set_brightness(&mut self, brightness: Brightness) {
        self.brightness = brightness;
    }

    async fn update(&mut self) -> Result<(), LedError> {
        let channel = self.channel.take().ok_or(LedError::ChannelLost)?;

        let brightness = self.brightness;
        let pulses = self
            .framebuffer
            .iter()
            .flat_map(|&color| {
                let c = brightness.apply(color);
                // WS2812 expects GRB byte order
                [
                    Self::byte_to_pulses(c.green),
                    Self::byte_to_pulses(c.red),
                    Self::byte_to_pulses(c.blue),
                ]
                .into_iter()
                .flatten()
            })
            .chain(core::iter::once(PulseCode::end_marker()))
            .collect::<alloc::vec::Vec<_>>();

        let transaction = channel.transmit(&pulses).map_err(LedError::Transmit)?;

        match transaction.wait() {
            Ok(ch) => self.channel = Some(ch),
            Err((err, ch)) => {
                self.channel = Some(ch);
                return Err(LedError::Transmit(err));
            }
        }

        // WS2812 reset time
        Timer::after(Duration::from_micros(50)).await;
        Ok(())
    }
}
