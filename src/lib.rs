//! # pronoun-badge
//!
//! A name tag that cycles through a list of words, one a second, while a
//! rainbow turns around the LED ring. The D-pad and A/B buttons change the
//! rainbow:
//! - **Right / Left**: turn backwards / forwards
//! - **Up / Down**: faster / slower (1..=10 degrees per frame)
//! - **A / B**: brighter / dimmer (0.025..=0.5)
//!
//! Everything except the hardware bindings is `no_std`, allocation-free and
//! independent of the board, so it builds and tests on the host. Enable the
//! `badge` feature for the Disobey 2026 badge (ESP32-S3) drivers and the
//! `pronouns` firmware binary.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let peripherals = pronoun_badge::init();
//! let resources = pronoun_badge::split_resources!(peripherals);
//!
//! let mut buttons: pronoun_badge::Buttons = resources.buttons.into();
//! let mut leds: pronoun_badge::Leds = resources.leds.into();
//!
//! let mut session = Session::<LED_COUNT>::new(WORDS, BadgeConfig::new(), clock.now(), buttons.read_mask());
//! loop {
//!     session.tick(&clock, &mut buttons, &mut leds, &mut label).await?;
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

#[macro_use]
mod fmt;

pub mod animation;
pub mod clock;
pub mod color_wheel;
pub mod controller;
mod error;
pub mod hue_table;
pub mod input;
pub mod label;
pub mod phase;
mod session;
pub mod text_label;

#[cfg(feature = "badge")]
mod backlight;
#[cfg(feature = "badge")]
mod buttons;
#[cfg(feature = "badge")]
mod display;
#[cfg(feature = "badge")]
mod leds;

pub use animation::{
    AnimationState,
    Brightness,
    Direction,
    LedSink,
    Speed,
};
#[cfg(feature = "badge")]
pub use backlight::Backlight;
#[cfg(feature = "badge")]
pub use buttons::Buttons;
pub use clock::Clock;
#[cfg(feature = "badge")]
pub use clock::SystemClock;
#[cfg(feature = "badge")]
pub use display::{
    Display,
    SCREEN_SIZE,
    label_for,
};
pub use error::TickError;
pub use input::{
    ButtonMask,
    ButtonSource,
    InputSampler,
    Sample,
};
pub use label::{
    LabelRotator,
    LabelSink,
    WordList,
};
#[cfg(feature = "badge")]
pub use leds::{
    LED_COUNT,
    LedError,
    Leds,
};
pub use session::{
    BadgeConfig,
    Session,
    TickReport,
};

#[cfg(feature = "badge")]
use esp_hal::{
    Blocking,
    assign_resources,
    clock::{
        Clock as _,
        CpuClock,
    },
    gpio::{
        Level,
        Output,
        OutputConfig,
    },
    rmt::{
        Rmt,
        Tx,
        TxChannelConfig,
        TxChannelCreator as _,
    },
    rom,
    time::Rate,
};

/// StaticCell helper: allocates a value into a `static` exactly once.
#[cfg(feature = "badge")]
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

// ── Pin / peripheral assignments ────────────────────────────────────────────

#[cfg(feature = "badge")]
assign_resources! {
    pub Resources<'d> {
        display: DisplayResources<'d> {
            dc: GPIO15,
            rst: GPIO7,
            sck: GPIO4,
            cs: GPIO6,
            miso: GPIO16,
            mosi: GPIO5,
            spi: SPI2,
            dma: DMA_CH0,
        },
        backlight: BacklightResources<'d> {
            led: GPIO19,
        },
        buttons: ButtonResources<'d> {
            up: GPIO11,
            down: GPIO1,
            left: GPIO21,
            right: GPIO2,
            stick: GPIO14,
            a: GPIO13,
            b: GPIO38,
            start: GPIO12,
            select: GPIO45,
        },
        leds: LedResources<'d> {
            power: GPIO17,
            io: GPIO18,
            rmt: RMT,
        },
    }
}

// ── Board initialisation ────────────────────────────────────────────────────

/// Minimal CPU clock switcher for ESP32-S3.
///
/// Steps through an intermediate frequency before reaching the target,
/// which is required by the hardware.
#[cfg(feature = "badge")]
fn set_cpu_clock(cpu_clock_speed: CpuClock) {
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .sysclk_conf()
        .modify(|_, w| unsafe { w.soc_clk_sel().bits(1) });
    let _ = esp_hal::peripherals::SYSTEM::regs()
        .cpu_per_conf()
        .modify(|_, w| unsafe {
            let _ = w.pll_freq_sel().set_bit();
            w.cpuperiod_sel().bits(match cpu_clock_speed {
                CpuClock::_80MHz => 0,
                CpuClock::_160MHz => 1,
                CpuClock::_240MHz => 2,
                _ => panic!("Unsupported CPU clock speed"),
            })
        });

    rom::ets_update_cpu_frequency_rom(cpu_clock_speed.frequency().as_mhz());
}

/// Initialise the badge hardware and return the raw peripheral set.
///
/// Call this once at the top of `main`, then [`split_resources!`] the result.
#[cfg(feature = "badge")]
#[must_use]
pub fn init() -> esp_hal::peripherals::Peripherals {
    set_cpu_clock(CpuClock::_160MHz);
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);
    info!("badge initialised");
    peripherals
}

// ── Resource → peripheral conversions ───────────────────────────────────────

#[cfg(feature = "badge")]
impl<'a> From<LedResources<'a>> for esp_hal::rmt::Channel<'a, Blocking, Tx> {
    fn from(res: LedResources<'a>) -> Self {
        let _ws_power = Output::new(res.power, Level::High, OutputConfig::default());
        let rmt = Rmt::new(res.rmt, Rate::from_mhz(40)).unwrap();
        let tx_config = TxChannelConfig::default().with_clk_divider(1);
        rmt.channel0.configure_tx(res.io, tx_config).unwrap()
    }
}

#[cfg(feature = "badge")]
impl<'a> From<LedResources<'a>> for Leds<'a> {
    fn from(res: LedResources<'a>) -> Self {
        Leds::new(res.into())
    }
}
