//! Pronoun name tag: cycles the words below on the display, one a second,
//! with a rainbow turning around the LEDs.
//!
//! Right/Left reverse the rainbow, Up/Down change its speed and A/B its
//! brightness.
//!
//! ```sh
//! cargo run --release --features badge --bin pronouns
//! ```

#![no_std]
#![no_main]

use defmt::{
    debug,
    info,
};
use embassy_executor::Spawner;
use embedded_graphics::{
    draw_target::DrawTarget,
    pixelcolor::{
        Rgb565,
        RgbColor,
    },
};
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;
use pronoun_badge::{
    BadgeConfig,
    Backlight,
    ButtonSource,
    Buttons,
    Clock,
    Display,
    LED_COUNT,
    Leds,
    Session,
    SystemClock,
    WordList,
    label_for,
    split_resources,
};

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

/// Longest word first; the label is sized for it.
const WORDS: WordList<'static> = WordList::new(&["HIS", "HIM", "HE"]);

#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    let peripherals = pronoun_badge::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 64 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let mut backlight: Backlight = resources.backlight.into();
    backlight.on();

    let mut display: Display<'static> = resources.display.into();
    display.clear(Rgb565::BLACK).unwrap();
    let mut label = label_for(display, &WORDS);

    let mut buttons: Buttons = resources.buttons.into();
    let mut leds: Leds<'static> = resources.leds.into();
    let clock = SystemClock;

    let mut session =
        Session::<LED_COUNT>::new(WORDS, BadgeConfig::new(), clock.now(), buttons.read_mask());
    session.show_first_word(&mut label).unwrap();
    info!("showing {=str}", session.current_word());

    loop {
        match session.tick(&clock, &mut buttons, &mut leds, &mut label).await {
            Ok(report) => debug!("tick: {}", report),
            Err(err) => defmt::panic!("{}", defmt::Debug2Format(&err)),
        }
    }
}
