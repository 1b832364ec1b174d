//! ST7789 display driver (320×170 LCD over SPI with DMA) and the pronoun
//! label drawn on it.

use embedded_graphics::{
    geometry::Size,
    mono_font::{
        MonoFont,
        ascii::FONT_10X20,
    },
    pixelcolor::{
        Rgb565,
        RgbColor,
    },
};
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::{
    Async,
    dma::{
        DmaRxBuf,
        DmaTxBuf,
    },
    dma_buffers,
    gpio::{
        Level,
        Output,
        OutputConfig,
    },
    spi::master::Spi,
    time::Rate,
};

use crate::{
    DisplayResources,
    label::WordList,
    mk_static,
    text_label::{
        LabelLayout,
        TextLabel,
    },
};

type SpiInterface<'a> = mipidsi::interface::SpiInterface<
    'a,
    ExclusiveDevice<esp_hal::spi::master::SpiDmaBus<'a, Async>, Output<'a>, esp_hal::delay::Delay>,
    Output<'a>,
>;

/// The badge's ST7789 display, ready to draw on with `embedded-graphics`.
pub type Display<'a> = mipidsi::Display<SpiInterface<'a>, mipidsi::models::ST7789, Output<'a>>;

/// Visible area in landscape orientation.
pub const SCREEN_SIZE: Size = Size::new(320, 170);

/// Space kept clear around the label.
const LABEL_MARGIN: u32 = 10;

const LABEL_FONT: &MonoFont<'static> = &FONT_10X20;

/// Label for `words` on the whole screen, white on black, scaled so the
/// longest word fills the width.
pub fn label_for(display: Display<'static>, words: &WordList<'_>) -> TextLabel<'static, Display<'static>> {
    let layout = LabelLayout::fit(words.longest(), LABEL_FONT, SCREEN_SIZE, LABEL_MARGIN);
    info!("label scale {=u32} for {=str}", layout.scale, words.longest());
    TextLabel::new(display, LABEL_FONT, layout, Rgb565::WHITE, Rgb565::BLACK)
}

impl From<DisplayResources<'static>> for Display<'static> {
    fn from(res: DisplayResources<'static>) -> Self {
        let (rx_buffer, rx_descriptors, tx_buffer, tx_descriptors) = dma_buffers!(32000);
        let dma_rx_buf = DmaRxBuf::new(rx_descriptors, rx_buffer).unwrap();
        let dma_tx_buf = DmaTxBuf::new(tx_descriptors, tx_buffer).unwrap();

        let mut delay = esp_hal::delay::Delay::new();

        let dc = Output::new(res.dc, Level::Low, OutputConfig::default());
        let mut rst = Output::new(res.rst, Level::Low, OutputConfig::default());
        rst.set_high();

        let spi = Spi::new(
            res.spi,
            esp_hal::spi::master::Config::default().with_frequency(Rate::from_mhz(80)),
        )
        .unwrap()
        .with_sck(res.sck)
        .with_mosi(res.mosi)
        .with_miso(res.miso)
        .with_dma(res.dma)
        .with_buffers(dma_rx_buf, dma_tx_buf)
        .into_async();

        let cs = Output::new(res.cs, Level::High, OutputConfig::default());
        let spi_device = ExclusiveDevice::new(spi, cs, delay).unwrap();

        let buffer = mk_static!([u8; 32000], [0_u8; 32000]);
        let di = mipidsi::interface::SpiInterface::new(spi_device, dc, buffer);

        mipidsi::Builder::new(mipidsi::models::ST7789, di)
            .reset_pin(rst)
            .display_size(170, 320)
            .invert_colors(mipidsi::options::ColorInversion::Inverted)
            .orientation(
                mipidsi::options::Orientation::new().rotate(mipidsi::options::Rotation::Deg90),
            )
            .display_offset(35, 0)
            .init(&mut delay)
            .unwrap()
    }
}
