//! Large centered text on an `embedded-graphics` display.
//!
//! The mono fonts that ship with `embedded-graphics` are tiny on a 320×170
//! panel, so the label is drawn through [`Scaled`], which turns every font
//! pixel into a `scale × scale` block. The scale is picked once, from the
//! longest word, and every word is then drawn centered inside that same
//! pre-sized area.

use embedded_graphics::{
    Drawable,
    Pixel,
    draw_target::DrawTarget,
    geometry::{
        Dimensions,
        Point,
        Size,
    },
    mono_font::{
        MonoFont,
        MonoTextStyle,
    },
    pixelcolor::Rgb565,
    primitives::Rectangle,
    text::{
        Baseline,
        Text,
    },
};

use crate::label::LabelSink;

/// Unscaled width of `text` in `font`.
fn text_width(font: &MonoFont<'_>, text: &str) -> u32 {
    let chars = text.chars().count() as u32;
    if chars == 0 {
        return 0;
    }
    chars * font.character_size.width + (chars - 1) * font.character_spacing
}

/// Where the label goes and how big it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelLayout {
    /// Screen pixels per font pixel.
    pub scale: u32,
    /// Area reserved for the longest word, centered on screen.
    pub area: Rectangle,
}

impl LabelLayout {
    /// Largest whole-number scale at which `longest` fits on `screen`
    /// inside `margin`, never below 1.
    #[must_use]
    pub fn fit(longest: &str, font: &MonoFont<'_>, screen: Size, margin: u32) -> Self {
        let text = Size::new(text_width(font, longest), font.character_size.height);
        let available_w = screen.width.saturating_sub(margin * 2);
        let available_h = screen.height.saturating_sub(margin * 2);

        let scale = if text.width == 0 || text.height == 0 {
            1
        } else {
            (available_w / text.width).min(available_h / text.height).max(1)
        };

        let size = text * scale;
        let top_left = Point::new(
            (screen.width.saturating_sub(size.width) / 2) as i32,
            (screen.height.saturating_sub(size.height) / 2) as i32,
        );

        Self {
            scale,
            area: Rectangle::new(top_left, size),
        }
    }
}

/// Draw target adapter that magnifies everything drawn into it.
///
/// Logical point `p` maps to the block at `offset + p * scale`.
pub struct Scaled<'a, D> {
    target: &'a mut D,
    offset: Point,
    scale: u32,
}

impl<'a, D> Scaled<'a, D> {
    pub fn new(target: &'a mut D, offset: Point, scale: u32) -> Self {
        Self {
            target,
            offset,
            scale: scale.max(1),
        }
    }
}

impl<D: DrawTarget> Dimensions for Scaled<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        let inner = self.target.bounding_box();
        Rectangle::new(Point::zero(), inner.size / self.scale)
    }
}

impl<D: DrawTarget> DrawTarget for Scaled<'_, D> {
    type Color = D::Color;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let block = Size::new_equal(self.scale);
        for Pixel(point, color) in pixels {
            let top_left = self.offset + point * self.scale as i32;
            self.target.fill_solid(&Rectangle::new(top_left, block), color)?;
        }
        Ok(())
    }
}

/// [`LabelSink`] that draws each word centered in a fixed area.
pub struct TextLabel<'f, D> {
    target: D,
    font: &'f MonoFont<'f>,
    layout: LabelLayout,
    foreground: Rgb565,
    background: Rgb565,
}

impl<'f, D> TextLabel<'f, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub const fn new(
        target: D,
        font: &'f MonoFont<'f>,
        layout: LabelLayout,
        foreground: Rgb565,
        background: Rgb565,
    ) -> Self {
        Self {
            target,
            font,
            layout,
            foreground,
            background,
        }
    }

    /// Area the label may draw into.
    #[must_use]
    pub const fn bounding_box(&self) -> Rectangle {
        self.layout.area
    }

    #[must_use]
    pub const fn layout(&self) -> &LabelLayout {
        &self.layout
    }

    #[must_use]
    pub const fn target(&self) -> &D {
        &self.target
    }

    pub fn into_target(self) -> D {
        self.target
    }
}

impl<D> LabelSink for TextLabel<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn set_text(&mut self, text: &str) -> Result<(), Self::Error> {
        let area = self.layout.area;
        self.target.fill_solid(&area, self.background)?;

        let width = text_width(self.font, text) * self.layout.scale;
        let left = area.top_left.x + (area.size.width.saturating_sub(width) / 2) as i32;

        let mut scaled = Scaled::new(
            &mut self.target,
            Point::new(left, area.top_left.y),
            self.layout.scale,
        );
        Text::with_baseline(
            text,
            Point::zero(),
            MonoTextStyle::new(self.font, self.foreground),
            Baseline::Top,
        )
        .draw(&mut scaled)?;

        debug!("label set to {=str}", text);
        Ok(())
    }
}
