//! Text drawing helpers

use embedded_graphics::mono_font::ascii::{FONT_5X8, FONT_6X10, FONT_10X20};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

/// Font presets used across the dashboard
///
/// - `Small`: 5x8, alert list entries and axis hints
/// - `Medium`: 6x10, captions and stat values
/// - `Large`: 10x20, the timer and donut centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Small => &FONT_5X8,
            TextSize::Medium => &FONT_6X10,
            TextSize::Large => &FONT_10X20,
        }
    }
}

/// Draw `text` with its top edge at `position`
pub fn draw_text<D: DrawTarget<Color = Rgb565>>(
    text: &str,
    position: Point,
    size: TextSize,
    color: Rgb565,
    alignment: Alignment,
    display: &mut D,
) -> Result<(), D::Error> {
    let character_style = MonoTextStyle::new(size.font(), color);
    let text_style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Top)
        .build();

    Text::with_text_style(text, position, character_style, text_style).draw(display)?;
    Ok(())
}

/// Draw `text` vertically centred on `position`
pub fn draw_text_centered<D: DrawTarget<Color = Rgb565>>(
    text: &str,
    position: Point,
    size: TextSize,
    color: Rgb565,
    display: &mut D,
) -> Result<(), D::Error> {
    let character_style = MonoTextStyle::new(size.font(), color);
    let text_style = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();

    Text::with_text_style(text, position, character_style, text_style).draw(display)?;
    Ok(())
}
