//! Horizontal guide lines for chart backgrounds
//!
//! Evenly spaced grid rows plus value-anchored threshold lines, either solid
//! or dashed.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};

use super::viewport::ChartViewport;

/// Dash pattern of threshold lines (`5,5`)
pub const THRESHOLD_DASH: LineStyle = LineStyle::Dashed {
    dash_length: 5,
    gap_length: 5,
};

/// Line style for guide rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineStyle {
    /// Solid continuous line
    Solid,
    /// Dashed line with specified dash and gap lengths
    Dashed {
        /// Length of each dash in pixels
        dash_length: u32,
        /// Length of gap between dashes in pixels
        gap_length: u32,
    },
}

/// Draw `count` evenly spaced horizontal grid lines, including the top and
/// bottom edges of the plot
pub(super) fn draw_grid_rows<D: DrawTarget<Color = Rgb565>>(
    viewport: &ChartViewport,
    count: usize,
    color: Rgb565,
    display: &mut D,
) -> Result<(), D::Error> {
    if count < 2 {
        return Ok(());
    }

    for i in 0..count {
        let value = viewport.y_max() * i as f32 / (count - 1) as f32;
        draw_guide(viewport, value, color, LineStyle::Solid, display)?;
    }
    Ok(())
}

/// Draw one horizontal guide across the plot at data value `value`
pub(super) fn draw_guide<D: DrawTarget<Color = Rgb565>>(
    viewport: &ChartViewport,
    value: f32,
    color: Rgb565,
    style: LineStyle,
    display: &mut D,
) -> Result<(), D::Error> {
    let plot = viewport.plot_area();
    let y = viewport.y_for(value);
    let x_start = plot.top_left.x;
    let x_end = plot.top_left.x + plot.size.width as i32 - 1;
    let line_style = PrimitiveStyle::with_stroke(color, 1);

    match style {
        LineStyle::Solid => {
            Line::new(Point::new(x_start, y), Point::new(x_end, y))
                .into_styled(line_style)
                .draw(display)?;
        }
        LineStyle::Dashed {
            dash_length,
            gap_length,
        } => {
            let dash = dash_length.max(1) as i32;
            let pattern = dash + gap_length as i32;
            let mut x = x_start;
            while x <= x_end {
                let dash_end = (x + dash - 1).min(x_end);
                Line::new(Point::new(x, y), Point::new(dash_end, y))
                    .into_styled(line_style)
                    .draw(display)?;
                x += pattern;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use embedded_graphics::primitives::Rectangle;

    #[test]
    fn test_dashed_guide_alternates() {
        let mut fb = FrameBuffer::new();
        let viewport = ChartViewport::new(
            Rectangle::new(Point::new(0, 0), Size::new(40, 11)),
            10,
            1.0,
        );

        draw_guide(&viewport, 0.5, Rgb565::YELLOW, THRESHOLD_DASH, &mut fb).unwrap();

        let y = viewport.y_for(0.5);
        for x in 0..5 {
            assert_eq!(fb.pixel(x, y), Some(Rgb565::YELLOW));
        }
        for x in 5..10 {
            assert_eq!(fb.pixel(x, y), Some(Rgb565::BLACK));
        }
        assert_eq!(fb.pixel(10, y), Some(Rgb565::YELLOW));
    }
}
