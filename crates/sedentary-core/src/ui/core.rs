//! Core renderer trait

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::pipeline::DashboardView;

use super::colors::COLOR_SURFACE;

/// A fixed region of the dashboard that redraws itself from a view
pub trait Panel {
    /// Screen area this panel owns
    fn bounds(&self) -> Rectangle;

    /// Draw the panel from scratch
    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        view: &DashboardView<'_>,
        display: &mut D,
    ) -> Result<(), D::Error>;
}

/// Fill `bounds` with the card surface color
pub fn draw_card<D: DrawTarget<Color = Rgb565>>(
    bounds: Rectangle,
    display: &mut D,
) -> Result<(), D::Error> {
    bounds
        .into_styled(PrimitiveStyle::with_fill(COLOR_SURFACE))
        .draw(display)
}
