//! Activity timeline: one bar per reading, colored by activity level

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Alignment;

use crate::config::MAX_DATA_POINTS;
use crate::pipeline::DashboardView;
use crate::ui::colors::TEXT_SECONDARY;
use crate::ui::core::{Panel, draw_card};
use crate::ui::text::{TextSize, draw_text};

use super::viewport::{ChartViewport, ViewportPadding};
use super::{body_area, title_position};

pub struct TimelineChart {
    bounds: Rectangle,
    viewport: ChartViewport,
}

impl TimelineChart {
    pub fn new(bounds: Rectangle) -> Self {
        let viewport = ChartViewport::new(body_area(bounds), MAX_DATA_POINTS, 1.0)
            .with_padding(ViewportPadding::new(0, 6, 3, 6));
        Self { bounds, viewport }
    }

    pub fn viewport(&self) -> &ChartViewport {
        &self.viewport
    }
}

impl Panel for TimelineChart {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        view: &DashboardView<'_>,
        display: &mut D,
    ) -> Result<(), D::Error> {
        draw_card(self.bounds, display)?;
        draw_text(
            "Activity Timeline",
            title_position(self.bounds),
            TextSize::Small,
            TEXT_SECONDARY,
            Alignment::Left,
            display,
        )?;

        let plot = self.viewport.plot_area();
        for (i, level) in view.store.activity_window().iter().enumerate() {
            let (x, width) = self.viewport.column_for(i);
            // One pixel gap between neighbouring bars
            let bar_width = width.saturating_sub(1).max(1);
            Rectangle::new(
                Point::new(x, plot.top_left.y),
                Size::new(bar_width, plot.size.height),
            )
            .into_styled(PrimitiveStyle::with_fill(level.color()))
            .draw(display)?;
        }

        Ok(())
    }
}
