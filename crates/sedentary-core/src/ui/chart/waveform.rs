//! Acceleration waveform chart
//!
//! Plots the rolling acceleration window over a fixed `0..=0.1` domain with a
//! translucent area fill, a solid grid and dashed guides at the fidget and
//! active thresholds.

use alloc::vec::Vec;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::Alignment;

use crate::config::{ACCEL_CHART_MAX, ClassifierConfig, MAX_DATA_POINTS};
use crate::pipeline::DashboardView;
use crate::ui::colors::{
    ACCEL_FILL_OPACITY, COLOR_ACCEL_LINE, COLOR_ACTIVE, COLOR_FIDGET, COLOR_STROKE,
    COLOR_SURFACE, TEXT_MUTED, TEXT_SECONDARY, blend,
};
use crate::ui::core::{Panel, draw_card};
use crate::ui::text::{TextSize, draw_text};

use super::guides::{THRESHOLD_DASH, draw_grid_rows, draw_guide};
use super::viewport::{ChartViewport, ViewportPadding};
use super::{body_area, title_position};

/// Grid rows at 0, 0.025, 0.05, 0.075 and 0.1
const GRID_ROWS: usize = 5;

/// Waveform stroke width in pixels
const LINE_WIDTH_PX: u32 = 2;

/// Space left of the plot for Y tick labels
const Y_LABEL_WIDTH_PX: u32 = 28;

pub struct WaveformChart {
    bounds: Rectangle,
    viewport: ChartViewport,
    fidget_threshold: f32,
    active_threshold: f32,
}

impl WaveformChart {
    pub fn new(bounds: Rectangle, thresholds: &ClassifierConfig) -> Self {
        let viewport = ChartViewport::new(body_area(bounds), MAX_DATA_POINTS, ACCEL_CHART_MAX)
            .with_padding(ViewportPadding::new(4, 6, 6, Y_LABEL_WIDTH_PX));

        Self {
            bounds,
            viewport,
            fidget_threshold: thresholds.fidget_threshold,
            active_threshold: thresholds.active_threshold,
        }
    }

    pub fn viewport(&self) -> &ChartViewport {
        &self.viewport
    }

    fn draw_axes<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        draw_grid_rows(&self.viewport, GRID_ROWS, COLOR_STROKE, display)?;

        let plot = self.viewport.plot_area();
        let label_x = plot.top_left.x - 3;
        for (value, label) in [(ACCEL_CHART_MAX, "0.10"), (ACCEL_CHART_MAX / 2.0, "0.05"), (0.0, "0")] {
            let y = self.viewport.y_for(value) - 3;
            draw_text(
                label,
                Point::new(label_x, y),
                TextSize::Small,
                TEXT_MUTED,
                Alignment::Right,
                display,
            )?;
        }

        draw_guide(
            &self.viewport,
            self.fidget_threshold,
            COLOR_FIDGET,
            THRESHOLD_DASH,
            display,
        )?;
        draw_guide(
            &self.viewport,
            self.active_threshold,
            COLOR_ACTIVE,
            THRESHOLD_DASH,
            display,
        )
    }

    /// Screen points of the window, oldest first
    fn screen_points(&self, view: &DashboardView<'_>) -> Vec<Point> {
        view.store
            .accel_window()
            .iter()
            .enumerate()
            .map(|(i, value)| Point::new(self.viewport.x_for(i), self.viewport.y_for(value as f32)))
            .collect()
    }
}

impl Panel for WaveformChart {
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
            "Acceleration",
            title_position(self.bounds),
            TextSize::Small,
            TEXT_SECONDARY,
            Alignment::Left,
            display,
        )?;

        let points = self.screen_points(view);
        draw_area_fill(&points, self.viewport.baseline(), display)?;
        self.draw_axes(display)?;
        draw_polyline(&points, display)
    }
}

/// Fill each column between the waveform and the plot baseline
fn draw_area_fill<D: DrawTarget<Color = Rgb565>>(
    points: &[Point],
    baseline: i32,
    display: &mut D,
) -> Result<(), D::Error> {
    let fill = PrimitiveStyle::with_stroke(blend(COLOR_SURFACE, COLOR_ACCEL_LINE, ACCEL_FILL_OPACITY), 1);

    for pair in points.windows(2) {
        let (p0, p1) = (pair[0], pair[1]);
        let dx = (p1.x - p0.x).max(1) as f32;

        for x in p0.x..=p1.x {
            let t = (x - p0.x) as f32 / dx;
            let y = p0.y + ((p1.y - p0.y) as f32 * t) as i32;
            if y < baseline {
                Line::new(Point::new(x, y), Point::new(x, baseline))
                    .into_styled(fill)
                    .draw(display)?;
            }
        }
    }

    Ok(())
}

fn draw_polyline<D: DrawTarget<Color = Rgb565>>(
    points: &[Point],
    display: &mut D,
) -> Result<(), D::Error> {
    let style = PrimitiveStyle::with_stroke(COLOR_ACCEL_LINE, LINE_WIDTH_PX);
    for pair in points.windows(2) {
        Line::new(pair[0], pair[1]).into_styled(style).draw(display)?;
    }
    Ok(())
}
