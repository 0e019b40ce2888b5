//! Active vs inactive summary donut
//!
//! The active slice starts at 12 o'clock and sweeps clockwise; the inactive
//! slice covers the rest. The centre shows the whole-number active
//! percentage.

use embedded_graphics::geometry::Angle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, Sector,
};
use embedded_graphics::text::Alignment;

use crate::pipeline::DashboardView;
use crate::ui::colors::{
    COLOR_ACTIVE, COLOR_SEDENTARY, COLOR_STROKE, COLOR_SURFACE, TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::ui::core::{Panel, draw_card};
use crate::ui::text::{TextSize, draw_text, draw_text_centered};

use super::{body_area, title_position};

/// Ring thickness as a fraction of the outer diameter
const HOLE_RATIO: f32 = 0.6;

/// Width of the separator drawn around each slice
const SLICE_BORDER_PX: u32 = 2;

pub struct DonutChart {
    bounds: Rectangle,
    center: Point,
    diameter: u32,
}

impl DonutChart {
    pub fn new(bounds: Rectangle) -> Self {
        let body = body_area(bounds);
        let diameter = body.size.width.min(body.size.height).saturating_sub(8);
        Self {
            bounds,
            center: body.center(),
            diameter,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn diameter(&self) -> u32 {
        self.diameter
    }

    fn hole_diameter(&self) -> u32 {
        (self.diameter as f32 * HOLE_RATIO) as u32
    }

    fn draw_slice<D: DrawTarget<Color = Rgb565>>(
        &self,
        start_deg: f32,
        sweep_deg: f32,
        color: Rgb565,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let style = PrimitiveStyleBuilder::new()
            .fill_color(color)
            .stroke_color(COLOR_SURFACE)
            .stroke_width(SLICE_BORDER_PX)
            .build();

        if sweep_deg >= 360.0 {
            Circle::with_center(self.center, self.diameter)
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(display)
        } else {
            Sector::with_center(
                self.center,
                self.diameter,
                Angle::from_degrees(start_deg),
                Angle::from_degrees(sweep_deg),
            )
            .into_styled(style)
            .draw(display)
        }
    }
}

impl Panel for DonutChart {
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
            "Summary",
            title_position(self.bounds),
            TextSize::Small,
            TEXT_SECONDARY,
            Alignment::Left,
            display,
        )?;

        let total = view.store.total_readings();
        let active = view.store.active_readings();

        if total == 0 {
            Circle::with_center(self.center, self.diameter)
                .into_styled(PrimitiveStyle::with_fill(COLOR_STROKE))
                .draw(display)?;
        } else {
            let active_sweep = 360.0 * active as f32 / total as f32;
            if active > 0 {
                self.draw_slice(-90.0, active_sweep, COLOR_ACTIVE, display)?;
            }
            if active < total {
                self.draw_slice(
                    -90.0 + active_sweep,
                    360.0 - active_sweep,
                    COLOR_SEDENTARY,
                    display,
                )?;
            }
        }

        Circle::with_center(self.center, self.hole_diameter())
            .into_styled(PrimitiveStyle::with_fill(COLOR_SURFACE))
            .draw(display)?;

        let label = view.donut_label();
        draw_text_centered(
            label.as_str(),
            self.center - Point::new(0, 6),
            TextSize::Large,
            TEXT_PRIMARY,
            display,
        )?;
        draw_text_centered(
            "Active",
            self.center + Point::new(0, 10),
            TextSize::Small,
            TEXT_SECONDARY,
            display,
        )
    }
}
