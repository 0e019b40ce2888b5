//! Text panels: header, current status, summary stats and the alert list

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::Alignment;
use heapless::String;

use crate::config::ALERT_LOG_CAPACITY;
use crate::pipeline::DashboardView;
use crate::stats::Label;

use super::PANEL_PADDING_PX;
use super::colors::{
    COLOR_ACTIVE, COLOR_BACKGROUND, COLOR_SEDENTARY, TEXT_MUTED, TEXT_PRIMARY, TEXT_SECONDARY,
};
use super::core::{Panel, draw_card};
use super::text::{TextSize, draw_text};

// ----------------------------------------------------------------------------
// Header
// ----------------------------------------------------------------------------

/// Title bar with the connection indicator
pub struct HeaderPanel {
    bounds: Rectangle,
}

impl HeaderPanel {
    pub fn new(bounds: Rectangle) -> Self {
        Self { bounds }
    }

    /// Center of the connection status dot
    pub fn indicator_center(&self) -> Point {
        Point::new(
            self.bounds.top_left.x + self.bounds.size.width as i32 - 96,
            self.bounds.center().y,
        )
    }
}

impl Panel for HeaderPanel {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        view: &DashboardView<'_>,
        display: &mut D,
    ) -> Result<(), D::Error> {
        self.bounds
            .into_styled(PrimitiveStyle::with_fill(COLOR_BACKGROUND))
            .draw(display)?;

        let text_y = self.bounds.center().y - 5;
        draw_text(
            "Sedentary Monitor",
            Point::new(self.bounds.top_left.x + PANEL_PADDING_PX, text_y),
            TextSize::Medium,
            TEXT_PRIMARY,
            Alignment::Left,
            display,
        )?;

        let dot_color = if view.connection.is_connected() {
            COLOR_ACTIVE
        } else {
            COLOR_SEDENTARY
        };
        Circle::with_center(self.indicator_center(), 8)
            .into_styled(PrimitiveStyle::with_fill(dot_color))
            .draw(display)?;

        draw_text(
            view.connection.label(),
            self.indicator_center() + Point::new(8, -5),
            TextSize::Medium,
            TEXT_SECONDARY,
            Alignment::Left,
            display,
        )
    }
}

// ----------------------------------------------------------------------------
// Current status
// ----------------------------------------------------------------------------

/// State badge, description, sedentary timer and confidence
pub struct StatusPanel {
    bounds: Rectangle,
}

impl StatusPanel {
    pub fn new(bounds: Rectangle) -> Self {
        Self { bounds }
    }

    /// Area of the colored state badge
    pub fn badge_area(&self) -> Rectangle {
        Rectangle::new(
            self.bounds.top_left + Point::new(PANEL_PADDING_PX, PANEL_PADDING_PX),
            Size::new(96, self.bounds.size.height.saturating_sub(2 * PANEL_PADDING_PX as u32)),
        )
    }
}

impl Panel for StatusPanel {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        view: &DashboardView<'_>,
        display: &mut D,
    ) -> Result<(), D::Error> {
        draw_card(self.bounds, display)?;

        let state = view.store.current_state();
        let badge = self.badge_area();
        RoundedRectangle::with_equal_corners(badge, Size::new(4, 4))
            .into_styled(PrimitiveStyle::with_fill(state.level().color()))
            .draw(display)?;
        draw_text(
            state.badge(),
            Point::new(badge.center().x, badge.center().y - 5),
            TextSize::Medium,
            COLOR_BACKGROUND,
            Alignment::Center,
            display,
        )?;

        let column_x = badge.top_left.x + badge.size.width as i32 + 10;
        let top = self.bounds.top_left.y + PANEL_PADDING_PX;
        draw_text(
            state.description(),
            Point::new(column_x, top),
            TextSize::Medium,
            TEXT_PRIMARY,
            Alignment::Left,
            display,
        )?;

        let mut confidence: Label = String::new();
        let _ = write!(confidence, "Confidence: {}", view.confidence_label());
        draw_text(
            confidence.as_str(),
            Point::new(column_x, top + 18),
            TextSize::Small,
            TEXT_SECONDARY,
            Alignment::Left,
            display,
        )?;

        // Timer block, right-aligned
        let right = self.bounds.top_left.x + self.bounds.size.width as i32 - PANEL_PADDING_PX;
        draw_text(
            state.timer_caption(),
            Point::new(right, top),
            TextSize::Small,
            TEXT_SECONDARY,
            Alignment::Right,
            display,
        )?;
        draw_text(
            view.timer_label().as_str(),
            Point::new(right, top + 10),
            TextSize::Large,
            TEXT_PRIMARY,
            Alignment::Right,
            display,
        )
    }
}

// ----------------------------------------------------------------------------
// Summary statistics
// ----------------------------------------------------------------------------

/// Four evenly spaced label/value pairs
pub struct StatsPanel {
    bounds: Rectangle,
}

impl StatsPanel {
    pub fn new(bounds: Rectangle) -> Self {
        Self { bounds }
    }
}

impl Panel for StatsPanel {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        view: &DashboardView<'_>,
        display: &mut D,
    ) -> Result<(), D::Error> {
        draw_card(self.bounds, display)?;

        let mut readings: Label = String::new();
        let _ = write!(readings, "{}", view.store.total_readings());
        let mut alerts: Label = String::new();
        let _ = write!(alerts, "{}", view.alerts.alert_count());

        let cells: [(&str, Label); 4] = [
            ("Readings", readings),
            ("Active", view.active_percent_label()),
            ("Longest", view.longest_inactive_label()),
            ("Alerts", alerts),
        ];

        let cell_width = self.bounds.size.width as i32 / cells.len() as i32;
        let y = self.bounds.center().y - 4;
        for (i, (caption, value)) in cells.iter().enumerate() {
            let x = self.bounds.top_left.x + cell_width * i as i32 + PANEL_PADDING_PX;
            draw_text(
                caption,
                Point::new(x, y + 1),
                TextSize::Small,
                TEXT_SECONDARY,
                Alignment::Left,
                display,
            )?;
            draw_text(
                value.as_str(),
                Point::new(x + 50, y),
                TextSize::Medium,
                TEXT_PRIMARY,
                Alignment::Left,
                display,
            )?;
        }

        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Alert list
// ----------------------------------------------------------------------------

/// Entries per column of the alert list
const ALERT_ROWS: usize = ALERT_LOG_CAPACITY / 2;

/// Vertical distance between alert rows
const ALERT_ROW_HEIGHT_PX: i32 = 8;

/// Recent alerts, newest first, in two columns
pub struct AlertPanel {
    bounds: Rectangle,
}

impl AlertPanel {
    pub fn new(bounds: Rectangle) -> Self {
        Self { bounds }
    }

    /// Top-left of the `index`-th entry
    fn entry_position(&self, index: usize) -> Point {
        let column = (index / ALERT_ROWS) as i32;
        let row = (index % ALERT_ROWS) as i32;
        let column_width = self.bounds.size.width as i32 / 2;

        self.bounds.top_left
            + Point::new(
                PANEL_PADDING_PX + column * column_width,
                14 + row * ALERT_ROW_HEIGHT_PX,
            )
    }
}

impl Panel for AlertPanel {
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
            "Recent Alerts",
            self.bounds.top_left + Point::new(PANEL_PADDING_PX, 3),
            TextSize::Small,
            TEXT_SECONDARY,
            Alignment::Left,
            display,
        )?;

        if view.alerts.is_empty() {
            return draw_text(
                "No alerts yet",
                self.entry_position(0),
                TextSize::Small,
                TEXT_MUTED,
                Alignment::Left,
                display,
            );
        }

        for (i, entry) in view.alerts.entries().enumerate() {
            let mut line: String<40> = String::new();
            let _ = write!(
                line,
                "{}  Inactive {}s",
                entry.logged_at, entry.duration_secs
            );
            draw_text(
                line.as_str(),
                self.entry_position(i),
                TextSize::Small,
                COLOR_SEDENTARY,
                Alignment::Left,
                display,
            )?;
        }

        Ok(())
    }
}
