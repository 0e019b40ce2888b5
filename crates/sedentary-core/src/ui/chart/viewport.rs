//! Data-to-screen mapping for the rolling charts
//!
//! X is the slot index in a rolling window (`0..slots`, oldest on the left),
//! Y is a value in a fixed `0..=y_max` domain. Values outside the domain are
//! pinned to the plot edge rather than dropped, so a spike still shows.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Padding around the plot area for labels and margins
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportPadding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl ViewportPadding {
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Fixed-domain viewport over a rolling window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartViewport {
    screen_bounds: Rectangle,
    padding: ViewportPadding,
    slots: usize,
    y_max: f32,
}

impl ChartViewport {
    /// Viewport for a window of `slots` values with Y domain `0..=y_max`
    pub fn new(screen_bounds: Rectangle, slots: usize, y_max: f32) -> Self {
        Self {
            screen_bounds,
            padding: ViewportPadding::default(),
            slots: slots.max(1),
            y_max,
        }
    }

    pub fn with_padding(mut self, padding: ViewportPadding) -> Self {
        self.padding = padding;
        self
    }

    /// Screen bounds minus padding
    pub fn plot_area(&self) -> Rectangle {
        let top_left = Point::new(
            self.screen_bounds.top_left.x + self.padding.left as i32,
            self.screen_bounds.top_left.y + self.padding.top as i32,
        );
        let width = self
            .screen_bounds
            .size
            .width
            .saturating_sub(self.padding.left + self.padding.right);
        let height = self
            .screen_bounds
            .size
            .height
            .saturating_sub(self.padding.top + self.padding.bottom);

        Rectangle::new(top_left, Size::new(width, height))
    }

    pub fn y_max(&self) -> f32 {
        self.y_max
    }

    /// Screen X of slot `index`; the first slot sits on the left edge and the
    /// last on the right edge
    pub fn x_for(&self, index: usize) -> i32 {
        let plot = self.plot_area();
        if self.slots <= 1 {
            return plot.top_left.x;
        }
        let span = plot.size.width.saturating_sub(1) as i64;
        let index = index.min(self.slots - 1) as i64;
        plot.top_left.x + (index * span / (self.slots as i64 - 1)) as i32
    }

    /// Left edge and width of slot `index` when the plot is divided into
    /// equal columns, one per slot
    pub fn column_for(&self, index: usize) -> (i32, u32) {
        let plot = self.plot_area();
        let width = plot.size.width as usize;
        let start = index * width / self.slots;
        let end = (index + 1) * width / self.slots;
        (plot.top_left.x + start as i32, (end - start) as u32)
    }

    /// Screen Y of `value`, clamped to the plot area
    pub fn y_for(&self, value: f32) -> i32 {
        let plot = self.plot_area();
        let bottom = plot.top_left.y + plot.size.height as i32 - 1;
        if value.is_nan() || self.y_max <= 0.0 {
            return bottom;
        }

        let norm = (value / self.y_max).clamp(0.0, 1.0);
        let span = plot.size.height.saturating_sub(1) as f32;
        bottom - (norm * span) as i32
    }

    /// Bottom pixel row of the plot area
    pub fn baseline(&self) -> i32 {
        let plot = self.plot_area();
        plot.top_left.y + plot.size.height as i32 - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> ChartViewport {
        ChartViewport::new(
            Rectangle::new(Point::new(10, 20), Size::new(101, 51)),
            100,
            0.1,
        )
    }

    #[test]
    fn test_x_spans_plot_width() {
        let vp = viewport();
        assert_eq!(vp.x_for(0), 10);
        assert_eq!(vp.x_for(99), 110);
        // Out-of-range indices pin to the last slot
        assert_eq!(vp.x_for(500), 110);
    }

    #[test]
    fn test_y_is_inverted_and_clamped() {
        let vp = viewport();
        assert_eq!(vp.y_for(0.0), 70);
        assert_eq!(vp.y_for(0.1), 20);
        assert_eq!(vp.y_for(0.051), 45);
        assert_eq!(vp.y_for(3.0), 20);
        assert_eq!(vp.y_for(f32::NAN), 70);
        assert_eq!(vp.y_for(f32::INFINITY), 20);
    }

    #[test]
    fn test_padding_shrinks_plot() {
        let vp = viewport().with_padding(ViewportPadding::new(1, 2, 3, 4));
        assert_eq!(
            vp.plot_area(),
            Rectangle::new(Point::new(14, 21), Size::new(95, 47))
        );
    }

    #[test]
    fn test_columns_tile_the_plot() {
        let vp = ChartViewport::new(Rectangle::new(Point::zero(), Size::new(400, 10)), 100, 1.0);
        assert_eq!(vp.column_for(0), (0, 4));
        assert_eq!(vp.column_for(99), (396, 4));
    }
}
