//! Dashboard charts
//!
//! - [`WaveformChart`]: acceleration magnitude line with area fill and
//!   dashed threshold guides
//! - [`TimelineChart`]: one colored bar per reading's activity level
//! - [`DonutChart`]: active vs inactive share of all readings

mod donut;
mod guides;
mod timeline;
mod viewport;
mod waveform;

pub use donut::DonutChart;
pub use guides::LineStyle;
pub use timeline::TimelineChart;
pub use viewport::{ChartViewport, ViewportPadding};
pub use waveform::WaveformChart;

use embedded_graphics::primitives::Rectangle;
use embedded_graphics::prelude::*;

use super::PANEL_PADDING_PX;

/// Height reserved for a chart card's title row
pub const CHART_TITLE_HEIGHT_PX: u32 = 12;

/// Position of a chart card's title text
fn title_position(bounds: Rectangle) -> Point {
    bounds.top_left + Point::new(PANEL_PADDING_PX, 3)
}

/// Card area below the title row
fn body_area(bounds: Rectangle) -> Rectangle {
    let offset = CHART_TITLE_HEIGHT_PX;
    Rectangle::new(
        bounds.top_left + Point::new(0, offset as i32),
        Size::new(
            bounds.size.width,
            bounds.size.height.saturating_sub(offset),
        ),
    )
}
