//! Dashboard renderer
//!
//! Every redraw is a full pass over a [`DashboardView`](crate::DashboardView)
//! snapshot; no panel keeps state between frames.

pub mod chart;
pub mod colors;
pub mod core;
pub mod dashboard;
pub mod panels;
pub mod text;

pub use self::core::Panel;
pub use dashboard::DashboardPage;

/// Display width in pixels
pub const DISPLAY_WIDTH_PX: u32 = 480;

/// Display height in pixels
pub const DISPLAY_HEIGHT_PX: u32 = 320;

/// Gap between panels
pub const PANEL_GAP_PX: u32 = 4;

/// Inner padding of a panel card
pub const PANEL_PADDING_PX: i32 = 6;
