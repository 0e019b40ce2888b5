//! Full dashboard page
//!
//! Fixed layout for a 480x320 display:
//!
//! ```text
//! +--------------------------------------------------+
//! | header                                           |
//! | status: badge | description  confidence | timer  |
//! | acceleration waveform            | summary donut |
//! | activity timeline                                |
//! | readings | active % | longest | alerts           |
//! | recent alerts (2 x 5)                            |
//! +--------------------------------------------------+
//! ```

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::ClassifierConfig;
use crate::pipeline::DashboardView;

use super::chart::{DonutChart, TimelineChart, WaveformChart};
use super::colors::COLOR_BACKGROUND;
use super::core::Panel;
use super::panels::{AlertPanel, HeaderPanel, StatsPanel, StatusPanel};
use super::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, PANEL_GAP_PX};

const HEADER_HEIGHT_PX: u32 = 24;
const STATUS_HEIGHT_PX: u32 = 44;
const CHART_HEIGHT_PX: u32 = 124;
const DONUT_WIDTH_PX: u32 = 148;
const TIMELINE_HEIGHT_PX: u32 = 28;
const STATS_HEIGHT_PX: u32 = 22;

pub struct DashboardPage {
    header: HeaderPanel,
    status: StatusPanel,
    waveform: WaveformChart,
    donut: DonutChart,
    timeline: TimelineChart,
    stats: StatsPanel,
    alerts: AlertPanel,
}

impl DashboardPage {
    /// Lay out the page; thresholds position the waveform guides
    pub fn new(thresholds: &ClassifierConfig) -> Self {
        let gap = PANEL_GAP_PX;
        let inner_width = DISPLAY_WIDTH_PX - 2 * gap;
        let x = gap as i32;

        let header = Rectangle::new(Point::zero(), Size::new(DISPLAY_WIDTH_PX, HEADER_HEIGHT_PX));

        let status_y = HEADER_HEIGHT_PX + gap;
        let status = Rectangle::new(
            Point::new(x, status_y as i32),
            Size::new(inner_width, STATUS_HEIGHT_PX),
        );

        let chart_y = status_y + STATUS_HEIGHT_PX + gap;
        let waveform_width = inner_width - DONUT_WIDTH_PX - gap;
        let waveform = Rectangle::new(
            Point::new(x, chart_y as i32),
            Size::new(waveform_width, CHART_HEIGHT_PX),
        );
        let donut = Rectangle::new(
            Point::new(x + (waveform_width + gap) as i32, chart_y as i32),
            Size::new(DONUT_WIDTH_PX, CHART_HEIGHT_PX),
        );

        let timeline_y = chart_y + CHART_HEIGHT_PX + gap;
        let timeline = Rectangle::new(
            Point::new(x, timeline_y as i32),
            Size::new(inner_width, TIMELINE_HEIGHT_PX),
        );

        let stats_y = timeline_y + TIMELINE_HEIGHT_PX + gap;
        let stats = Rectangle::new(
            Point::new(x, stats_y as i32),
            Size::new(inner_width, STATS_HEIGHT_PX),
        );

        let alerts_y = stats_y + STATS_HEIGHT_PX + gap;
        let alerts = Rectangle::new(
            Point::new(x, alerts_y as i32),
            Size::new(
                inner_width,
                DISPLAY_HEIGHT_PX.saturating_sub(alerts_y + gap),
            ),
        );

        Self {
            header: HeaderPanel::new(header),
            status: StatusPanel::new(status),
            waveform: WaveformChart::new(waveform, thresholds),
            donut: DonutChart::new(donut),
            timeline: TimelineChart::new(timeline),
            stats: StatsPanel::new(stats),
            alerts: AlertPanel::new(alerts),
        }
    }

    /// Redraw every panel from `view`
    pub fn draw<D: DrawTarget<Color = Rgb565>>(
        &self,
        view: &DashboardView<'_>,
        display: &mut D,
    ) -> Result<(), D::Error> {
        display.clear(COLOR_BACKGROUND)?;

        self.header.draw(view, display)?;
        self.status.draw(view, display)?;
        self.waveform.draw(view, display)?;
        self.donut.draw(view, display)?;
        self.timeline.draw(view, display)?;
        self.stats.draw(view, display)?;
        self.alerts.draw(view, display)
    }

    pub fn header(&self) -> &HeaderPanel {
        &self.header
    }

    pub fn status(&self) -> &StatusPanel {
        &self.status
    }

    pub fn waveform(&self) -> &WaveformChart {
        &self.waveform
    }

    pub fn donut(&self) -> &DonutChart {
        &self.donut
    }

    pub fn timeline(&self) -> &TimelineChart {
        &self.timeline
    }

    pub fn alerts(&self) -> &AlertPanel {
        &self.alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fits_display() {
        let page = DashboardPage::new(&ClassifierConfig::default());
        let screen = Rectangle::new(Point::zero(), Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));

        for bounds in [
            page.header.bounds(),
            page.status.bounds(),
            page.waveform.bounds(),
            page.donut.bounds(),
            page.timeline.bounds(),
            page.stats.bounds(),
            page.alerts.bounds(),
        ] {
            assert_eq!(screen.intersection(&bounds), bounds);
        }
    }

    #[test]
    fn test_alert_list_has_room_for_five_rows() {
        let page = DashboardPage::new(&ClassifierConfig::default());
        assert!(page.alerts.bounds().size.height >= 14 + 5 * 8);
    }
}
