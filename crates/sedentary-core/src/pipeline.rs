//! Per-message pipeline: decode, apply, log
//!
//! One [`TelemetryPipeline`] owns the session's store and alert log. Each
//! inbound frame passes through [`TelemetryPipeline::handle_message`]
//! synchronously; a rejected frame leaves both untouched.

use log::{debug, warn};

use crate::alerts::{AlertLog, TimeOfDay};
use crate::connection::ConnectionStatus;
use crate::stats::{self, DerivedStats};
use crate::store::TelemetryStore;
use crate::telemetry::{DecodeError, decode};

/// What happened to one inbound frame
#[derive(Debug, Clone, PartialEq)]
pub enum MessageOutcome {
    /// The reading was folded into the store
    Applied {
        /// Whether the reading also produced an alert log entry
        alert_logged: bool,
    },
    /// The frame was dropped without touching the store
    Skipped(DecodeError),
}

impl MessageOutcome {
    /// Whether the frame changed anything that is drawn
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Session store plus alert log, mutated only by inbound frames
#[derive(Debug, Clone, Default)]
pub struct TelemetryPipeline {
    store: TelemetryStore,
    alerts: AlertLog,
}

impl TelemetryPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one frame and fold it into the session
    ///
    /// `now` is the local time stamped on any alert this frame produces.
    pub fn handle_message(&mut self, raw: &str, now: TimeOfDay) -> MessageOutcome {
        let reading = match decode(raw) {
            Ok(reading) => reading,
            Err(e) => {
                match &e {
                    DecodeError::NotTelemetry => debug!("Device: {}", raw),
                    DecodeError::Malformed(reason) => warn!("Invalid JSON: {}", reason),
                    DecodeError::DeviceFault(fault) => warn!("Device error: {}", fault),
                }
                return MessageOutcome::Skipped(e);
            }
        };

        debug!(
            "Reading: {} timer={}s val={:.3}",
            reading.state.label(),
            reading.sedentary_secs,
            reading.accel_magnitude
        );
        self.store.apply(&reading);
        let alert_logged = self.alerts.maybe_log(&reading, now);

        MessageOutcome::Applied { alert_logged }
    }

    pub fn store(&self) -> &TelemetryStore {
        &self.store
    }

    pub fn alerts(&self) -> &AlertLog {
        &self.alerts
    }

    /// Snapshot of everything the dashboard draws
    pub fn view(&self, connection: ConnectionStatus) -> DashboardView<'_> {
        DashboardView {
            store: &self.store,
            alerts: &self.alerts,
            stats: DerivedStats::from_store(&self.store),
            connection,
        }
    }
}

/// Read-only view handed to the renderer for one full redraw
#[derive(Debug, Clone, Copy)]
pub struct DashboardView<'a> {
    pub store: &'a TelemetryStore,
    pub alerts: &'a AlertLog,
    pub stats: DerivedStats,
    pub connection: ConnectionStatus,
}

impl DashboardView<'_> {
    pub fn timer_label(&self) -> stats::Label {
        stats::format_timer(self.store.current_timer())
    }

    pub fn confidence_label(&self) -> stats::Label {
        stats::format_confidence(self.stats.confidence)
    }

    pub fn active_percent_label(&self) -> stats::Label {
        stats::format_active_percent(self.store)
    }

    pub fn donut_label(&self) -> stats::Label {
        stats::format_active_percent_whole(self.store)
    }

    pub fn longest_inactive_label(&self) -> stats::Label {
        stats::format_seconds(self.store.longest_inactive_secs())
    }
}
