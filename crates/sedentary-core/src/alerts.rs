//! Inactivity alert log
//!
//! The device keeps its alert flag raised for as long as the wearer stays
//! inactive past the limit. The log throttles that to one entry per minute of
//! continued inactivity by only firing on timer values that are a multiple of
//! [`ALERT_THROTTLE_SECS`]. A flagged reading with a timer of 0 also satisfies
//! the rule and is logged.

use core::fmt;

use heapless::Deque;
use log::info;

use crate::config::{ALERT_LOG_CAPACITY, ALERT_THROTTLE_SECS};
use crate::telemetry::TelemetryReading;

/// Local wall-clock time of day, supplied by the host when an alert fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeOfDay {
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// One logged alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertEntry {
    /// When the dashboard logged the alert
    pub logged_at: TimeOfDay,
    /// Sedentary timer value that triggered it
    pub duration_secs: u64,
}

/// Most-recent-first bounded alert log
#[derive(Debug, Clone, Default)]
pub struct AlertLog {
    entries: Deque<AlertEntry, ALERT_LOG_CAPACITY>,
    alert_count: u64,
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log an alert for `reading` if it is flagged and on a minute boundary
    ///
    /// Returns `true` when an entry was added.
    pub fn maybe_log(&mut self, reading: &TelemetryReading, now: TimeOfDay) -> bool {
        if !reading.alert || reading.sedentary_secs % ALERT_THROTTLE_SECS != 0 {
            return false;
        }

        self.alert_count += 1;
        if self.entries.is_full() {
            self.entries.pop_back();
        }
        // Cannot fail: a slot was freed above when the deque was full
        let _ = self.entries.push_front(AlertEntry {
            logged_at: now,
            duration_secs: reading.sedentary_secs,
        });

        info!(
            "Inactivity alert #{} at {}: {}s inactive",
            self.alert_count, now, reading.sedentary_secs
        );
        true
    }

    /// Alerts logged this session, including ones no longer in the log
    pub fn alert_count(&self) -> u64 {
        self.alert_count
    }

    /// Logged alerts, newest first
    pub fn entries(&self) -> impl Iterator<Item = &AlertEntry> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
