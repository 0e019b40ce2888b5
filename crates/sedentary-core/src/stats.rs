//! Derived statistics and label formatting
//!
//! Everything here is a pure function of the store; nothing is cached.

use core::fmt::Write;

use heapless::String;

use crate::config::{CONFIDENCE_SCALE, CONFIDENCE_WINDOW};
use crate::store::TelemetryStore;
use crate::window::RollingWindow;

/// Maximum length of a formatted statistic label
pub const MAX_LABEL_LENGTH: usize = 32;

/// Short formatted label
pub type Label = String<MAX_LABEL_LENGTH>;

/// Statistics computed on demand from the store
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedStats {
    /// Stability score of recent acceleration, 0-100
    pub confidence: f64,
    /// Share of readings classified active, 0-100
    pub active_percent: f64,
}

impl DerivedStats {
    pub fn from_store(store: &TelemetryStore) -> Self {
        Self {
            confidence: confidence(store.accel_window()),
            active_percent: active_percent(store),
        }
    }
}

/// Confidence score from the variance of the most recent samples
///
/// `clamp(100 - variance * 50, 0, 100)` over the last [`CONFIDENCE_WINDOW`]
/// values. An empty window scores 0.
pub fn confidence<const N: usize>(window: &RollingWindow<f64, N>) -> f64 {
    let count = window.len().min(CONFIDENCE_WINDOW);
    if count == 0 {
        return 0.0;
    }

    let n = count as f64;
    let mean = window.latest(CONFIDENCE_WINDOW).sum::<f64>() / n;
    let variance = window
        .latest(CONFIDENCE_WINDOW)
        .map(|x| (x - mean) * (x - mean))
        .sum::<f64>()
        / n;

    (100.0 - variance * CONFIDENCE_SCALE).clamp(0.0, 100.0)
}

/// Percentage of all readings that were classified active
pub fn active_percent(store: &TelemetryStore) -> f64 {
    if store.total_readings() == 0 {
        return 0.0;
    }
    store.active_readings() as f64 / store.total_readings() as f64 * 100.0
}

/// Round a non-negative value to `10^-decimals`, halves rounding up
///
/// Returns the value scaled to an integer (e.g. 30.04 at one decimal is 300).
fn round_half_up(value: f64, decimals: u32) -> u64 {
    let scale = 10u64.pow(decimals) as f64;
    (value.max(0.0) * scale + 0.5) as u64
}

/// Active share scaled to `10^-decimals` percent, halves rounding up
///
/// Works on the counters directly so exact ties such as 21 of 40 (52.5%)
/// always round up.
fn active_percent_scaled(store: &TelemetryStore, decimals: u32) -> u64 {
    let total = store.total_readings() as u128;
    if total == 0 {
        return 0;
    }
    let scale = 100 * 10u128.pow(decimals);
    let active = store.active_readings() as u128;
    ((2 * active * scale + total) / (2 * total)) as u64
}

/// Active percentage with one decimal, e.g. `30.0%`
///
/// An empty session shows a bare `0%`.
pub fn format_active_percent(store: &TelemetryStore) -> Label {
    let mut label = Label::new();
    if store.total_readings() == 0 {
        let _ = label.push_str("0%");
        return label;
    }

    let tenths = active_percent_scaled(store, 1);
    let _ = write!(label, "{}.{}%", tenths / 10, tenths % 10);
    label
}

/// Active percentage rounded to a whole number for the donut centre, e.g. `30%`
pub fn format_active_percent_whole(store: &TelemetryStore) -> Label {
    let mut label = Label::new();
    let _ = write!(label, "{}%", active_percent_scaled(store, 0));
    label
}

/// Confidence rounded to a whole number, e.g. `97%`
pub fn format_confidence(confidence: f64) -> Label {
    let mut label = Label::new();
    let _ = write!(label, "{}%", round_half_up(confidence, 0));
    label
}

/// Sedentary timer as `MM:SS`; minutes are not wrapped into hours
pub fn format_timer(seconds: u64) -> Label {
    let mut label = Label::new();
    let _ = write!(label, "{:02}:{:02}", seconds / 60, seconds % 60);
    label
}

/// Duration in whole seconds, e.g. `1260s`
pub fn format_seconds(seconds: u64) -> Label {
    let mut label = Label::new();
    let _ = write!(label, "{}s", seconds);
    label
}
