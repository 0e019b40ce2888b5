//! Rolling telemetry store
//!
//! Holds the chart windows and cumulative counters for the session. The store
//! is owned by the pipeline and only changes through [`TelemetryStore::apply`].

use crate::config::MAX_DATA_POINTS;
use crate::telemetry::{ActivityLevel, ActivityState, TelemetryReading};
use crate::window::RollingWindow;

/// Session telemetry state
#[derive(Debug, Clone, Default)]
pub struct TelemetryStore {
    accel: RollingWindow<f64, MAX_DATA_POINTS>,
    activity: RollingWindow<ActivityLevel, MAX_DATA_POINTS>,
    total_readings: u64,
    active_readings: u64,
    longest_inactive_secs: u64,
    current_state: ActivityState,
    current_timer: u64,
}

impl TelemetryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one reading into the store
    pub fn apply(&mut self, reading: &TelemetryReading) {
        self.total_readings += 1;
        self.current_state = reading.state;
        self.current_timer = reading.sedentary_secs;

        self.accel.push(reading.accel_magnitude);

        if reading.state == ActivityState::Active {
            self.active_readings += 1;
        }

        self.longest_inactive_secs = self.longest_inactive_secs.max(reading.sedentary_secs);

        self.activity.push(reading.state.level());
    }

    /// Acceleration magnitudes, oldest first
    pub fn accel_window(&self) -> &RollingWindow<f64, MAX_DATA_POINTS> {
        &self.accel
    }

    /// Activity level codes, oldest first, aligned with [`Self::accel_window`]
    pub fn activity_window(&self) -> &RollingWindow<ActivityLevel, MAX_DATA_POINTS> {
        &self.activity
    }

    pub fn total_readings(&self) -> u64 {
        self.total_readings
    }

    pub fn active_readings(&self) -> u64 {
        self.active_readings
    }

    /// Readings classified as anything other than active
    pub fn inactive_readings(&self) -> u64 {
        self.total_readings - self.active_readings
    }

    /// Largest sedentary timer value observed this session
    pub fn longest_inactive_secs(&self) -> u64 {
        self.longest_inactive_secs
    }

    pub fn current_state(&self) -> ActivityState {
        self.current_state
    }

    /// Sedentary timer from the latest reading
    pub fn current_timer(&self) -> u64 {
        self.current_timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn reading(state: ActivityState, timer: u64, accel: f64) -> TelemetryReading {
        TelemetryReading::new(state, timer, accel)
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = TelemetryStore::new();

        assert_eq!(store.total_readings(), 0);
        assert_eq!(store.active_readings(), 0);
        assert_eq!(store.current_state(), ActivityState::Sedentary);
        assert!(store.accel_window().is_empty());
        assert!(store.activity_window().is_empty());
    }

    #[test]
    fn test_apply_updates_snapshot_and_counters() {
        let mut store = TelemetryStore::new();

        store.apply(&reading(ActivityState::Sedentary, 30, 0.01));
        store.apply(&reading(ActivityState::Active, 0, 0.06));

        assert_eq!(store.total_readings(), 2);
        assert_eq!(store.active_readings(), 1);
        assert_eq!(store.inactive_readings(), 1);
        assert_eq!(store.current_state(), ActivityState::Active);
        assert_eq!(store.current_timer(), 0);
        assert_eq!(store.longest_inactive_secs(), 30);
        assert_eq!(store.accel_window().newest(), Some(0.06));
        assert_eq!(store.activity_window().newest(), Some(ActivityLevel::Active));
    }

    #[test]
    fn test_windows_keep_last_hundred_in_order() {
        let mut store = TelemetryStore::new();

        for i in 0..150u64 {
            let state = match i % 3 {
                0 => ActivityState::Active,
                1 => ActivityState::Fidget,
                _ => ActivityState::Sedentary,
            };
            store.apply(&reading(state, i, i as f64));
        }

        assert_eq!(store.accel_window().len(), MAX_DATA_POINTS);
        assert_eq!(store.activity_window().len(), MAX_DATA_POINTS);

        let accel: Vec<f64> = store.accel_window().iter().collect();
        let expected: Vec<f64> = (50..150).map(|i| i as f64).collect();
        assert_eq!(accel, expected);

        let levels: Vec<u8> = store.activity_window().iter().map(|l| l.code()).collect();
        let expected_levels: Vec<u8> = (50..150u64)
            .map(|i| match i % 3 {
                0 => 2,
                1 => 1,
                _ => 0,
            })
            .collect();
        assert_eq!(levels, expected_levels);
    }

    #[test]
    fn test_longest_inactive_is_running_max() {
        let mut store = TelemetryStore::new();
        let timers = [5, 90, 12, 0, 89, 91, 3];

        for timer in timers {
            store.apply(&reading(ActivityState::Sedentary, timer, 0.0));
        }

        assert_eq!(store.longest_inactive_secs(), 91);
        assert_eq!(store.current_timer(), 3);
    }

    #[test]
    fn test_counters_monotonic_and_bounded() {
        let mut store = TelemetryStore::new();
        let states = [
            ActivityState::Active,
            ActivityState::Sedentary,
            ActivityState::Fidget,
            ActivityState::Active,
            ActivityState::Active,
        ];
        let mut previous = (0, 0);

        for state in states.iter().cycle().take(40) {
            store.apply(&reading(*state, 0, 0.0));

            let current = (store.total_readings(), store.active_readings());
            assert!(current.0 >= previous.0);
            assert!(current.1 >= previous.1);
            assert!(current.1 <= current.0);
            previous = current;
        }

        assert_eq!(store.total_readings(), 40);
        assert_eq!(store.active_readings(), 24);
    }
}
