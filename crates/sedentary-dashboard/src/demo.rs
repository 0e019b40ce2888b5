//! Simulated wearer
//!
//! Produces the same text frames a real device stream would: raw samples
//! from a random sequence of still, fidgeting and moving phases are run
//! through the device classifier and serialized. Occasional plain-text
//! diagnostics and fault reports are mixed in so those paths stay exercised.

use chrono::{NaiveTime, Timelike};
use log::{debug, warn};
use rand::Rng;
use rand::rngs::ThreadRng;

use sedentary_core::config::ClassifierConfig;
use sedentary_core::telemetry::{RawDeviceReading, StateClassifier};

/// Chance that a sample is replaced by a diagnostic line
const DIAGNOSTIC_PROBABILITY: f64 = 0.005;

/// Chance that a sample is replaced by a fault report
const FAULT_PROBABILITY: f64 = 0.002;

const DIAGNOSTIC_LINES: [&str; 3] = [
    "MPU6050: recalibrating gyro offsets",
    "PIR: warm-up complete",
    "WiFi RSSI -67 dBm",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Still,
    Fidgeting,
    Moving,
}

impl Phase {
    /// Phase length range in device seconds
    fn duration_range(self) -> std::ops::RangeInclusive<u32> {
        match self {
            Phase::Still => 60..=1_500,
            Phase::Fidgeting => 5..=40,
            Phase::Moving => 10..=90,
        }
    }

    /// Raw acceleration delta range
    fn accel_range(self) -> std::ops::Range<f32> {
        match self {
            Phase::Still => 0.0..0.012,
            Phase::Fidgeting => 0.022..0.038,
            Phase::Moving => 0.045..0.095,
        }
    }
}

pub struct DemoSource {
    rng: ThreadRng,
    classifier: StateClassifier,
    clock: NaiveTime,
    phase: Phase,
    phase_remaining: u32,
}

impl DemoSource {
    /// Start a simulated device whose clock begins at `start`
    pub fn new(config: ClassifierConfig, start: NaiveTime) -> Self {
        Self {
            rng: rand::rng(),
            classifier: StateClassifier::new(config),
            clock: start,
            phase: Phase::Still,
            phase_remaining: Phase::Still.duration_range().start() * 2,
        }
    }

    /// Produce the next frame, advancing the device clock by one second
    /// unless the frame is a diagnostic or fault line
    pub fn next_frame(&mut self) -> Option<String> {
        if self.rng.random_bool(DIAGNOSTIC_PROBABILITY) {
            let line = DIAGNOSTIC_LINES[self.rng.random_range(0..DIAGNOSTIC_LINES.len())];
            return Some(line.to_string());
        }
        if self.rng.random_bool(FAULT_PROBABILITY) {
            return Some(r#"{"error":"sensor fault"}"#.to_string());
        }

        self.advance_phase();
        let raw = RawDeviceReading {
            ts: self.clock.format("%H:%M:%S").to_string(),
            pir: self.pir(),
            acc: self.rng.random_range(self.phase.accel_range()),
        };
        self.clock += chrono::Duration::seconds(1);

        let message = self.classifier.process(&raw);
        match message.to_json() {
            Ok(json) => Some(json),
            Err(e) => {
                warn!("Demo frame failed to serialize: {}", e);
                None
            }
        }
    }

    /// Device-side sedentary timer
    pub fn sedentary_timer(&self) -> u64 {
        self.classifier.sedentary_timer()
    }

    /// Current device time of day
    pub fn device_time(&self) -> (u32, u32, u32) {
        (self.clock.hour(), self.clock.minute(), self.clock.second())
    }

    fn pir(&mut self) -> i32 {
        match self.phase {
            Phase::Moving => i32::from(self.rng.random_bool(0.3)),
            _ => 0,
        }
    }

    fn advance_phase(&mut self) {
        if self.phase_remaining > 0 {
            self.phase_remaining -= 1;
            return;
        }

        self.phase = match self.phase {
            Phase::Still => {
                if self.rng.random_bool(0.5) {
                    Phase::Fidgeting
                } else {
                    Phase::Moving
                }
            }
            Phase::Fidgeting => {
                if self.rng.random_bool(0.6) {
                    Phase::Still
                } else {
                    Phase::Moving
                }
            }
            Phase::Moving => Phase::Still,
        };
        self.phase_remaining = self.rng.random_range(self.phase.duration_range());
        debug!(
            "Demo wearer now {:?} for {}s",
            self.phase, self.phase_remaining
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sedentary_core::{ActivityState, TelemetryPipeline, TimeOfDay};

    #[test]
    fn test_frames_feed_the_pipeline() {
        let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let mut demo = DemoSource::new(ClassifierConfig::default(), start);
        let mut pipeline = TelemetryPipeline::new();
        let mut produced = 0;

        for _ in 0..500 {
            if let Some(frame) = demo.next_frame() {
                pipeline.handle_message(&frame, TimeOfDay::new(9, 0, 0));
                produced += 1;
            }
        }

        assert_eq!(produced, 500);
        // Diagnostics and faults are dropped, so at most every frame applies
        let total = pipeline.store().total_readings();
        assert!(total > 400 && total <= 500);
    }

    #[test]
    fn test_wearer_starts_still() {
        let start = NaiveTime::from_hms_opt(23, 59, 50).unwrap();
        let mut demo = DemoSource::new(ClassifierConfig::default(), start);
        let mut pipeline = TelemetryPipeline::new();

        // The opening still phase lasts at least two minutes
        for _ in 0..60 {
            if let Some(frame) = demo.next_frame() {
                pipeline.handle_message(&frame, TimeOfDay::default());
            }
        }

        assert_eq!(pipeline.store().current_state(), ActivityState::Sedentary);
        assert_eq!(pipeline.store().active_readings(), 0);
        assert!(demo.sedentary_timer() > 0);
        // Clock wraps past midnight
        assert_eq!(demo.device_time().0, 0);
    }
}
