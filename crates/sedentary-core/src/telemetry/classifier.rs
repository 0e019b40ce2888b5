//! Device-side state classification
//!
//! The sensor hub turns raw accelerometer/PIR samples into the state messages
//! the dashboard consumes. This module reproduces that producer so the
//! dashboard can run from a synthetic source and tests can drive the whole
//! path from raw samples.
//!
//! # Algorithm
//!
//! 1. Smooth `acc` with the mean of the last [`SMOOTHING_WINDOW`] samples.
//! 2. PIR motion or smoothed acceleration above the active threshold is
//!    `ACTIVE`; above the fidget threshold is `FIDGET`; otherwise `SEDENTARY`.
//! 3. The sedentary timer moves at most once per distinct device second:
//!    `ACTIVE` resets it, `FIDGET` pauses it, `SEDENTARY` increments it.
//! 4. The alert flag is raised while the timer is at or past the alert limit.

use alloc::string::String;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{ClassifierConfig, SMOOTHING_WINDOW};
use crate::window::RollingWindow;

use super::ActivityState;

/// Raw sample emitted by the device firmware
///
/// Format: `{"ts":"12:34:56","pir":0,"acc":0.045}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDeviceReading {
    /// Wall-clock second from the device RTC (`HH:MM:SS`)
    pub ts: String,
    /// Passive infrared motion flag (0 or 1)
    pub pir: i32,
    /// Acceleration delta magnitude
    pub acc: f32,
}

/// Processed state message, the dashboard's inbound wire format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceMessage {
    pub state: ActivityState,
    pub timer: u64,
    pub val: f32,
    pub alert: bool,
    pub timestamp: String,
}

impl DeviceMessage {
    /// Serialize to a single JSON text frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Stateful classifier producing [`DeviceMessage`]s from raw samples
pub struct StateClassifier {
    config: ClassifierConfig,
    smoothing: RollingWindow<f32, SMOOTHING_WINDOW>,
    sedentary_timer: u64,
    last_second: Option<String>,
}

impl StateClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            smoothing: RollingWindow::new(),
            sedentary_timer: 0,
            last_second: None,
        }
    }

    /// Current sedentary timer in seconds
    pub fn sedentary_timer(&self) -> u64 {
        self.sedentary_timer
    }

    /// Classify a raw line from the device, skipping anything that is not a
    /// well-formed raw sample
    pub fn process_line(&mut self, line: &str) -> Option<DeviceMessage> {
        let line = line.trim();
        if !line.starts_with('{') {
            return None;
        }

        match serde_json::from_str::<RawDeviceReading>(line) {
            Ok(reading) => Some(self.process(&reading)),
            Err(e) => {
                debug!("Skipping unparseable device line: {}", e);
                None
            }
        }
    }

    /// Fold one raw sample and return the resulting state message
    pub fn process(&mut self, reading: &RawDeviceReading) -> DeviceMessage {
        self.smoothing.push(reading.acc);
        let smoothed = self.smoothed();
        let state = self.classify(reading.pir, smoothed);

        if self.last_second.as_deref() != Some(reading.ts.as_str()) {
            self.last_second = Some(reading.ts.clone());

            match state {
                ActivityState::Active => self.sedentary_timer = 0,
                ActivityState::Fidget => {}
                ActivityState::Sedentary => self.sedentary_timer += 1,
            }
        }

        DeviceMessage {
            state,
            timer: self.sedentary_timer,
            val: smoothed,
            alert: self.sedentary_timer >= self.config.alert_limit_secs,
            timestamp: reading.ts.clone(),
        }
    }

    fn smoothed(&self) -> f32 {
        let count = self.smoothing.len();
        if count == 0 {
            return 0.0;
        }
        self.smoothing.iter().sum::<f32>() / count as f32
    }

    fn classify(&self, pir: i32, smoothed: f32) -> ActivityState {
        if pir == 1 || smoothed > self.config.active_threshold {
            ActivityState::Active
        } else if smoothed > self.config.fidget_threshold {
            ActivityState::Fidget
        } else {
            ActivityState::Sedentary
        }
    }
}
