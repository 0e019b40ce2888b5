//! Capacity constants and classifier thresholds
//!
//! Window sizes and calibration constants are fixed at compile time so the
//! rolling buffers can live in `heapless` storage. Classifier thresholds are
//! runtime configurable and deserialize from the dashboard settings file.

use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

/// Number of readings held by each rolling chart window
pub const MAX_DATA_POINTS: usize = 100;

/// Number of alerts kept in the most-recent-first alert log
pub const ALERT_LOG_CAPACITY: usize = 10;

/// Number of most recent acceleration samples used for the confidence score
pub const CONFIDENCE_WINDOW: usize = 10;

/// Variance multiplier for the confidence score (`100 - variance * scale`)
pub const CONFIDENCE_SCALE: f64 = 50.0;

/// Alerts are only logged on timer values that are a multiple of this
pub const ALERT_THROTTLE_SECS: u64 = 60;

/// Fixed delay between a lost connection and the next connect attempt
pub const RECONNECT_DELAY_MS: u64 = 3_000;

/// Number of raw acceleration samples averaged by the device classifier
pub const SMOOTHING_WINDOW: usize = 10;

/// Smoothed acceleration above which the wearer is considered fidgeting
pub const DEFAULT_FIDGET_THRESHOLD: f32 = 0.020;

/// Smoothed acceleration above which the wearer is considered active
pub const DEFAULT_ACTIVE_THRESHOLD: f32 = 0.040;

/// Sedentary seconds after which the device raises its alert flag (20 minutes)
pub const DEFAULT_ALERT_LIMIT_SECS: u64 = 1_200;

/// Upper bound of the acceleration chart's Y axis
pub const ACCEL_CHART_MAX: f32 = 0.1;

/// Thresholds shared by the device classifier and the waveform guide lines
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Smoothed acceleration delta that counts as fidgeting
    pub fidget_threshold: f32,
    /// Smoothed acceleration delta that counts as movement
    pub active_threshold: f32,
    /// Sedentary timer value at which the alert flag is raised
    pub alert_limit_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            fidget_threshold: DEFAULT_FIDGET_THRESHOLD,
            active_threshold: DEFAULT_ACTIVE_THRESHOLD,
            alert_limit_secs: DEFAULT_ALERT_LIMIT_SECS,
        }
    }
}

impl ClassifierConfig {
    /// Check that the thresholds describe a usable classification
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fidget_threshold.is_finite() || self.fidget_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                name: "fidget_threshold",
            });
        }
        if !self.active_threshold.is_finite() || self.active_threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                name: "active_threshold",
            });
        }
        if self.fidget_threshold >= self.active_threshold {
            return Err(ConfigError::ThresholdOrder);
        }
        if self.alert_limit_secs == 0 {
            return Err(ConfigError::ZeroAlertLimit);
        }
        Ok(())
    }
}

/// Errors reported by [`ClassifierConfig::validate`]
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A threshold is negative or not a number
    #[error("Invalid threshold: {name}")]
    InvalidThreshold {
        /// Name of the offending field
        name: &'static str,
    },

    /// The fidget threshold must sit below the active threshold
    #[error("Fidget threshold must be below active threshold")]
    ThresholdOrder,

    /// An alert limit of zero would flag every reading
    #[error("Alert limit must be non-zero")]
    ZeroAlertLimit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(ClassifierConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let config = ClassifierConfig {
            fidget_threshold: 0.05,
            active_threshold: 0.04,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ThresholdOrder));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let config = ClassifierConfig {
            active_threshold: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidThreshold {
                name: "active_threshold"
            })
        );
    }

    #[test]
    fn test_zero_alert_limit_rejected() {
        let config = ClassifierConfig {
            alert_limit_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroAlertLimit));
    }
}
