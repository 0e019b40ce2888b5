//! Telemetry message types
//!
//! A [`TelemetryReading`] is the typed form of one inbound state message. It is
//! produced by [`decode`], folded into the store by the pipeline and dropped.

mod classifier;
mod decoder;

pub use classifier::{DeviceMessage, RawDeviceReading, StateClassifier};
pub use decoder::{DecodeError, decode};

use alloc::string::String;
use embedded_graphics::pixelcolor::Rgb565;
use serde::{Deserialize, Serialize};

use crate::ui::colors::{COLOR_ACTIVE, COLOR_FIDGET, COLOR_SEDENTARY};

/// Motion classification reported by the device
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityState {
    /// Moving; the sedentary timer is reset
    Active,
    /// Small movements; the sedentary timer is paused
    Fidget,
    /// Still; the sedentary timer counts up
    #[default]
    Sedentary,
}

impl ActivityState {
    /// Parse the wire label, falling back to [`ActivityState::Sedentary`]
    /// for anything unrecognized
    pub fn from_label(label: &str) -> Self {
        match label {
            "ACTIVE" => Self::Active,
            "FIDGET" => Self::Fidget,
            _ => Self::Sedentary,
        }
    }

    /// Wire label for this state
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Fidget => "FIDGET",
            Self::Sedentary => "SEDENTARY",
        }
    }

    /// Timeline level code for this state
    pub const fn level(self) -> ActivityLevel {
        match self {
            Self::Active => ActivityLevel::Active,
            Self::Fidget => ActivityLevel::Fidget,
            Self::Sedentary => ActivityLevel::Sedentary,
        }
    }

    /// Short badge text for the status indicator
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Fidget => "Fidget",
            Self::Sedentary => "Sedentary",
        }
    }

    /// Long description shown next to the badge
    pub const fn description(self) -> &'static str {
        match self {
            Self::Active => "Active (Moving)",
            Self::Fidget => "Fidgeting (Paused)",
            Self::Sedentary => "Sedentary (Still)",
        }
    }

    /// Caption shown above the sedentary timer
    pub const fn timer_caption(self) -> &'static str {
        match self {
            Self::Active => "Timer Reset!",
            Self::Fidget => "Timer Paused:",
            Self::Sedentary => "Sedentary for:",
        }
    }
}

/// Activity level code plotted on the timeline (0 = sedentary, 2 = active)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ActivityLevel {
    #[default]
    Sedentary = 0,
    Fidget = 1,
    Active = 2,
}

impl ActivityLevel {
    /// Numeric level code
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Timeline bar color: red, yellow or green
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Sedentary => COLOR_SEDENTARY,
            Self::Fidget => COLOR_FIDGET,
            Self::Active => COLOR_ACTIVE,
        }
    }
}

/// One decoded telemetry message
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TelemetryReading {
    /// Classified motion state
    pub state: ActivityState,
    /// Seconds since motion last qualified as active
    pub sedentary_secs: u64,
    /// Smoothed acceleration delta magnitude
    pub accel_magnitude: f64,
    /// Device-side inactivity alert flag
    pub alert: bool,
    /// Device timestamp, carried through uninterpreted
    pub timestamp: Option<String>,
}

impl TelemetryReading {
    pub fn new(state: ActivityState, sedentary_secs: u64, accel_magnitude: f64) -> Self {
        Self {
            state,
            sedentary_secs,
            accel_magnitude,
            alert: false,
            timestamp: None,
        }
    }

    pub fn with_alert(mut self, alert: bool) -> Self {
        self.alert = alert;
        self
    }
}
