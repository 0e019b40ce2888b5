//! Inbound message decoder
//!
//! Accepts one text frame from the telemetry socket and produces a
//! [`TelemetryReading`], or a [`DecodeError`] describing why the frame was
//! dropped. Nothing here panics on hostile input.

use alloc::string::{String, ToString};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror_no_std::Error;

use super::{ActivityState, TelemetryReading};

/// Reasons a frame is not folded into the store
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    /// Plain-text diagnostic output from the device (does not start with `{`)
    #[error("Not a telemetry frame")]
    NotTelemetry,

    /// Looked like JSON but could not be parsed into a reading
    #[error("Malformed telemetry: {0}")]
    Malformed(String),

    /// The device reported a fault instead of a reading
    #[error("Device reported error: {0}")]
    DeviceFault(String),
}

/// Wire layout of a state message; every field is optional
#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    timer: Option<u64>,
    #[serde(default)]
    val: Option<f64>,
    #[serde(default)]
    alert: Option<bool>,
    #[serde(default)]
    timestamp: Option<String>,
}

/// Whether an `error` member carries a fault
///
/// `null`, `false`, `0` and the empty string mean "no error"; anything else,
/// including empty arrays and objects, is a fault.
fn reports_fault(error: &Value) -> bool {
    match error {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Decode a single inbound frame
///
/// Missing or `null` fields take their defaults: state `SEDENTARY`, timer 0,
/// acceleration 0 and alert `false`. An `error` member that reports a fault
/// (see [`reports_fault`]) turns the whole frame into a
/// [`DecodeError::DeviceFault`], whatever else it carries.
pub fn decode(raw: &str) -> Result<TelemetryReading, DecodeError> {
    if !raw.starts_with('{') {
        return Err(DecodeError::NotTelemetry);
    }

    let mut object: Map<String, Value> =
        serde_json::from_str(raw).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    match object.remove("error") {
        Some(Value::String(message)) if !message.is_empty() => {
            return Err(DecodeError::DeviceFault(message));
        }
        Some(other) if reports_fault(&other) => {
            return Err(DecodeError::DeviceFault(other.to_string()));
        }
        _ => {}
    }

    let wire: WireMessage = serde_json::from_value(Value::Object(object))
        .map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let accel_magnitude = wire.val.unwrap_or(0.0);
    if !accel_magnitude.is_finite() || accel_magnitude < 0.0 {
        return Err(DecodeError::Malformed(
            "val must be a non-negative number".to_string(),
        ));
    }

    Ok(TelemetryReading {
        state: wire
            .state
            .as_deref()
            .map(ActivityState::from_label)
            .unwrap_or_default(),
        sedentary_secs: wire.timer.unwrap_or(0),
        accel_magnitude,
        alert: wire.alert.unwrap_or(false),
        timestamp: wire.timestamp,
    })
}
