//! Platform-independent core for the sedentary monitor dashboard
//!
//! This crate contains everything between the telemetry socket and the pixels:
//! message decoding, the rolling telemetry store, the alert log, derived
//! statistics, the connection state machine, and the embedded-graphics
//! renderer for the dashboard page.
//!
//! It is `#![no_std]` with `extern crate alloc` so the same reducer and
//! renderer can drive a desktop window or an embedded display.

#![no_std]

extern crate alloc;

pub mod alerts;
pub mod config;
pub mod connection;
pub mod framebuffer;
pub mod pipeline;
pub mod stats;
pub mod store;
pub mod telemetry;
pub mod ui;
pub mod window;

pub use alerts::{AlertEntry, AlertLog, TimeOfDay};
pub use connection::{ConnectionManager, ConnectionStatus};
pub use pipeline::{DashboardView, MessageOutcome, TelemetryPipeline};
pub use store::TelemetryStore;
pub use telemetry::{ActivityLevel, ActivityState, DecodeError, TelemetryReading};
pub use window::RollingWindow;
