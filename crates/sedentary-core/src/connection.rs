//! Connection state machine
//!
//! Tracks whether the telemetry stream is up and when the next connect
//! attempt is due. The machine owns no socket and reads no clock: the host
//! passes a monotonic millisecond timestamp into [`ConnectionManager::poll`]
//! and [`ConnectionManager::on_close`], and performs the actual connect when
//! `poll` says so.
//!
//! ```text
//!            poll() -> true            on_open()
//! Disconnected ───────────────> (attempt) ──────────> Connected
//!      ^                            │                     │
//!      │      on_close(now)         │      on_close(now)  │
//!      └────── retry at now+delay <─┴─────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::RECONNECT_DELAY_MS;

/// Link status shown in the dashboard header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connected,
}

impl ConnectionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::Disconnected => "Disconnected",
        }
    }

    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// Fixed-interval reconnecting connection tracker
#[derive(Debug, Clone)]
pub struct ConnectionManager {
    status: ConnectionStatus,
    reconnect_delay_ms: u64,
    /// When the next attempt may start; `None` while an attempt or session is live
    next_attempt_at: Option<u64>,
    attempts: u64,
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new(RECONNECT_DELAY_MS)
    }
}

impl ConnectionManager {
    /// Create a manager whose first attempt is due immediately
    pub fn new(reconnect_delay_ms: u64) -> Self {
        Self {
            status: ConnectionStatus::Disconnected,
            reconnect_delay_ms,
            next_attempt_at: Some(0),
            attempts: 0,
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// Connect attempts started so far
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Whether a connect attempt should start at `now_ms`
    ///
    /// Returns `true` at most once per scheduled attempt; the caller must
    /// report the outcome through [`Self::on_open`] or [`Self::on_close`].
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.next_attempt_at {
            Some(due) if now_ms >= due => {
                self.next_attempt_at = None;
                self.attempts += 1;
                debug!("Starting connect attempt #{}", self.attempts);
                true
            }
            _ => false,
        }
    }

    /// The stream opened
    pub fn on_open(&mut self) {
        if self.status != ConnectionStatus::Connected {
            info!("Telemetry stream connected");
        }
        self.status = ConnectionStatus::Connected;
        self.next_attempt_at = None;
    }

    /// The stream closed, or a connect attempt failed
    ///
    /// Schedules the next attempt one reconnect delay after `now_ms`.
    pub fn on_close(&mut self, now_ms: u64) {
        if self.status == ConnectionStatus::Connected {
            warn!(
                "Telemetry stream lost, retrying in {} ms",
                self.reconnect_delay_ms
            );
        } else {
            debug!("Connect attempt failed, retrying in {} ms", self.reconnect_delay_ms);
        }
        self.status = ConnectionStatus::Disconnected;
        self.next_attempt_at = Some(now_ms.saturating_add(self.reconnect_delay_ms));
    }

    /// Time of the next scheduled attempt, if one is pending
    pub fn next_attempt_at(&self) -> Option<u64> {
        self.next_attempt_at
    }
}
