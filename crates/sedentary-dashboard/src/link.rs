//! WebSocket telemetry link
//!
//! Each connect attempt runs on its own worker thread that reports back over
//! a channel. The UI thread never blocks on the socket: it drains
//! [`LinkEvent`]s once per frame and feeds them to the connection state
//! machine and the pipeline.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use log::{debug, error, info, warn};
use tungstenite::Message;

use sedentary_core::{ConnectionManager, ConnectionStatus, TelemetryPipeline, TimeOfDay};

/// Event reported by a link worker
#[derive(Debug, Clone, PartialEq)]
pub enum LinkEvent {
    /// Handshake completed
    Opened,
    /// One text frame
    Text(String),
    /// The attempt failed or the session ended
    Closed(String),
}

/// Live socket source driven by a [`ConnectionManager`]
pub struct LiveLink {
    url: String,
    manager: ConnectionManager,
    tx: Sender<LinkEvent>,
    rx: Receiver<LinkEvent>,
}

impl LiveLink {
    pub fn new(url: String, reconnect_delay_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            url,
            manager: ConnectionManager::new(reconnect_delay_ms),
            tx,
            rx,
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.manager.status()
    }

    /// Start due connect attempts and fold pending events into `pipeline`
    ///
    /// Returns `true` when anything drawn on the dashboard changed.
    pub fn pump(
        &mut self,
        now_ms: u64,
        pipeline: &mut TelemetryPipeline,
        clock: impl Fn() -> TimeOfDay,
    ) -> bool {
        if self.manager.poll(now_ms) {
            info!("Connecting to {}", self.url);
            spawn_worker(self.url.clone(), self.tx.clone());
        }

        let mut changed = false;
        loop {
            match self.rx.try_recv() {
                Ok(LinkEvent::Opened) => {
                    self.manager.on_open();
                    changed = true;
                }
                Ok(LinkEvent::Text(text)) => {
                    changed |= pipeline.handle_message(&text, clock()).is_applied();
                }
                Ok(LinkEvent::Closed(reason)) => {
                    debug!("Link closed: {}", reason);
                    self.manager.on_close(now_ms);
                    changed = true;
                }
                Err(TryRecvError::Empty) => break,
                // Unreachable while `self.tx` is alive
                Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }
}

fn spawn_worker(url: String, tx: Sender<LinkEvent>) {
    let builder = thread::Builder::new().name("telemetry-link".into());
    let worker_tx = tx.clone();
    let spawned = builder.spawn(move || {
        let reason = match run_session(&url, &worker_tx) {
            Ok(()) => "closed by peer".to_string(),
            Err(e) => e.to_string(),
        };
        let _ = worker_tx.send(LinkEvent::Closed(reason));
    });

    if let Err(e) = spawned {
        error!("Failed to spawn link worker: {}", e);
        let _ = tx.send(LinkEvent::Closed(e.to_string()));
    }
}

/// Connect and forward text frames until the socket closes
///
/// Returns `Ok` for an orderly close and when the UI side has gone away.
fn run_session(url: &str, tx: &Sender<LinkEvent>) -> Result<(), tungstenite::Error> {
    let (mut socket, _response) = tungstenite::connect(url)?;
    if tx.send(LinkEvent::Opened).is_err() {
        return Ok(());
    }

    loop {
        let message = match socket.read() {
            Ok(message) => message,
            Err(tungstenite::Error::ConnectionClosed) => return Ok(()),
            Err(e) => return Err(e),
        };

        match message {
            Message::Text(text) => {
                if tx.send(LinkEvent::Text(text.as_str().to_owned())).is_err() {
                    let _ = socket.close(None);
                    return Ok(());
                }
            }
            Message::Close(frame) => {
                if let Some(frame) = frame {
                    warn!("Server closed stream: {} {}", frame.code, frame.reason.as_str());
                }
                return Ok(());
            }
            Message::Binary(bytes) => debug!("Ignoring {}-byte binary frame", bytes.len()),
            _ => {}
        }
    }
}
