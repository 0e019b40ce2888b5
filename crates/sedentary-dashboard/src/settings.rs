//! Dashboard settings
//!
//! Resolved in three layers, later ones winning: built-in defaults, an
//! optional TOML file, then command-line flags (which also read their
//! `SEDENTARY_*` environment variables).
//!
//! ```toml
//! url = "ws://192.168.1.40:8000/ws"
//! reconnect_delay_ms = 3000
//! scale = 2
//!
//! [classifier]
//! fidget_threshold = 0.02
//! active_threshold = 0.04
//! alert_limit_secs = 1200
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::{Deserialize, Serialize};

use sedentary_core::config::{ClassifierConfig, RECONNECT_DELAY_MS};

/// Telemetry endpoint of the companion server
pub const DEFAULT_URL: &str = "ws://127.0.0.1:8000/ws";

/// Default pixel scale of the simulator window
pub const DEFAULT_SCALE: u32 = 2;

/// Live dashboard for the sedentary monitor telemetry stream
#[derive(Parser, Debug)]
#[command(name = "sedentary-dashboard", version, about)]
pub struct Cli {
    /// WebSocket endpoint streaming state messages
    #[arg(long, env = "SEDENTARY_WS_URL")]
    pub url: Option<String>,

    /// TOML settings file
    #[arg(long, env = "SEDENTARY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Drive the dashboard from a simulated wearer instead of the socket
    #[arg(long)]
    pub demo: bool,

    /// Simulated device seconds per wall-clock second in demo mode
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub demo_rate: u32,

    /// Pixel scale of the window
    #[arg(long, env = "SEDENTARY_SCALE")]
    pub scale: Option<u32>,

    /// Delay before reconnecting after the stream drops
    #[arg(long, env = "SEDENTARY_RECONNECT_MS")]
    pub reconnect_ms: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub url: String,
    pub reconnect_delay_ms: u64,
    pub scale: u32,
    pub classifier: ClassifierConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            reconnect_delay_ms: RECONNECT_DELAY_MS,
            scale: DEFAULT_SCALE,
            classifier: ClassifierConfig::default(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Layer the command line over the settings file (if any) and validate
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(url) = &cli.url {
            settings.url = url.clone();
        }
        if let Some(scale) = cli.scale {
            settings.scale = scale;
        }
        if let Some(delay) = cli.reconnect_ms {
            settings.reconnect_delay_ms = delay;
        }

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        self.classifier
            .validate()
            .map_err(|e| anyhow!("invalid classifier settings: {}", e))?;
        if self.scale == 0 {
            return Err(anyhow!("scale must be at least 1"));
        }
        // tungstenite is built without a TLS backend
        if !self.url.starts_with("ws://") {
            return Err(anyhow!("url must use plain ws://, got {}", self.url));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["sedentary-dashboard"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            url = "ws://10.0.0.5:8000/ws"

            [classifier]
            alert_limit_secs = 600
            "#,
        )
        .unwrap();

        assert_eq!(settings.url, "ws://10.0.0.5:8000/ws");
        assert_eq!(settings.reconnect_delay_ms, RECONNECT_DELAY_MS);
        assert_eq!(settings.classifier.alert_limit_secs, 600);
        assert_eq!(settings.classifier.active_threshold, 0.040);
    }

    #[test]
    fn test_flags_override_defaults() {
        let settings = Settings::resolve(&cli(&[
            "--url",
            "ws://example.local/ws",
            "--scale",
            "3",
            "--reconnect-ms",
            "500",
        ]))
        .unwrap();

        assert_eq!(settings.url, "ws://example.local/ws");
        assert_eq!(settings.scale, 3);
        assert_eq!(settings.reconnect_delay_ms, 500);
    }

    #[test]
    fn test_rejects_non_websocket_url() {
        let err = Settings::resolve(&cli(&["--url", "http://localhost:8000"])).unwrap_err();
        assert!(err.to_string().contains("ws://"));
    }

    #[test]
    fn test_rejects_tls_url() {
        let err = Settings::resolve(&cli(&["--url", "wss://monitor.example/ws"])).unwrap_err();
        assert!(err.to_string().contains("ws://"));
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let settings = Settings {
            classifier: ClassifierConfig {
                fidget_threshold: 0.1,
                active_threshold: 0.05,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_round_trip_through_toml() {
        let text = toml::to_string_pretty(&Settings::default()).unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
