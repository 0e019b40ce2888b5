//! Desktop live dashboard for the sedentary monitor.
//!
//! Renders the sedentary-core dashboard page in an SDL2 window via
//! `embedded-graphics-simulator`, fed either by the device's WebSocket
//! stream or, with `--demo`, by a simulated wearer.
//!
//! # Key bindings
//!
//! | Key     | Action |
//! |---------|--------|
//! | Q / Esc | Quit   |

mod demo;
mod link;
mod settings;

use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{Local, Timelike};
use clap::Parser;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info};

use sedentary_core::framebuffer::FrameBuffer;
use sedentary_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, DashboardPage};
use sedentary_core::{ConnectionStatus, TelemetryPipeline, TimeOfDay};

use demo::DemoSource;
use link::LiveLink;
use settings::{Cli, Settings};

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

// ---------------------------------------------------------------------------
// Telemetry sources
// ---------------------------------------------------------------------------

/// Local wall-clock time used to stamp logged alerts
fn local_time() -> TimeOfDay {
    let now = Local::now();
    TimeOfDay::new(now.hour() as u8, now.minute() as u8, now.second() as u8)
}

enum TelemetrySource {
    Live(LiveLink),
    Demo {
        source: DemoSource,
        interval: Duration,
        last_frame: Instant,
    },
}

impl TelemetrySource {
    fn status(&self) -> ConnectionStatus {
        match self {
            TelemetrySource::Live(link) => link.status(),
            TelemetrySource::Demo { .. } => ConnectionStatus::Connected,
        }
    }

    /// Feed whatever arrived since the last frame into `pipeline`
    fn pump(&mut self, now_ms: u64, pipeline: &mut TelemetryPipeline) -> bool {
        match self {
            TelemetrySource::Live(link) => link.pump(now_ms, pipeline, local_time),
            TelemetrySource::Demo {
                source,
                interval,
                last_frame,
            } => {
                let mut changed = false;
                while last_frame.elapsed() >= *interval {
                    *last_frame += *interval;
                    if let Some(frame) = source.next_frame() {
                        changed |= pipeline.handle_message(&frame, local_time()).is_applied();
                    }
                }
                changed
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = Settings::resolve(&cli)?;

    info!("Starting sedentary dashboard");
    info!(
        "Display: {}x{} (scale {}x)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, settings.scale
    );

    let mut source = if cli.demo {
        info!("Demo mode: {} device seconds per second", cli.demo_rate);
        TelemetrySource::Demo {
            source: DemoSource::new(settings.classifier, Local::now().time()),
            interval: Duration::from_secs(1) / cli.demo_rate,
            last_frame: Instant::now(),
        }
    } else {
        info!(
            "Streaming from {} (reconnect every {} ms)",
            settings.url, settings.reconnect_delay_ms
        );
        TelemetrySource::Live(LiveLink::new(
            settings.url.clone(),
            settings.reconnect_delay_ms,
        ))
    };

    let page = DashboardPage::new(&settings.classifier);
    let mut pipeline = TelemetryPipeline::new();
    let mut framebuffer = FrameBuffer::new();

    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let output_settings = OutputSettingsBuilder::new().scale(settings.scale).build();
    let mut window = Window::new("Sedentary Monitor", &output_settings);

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let started = Instant::now();
    let mut shown_status = source.status();
    redraw(&page, &pipeline, shown_status, &mut framebuffer, &mut display);
    window.update(&display);

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. }
                    if keycode == Keycode::Q || keycode == Keycode::Escape =>
                {
                    break 'running;
                }
                _ => {}
            }
        }

        let now_ms = started.elapsed().as_millis() as u64;
        let mut needs_redraw = source.pump(now_ms, &mut pipeline);

        let status = source.status();
        if status != shown_status {
            shown_status = status;
            needs_redraw = true;
        }

        if needs_redraw {
            redraw(&page, &pipeline, status, &mut framebuffer, &mut display);
        }

        window.update(&display);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!(
        "Dashboard exiting after {} readings, {} alerts",
        pipeline.store().total_readings(),
        pipeline.alerts().alert_count()
    );
    Ok(())
}

/// Full redraw into the framebuffer, then push only the changed region
fn redraw(
    page: &DashboardPage,
    pipeline: &TelemetryPipeline,
    status: ConnectionStatus,
    framebuffer: &mut FrameBuffer,
    display: &mut SimulatorDisplay<Rgb565>,
) {
    if let Err(e) = page.draw(&pipeline.view(status), framebuffer) {
        error!("Draw error: {:?}", e);
    }
    if let Err(e) = framebuffer.flush(display) {
        error!("Flush error: {:?}", e);
    }
}
