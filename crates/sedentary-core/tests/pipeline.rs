//! End-to-end behaviour: raw frames in, store state and pixels out

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, Rectangle};

use sedentary_core::config::{ClassifierConfig, MAX_DATA_POINTS};
use sedentary_core::framebuffer::FrameBuffer;
use sedentary_core::telemetry::{RawDeviceReading, StateClassifier};
use sedentary_core::ui::{DashboardPage, Panel};
use sedentary_core::ui::colors::{
    ACCEL_FILL_OPACITY, COLOR_ACCEL_LINE, COLOR_ACTIVE, COLOR_FIDGET, COLOR_SEDENTARY,
    COLOR_STROKE, COLOR_SURFACE, TEXT_MUTED, blend,
};
use sedentary_core::{ActivityState, ConnectionStatus, MessageOutcome, TelemetryPipeline, TimeOfDay};

fn now() -> TimeOfDay {
    TimeOfDay::new(14, 5, 9)
}

fn frame(state: &str, timer: u64, val: f64, alert: bool) -> String {
    format!(r#"{{"state":"{state}","timer":{timer},"val":{val},"alert":{alert},"timestamp":"14:05:09"}}"#)
}

fn render(pipeline: &TelemetryPipeline, status: ConnectionStatus) -> (DashboardPage, FrameBuffer) {
    let page = DashboardPage::new(&ClassifierConfig::default());
    let mut fb = FrameBuffer::new();
    page.draw(&pipeline.view(status), &mut fb).unwrap();
    (page, fb)
}

fn region_contains(fb: &FrameBuffer, area: Rectangle, color: Rgb565) -> bool {
    area.points().any(|p| fb.pixel(p.x, p.y) == Some(color))
}

// ----------------------------------------------------------------------------
// Store and log properties
// ----------------------------------------------------------------------------

#[test]
fn test_windows_hold_last_hundred_after_150_frames() {
    let mut pipeline = TelemetryPipeline::new();

    for i in 0..150u64 {
        let val = i as f64 / 1000.0;
        pipeline.handle_message(&frame("FIDGET", i, val, false), now());
    }

    let store = pipeline.store();
    assert_eq!(store.total_readings(), 150);
    assert_eq!(store.accel_window().len(), MAX_DATA_POINTS);
    assert_eq!(store.activity_window().len(), MAX_DATA_POINTS);

    let first = store.accel_window().iter().next().unwrap();
    assert!((first - 0.050).abs() < 1e-6);
    assert!((store.accel_window().newest().unwrap() - 0.149).abs() < 1e-6);
    assert_eq!(store.longest_inactive_secs(), 149);
}

#[test]
fn test_rejected_frames_change_nothing() {
    let mut pipeline = TelemetryPipeline::new();
    pipeline.handle_message(&frame("ACTIVE", 0, 0.05, false), now());
    pipeline.handle_message(&frame("SEDENTARY", 60, 0.0, true), now());

    let before = (
        pipeline.store().total_readings(),
        pipeline.store().active_readings(),
        pipeline.store().accel_window().len(),
        pipeline.alerts().alert_count(),
    );

    for raw in ["not json", "{broken", r#"{"error":"sensor fault"}"#, "MPU6050 init ok"] {
        let outcome = pipeline.handle_message(raw, now());
        assert!(matches!(outcome, MessageOutcome::Skipped(_)));
    }

    let after = (
        pipeline.store().total_readings(),
        pipeline.store().active_readings(),
        pipeline.store().accel_window().len(),
        pipeline.alerts().alert_count(),
    );
    assert_eq!(before, after);
}

#[test]
fn test_alert_throttled_to_minute_boundaries() {
    let mut pipeline = TelemetryPipeline::new();

    pipeline.handle_message(&frame("SEDENTARY", 120, 0.0, true), now());
    pipeline.handle_message(&frame("SEDENTARY", 121, 0.0, true), now());

    assert_eq!(pipeline.alerts().alert_count(), 1);
    let entry = pipeline.alerts().entries().next().unwrap();
    assert_eq!(entry.duration_secs, 120);
    assert_eq!(entry.logged_at, now());
}

#[test]
fn test_active_percent_three_of_ten() {
    let mut pipeline = TelemetryPipeline::new();
    for _ in 0..3 {
        pipeline.handle_message(&frame("ACTIVE", 0, 0.06, false), now());
    }
    for t in 1..=7 {
        pipeline.handle_message(&frame("SEDENTARY", t, 0.0, false), now());
    }

    let view = pipeline.view(ConnectionStatus::Connected);
    assert!((view.stats.active_percent - 30.0).abs() < 1e-4);
    assert_eq!(view.active_percent_label().as_str(), "30.0%");
    assert_eq!(view.donut_label().as_str(), "30%");
}

#[test]
fn test_percent_ties_round_up_through_the_view() {
    let mut pipeline = TelemetryPipeline::new();
    for i in 0..40 {
        let state = if i < 21 { "ACTIVE" } else { "SEDENTARY" };
        pipeline.handle_message(&frame(state, 0, 0.0, false), now());
    }

    let view = pipeline.view(ConnectionStatus::Connected);
    assert_eq!(view.active_percent_label().as_str(), "52.5%");
    assert_eq!(view.donut_label().as_str(), "53%");
}

#[test]
fn test_huge_steady_readings_stay_confident() {
    let mut pipeline = TelemetryPipeline::new();
    for _ in 0..10 {
        // 2^125, so ten of them sum exactly
        pipeline.handle_message(&frame("ACTIVE", 0, 4.2535295865117308e37, false), now());
    }

    let view = pipeline.view(ConnectionStatus::Connected);
    assert_eq!(view.stats.confidence, 100.0);
    assert_eq!(view.confidence_label().as_str(), "100%");
}

#[test]
fn test_falsy_error_member_is_still_a_reading() {
    let mut pipeline = TelemetryPipeline::new();

    let outcome = pipeline.handle_message(r#"{"state":"FIDGET","val":0.03,"error":false}"#, now());

    assert!(outcome.is_applied());
    assert_eq!(pipeline.store().total_readings(), 1);
}

#[test]
fn test_classifier_output_drives_the_dashboard() {
    let mut classifier = StateClassifier::new(ClassifierConfig::default());
    let mut pipeline = TelemetryPipeline::new();

    // 21 minutes of stillness, one sample per device second
    for second in 0..1260u32 {
        let raw = RawDeviceReading {
            ts: format!("10:{:02}:{:02}", second / 60, second % 60),
            pir: 0,
            acc: 0.001,
        };
        let message = classifier.process(&raw);
        let json = message.to_json().unwrap();
        assert!(pipeline.handle_message(&json, now()).is_applied());
    }

    let store = pipeline.store();
    assert_eq!(store.current_state(), ActivityState::Sedentary);
    assert_eq!(store.current_timer(), 1260);
    // Alert flag rises at 1200s; minute boundaries 1200 and 1260 are logged
    assert_eq!(pipeline.alerts().alert_count(), 2);
    let durations: Vec<u64> = pipeline.alerts().entries().map(|e| e.duration_secs).collect();
    assert_eq!(durations, [1260, 1200]);
}

// ----------------------------------------------------------------------------
// Rendering
// ----------------------------------------------------------------------------

#[test]
fn test_connection_dot_tracks_status() {
    let pipeline = TelemetryPipeline::new();

    let (page, fb) = render(&pipeline, ConnectionStatus::Connected);
    let dot = page.header().indicator_center();
    assert_eq!(fb.pixel(dot.x, dot.y), Some(COLOR_ACTIVE));

    let (page, fb) = render(&pipeline, ConnectionStatus::Disconnected);
    let dot = page.header().indicator_center();
    assert_eq!(fb.pixel(dot.x, dot.y), Some(COLOR_SEDENTARY));
}

#[test]
fn test_status_badge_uses_state_color() {
    let mut pipeline = TelemetryPipeline::new();
    pipeline.handle_message(&frame("FIDGET", 30, 0.03, false), now());

    let (page, fb) = render(&pipeline, ConnectionStatus::Connected);
    let badge = page.status().badge_area();
    let probe = Point::new(badge.top_left.x + 3, badge.center().y);

    assert_eq!(fb.pixel(probe.x, probe.y), Some(COLOR_FIDGET));
}

#[test]
fn test_timeline_bars_follow_levels() {
    let mut pipeline = TelemetryPipeline::new();
    pipeline.handle_message(&frame("ACTIVE", 0, 0.06, false), now());
    pipeline.handle_message(&frame("FIDGET", 0, 0.03, false), now());
    pipeline.handle_message(&frame("SEDENTARY", 1, 0.0, false), now());

    let (page, fb) = render(&pipeline, ConnectionStatus::Connected);
    let viewport = page.timeline().viewport();
    let y = viewport.plot_area().center().y;

    for (slot, color) in [(0, COLOR_ACTIVE), (1, COLOR_FIDGET), (2, COLOR_SEDENTARY)] {
        let (x, _) = viewport.column_for(slot);
        assert_eq!(fb.pixel(x, y), Some(color));
    }
    // Unused slots stay the card color
    let (x, _) = viewport.column_for(50);
    assert_eq!(fb.pixel(x, y), Some(COLOR_SURFACE));
}

#[test]
fn test_waveform_line_and_fill() {
    let mut pipeline = TelemetryPipeline::new();
    for _ in 0..MAX_DATA_POINTS {
        pipeline.handle_message(&frame("ACTIVE", 0, 0.07, false), now());
    }

    let (page, fb) = render(&pipeline, ConnectionStatus::Connected);
    let viewport = page.waveform().viewport();
    let x = viewport.x_for(50);
    let y = viewport.y_for(0.07);

    let line_hit = (y - 1..=y + 1).any(|row| fb.pixel(x, row) == Some(COLOR_ACCEL_LINE));
    assert!(line_hit, "waveform stroke missing at ({x}, {y})");

    let fill_y = viewport.y_for(0.012);
    assert_eq!(
        fb.pixel(x, fill_y),
        Some(blend(COLOR_SURFACE, COLOR_ACCEL_LINE, ACCEL_FILL_OPACITY))
    );
}

#[test]
fn test_donut_slices() {
    let mut pipeline = TelemetryPipeline::new();

    let ring_probe = |page: &DashboardPage| {
        let donut = page.donut();
        donut.center() - Point::new(0, donut.diameter() as i32 / 2 - 4)
    };

    let (page, fb) = render(&pipeline, ConnectionStatus::Connected);
    let p = ring_probe(&page);
    assert_eq!(fb.pixel(p.x, p.y), Some(COLOR_STROKE));

    pipeline.handle_message(&frame("ACTIVE", 0, 0.06, false), now());
    let (page, fb) = render(&pipeline, ConnectionStatus::Connected);
    let p = ring_probe(&page);
    assert_eq!(fb.pixel(p.x, p.y), Some(COLOR_ACTIVE));

    let mut inactive = TelemetryPipeline::new();
    inactive.handle_message(&frame("SEDENTARY", 5, 0.0, false), now());
    let (page, fb) = render(&inactive, ConnectionStatus::Connected);
    let p = ring_probe(&page);
    assert_eq!(fb.pixel(p.x, p.y), Some(COLOR_SEDENTARY));
}

#[test]
fn test_alert_list_placeholder_and_entries() {
    let mut pipeline = TelemetryPipeline::new();

    let (page, fb) = render(&pipeline, ConnectionStatus::Connected);
    let area = page.alerts().bounds();
    assert!(region_contains(&fb, area, TEXT_MUTED));
    assert!(!region_contains(&fb, area, COLOR_SEDENTARY));

    pipeline.handle_message(&frame("SEDENTARY", 1200, 0.0, true), now());
    let (page, fb) = render(&pipeline, ConnectionStatus::Connected);
    let area = page.alerts().bounds();
    assert!(region_contains(&fb, area, COLOR_SEDENTARY));
    assert!(!region_contains(&fb, area, TEXT_MUTED));
}
