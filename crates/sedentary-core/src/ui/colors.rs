//! Dashboard palette
//!
//! All colors are RGB565. To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

// ============================================================================
// Surfaces
// ============================================================================

/// Page background - slate 900
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(15 >> 3, 23 >> 2, 42 >> 3);

/// Card/panel surface - slate 800
pub const COLOR_SURFACE: Rgb565 = Rgb565::new(30 >> 3, 41 >> 2, 59 >> 3);

/// Grid lines and empty donut track - slate 700
pub const COLOR_STROKE: Rgb565 = Rgb565::new(51 >> 3, 65 >> 2, 85 >> 3);

// ============================================================================
// Activity States
// ============================================================================

/// Active - green 500
pub const COLOR_ACTIVE: Rgb565 = Rgb565::new(34 >> 3, 197 >> 2, 94 >> 3);

/// Fidget - yellow 500
pub const COLOR_FIDGET: Rgb565 = Rgb565::new(234 >> 3, 179 >> 2, 8 >> 3);

/// Sedentary / inactive - red 500
pub const COLOR_SEDENTARY: Rgb565 = Rgb565::new(239 >> 3, 68 >> 2, 68 >> 3);

// ============================================================================
// Acceleration Waveform
// ============================================================================

/// Waveform stroke - blue 500
pub const COLOR_ACCEL_LINE: Rgb565 = Rgb565::new(59 >> 3, 130 >> 2, 246 >> 3);

/// Opacity of the area under the waveform, out of 255 (~20%)
pub const ACCEL_FILL_OPACITY: u8 = 51;

// ============================================================================
// Text
// ============================================================================

/// Primary text - slate 50
pub const TEXT_PRIMARY: Rgb565 = Rgb565::new(248 >> 3, 250 >> 2, 252 >> 3);

/// Captions and secondary labels - slate 400
pub const TEXT_SECONDARY: Rgb565 = Rgb565::new(148 >> 3, 163 >> 2, 184 >> 3);

/// Placeholder text - slate 500
pub const TEXT_MUTED: Rgb565 = Rgb565::new(100 >> 3, 116 >> 2, 139 >> 3);

// ============================================================================
// Blending
// ============================================================================

/// Blend `color` over `background` with the given opacity (0-255)
pub fn blend(background: Rgb565, color: Rgb565, opacity: u8) -> Rgb565 {
    lerp_color(background, color, opacity as f32 / 255.0)
}

/// Linear interpolation between two colors, `t` clamped to 0..=1
pub fn lerp_color(start: Rgb565, end: Rgb565, t: f32) -> Rgb565 {
    let t = t.clamp(0.0, 1.0);
    let (r0, g0, b0) = to_rgb888(start);
    let (r1, g1, b1) = to_rgb888(end);

    let r = r0 as f32 + (r1 as f32 - r0 as f32) * t;
    let g = g0 as f32 + (g1 as f32 - g0 as f32) * t;
    let b = b0 as f32 + (b1 as f32 - b0 as f32) * t;

    Rgb565::new((r as u8) >> 3, (g as u8) >> 2, (b as u8) >> 3)
}

fn to_rgb888(color: Rgb565) -> (u8, u8, u8) {
    let r5 = color.r();
    let g6 = color.g();
    let b5 = color.b();

    ((r5 << 3) | (r5 >> 2), (g6 << 2) | (g6 >> 4), (b5 << 3) | (b5 >> 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_extremes() {
        assert_eq!(blend(COLOR_BACKGROUND, COLOR_ACCEL_LINE, 0), COLOR_BACKGROUND);
        assert_eq!(blend(COLOR_BACKGROUND, COLOR_ACCEL_LINE, 255), COLOR_ACCEL_LINE);
    }

    #[test]
    fn test_state_colors_are_distinct() {
        assert_ne!(COLOR_ACTIVE, COLOR_FIDGET);
        assert_ne!(COLOR_FIDGET, COLOR_SEDENTARY);
        assert_ne!(COLOR_ACTIVE, COLOR_SEDENTARY);
    }
}
