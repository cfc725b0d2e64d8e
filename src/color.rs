//! Elevation and overlay colors.
//!
//! Channels are normalized floats in `[0, 1]`. The palette values are the
//! 8-bit RGBA triples the map has always used, divided by 255.

use std::fmt;

/// Builds a [`Color`] from 8-bit channels in a const context.
macro_rules! rgba8 {
    ($r:expr, $g:expr, $b:expr, $a:expr) => {
        Color {
            red: $r as f32 / 255.0,
            green: $g as f32 / 255.0,
            blue: $b as f32 / 255.0,
            alpha: $a as f32 / 255.0,
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

pub const BACKGROUND: Color = rgba8!(0, 0, 0, 255);
/// Faint cyan; 1.5% alpha so hundreds of overlapping paths build up slowly.
pub const NORMAL_PATH: Color = rgba8!(116, 247, 255, 3);
pub const BEST_PATH: Color = rgba8!(0, 255, 0, 255);
pub const WORST_PATH: Color = rgba8!(255, 0, 0, 255);
pub const HIGH_ELEVATION: Color = rgba8!(181, 33, 22, 150);
pub const MID_ELEVATION: Color = rgba8!(224, 186, 78, 150);
pub const LOW_ELEVATION: Color = rgba8!(0, 90, 25, 150);

/// Ratio used for a flat grid, where `max == min` leaves no range to divide by.
/// It lands exactly on [`MID_ELEVATION`].
pub const FLAT_RATIO: f64 = 0.5;

impl Color {
    pub fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Color {
            red: clamp_unit(red),
            green: clamp_unit(green),
            blue: clamp_unit(blue),
            alpha: clamp_unit(alpha),
        }
    }

    /// Channels scaled back to 8 bits, rounded to nearest.
    pub fn to_rgba8(self) -> [u8; 4] {
        let scale = |c: f32| (clamp_unit(c) * 255.0).round() as u8;
        [
            scale(self.red),
            scale(self.green),
            scale(self.blue),
            scale(self.alpha),
        ]
    }

    fn clamped(self) -> Self {
        Color::new(self.red, self.green, self.blue, self.alpha)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }
}

/// Clamp to `[0, 1]`; NaN becomes 0.
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Per-channel linear blend from `color1` (blend 0) to `color2` (blend 1).
///
/// Inputs and the blend factor are clamped to `[0, 1]` first and the result
/// is clamped again. Each channel is `c1 + (c2 - c1) * blend`; a full blend
/// returns `color2` as-is, since that sum can miss it by one ulp.
pub fn interpolate(color1: Color, color2: Color, blend: f32) -> Color {
    let c1 = color1.clamped();
    let c2 = color2.clamped();
    let t = clamp_unit(blend);
    if t == 1.0 {
        return c2;
    }
    let mix = |a: f32, b: f32| a + (b - a) * t;

    Color::new(
        mix(c1.red, c2.red),
        mix(c1.green, c2.green),
        mix(c1.blue, c2.blue),
        mix(c1.alpha, c2.alpha),
    )
}

/// Where `value` sits between `min` and `max`, clamped to `[0, 1]`.
pub fn elevation_ratio(value: i32, min: i32, max: i32) -> f64 {
    if max == min {
        return FLAT_RATIO;
    }
    let span = i64::from(max) - i64::from(min);
    let offset = i64::from(value) - i64::from(min);
    (offset as f64 / span as f64).clamp(0.0, 1.0)
}

/// Map color for an elevation given the grid's extremes.
///
/// The lower half of the range blends low to mid, the upper half mid to
/// high.
pub fn color_for(value: i32, min: i32, max: i32) -> Color {
    let ratio = elevation_ratio(value, min, max);

    if ratio >= 0.5 {
        interpolate(MID_ELEVATION, HIGH_ELEVATION, ((ratio - 0.5) * 2.0) as f32)
    } else {
        interpolate(LOW_ELEVATION, MID_ELEVATION, (ratio * 2.0) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_endpoints_are_exact() {
        let pairs = [
            (LOW_ELEVATION, MID_ELEVATION),
            (MID_ELEVATION, HIGH_ELEVATION),
            (NORMAL_PATH, WORST_PATH),
            (Color::new(0.1, 0.7, 0.3, 0.9), Color::new(0.7, 0.1, 0.9, 0.3)),
        ];
        for (a, b) in pairs {
            assert_eq!(interpolate(a, b, 0.0), a);
            assert_eq!(interpolate(a, b, 1.0), b);
        }
    }

    #[test]
    fn test_interpolate_is_per_channel_linear() {
        let a = Color::new(0.1, 0.7, 0.3, 0.9);
        let b = Color::new(0.7, 0.1, 0.9, 0.3);
        for t in [0.1f32, 0.25, 0.5, 0.8, 0.999] {
            let out = interpolate(a, b, t);
            assert_eq!(out.red, a.red + (b.red - a.red) * t);
            assert_eq!(out.green, a.green + (b.green - a.green) * t);
            assert_eq!(out.blue, a.blue + (b.blue - a.blue) * t);
            assert_eq!(out.alpha, a.alpha + (b.alpha - a.alpha) * t);
        }
    }

    #[test]
    fn test_interpolate_midpoint() {
        let black = Color::new(0.0, 0.0, 0.0, 0.0);
        let white = Color::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(interpolate(black, white, 0.5), Color::new(0.5, 0.5, 0.5, 0.5));
    }

    #[test]
    fn test_interpolate_clamps_blend() {
        assert_eq!(interpolate(BEST_PATH, WORST_PATH, -3.0), BEST_PATH);
        assert_eq!(interpolate(BEST_PATH, WORST_PATH, 7.5), WORST_PATH);
        assert_eq!(interpolate(BEST_PATH, WORST_PATH, f32::NAN), BEST_PATH);
    }

    #[test]
    fn test_interpolate_clamps_channels() {
        let wild = Color {
            red: 2.0,
            green: -1.0,
            blue: 0.5,
            alpha: f32::NAN,
        };
        let out = interpolate(wild, wild, 0.0);
        for channel in [out.red, out.green, out.blue, out.alpha] {
            assert!((0.0..=1.0).contains(&channel));
        }
        assert_eq!(out.red, 1.0);
        assert_eq!(out.green, 0.0);
        assert_eq!(out.alpha, 0.0);
    }

    #[test]
    fn test_palette_matches_8bit_values() {
        assert_eq!(BACKGROUND.to_rgba8(), [0, 0, 0, 255]);
        assert_eq!(NORMAL_PATH.to_rgba8(), [116, 247, 255, 3]);
        assert_eq!(MID_ELEVATION.to_rgba8(), [224, 186, 78, 150]);
        assert_eq!(format!("{}", WORST_PATH), "#ff0000ff");
    }

    #[test]
    fn test_color_for_bands() {
        assert_eq!(color_for(0, 0, 100), LOW_ELEVATION);
        assert_eq!(color_for(50, 0, 100), MID_ELEVATION);
        assert_eq!(color_for(100, 0, 100), HIGH_ELEVATION);

        let quarter = color_for(25, 0, 100);
        assert_eq!(quarter, interpolate(LOW_ELEVATION, MID_ELEVATION, 0.5));
        let three_quarters = color_for(75, 0, 100);
        assert_eq!(three_quarters, interpolate(MID_ELEVATION, HIGH_ELEVATION, 0.5));
    }

    #[test]
    fn test_color_for_out_of_range_values_clamp() {
        assert_eq!(color_for(-40, 0, 100), LOW_ELEVATION);
        assert_eq!(color_for(400, 0, 100), HIGH_ELEVATION);
    }

    #[test]
    fn test_color_for_flat_grid() {
        assert_eq!(elevation_ratio(7, 7, 7), FLAT_RATIO);
        assert_eq!(color_for(7, 7, 7), MID_ELEVATION);
    }

    #[test]
    fn test_ratio_handles_full_i32_range() {
        assert_eq!(elevation_ratio(i32::MIN, i32::MIN, i32::MAX), 0.0);
        assert_eq!(elevation_ratio(i32::MAX, i32::MIN, i32::MAX), 1.0);
    }
}
