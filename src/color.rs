//! Diverging red → white → green colour scale.

use crate::error::{EsaiError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_START_HEX: &str = "C5161B";
pub const DEFAULT_END_HEX: &str = "#008843";

/// RGB colour with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parse `RRGGBB`, with or without a leading `#`.
    pub fn from_hex(text: &str) -> Result<Self> {
        let digits = text.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(EsaiError::InvalidColor(text.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| -> Result<f64> {
            u8::from_str_radix(&digits[range], 16)
                .map(|value| f64::from(value) / 255.0)
                .map_err(|_| EsaiError::InvalidColor(text.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_u8(self) -> [u8; 3] {
        let quantize = |channel: f64| (channel.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl fmt::Display for Rgb {
    /// CSS form: rgb(r,g,b)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_u8();
        write!(f, "rgb({},{},{})", r, g, b)
    }
}

/// Three-stop scale: `start` at 0, white at 0.5, `end` at 1. Each channel
/// is interpolated independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    start: Rgb,
    end: Rgb,
}

impl Default for ColorScale {
    fn default() -> Self {
        Self {
            start: Rgb::new(197.0 / 255.0, 22.0 / 255.0, 27.0 / 255.0),
            end: Rgb::new(0.0, 136.0 / 255.0, 67.0 / 255.0),
        }
    }
}

impl ColorScale {
    pub fn new(start: Rgb, end: Rgb) -> Self {
        Self { start, end }
    }

    pub fn build(start_hex: &str, end_hex: &str) -> Result<Self> {
        Ok(Self::new(Rgb::from_hex(start_hex)?, Rgb::from_hex(end_hex)?))
    }

    pub fn start(&self) -> Rgb {
        self.start
    }

    pub fn end(&self) -> Rgb {
        self.end
    }

    /// Colour at `t`, clamped to `[0, 1]`. NaN maps to the start colour.
    pub fn map_value(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let ramp = |low: f64, high: f64| {
            if t <= 0.5 {
                let s = t / 0.5;
                low * (1.0 - s) + s
            } else {
                let u = (t - 0.5) / 0.5;
                (1.0 - u) + high * u
            }
        };
        Rgb::new(
            ramp(self.start.r, self.end.r),
            ramp(self.start.g, self.end.g),
            ramp(self.start.b, self.end.b),
        )
    }

    /// Colour for a dimension score, whose ceiling is `100 × weight`.
    pub fn dimension_color(&self, score: f64, weight: f64) -> Rgb {
        self.map_value(normalize(score, 100.0 * weight))
    }

    /// Colour for the 0-100 total.
    pub fn total_color(&self, total: f64) -> Rgb {
        self.map_value(normalize(total, 100.0))
    }
}

/// `value / max`, or 0 when the range is empty.
pub fn normalize(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        value / max
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hex_parses_with_and_without_hash() {
        let red = Rgb::from_hex("C5161B").expect("valid hex");
        assert_eq!(red.to_u8(), [0xC5, 0x16, 0x1B]);
        let green = Rgb::from_hex("#008843").expect("valid hex");
        assert_eq!(green.to_hex(), "#008843");
    }

    #[test]
    fn hex_rejects_malformed_values() {
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("zzzzzz").is_err());
        assert!(Rgb::from_hex("#1234567").is_err());
    }

    #[test]
    fn default_scale_matches_default_hex_endpoints() {
        let built = ColorScale::build(DEFAULT_START_HEX, DEFAULT_END_HEX).expect("valid hex");
        assert_eq!(built.start().to_u8(), ColorScale::default().start().to_u8());
        assert_eq!(built.end().to_u8(), ColorScale::default().end().to_u8());
    }

    #[test]
    fn scale_passes_through_white_at_midpoint() {
        let scale = ColorScale::default();
        assert_eq!(scale.map_value(0.5), Rgb::WHITE);
        assert_eq!(scale.map_value(0.0), scale.start());
        assert_eq!(scale.map_value(1.0), scale.end());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let scale = ColorScale::default();
        assert_eq!(scale.map_value(-3.0), scale.start());
        assert_eq!(scale.map_value(7.0), scale.end());
        assert_eq!(scale.map_value(f64::NAN), scale.start());
    }

    #[test]
    fn quarter_point_is_halfway_to_white() {
        let scale = ColorScale::new(Rgb::new(0.0, 0.0, 0.0), Rgb::new(0.0, 0.0, 0.0));
        let color = scale.map_value(0.25);
        assert!((color.r - 0.5).abs() < 1e-12);
        assert!((color.g - 0.5).abs() < 1e-12);
        let color = scale.map_value(0.75);
        assert!((color.b - 0.5).abs() < 1e-12);
    }

    #[test]
    fn dimension_color_normalizes_by_weight() {
        let scale = ColorScale::default();
        assert_eq!(scale.dimension_color(5.0, 0.05), scale.end());
        assert_eq!(scale.dimension_color(10.0, 0.2), Rgb::WHITE);
        assert_eq!(scale.dimension_color(3.0, 0.0), scale.start());
        assert_eq!(scale.total_color(50.0), Rgb::WHITE);
    }

    #[test]
    fn display_uses_css_rgb() {
        assert_eq!(Rgb::WHITE.to_string(), "rgb(255,255,255)");
    }

    proptest! {
        #[test]
        fn mapped_channels_stay_in_unit_range(t in -2.0..3.0f64) {
            let color = ColorScale::default().map_value(t);
            for channel in [color.r, color.g, color.b] {
                prop_assert!((0.0..=1.0).contains(&channel));
            }
        }
    }
}
