use serde::{Deserialize, Serialize};

use crate::math::{clamp01, mix};

/// Normalized RGB color, each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RgbChannels")]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

#[derive(Deserialize)]
struct RgbChannels {
    r: f64,
    g: f64,
    b: f64,
}

impl From<RgbChannels> for Rgb {
    fn from(c: RgbChannels) -> Self {
        Rgb::new(c.r, c.g, c.b)
    }
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };

    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r: clamp01(r), g: clamp01(g), b: clamp01(b) }
    }

    /// Same color with every channel pulled into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self::new(self.r, self.g, self.b)
    }

    /// Build from a packed `0xRRGGBB` value, the form the host persists colors in.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f64 / 255.0,
            g: ((hex >> 8) & 0xFF) as f64 / 255.0,
            b: (hex & 0xFF) as f64 / 255.0,
        }
    }

    pub fn to_hex(self) -> u32 {
        let c = |v: f64| (clamp01(v) * 255.0).round() as u32;
        (c(self.r) << 16) | (c(self.g) << 8) | c(self.b)
    }

    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        Rgb {
            r: mix(self.r, other.r, t),
            g: mix(self.g, other.g, t),
            b: mix(self.b, other.b, t),
        }
    }

    /// Rec. 709 relative luminance, handy for ordering gradient texels.
    pub fn luminance(self) -> f64 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

/// Compositing representation of one texel before requantization.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawRgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl RawRgba {
    pub fn new(color: Rgb, a: f64) -> Self {
        Self { r: color.r, g: color.g, b: color.b, a }
    }

    pub fn from_bytes(px: [u8; 4]) -> Self {
        Self {
            r: px[0] as f64 / 255.0,
            g: px[1] as f64 / 255.0,
            b: px[2] as f64 / 255.0,
            a: px[3] as f64 / 255.0,
        }
    }

    /// Requantize to 8 bits. Channels are clamped then truncated, not rounded.
    pub fn to_bytes(self) -> [u8; 4] {
        let q = |v: f64| (clamp01(v) * 255.0) as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    pub fn rgb(self) -> Rgb {
        Rgb { r: self.r, g: self.g, b: self.b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_through_bytes() {
        let c = Rgb::from_hex(0x3A7F10);
        assert_eq!(c.to_hex(), 0x3A7F10);
    }

    #[test]
    fn requantization_truncates() {
        let px = RawRgba { r: 0.999, g: 0.5, b: 0.0, a: 1.0 }.to_bytes();
        assert_eq!(px, [254, 127, 0, 255]);
    }

    #[test]
    fn out_of_range_channels_are_clamped() {
        let px = RawRgba { r: 1.7, g: -0.2, b: 0.0, a: 2.0 }.to_bytes();
        assert_eq!(px, [255, 0, 0, 255]);
    }

    #[test]
    fn deserialized_channels_are_clamped() {
        let c: Rgb = serde_json::from_str(r#"{ "r": 9.0, "g": 0.5, "b": -2.0 }"#).unwrap();
        assert_eq!(c, Rgb { r: 1.0, g: 0.5, b: 0.0 });
    }
}
