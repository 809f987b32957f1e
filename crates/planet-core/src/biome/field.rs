//! Temperature and humidity fields over the unit sphere.
//!
//! The geographic gradient scales the noise; it is never added to it.
use glam::DVec3;

use crate::color::Rgb;
use crate::math::{mix, smoothstep, step};
use crate::noise::{fbm3, NoiseParameters};
use crate::texture::RgbaTexture;

use super::params::GradientMode;

struct ModeWeights {
    is_polar: f64,
    is_noise_only: f64,
}

// Threshold decoding mirrors the shading stage, which only sees the float.
fn weights(mode: GradientMode) -> ModeWeights {
    let m = mode.as_uniform();
    ModeWeights {
        is_polar: step(0.5, m) - step(1.5, m),
        is_noise_only: 1.0 - step(0.5, m),
    }
}

/// Gradient input: signed `y` for the polar mode, distance from the equator otherwise.
#[inline]
fn gradient_y(position: DVec3, w: &ModeWeights) -> f64 {
    mix(position.y.abs(), position.y, w.is_polar)
}

/// Temperature at `position`. Hot at the equator in realistic mode, hot at
/// `y = -1` in polar mode, pure noise in noise-only mode.
pub fn compute_temperature(position: DVec3, params: &NoiseParameters, mode: GradientMode) -> f64 {
    let w = weights(mode);
    let ty = gradient_y(position, &w);
    let adjusted = smoothstep(1.0, -w.is_polar, ty);
    let t_height = mix(adjusted, 1.0, w.is_noise_only);
    t_height * fbm3(position, params)
}

/// Humidity at `position`; the gradient runs opposite to temperature.
pub fn compute_humidity(position: DVec3, params: &NoiseParameters, mode: GradientMode) -> f64 {
    let w = weights(mode);
    let hy = gradient_y(position, &w);
    let adjusted = smoothstep(-w.is_polar, 1.0, hy);
    let h_height = mix(adjusted, 1.0, w.is_noise_only);
    h_height * fbm3(position, params)
}

/// Overlay the biome lookup texel at `(humidity, temperature)` onto `base`,
/// weighted by the texel's alpha.
pub fn sample_biome_texture(lookup: &RgbaTexture, temperature: f64, humidity: f64, base: Rgb) -> Rgb {
    let texel = lookup.sample_nearest(humidity, temperature);
    base.lerp(texel.rgb(), texel.a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn noise() -> NoiseParameters {
        NoiseParameters::new(1.3, 1.0, 2.0, 4)
    }

    #[test]
    fn noise_only_mode_is_plain_fbm() {
        let p = noise();
        for pos in [DVec3::Y, -DVec3::Y, DVec3::new(0.6, 0.0, 0.8)] {
            assert_eq!(compute_temperature(pos, &p, GradientMode::NoiseOnly), fbm3(pos, &p));
            assert_eq!(compute_humidity(pos, &p, GradientMode::NoiseOnly), fbm3(pos, &p));
        }
    }

    #[test]
    fn realistic_temperature_peaks_at_equator() {
        let p = noise();
        let equator = DVec3::new(1.0, 0.0, 0.0);
        assert_abs_diff_eq!(compute_temperature(equator, &p, GradientMode::Realistic), fbm3(equator, &p));
        assert_eq!(compute_temperature(DVec3::Y, &p, GradientMode::Realistic), 0.0);
        assert_eq!(compute_temperature(-DVec3::Y, &p, GradientMode::Realistic), 0.0);
    }

    #[test]
    fn realistic_humidity_grows_toward_poles() {
        let p = noise();
        assert_eq!(compute_humidity(DVec3::X, &p, GradientMode::Realistic), 0.0);
        assert_abs_diff_eq!(compute_humidity(DVec3::Y, &p, GradientMode::Realistic), fbm3(DVec3::Y, &p));
    }

    #[test]
    fn polar_temperature_is_hemispheric() {
        let p = noise();
        let south = -DVec3::Y;
        assert_abs_diff_eq!(compute_temperature(south, &p, GradientMode::Polar), fbm3(south, &p));
        assert_eq!(compute_temperature(DVec3::Y, &p, GradientMode::Polar), 0.0);
    }

    #[test]
    fn lookup_alpha_blends_over_base() {
        let mut lookup = RgbaTexture::new(2, 2);
        lookup.set_pixel(1, 0, [255, 255, 255, 255]);
        lookup.set_pixel(0, 1, [255, 0, 0, 0]);
        // humidity → x, temperature → y
        let opaque = sample_biome_texture(&lookup, 0.0, 0.9, Rgb::BLACK);
        assert_eq!(opaque, Rgb::WHITE);
        let clear = sample_biome_texture(&lookup, 0.9, 0.0, Rgb::BLACK);
        assert_eq!(clear, Rgb::BLACK);
    }
}
