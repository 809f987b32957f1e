//! Fractional Brownian motion over the lattice value noise.
//!
//! Each octave multiplies frequency by `lacunarity` and halves amplitude.
//! Persistence is fixed at 0.5; it is not a parameter anywhere in the editor.
use glam::DVec3;
use ::noise::NoiseFn;

use super::lattice::{lattice_noise3, value_noise1};
use super::params::{NoiseParameters, MAX_OCTAVES};

pub const PERSISTENCE: f64 = 0.5;

/// Octave count from a dynamic (uniform-style) float source.
///
/// Negative or non-finite counts are a caller bug: debug builds panic,
/// release builds fall back to [`clamp_octaves`].
pub fn octave_count(x: f64) -> u32 {
    debug_assert!(x.is_finite() && x >= 0.0, "octave count must be a non-negative number, got {x}");
    clamp_octaves(x)
}

/// `round(x)` clamped into `0..=MAX_OCTAVES`. NaN counts as zero.
pub fn clamp_octaves(x: f64) -> u32 {
    if x.is_nan() {
        return 0;
    }
    x.round().clamp(0.0, MAX_OCTAVES as f64) as u32
}

/// One octave-sum configuration. Built from [`NoiseParameters`] or from
/// the displacement settings, which carry their own octave set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fbm {
    pub frequency: f64,
    pub amplitude: f64,
    pub lacunarity: f64,
    pub octaves: u32,
}

impl Fbm {
    /// Sum octaves of 3D lattice noise at `position`. Zero octaves yield 0.
    pub fn sample3(&self, position: DVec3) -> f64 {
        let mut value = 0.0f64;
        let mut amp = self.amplitude;
        let mut freq = self.frequency;
        for _ in 0..self.octaves {
            value += amp * lattice_noise3(position * freq);
            freq *= self.lacunarity;
            amp *= PERSISTENCE;
        }
        value
    }

    /// 1D analogue used to re-feed a height through a second noise pass.
    pub fn sample1(&self, x: f64) -> f64 {
        let mut value = 0.0f64;
        let mut amp = self.amplitude;
        let mut freq = self.frequency;
        for _ in 0..self.octaves {
            value += amp * value_noise1(x * freq);
            freq *= self.lacunarity;
            amp *= PERSISTENCE;
        }
        value
    }

    /// Same sum with the octave count taken from a dynamic float source, as the
    /// shading path receives it. Equal to [`Fbm::sample3`] for integral input.
    pub fn sample3_dynamic(&self, position: DVec3, octaves: f64) -> f64 {
        Fbm { octaves: octave_count(octaves), ..*self }.sample3(position)
    }
}

impl NoiseFn<f64, 3> for Fbm {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.sample3(DVec3::from_array(point))
    }
}

impl NoiseFn<f64, 1> for Fbm {
    fn get(&self, point: [f64; 1]) -> f64 {
        self.sample1(point[0])
    }
}

pub fn fbm3(position: DVec3, params: &NoiseParameters) -> f64 {
    params.fbm().sample3(position)
}

pub fn fbm1(x: f64, params: &NoiseParameters) -> f64 {
    params.fbm().sample1(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn params(octaves: u32) -> NoiseParameters {
        NoiseParameters::new(2.3, 0.8, 2.0, octaves)
    }

    #[test]
    fn zero_octaves_is_zero_everywhere() {
        let p = NoiseParameters::new(9.0, 7.0, 3.0, 0);
        for i in 0..20 {
            let pos = DVec3::new(i as f64 * 0.31, -1.7, i as f64 * 2.1);
            assert_eq!(fbm3(pos, &p), 0.0);
            assert_eq!(fbm1(i as f64, &p), 0.0);
        }
    }

    #[test]
    fn single_octave_is_scaled_lattice_noise() {
        let p = params(1);
        for i in 0..20 {
            let pos = DVec3::new(0.1 * i as f64, 0.7, -0.3 * i as f64);
            assert_eq!(fbm3(pos, &p), p.amplitude() * lattice_noise3(pos * p.frequency()));
        }
    }

    #[test]
    fn dynamic_and_static_octaves_agree() {
        let p = params(5);
        let pos = DVec3::new(0.42, -0.13, 0.9);
        assert_eq!(p.fbm().sample3_dynamic(pos, 5.0), fbm3(pos, &p));
        assert_eq!(p.fbm().sample3_dynamic(pos, 4.6), fbm3(pos, &p));
    }

    #[test]
    fn fbm_is_bounded_by_amplitude_sum() {
        let p = params(8);
        let bound: f64 = (0..8).map(|i| p.amplitude() * PERSISTENCE.powi(i)).sum();
        for i in 0..200 {
            let t = i as f64 * 0.057;
            let v = fbm3(DVec3::new(t.sin(), t.cos(), t * 0.2), &p);
            assert!((0.0..=bound).contains(&v), "fbm {v} outside [0, {bound}]");
        }
    }

    #[test]
    fn fbm1_single_octave_matches_value_noise() {
        let p = params(1);
        assert_abs_diff_eq!(fbm1(0.37, &p), p.amplitude() * value_noise1(0.37 * p.frequency()));
    }

    #[test]
    fn octave_clamp_bounds_the_loop() {
        assert_eq!(clamp_octaves(f64::INFINITY), MAX_OCTAVES);
        assert_eq!(clamp_octaves(1e12), MAX_OCTAVES);
        assert_eq!(clamp_octaves(f64::NEG_INFINITY), 0);
        assert_eq!(clamp_octaves(f64::NAN), 0);
        assert_eq!(clamp_octaves(-3.0), 0);
        assert_eq!(clamp_octaves(2.5), 3);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn negative_octaves_panic_in_debug() {
        octave_count(-1.0);
    }
}
