use glam::DVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fbm::Fbm;

pub const MAX_FREQUENCY: f64 = 10.0;
pub const MAX_AMPLITUDE: f64 = 10.0;
pub const MAX_LACUNARITY: f64 = 10.0;
pub const MAX_OCTAVES: u32 = 8;
pub const MAX_LAYERS: u32 = 3;
pub const MAX_WARP: f64 = 10.0;

pub const MAX_EPSILON: f64 = 2.0;
pub const MAX_MULTIPLIER: f64 = 5.0;

// Read a number from a persisted document, falling back per field.
pub(crate) fn json_f64(v: &Value, key: &str, default: f64) -> f64 {
    v.get(key).and_then(Value::as_f64).filter(|x| x.is_finite()).unwrap_or(default)
}

pub(crate) fn json_bool(v: &Value, key: &str, default: bool) -> bool {
    v.get(key).and_then(Value::as_bool).unwrap_or(default)
}

fn json_vec3(v: &Value, key: &str, default: DVec3) -> DVec3 {
    match v.get(key) {
        Some(Value::Array(a)) if a.len() == 3 => DVec3::new(
            a[0].as_f64().unwrap_or(default.x),
            a[1].as_f64().unwrap_or(default.y),
            a[2].as_f64().unwrap_or(default.z),
        ),
        Some(obj @ Value::Object(_)) => DVec3::new(
            json_f64(obj, "x", default.x),
            json_f64(obj, "y", default.y),
            json_f64(obj, "z", default.z),
        ),
        _ => default,
    }
}

/// Assign `value` to `slot`, reporting whether it actually moved.
#[inline]
fn assign<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// Fractal-noise settings for one noise channel (surface height,
/// temperature, humidity). Every setter clamps and returns whether the stored
/// value changed, so callers can decide what to re-upload.
///
/// Deserialization goes through [`NoiseParameters::load`] against the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct NoiseParameters {
    frequency: f64,
    amplitude: f64,
    lacunarity: f64,
    octaves: u32,
    layers: u32,
    warp_factor: DVec3,
}

impl Default for NoiseParameters {
    fn default() -> Self {
        Self {
            frequency: 2.0,
            amplitude: 0.5,
            lacunarity: 2.2,
            octaves: 6,
            layers: 1,
            warp_factor: DVec3::ONE,
        }
    }
}

impl NoiseParameters {
    /// Single-layer, unwarped parameters with clamped inputs.
    pub fn new(frequency: f64, amplitude: f64, lacunarity: f64, octaves: u32) -> Self {
        let mut p = Self::default();
        p.set_frequency(frequency);
        p.set_amplitude(amplitude);
        p.set_lacunarity(lacunarity);
        p.set_octaves(octaves);
        p
    }

    pub fn frequency(&self) -> f64 { self.frequency }
    pub fn amplitude(&self) -> f64 { self.amplitude }
    pub fn lacunarity(&self) -> f64 { self.lacunarity }
    pub fn octaves(&self) -> u32 { self.octaves }
    pub fn layers(&self) -> u32 { self.layers }
    pub fn warp_factor(&self) -> DVec3 { self.warp_factor }

    pub fn set_frequency(&mut self, v: f64) -> bool {
        assign(&mut self.frequency, v.clamp(0.0, MAX_FREQUENCY))
    }

    pub fn set_amplitude(&mut self, v: f64) -> bool {
        assign(&mut self.amplitude, v.clamp(0.0, MAX_AMPLITUDE))
    }

    pub fn set_lacunarity(&mut self, v: f64) -> bool {
        assign(&mut self.lacunarity, v.clamp(0.0, MAX_LACUNARITY))
    }

    pub fn set_octaves(&mut self, v: u32) -> bool {
        assign(&mut self.octaves, v.min(MAX_OCTAVES))
    }

    /// Layer count arrives from a slider as a float; it is rounded into `1..=3`.
    pub fn set_layers(&mut self, v: f64) -> bool {
        let layers = if v.is_nan() { 1 } else { v.round().clamp(1.0, MAX_LAYERS as f64) as u32 };
        assign(&mut self.layers, layers)
    }

    pub fn set_warp_factor(&mut self, v: DVec3) -> bool {
        assign(&mut self.warp_factor, v.clamp(DVec3::ZERO, DVec3::splat(MAX_WARP)))
    }

    /// Octave sum configured by these parameters.
    pub fn fbm(&self) -> Fbm {
        Fbm {
            frequency: self.frequency,
            amplitude: self.amplitude,
            lacunarity: self.lacunarity,
            octaves: self.octaves,
        }
    }

    /// Restore from a persisted document. Missing or mistyped fields fall back
    /// to `defaults` one by one; everything is clamped on the way in.
    pub fn load(v: &Value, defaults: &Self) -> Self {
        let mut p = defaults.clone();
        p.set_frequency(json_f64(v, "frequency", defaults.frequency));
        p.set_amplitude(json_f64(v, "amplitude", defaults.amplitude));
        p.set_lacunarity(json_f64(v, "lacunarity", defaults.lacunarity));
        p.set_octaves(json_f64(v, "octaves", defaults.octaves as f64).round().max(0.0) as u32);
        p.set_layers(json_f64(v, "layers", defaults.layers as f64));
        p.set_warp_factor(json_vec3(v, "warpFactor", defaults.warp_factor));
        p
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.set_frequency(rng.gen_range(0.5..4.0));
        self.set_amplitude(rng.gen_range(0.2..1.0));
        self.set_lacunarity(rng.gen_range(1.5..3.0));
        self.set_octaves(rng.gen_range(3..=MAX_OCTAVES));
        self.set_layers(rng.gen_range(1..=MAX_LAYERS) as f64);
        self.set_warp_factor(DVec3::new(
            rng.gen_range(0.5..2.0),
            rng.gen_range(0.5..2.0),
            rng.gen_range(0.5..2.0),
        ));
    }
}

/// Settings for the finite-difference position perturbation. Carries its own
/// octave set, independent from the surface noise it perturbs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct DisplacementParameters {
    epsilon: f64,
    multiplier: f64,
    factor: f64,
    frequency: f64,
    amplitude: f64,
    lacunarity: f64,
    octaves: u32,
}

impl Default for DisplacementParameters {
    fn default() -> Self {
        Self {
            epsilon: 0.01,
            multiplier: 2.0,
            factor: 0.1,
            frequency: 1.5,
            amplitude: 0.5,
            lacunarity: 2.0,
            octaves: 4,
        }
    }
}

impl DisplacementParameters {
    pub fn epsilon(&self) -> f64 { self.epsilon }
    pub fn multiplier(&self) -> f64 { self.multiplier }
    pub fn factor(&self) -> f64 { self.factor }
    pub fn frequency(&self) -> f64 { self.frequency }
    pub fn amplitude(&self) -> f64 { self.amplitude }
    pub fn lacunarity(&self) -> f64 { self.lacunarity }
    pub fn octaves(&self) -> u32 { self.octaves }

    pub fn set_epsilon(&mut self, v: f64) -> bool {
        assign(&mut self.epsilon, v.clamp(0.0, MAX_EPSILON))
    }

    pub fn set_multiplier(&mut self, v: f64) -> bool {
        assign(&mut self.multiplier, v.clamp(0.0, MAX_MULTIPLIER))
    }

    pub fn set_factor(&mut self, v: f64) -> bool {
        assign(&mut self.factor, v.clamp(0.0, 1.0))
    }

    pub fn set_frequency(&mut self, v: f64) -> bool {
        assign(&mut self.frequency, v.clamp(0.0, MAX_FREQUENCY))
    }

    pub fn set_amplitude(&mut self, v: f64) -> bool {
        assign(&mut self.amplitude, v.clamp(0.0, MAX_AMPLITUDE))
    }

    pub fn set_lacunarity(&mut self, v: f64) -> bool {
        assign(&mut self.lacunarity, v.clamp(0.0, MAX_LACUNARITY))
    }

    pub fn set_octaves(&mut self, v: u32) -> bool {
        assign(&mut self.octaves, v.min(MAX_OCTAVES))
    }

    pub fn fbm(&self) -> Fbm {
        Fbm {
            frequency: self.frequency,
            amplitude: self.amplitude,
            lacunarity: self.lacunarity,
            octaves: self.octaves,
        }
    }

    pub fn load(v: &Value, defaults: &Self) -> Self {
        let mut p = defaults.clone();
        p.set_epsilon(json_f64(v, "epsilon", defaults.epsilon));
        p.set_multiplier(json_f64(v, "multiplier", defaults.multiplier));
        p.set_factor(json_f64(v, "factor", defaults.factor));
        p.set_frequency(json_f64(v, "frequency", defaults.frequency));
        p.set_amplitude(json_f64(v, "amplitude", defaults.amplitude));
        p.set_lacunarity(json_f64(v, "lacunarity", defaults.lacunarity));
        p.set_octaves(json_f64(v, "octaves", defaults.octaves as f64).round().max(0.0) as u32);
        p
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.set_epsilon(rng.gen_range(0.001..0.05));
        self.set_multiplier(rng.gen_range(1.0..3.0));
        self.set_factor(rng.gen_range(0.0..0.3));
        self.set_frequency(rng.gen_range(0.5..3.0));
        self.set_amplitude(rng.gen_range(0.1..1.0));
        self.set_lacunarity(rng.gen_range(1.5..3.0));
        self.set_octaves(rng.gen_range(2..=6));
    }
}

impl From<Value> for NoiseParameters {
    fn from(v: Value) -> Self {
        Self::load(&v, &Self::default())
    }
}

impl From<Value> for DisplacementParameters {
    fn from(v: Value) -> Self {
        Self::load(&v, &Self::default())
    }
}
