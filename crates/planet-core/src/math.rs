//! Shader-style scalar helpers shared by the noise engine and the compositors.
//! All math is f64 so CPU baking stays stable at region boundaries.

use glam::DVec4;

/// Precision used by both compositors: four decimal digits.
pub const TRUNCATE_PRECISION: f64 = 1e4;

/// Drop everything past `1 / precision`, rounding toward zero.
///
/// `truncate_to(0.123456, 1e4) == 0.1234`. Used before every alpha and lerp
/// step in the compositors so neighbouring texels never disagree by float drift.
#[inline]
pub fn truncate_to(x: f64, precision: f64) -> f64 {
    (x * precision).trunc() / precision
}

/// GLSL `mix`: `a` at `t = 0`, `b` at `t = 1`.
#[inline]
pub fn mix(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// GLSL `step`: 0 below `edge`, 1 at or above it.
#[inline]
pub fn step(edge: f64, x: f64) -> f64 {
    if x < edge { 0.0 } else { 1.0 }
}

/// Hermite smoothstep. Also valid with `edge0 > edge1`, which yields the
/// inverted ramp the temperature gradient relies on.
#[inline]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = clamp01((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

/// GLSL `fract`: `x - floor(x)`, always in `[0, 1)`.
#[inline]
pub fn fract(x: f64) -> f64 {
    x - x.floor()
}

#[inline]
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

#[inline]
pub fn mod289(x: f64) -> f64 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

/// Component-wise [`mod289`] over a batch of four hash arguments.
#[inline]
pub fn mod289_4(x: DVec4) -> DVec4 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

/// Polynomial permutation `mod289((x * 34 + 1) * x)`.
#[inline]
pub fn perm(x: DVec4) -> DVec4 {
    mod289_4((x * 34.0 + 1.0) * x)
}
