//! Hash-based value noise on integer lattices.
//!
//! The 3D variant uses the `mod289` polynomial permutation so baked textures
//! line up texel-for-texel with what the shading stage renders.
use glam::{DVec2, DVec3, DVec4};
use ::noise::NoiseFn;

use crate::math::{fract, mix, perm};

/// Value noise at `p`, in `[0, 1)`.
///
/// Corner hashes are evaluated in two batches of four; blending runs along
/// z, then x, then y. That order is part of the output and must not change.
pub fn lattice_noise3(p: DVec3) -> f64 {
    let a = p.floor();
    let d = p - a;
    let d = d * d * (3.0 - 2.0 * d);

    let b = DVec4::new(a.x, a.x, a.y, a.y) + DVec4::new(0.0, 1.0, 0.0, 1.0);
    let k1 = perm(DVec4::new(b.x, b.y, b.x, b.y));
    let k2 = perm(DVec4::new(k1.x, k1.y, k1.x, k1.y) + DVec4::new(b.z, b.z, b.w, b.w));

    let c = k2 + DVec4::splat(a.z);
    let k3 = perm(c);
    let k4 = perm(c + 1.0);

    let o1 = fract4(k3 * (1.0 / 41.0));
    let o2 = fract4(k4 * (1.0 / 41.0));

    let o3 = o2 * d.z + o1 * (1.0 - d.z);
    let o4 = DVec2::new(o3.y, o3.w) * d.x + DVec2::new(o3.x, o3.z) * (1.0 - d.x);

    o4.y * d.y + o4.x * (1.0 - d.y)
}

#[inline]
fn fract4(v: DVec4) -> DVec4 {
    v - v.floor()
}

/// Sine hash, `[0, 1)`.
#[inline]
pub fn rand1(n: f64) -> f64 {
    fract(n.sin() * 43758.5453)
}

/// 1D value noise: linear blend of the hashes at the two neighbouring integers.
pub fn value_noise1(p: f64) -> f64 {
    let fl = p.floor();
    mix(rand1(fl), rand1(fl + 1.0), fract(p))
}

/// [`lattice_noise3`] behind the `noise` crate's sampling trait so it composes
/// with the rest of that ecosystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatticeNoise;

impl NoiseFn<f64, 3> for LatticeNoise {
    fn get(&self, point: [f64; 3]) -> f64 {
        lattice_noise3(DVec3::from_array(point))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValueNoise1;

impl NoiseFn<f64, 1> for ValueNoise1 {
    fn get(&self, point: [f64; 1]) -> f64 {
        value_noise1(point[0])
    }
}
