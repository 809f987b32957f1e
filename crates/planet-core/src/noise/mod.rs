//! Noise engine: lattice value noise, fBm, layering, warp and displacement.
//!
//! Every function here is a pure function of its inputs. The same
//! evaluation order runs in the shading stage, so reordering any step
//! changes the visible terrain.

pub mod displace;
pub mod fbm;
pub mod lattice;
pub mod params;
pub mod warp;

use glam::DVec3;

use crate::math::mix;

pub use displace::displace;
pub use fbm::{fbm1, fbm3, Fbm};
pub use lattice::{lattice_noise3, value_noise1, LatticeNoise};
pub use params::{DisplacementParameters, NoiseParameters};
pub use warp::warp;

/// Layered height: `fbm3` at `position`, then re-fed through `fbm1` once per
/// extra layer. Layer `i` (1 or 2) blends in by `clamp(layers - i, 0, 1)`.
pub fn layer(position: DVec3, params: &NoiseParameters) -> f64 {
    let fbm = params.fbm();
    let layers = params.layers() as f64;
    let mut h = fbm.sample3(position);
    for index in 1..params::MAX_LAYERS {
        let blend = (layers - index as f64).clamp(0.0, 1.0);
        if blend > 0.0 {
            h = mix(h, fbm.sample1(h), blend);
        }
    }
    h
}
