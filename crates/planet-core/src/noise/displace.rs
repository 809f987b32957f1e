//! Finite-difference gradient displacement of sample positions.
//!
//! Six extra fBm evaluations per sample, so this sits on the hot path of
//! every displaced surface lookup.
use glam::DVec3;

use super::params::DisplacementParameters;

/// Perturb `position` along the central-difference gradient of the
/// displacement noise, blended in by `params.factor()`.
///
/// Each axis component is `(n(p + ε) - n(p - ε)) / (multiplier · ε)`.
/// A zero denominator has no gradient to follow and leaves the position as is.
pub fn displace(position: DVec3, params: &DisplacementParameters, enabled: bool) -> DVec3 {
    if !enabled {
        return position;
    }
    let eps = params.epsilon();
    let denom = params.multiplier() * eps;
    if denom == 0.0 {
        return position;
    }

    let fbm = params.fbm();
    let axis = |offset: DVec3| (fbm.sample3(position + offset) - fbm.sample3(position - offset)) / denom;
    let gradient = DVec3::new(
        axis(DVec3::new(eps, 0.0, 0.0)),
        axis(DVec3::new(0.0, eps, 0.0)),
        axis(DVec3::new(0.0, 0.0, eps)),
    );

    position.lerp(position + gradient, params.factor())
}
