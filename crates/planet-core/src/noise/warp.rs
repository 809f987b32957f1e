//! Axis-scaling domain warp applied to sample positions before fBm.
use glam::DVec3;

/// Scale each axis of `position` by `warp_factor` when `enabled`.
#[inline]
pub fn warp(position: DVec3, warp_factor: DVec3, enabled: bool) -> DVec3 {
    if enabled {
        position * warp_factor
    } else {
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_warp_is_identity() {
        let p = DVec3::new(1.23, 4.56, -7.8);
        assert_eq!(warp(p, DVec3::new(3.0, 0.5, 2.0), false), p);
    }

    #[test]
    fn enabled_warp_scales_each_axis() {
        let p = DVec3::new(1.0, 2.0, -3.0);
        assert_eq!(warp(p, DVec3::new(2.0, 0.5, 1.0), true), DVec3::new(2.0, 1.0, -3.0));
    }
}
