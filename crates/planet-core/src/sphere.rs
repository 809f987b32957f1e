//! Unit-sphere coordinates in the editor's frame (y up, poles at y = ±1).
use glam::DVec3;

/// Point on the unit sphere for geodetic latitude / longitude in degrees.
pub fn from_latlon(lat_deg: f64, lon_deg: f64) -> DVec3 {
    let lat = lat_deg.to_radians();
    let lon = lon_deg.to_radians();
    DVec3::new(lat.cos() * lon.cos(), lat.sin(), lat.cos() * lon.sin())
}

/// Inverse of [`from_latlon`] for a unit vector.
pub fn to_latlon(p: DVec3) -> (f64, f64) {
    let lat = p.y.clamp(-1.0, 1.0).asin().to_degrees();
    let lon = p.z.atan2(p.x).to_degrees();
    (lat, lon)
}

/// Cell-centre position of `(row, col)` on an equirectangular grid, row 0 at the north pole.
pub fn equirect_cell(row: usize, col: usize, width: usize, height: usize) -> DVec3 {
    let lat = 90.0 - (row as f64 + 0.5) / height as f64 * 180.0;
    let lon = (col as f64 + 0.5) / width as f64 * 360.0 - 180.0;
    from_latlon(lat, lon)
}
