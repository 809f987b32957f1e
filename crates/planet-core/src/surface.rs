//! CPU baking of the planet surface.
//!
//! Runs the same per-point chain as the shading stage:
//!   1. domain warp
//!   2. finite-difference displacement
//!   3. layered fBm height
//!   4. ramp color at that height
//!   5. biome overlay from temperature / humidity (when enabled)
use glam::DVec3;
use log::debug;
use serde::Serialize;

use crate::biome::{compute_humidity, compute_temperature, create_biome_texture, sample_biome_texture};
use crate::color::{RawRgba, Rgb};
use crate::noise::{displace, layer, warp};
use crate::planet::PlanetData;
use crate::ramp::create_ramp_texture;
use crate::sphere::equirect_cell;
use crate::texture::{sample_ramp, RgbaTexture};

/// Warp, displace, then layer: the height chain on its own, with no lookup
/// textures involved.
pub fn surface_height(planet: &PlanetData, position: DVec3) -> f64 {
    let warped = warp(position, planet.surface_noise.warp_factor(), planet.warping_enabled);
    let displaced = displace(warped, &planet.surface_displacement, planet.displacement_enabled);
    layer(displaced, &planet.surface_noise)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurfaceSample {
    pub height: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub color: Rgb,
}

/// Bakes the lookup textures once and evaluates surface points against them.
pub struct SurfaceSampler<'a> {
    planet: &'a PlanetData,
    ramp: RgbaTexture,
    biomes: Option<RgbaTexture>,
}

impl<'a> SurfaceSampler<'a> {
    pub fn new(planet: &'a PlanetData, ramp_size: usize, biome_size: usize) -> Self {
        let ramp = create_ramp_texture(planet.surface_ramp.steps(), ramp_size);
        let biomes = planet
            .biomes_enabled
            .then(|| create_biome_texture(planet.biomes.as_slice(), biome_size));
        Self { planet, ramp, biomes }
    }

    pub fn ramp_texture(&self) -> &RgbaTexture {
        &self.ramp
    }

    pub fn biome_texture(&self) -> Option<&RgbaTexture> {
        self.biomes.as_ref()
    }

    /// Terrain height at `position` (a point on the unit sphere).
    pub fn height(&self, position: DVec3) -> f64 {
        surface_height(self.planet, position)
    }

    pub fn sample(&self, position: DVec3) -> SurfaceSample {
        let p = self.planet;
        let height = self.height(position);
        let temperature = compute_temperature(position, &p.temperature_noise, p.temperature_mode);
        let humidity = compute_humidity(position, &p.humidity_noise, p.humidity_mode);

        let base: RawRgba = sample_ramp(&self.ramp, height);
        let color = match &self.biomes {
            Some(lookup) => sample_biome_texture(lookup, temperature, humidity, base.rgb()),
            None => base.rgb(),
        };
        SurfaceSample { height, temperature, humidity, color }
    }
}

/// Equirectangular bake of the whole sphere. Row-major, row 0 at the north pole.
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceMap {
    pub heights: Vec<f64>,
    pub temperature: Vec<f64>,
    pub humidity: Vec<f64>,
    pub colors: RgbaTexture,
    pub width: usize,
    pub height: usize,
}

impl SurfaceMap {
    pub fn height_range(&self) -> (f64, f64) {
        self.heights
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &h| (lo.min(h), hi.max(h)))
    }
}

#[cfg(feature = "threading")]
fn sample_grid(sampler: &SurfaceSampler<'_>, width: usize, height: usize) -> Vec<SurfaceSample> {
    use rayon::prelude::*;
    (0..width * height)
        .into_par_iter()
        .map(|i| sampler.sample(equirect_cell(i / width, i % width, width, height)))
        .collect()
}

#[cfg(not(feature = "threading"))]
fn sample_grid(sampler: &SurfaceSampler<'_>, width: usize, height: usize) -> Vec<SurfaceSample> {
    (0..width * height)
        .map(|i| sampler.sample(equirect_cell(i / width, i % width, width, height)))
        .collect()
}

/// Sample every cell of a `width × height` grid. Each cell is independent,
/// so the threaded build produces the same bytes as the serial one.
pub fn bake_surface_map(sampler: &SurfaceSampler<'_>, width: usize, height: usize) -> SurfaceMap {
    debug!("baking {width}x{height} surface map");
    let samples = sample_grid(sampler, width, height);

    let mut colors = RgbaTexture::new(width, height);
    for (i, s) in samples.iter().enumerate() {
        colors.set_index(i, RawRgba::new(s.color, 1.0).to_bytes());
    }

    SurfaceMap {
        heights: samples.iter().map(|s| s.height).collect(),
        temperature: samples.iter().map(|s| s.temperature).collect(),
        humidity: samples.iter().map(|s| s.humidity).collect(),
        colors,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::BiomeParameters;
    use crate::noise::{layer, NoiseParameters};

    #[test]
    fn height_without_warp_or_displacement_is_layered_noise() {
        let planet = PlanetData::default();
        let sampler = SurfaceSampler::new(&planet, 64, 16);
        let p = DVec3::new(0.0, 0.6, 0.8);
        assert_eq!(sampler.height(p), layer(p, &planet.surface_noise));
    }

    #[test]
    fn height_chain_needs_no_sampler() {
        let mut planet = PlanetData::default();
        planet.warping_enabled = true;
        planet.displacement_enabled = true;
        let sampler = SurfaceSampler::new(&planet, 16, 8);
        for i in 0..8 {
            let p = crate::sphere::from_latlon(i as f64 * 20.0 - 70.0, i as f64 * 45.0);
            assert_eq!(surface_height(&planet, p), sampler.height(p));
        }
    }

    #[test]
    fn warp_toggle_changes_height() {
        let mut planet = PlanetData::default();
        planet.surface_noise.set_warp_factor(DVec3::new(2.0, 0.5, 1.5));
        let p = DVec3::new(0.36, 0.48, 0.8);
        let plain = SurfaceSampler::new(&planet, 64, 16).height(p);
        planet.warping_enabled = true;
        let warped = SurfaceSampler::new(&planet, 64, 16).height(p);
        assert_ne!(plain, warped);
    }

    #[test]
    fn disabled_biomes_use_ramp_color() {
        let mut planet = PlanetData::default();
        planet.biomes_enabled = false;
        let sampler = SurfaceSampler::new(&planet, 64, 16);
        assert!(sampler.biome_texture().is_none());
        let p = DVec3::new(0.6, 0.0, 0.8);
        let s = sampler.sample(p);
        assert_eq!(s.color, sample_ramp(sampler.ramp_texture(), s.height).rgb());
    }

    #[test]
    fn full_cover_biome_paints_everything() {
        let mut planet = PlanetData::default();
        planet.biomes = vec![BiomeParameters::new(0.0, 1.0, 0.0, 1.0, Rgb::WHITE, 0.5)].into();
        let sampler = SurfaceSampler::new(&planet, 64, 16);
        for i in 0..10 {
            let p = crate::sphere::from_latlon(i as f64 * 17.0 - 80.0, i as f64 * 31.0);
            assert_eq!(sampler.sample(p).color, Rgb::WHITE);
        }
    }

    #[test]
    fn bake_is_deterministic_and_matches_point_samples() {
        let mut planet = PlanetData::default();
        planet.surface_noise = NoiseParameters::new(1.5, 0.5, 2.0, 3);
        let sampler = SurfaceSampler::new(&planet, 32, 16);
        let a = bake_surface_map(&sampler, 12, 6);
        let b = bake_surface_map(&sampler, 12, 6);
        assert_eq!(a.colors, b.colors);
        assert_eq!(a.heights, b.heights);
        let cell = sampler.sample(equirect_cell(2, 5, 12, 6));
        assert_eq!(a.heights[2 * 12 + 5], cell.height);
        let (lo, hi) = a.height_range();
        assert!(lo <= hi);
    }
}
