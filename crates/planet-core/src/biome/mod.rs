//! Biome layer: region parameters, climate fields and the lookup compositor.
//!
//! Shading flow: temperature and humidity at a surface point index the
//! lookup texture, whose texel is alpha-blended over the ramp color.

pub mod compositor;
pub mod field;
pub mod params;

pub use compositor::{
    create_biome_texture, find_min_distance_to_rect, find_rect_overlaps, recalculate_biome_texture,
    BorderOverlaps, Rect, BIOME_TEXTURE_SIZE,
};
pub use field::{compute_humidity, compute_temperature, sample_biome_texture};
pub use params::{BiomeError, BiomeId, BiomeList, BiomeParameters, GradientMode};

use crate::color::Rgb;

/// Starter regions for a fresh planet: polar ice, temperate forest, desert, jungle.
pub fn default_biomes() -> BiomeList {
    BiomeList::from(vec![
        BiomeParameters::new(0.0, 0.2, 0.0, 1.0, Rgb::from_hex(0xe8eef2), 0.3),
        BiomeParameters::new(0.35, 0.7, 0.4, 0.8, Rgb::from_hex(0x3f6b2a), 0.4),
        BiomeParameters::new(0.7, 1.0, 0.0, 0.3, Rgb::from_hex(0xd9b974), 0.25),
        BiomeParameters::new(0.75, 1.0, 0.7, 1.0, Rgb::from_hex(0x1f5a1c), 0.35),
    ])
}
