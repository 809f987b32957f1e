use js_sys::{Float64Array, Uint8Array};
use wasm_bindgen::prelude::*;

use planet_core::glam::DVec3;
use planet_core::biome::{create_biome_texture, BiomeList, BIOME_TEXTURE_SIZE};
use planet_core::ramp::{create_ramp_texture, ColorRamp, ColorRampStep, RAMP_TEXTURE_SIZE};
use planet_core::{surface_height, PlanetData};

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(js_name = rampTextureSize)]
pub fn ramp_texture_size() -> usize {
    RAMP_TEXTURE_SIZE
}

#[wasm_bindgen(js_name = biomeTextureSize)]
pub fn biome_texture_size() -> usize {
    BIOME_TEXTURE_SIZE
}

/// Rasterize a color ramp into a `width × 1` RGBA8 strip.
///
/// `steps` is the host's step array. Each step is clamped on the way in and
/// the list is sorted by factor before use.
#[wasm_bindgen(js_name = rampTexture)]
pub fn ramp_texture(steps: JsValue, width: usize) -> Result<Uint8Array, JsValue> {
    let steps: Vec<ColorRampStep> = serde_wasm_bindgen::from_value(steps)?;
    let ramp = ColorRamp::new(steps);
    let texture = create_ramp_texture(ramp.steps(), width);
    Ok(Uint8Array::from(texture.as_bytes()))
}

/// Rasterize biome regions into a `size × size` RGBA8 lookup.
/// Regions are clamped on the way in, the same as a planet load.
#[wasm_bindgen(js_name = biomeTexture)]
pub fn biome_texture(biomes: JsValue, size: usize) -> Result<Uint8Array, JsValue> {
    let doc: serde_json::Value = serde_wasm_bindgen::from_value(biomes)?;
    let biomes = BiomeList::load(&doc);
    let texture = create_biome_texture(biomes.as_slice(), size);
    Ok(Uint8Array::from(texture.as_bytes()))
}

/// Evaluate surface heights for a flat `[x0, y0, z0, x1, ...]` position list
/// against a saved planet document.
#[wasm_bindgen(js_name = surfaceHeights)]
pub fn surface_heights(planet_json: &str, positions: &[f64]) -> Result<Float64Array, JsValue> {
    let planet = PlanetData::load(planet_json).map_err(js_err)?;
    let heights: Vec<f64> = positions
        .chunks_exact(3)
        .map(|p| surface_height(&planet, DVec3::new(p[0], p[1], p[2])))
        .collect();
    Ok(Float64Array::from(heights.as_slice()))
}

/// Normalize a planet document: fills defaults and clamps every field.
#[wasm_bindgen(js_name = normalizePlanet)]
pub fn normalize_planet(planet_json: &str) -> Result<String, JsValue> {
    PlanetData::load(planet_json)
        .and_then(|p| p.to_json())
        .map_err(js_err)
}
