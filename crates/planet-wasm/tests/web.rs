use planet_wasm::{biome_texture, normalize_planet, ramp_texture, surface_heights};
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn to_js(v: serde_json::Value) -> JsValue {
    v.serialize(&serde_wasm_bindgen::Serializer::json_compatible()).unwrap()
}

#[wasm_bindgen_test]
fn ramp_strip_has_rgba_per_texel() {
    let steps = to_js(serde_json::json!([
        { "id": 1, "color": { "r": 0.0, "g": 0.0, "b": 0.0 }, "alpha": 1.0, "factor": 0.0, "isBound": true },
        { "id": 2, "color": { "r": 1.0, "g": 1.0, "b": 1.0 }, "alpha": 1.0, "factor": 1.0, "isBound": true }
    ]));
    let bytes = ramp_texture(steps, 10).unwrap().to_vec();
    assert_eq!(bytes.len(), 40);
    assert_eq!(&bytes[..4], &[0, 0, 0, 255]);
}

#[wasm_bindgen_test]
fn ramp_steps_are_clamped_before_rasterizing() {
    let steps = to_js(serde_json::json!([
        { "id": 1, "color": { "r": 9.0, "g": 0.0, "b": 0.0 }, "alpha": -3.0, "factor": -5.0, "isBound": true },
        { "id": 2, "color": { "r": 1.0, "g": 1.0, "b": 1.0 }, "alpha": 7.0, "factor": 1e9, "isBound": true }
    ]));
    let bytes = ramp_texture(steps, 8).unwrap().to_vec();
    assert_eq!(bytes.len(), 32);
    assert_eq!(&bytes[..4], &[255, 0, 0, 0]);
}

#[wasm_bindgen_test]
fn biome_lookup_is_square() {
    let biomes = to_js(serde_json::json!([
        { "tempMin": 0.0, "tempMax": 0.5, "humiMin": 0.0, "humiMax": 0.5, "color": 0xffffff, "smoothness": 0.2 }
    ]));
    let bytes = biome_texture(biomes, 100).unwrap().to_vec();
    assert_eq!(bytes.len(), 100 * 100 * 4);
    let i = (10 * 100 + 10) * 4;
    assert_eq!(&bytes[i..i + 4], &[255, 255, 255, 255]);
}

#[wasm_bindgen_test]
fn heights_follow_position_count() {
    let heights = surface_heights("{}", &[0.0, 1.0, 0.0, 1.0, 0.0, 0.0]).unwrap();
    assert_eq!(heights.length(), 2);
}

#[wasm_bindgen_test]
fn normalize_rejects_garbage() {
    assert!(normalize_planet("nope").is_err());
    assert!(normalize_planet("{}").unwrap().contains("planetSurfaceNoise"));
}
