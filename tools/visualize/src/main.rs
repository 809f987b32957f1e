//! Diagnostic visualizer: writes PNG debug images of the default planet to data/debug/.
//! Not part of the main pipeline; no tests, no clippy target.

use std::fs;
use std::path::Path;

use planet_core::biome::{create_biome_texture, BIOME_TEXTURE_SIZE};
use planet_core::ramp::{create_ramp_texture, RAMP_TEXTURE_SIZE};
use planet_core::{bake_surface_map, PlanetData, RampKind, RgbaTexture, SurfaceSampler};

const W: usize = 512;
const H: usize = 256;

/// Rows a 1-texel-high ramp strip is stretched to, so it is visible.
const STRIP_ROWS: u32 = 32;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn rgba_image(tex: &RgbaTexture) -> image::RgbaImage {
    let mut img = image::RgbaImage::new(tex.width as u32, tex.height as u32);
    for y in 0..tex.height {
        for x in 0..tex.width {
            img.put_pixel(x as u32, y as u32, image::Rgba(tex.pixel(x, y)));
        }
    }
    img
}

fn stretched_strip(tex: &RgbaTexture) -> image::RgbaImage {
    let mut img = image::RgbaImage::new(tex.width as u32, STRIP_ROWS);
    for y in 0..STRIP_ROWS {
        for x in 0..tex.width {
            img.put_pixel(x as u32, y, image::Rgba(tex.pixel(x, 0)));
        }
    }
    img
}

/// Observed `(min, max)` of a field.
fn value_range(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Normalized scalar field → grayscale.
fn gray_image(values: &[f64], lo: f64, hi: f64) -> image::RgbImage {
    let span = (hi - lo).max(f64::EPSILON);
    let mut img = image::RgbImage::new(W as u32, H as u32);
    for r in 0..H {
        for c in 0..W {
            let t = ((values[r * W + c] - lo) / span).clamp(0.0, 1.0);
            let v = (t * 255.0) as u8;
            img.put_pixel(c as u32, r as u32, image::Rgb([v, v, v]));
        }
    }
    img
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let mut planet = PlanetData::default();
    planet.warping_enabled = true;
    planet.displacement_enabled = true;

    let out_dir = Path::new("data/debug");
    fs::create_dir_all(out_dir).expect("cannot create data/debug/");

    // ── 1. ramp strips ───────────────────────────────────────────────────────
    for (name, kind) in [
        ("surface_ramp.png", RampKind::Surface),
        ("clouds_ramp.png", RampKind::Clouds),
        ("ring_ramp.png", RampKind::Ring),
    ] {
        let strip = create_ramp_texture(planet.ramp(kind).steps(), RAMP_TEXTURE_SIZE);
        let path = out_dir.join(name);
        stretched_strip(&strip).save(&path).expect("failed to save ramp strip");
        println!("Wrote {}", path.display());
    }

    // ── 2. biome_lookup.png ──────────────────────────────────────────────────
    {
        let lookup = create_biome_texture(planet.biomes.as_slice(), BIOME_TEXTURE_SIZE);
        let path = out_dir.join("biome_lookup.png");
        rgba_image(&lookup).save(&path).expect("failed to save biome_lookup.png");
        println!("Wrote {}", path.display());
    }

    println!("Baking surface map ({W}×{H})…");
    let sampler = SurfaceSampler::new(&planet, RAMP_TEXTURE_SIZE, BIOME_TEXTURE_SIZE);
    let map = bake_surface_map(&sampler, W, H);

    // ── 3. surface_color.png ─────────────────────────────────────────────────
    {
        let path = out_dir.join("surface_color.png");
        rgba_image(&map.colors).save(&path).expect("failed to save surface_color.png");
        println!("Wrote {}", path.display());
    }

    // ── 4. height / temperature / humidity ───────────────────────────────────
    for (name, values) in [
        ("surface_height.png", &map.heights),
        ("temperature.png", &map.temperature),
        ("humidity.png", &map.humidity),
    ] {
        let (lo, hi) = value_range(values);
        println!("{name}: range [{lo:.4}, {hi:.4}]");
        let path = out_dir.join(name);
        gray_image(values, lo, hi).save(&path).expect("failed to save field image");
        println!("Wrote {}", path.display());
    }
}
