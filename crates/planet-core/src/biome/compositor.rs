//! Biome lookup texture rasterization.
//!
//! Each region is projected to a pixel rect on a `size × size` plane
//! (x = humidity, y = temperature) and composited over what is already there,
//! in list order, with an alpha falloff toward the rect's interior edges.
//! Alphas and blended channels are truncated to four decimals before use.
use log::{debug, trace};

use crate::color::RawRgba;
use crate::math::{clamp01, truncate_to, TRUNCATE_PRECISION};
use crate::texture::RgbaTexture;

use super::params::BiomeParameters;

/// Side length of the biome lookup texture the editor uploads.
pub const BIOME_TEXTURE_SIZE: usize = 512;

/// Pixel-space projection of a biome region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Rect {
    /// Project onto a plane of side `size`. Both axes scale by `size`.
    pub fn from_biome(biome: &BiomeParameters, size: usize) -> Self {
        let s = size as f64;
        Self {
            x: (biome.humi_min() * s).floor() as usize,
            y: (biome.temp_min() * s).floor() as usize,
            w: ((biome.humi_max() - biome.humi_min()) * s).ceil() as usize,
            h: ((biome.temp_max() - biome.temp_min()) * s).ceil() as usize,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

/// Which plane borders a rect touches. Touching edges get no falloff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BorderOverlaps {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl BorderOverlaps {
    pub fn all(&self) -> bool {
        self.top && self.right && self.bottom && self.left
    }
}

pub fn find_rect_overlaps(rect: &Rect, plane_width: usize, plane_height: usize) -> BorderOverlaps {
    BorderOverlaps {
        top: rect.y == 0,
        right: rect.x + rect.w >= plane_width,
        bottom: rect.y + rect.h >= plane_height,
        left: rect.x == 0,
    }
}

/// Distance from `(x, y)` to the nearest rect edge, ignoring edges flagged in
/// `overlaps`. With every edge flagged the result is `f64::INFINITY`.
pub fn find_min_distance_to_rect(rect: &Rect, x: f64, y: f64, overlaps: BorderOverlaps) -> f64 {
    let left = rect.x as f64;
    let top = rect.y as f64;
    let right = (rect.x + rect.w) as f64;
    let bottom = (rect.y + rect.h) as f64;

    let mut d = f64::INFINITY;
    if !overlaps.left {
        d = d.min(x - left);
    }
    if !overlaps.right {
        d = d.min(right - x);
    }
    if !overlaps.top {
        d = d.min(y - top);
    }
    if !overlaps.bottom {
        d = d.min(bottom - y);
    }
    d
}

/// Falloff alpha for a texel `distance` pixels inside the rect.
/// A zero smoothing radius gives a hard edge.
fn edge_alpha(distance: f64, smoothness_px: f64) -> f64 {
    if smoothness_px <= 0.0 || distance.is_infinite() {
        return 1.0;
    }
    truncate_to(clamp01(distance / smoothness_px), TRUNCATE_PRECISION)
}

/// Porter-Duff "over" of `src` onto `dst`, with truncated alpha and channels.
pub fn blend_over(src: RawRgba, dst: RawRgba) -> RawRgba {
    let a = truncate_to(src.a + dst.a * (1.0 - src.a), TRUNCATE_PRECISION);
    if a <= 0.0 {
        return RawRgba::default();
    }
    let channel = |s: f64, d: f64| {
        truncate_to((s * src.a + d * dst.a * (1.0 - src.a)) / a, TRUNCATE_PRECISION)
    };
    RawRgba {
        r: channel(src.r, dst.r),
        g: channel(src.g, dst.g),
        b: channel(src.b, dst.b),
        a,
    }
}

fn composite_region(texture: &mut RgbaTexture, biome: &BiomeParameters) {
    let rect = Rect::from_biome(biome, texture.width);
    if rect.is_empty() {
        trace!("biome {} has zero area, skipped", biome.id());
        return;
    }

    let smoothness = biome.smoothness();
    let smoothness_px = (rect.w as f64 * smoothness + rect.h as f64 * smoothness) / 2.0;
    let overlaps = find_rect_overlaps(&rect, texture.width, texture.height);
    trace!("biome {} -> {:?}, smoothing {:.2}px, borders {:?}", biome.id(), rect, smoothness_px, overlaps);

    // Ceil-rounded extents may poke past the plane by a pixel.
    let x_end = (rect.x + rect.w).min(texture.width);
    let y_end = (rect.y + rect.h).min(texture.height);
    let color = biome.color();

    for py in rect.y..y_end {
        for px in rect.x..x_end {
            let dst = texture.raw(px, py);
            let distance = find_min_distance_to_rect(&rect, px as f64, py as f64, overlaps);
            let src = RawRgba::new(color, edge_alpha(distance, smoothness_px));
            let out = if dst.a > 0.0 { blend_over(src, dst) } else { src };
            texture.set_pixel(px, py, out.to_bytes());
        }
    }
}

/// Composite every region, in order, into `texture`.
pub fn fill_biome_texture(texture: &mut RgbaTexture, biomes: &[BiomeParameters]) {
    for biome in biomes {
        composite_region(texture, biome);
    }
}

/// Allocate a `size × size` lookup and fill it. An empty list leaves it transparent.
pub fn create_biome_texture(biomes: &[BiomeParameters], size: usize) -> RgbaTexture {
    let mut texture = RgbaTexture::new(size, size);
    if !biomes.is_empty() {
        debug!("creating {size}x{size} biome texture from {} regions", biomes.len());
        fill_biome_texture(&mut texture, biomes);
    }
    texture
}

/// Clear `texture` in place and re-fill it from `biomes`.
pub fn recalculate_biome_texture(texture: &mut RgbaTexture, biomes: &[BiomeParameters]) {
    texture.clear();
    if biomes.is_empty() {
        return;
    }
    debug!(
        "recalculating {}x{} biome texture from {} regions",
        texture.width,
        texture.height,
        biomes.len()
    );
    fill_biome_texture(texture, biomes);
}
