//! 1D gradient rasterization.
//!
//! Segments are written back to back from texel 0. Each segment's length is
//! ceil-rounded on its own, so the total can drift a few texels from the strip
//! width: overrun is dropped, underrun leaves the tail as it was. Saved
//! textures depend on this layout, so it is kept as is.
use log::debug;

use crate::color::RawRgba;
use crate::math::{mix, truncate_to, TRUNCATE_PRECISION};
use crate::texture::RgbaTexture;

use super::model::ColorRampStep;

/// Width of the gradient strips the editor uploads.
pub const RAMP_TEXTURE_SIZE: usize = 256;

/// Rasterize `steps` (ascending by factor) into the strip, starting at texel 0.
/// Returns how many texels the segments asked for.
pub fn fill_ramp_texture(texture: &mut RgbaTexture, steps: &[ColorRampStep]) -> usize {
    let width = texture.len_pixels();
    let w = width as f64;
    let mut stride = 0usize;

    for pair in steps.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        let current_x = truncate_to(current.factor() * w, TRUNCATE_PRECISION);
        let next_x = truncate_to(next.factor() * w, TRUNCATE_PRECISION);
        let span = (next_x - current_x).ceil();
        let total = if span > 0.0 { span as usize } else { 0 };

        for px in 0..total {
            let t = truncate_to(px as f64 / total as f64, TRUNCATE_PRECISION);
            let color = current.color().lerp(next.color(), t);
            let alpha = mix(current.alpha(), next.alpha(), t);
            if stride < width {
                texture.set_index(stride, RawRgba::new(color, alpha).to_bytes());
            }
            stride += 1;
        }
    }

    if !steps.is_empty() && stride != width {
        debug!("ramp segments cover {stride} of {width} texels");
    }
    stride
}

/// Allocate a `width × 1` strip and rasterize into it. Fewer than two steps
/// leave it transparent.
pub fn create_ramp_texture(steps: &[ColorRampStep], width: usize) -> RgbaTexture {
    let mut texture = RgbaTexture::new(width, 1);
    fill_ramp_texture(&mut texture, steps);
    texture
}

/// Zero the strip in place, then rasterize `steps` into it.
pub fn recalculate_ramp_texture(texture: &mut RgbaTexture, steps: &[ColorRampStep]) {
    texture.clear();
    fill_ramp_texture(texture, steps);
}
