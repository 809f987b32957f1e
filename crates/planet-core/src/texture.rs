use serde::{Deserialize, Serialize};

use crate::color::RawRgba;

/// Row-major RGBA8 buffer, the shape handed to the host for GPU upload.
/// Ramps are `width × 1`, biome lookups are `size × size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbaTexture {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl RgbaTexture {
    /// Allocate a fully transparent texture.
    pub fn new(width: usize, height: usize) -> Self {
        Self { data: vec![0; width * height * 4], width, height }
    }

    #[inline]
    pub fn len_pixels(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Zero every byte, keeping the allocation.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, px: [u8; 4]) {
        let i = (y * self.width + x) * 4;
        self.data[i..i + 4].copy_from_slice(&px);
    }

    /// Pixel by linear index, used by strips where `y` is always 0.
    #[inline]
    pub fn set_index(&mut self, index: usize, px: [u8; 4]) {
        let i = index * 4;
        self.data[i..i + 4].copy_from_slice(&px);
    }

    #[inline]
    pub fn raw(&self, x: usize, y: usize) -> RawRgba {
        RawRgba::from_bytes(self.pixel(x, y))
    }

    /// Nearest-texel lookup at normalized `(u, v)` with clamp-to-edge wrapping,
    /// matching how the shading stage samples an unfiltered data texture.
    pub fn sample_nearest(&self, u: f64, v: f64) -> RawRgba {
        if self.width == 0 || self.height == 0 {
            return RawRgba::default();
        }
        let x = texel_index(u, self.width);
        let y = texel_index(v, self.height);
        self.raw(x, y)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

#[inline]
fn texel_index(t: f64, size: usize) -> usize {
    let i = (t * size as f64).floor();
    if i.is_nan() || i < 0.0 {
        0
    } else {
        (i as usize).min(size - 1)
    }
}

/// Look up a 1D strip at `t ∈ [0, 1]`.
pub fn sample_ramp(strip: &RgbaTexture, t: f64) -> RawRgba {
    strip.sample_nearest(t, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_texture_is_transparent() {
        let t = RgbaTexture::new(4, 2);
        assert_eq!(t.data.len(), 32);
        assert!(t.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn sampling_clamps_to_edge() {
        let mut t = RgbaTexture::new(4, 1);
        t.set_pixel(0, 0, [10, 0, 0, 255]);
        t.set_pixel(3, 0, [40, 0, 0, 255]);
        assert_eq!(sample_ramp(&t, -0.5).to_bytes()[0], 10);
        assert_eq!(sample_ramp(&t, 1.0).to_bytes()[0], 40);
        assert_eq!(sample_ramp(&t, 7.0).to_bytes()[0], 40);
    }

    #[test]
    fn empty_texture_samples_transparent() {
        let t = RgbaTexture::new(0, 0);
        assert_eq!(t.sample_nearest(0.5, 0.5), RawRgba::default());
    }
}
