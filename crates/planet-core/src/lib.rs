//! Procedural planet surface core.
//!
//! Noise-based height fields, temperature / humidity fields, and the two
//! texture compositors (biome lookup, color ramp) that the editor uploads
//! to the GPU. Everything here is synchronous and allocation-light: the
//! compositors write into caller-owned buffers and keep no state between calls.

pub mod biome;
pub mod changes;
pub mod color;
pub mod math;
pub mod noise;
pub mod planet;
pub mod ramp;
pub mod sphere;
pub mod surface;
pub mod texture;

pub use glam;

pub use biome::{BiomeId, BiomeList, BiomeParameters, GradientMode};
pub use changes::{ChangeKey, ChangeSet};
pub use color::{RawRgba, Rgb};
pub use noise::{DisplacementParameters, NoiseParameters};
pub use planet::{PlanetData, PlanetError, RampKind};
pub use ramp::{ColorRamp, ColorRampStep, RampError, StepId};
pub use surface::{bake_surface_map, surface_height, SurfaceMap, SurfaceSample, SurfaceSampler};
pub use texture::RgbaTexture;
