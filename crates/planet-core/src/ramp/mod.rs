//! Color ramps: editable gradient stops and their strip rasterizer.

pub mod compositor;
pub mod model;

pub use compositor::{create_ramp_texture, fill_ramp_texture, recalculate_ramp_texture, RAMP_TEXTURE_SIZE};
pub use model::{ColorRamp, ColorRampStep, RampError, StepId, DEFAULT_MAX_SIZE};
