use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::color::Rgb;
use crate::noise::params::{json_bool, json_f64};

pub const DEFAULT_MAX_SIZE: usize = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RampError {
    #[error("color ramp is full ({max_size} steps)")]
    CapacityExceeded { max_size: usize },
    #[error("no color ramp step with id {0}")]
    NotFound(StepId),
    #[error("step {0} is a ramp endpoint and cannot be removed or moved")]
    BoundStep(StepId),
    #[error("color ramp size is locked")]
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub u32);

impl StepId {
    pub fn fresh() -> Self {
        Self(rand::random())
    }

    /// Keep a persisted id when it fits, otherwise mint a new one.
    fn from_json(v: &Value) -> Self {
        v.as_u64()
            .and_then(|id| u32::try_from(id).ok())
            .map(Self)
            .unwrap_or_else(Self::fresh)
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// One gradient stop. Endpoints (`is_bound`) sit at factor 0 and 1.
///
/// Deserialization goes through the same clamping as [`ColorRampStep::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct ColorRampStep {
    id: StepId,
    color: Rgb,
    alpha: f64,
    factor: f64,
    is_bound: bool,
}

impl ColorRampStep {
    pub fn new(color: Rgb, alpha: f64, factor: f64) -> Self {
        Self {
            id: StepId::fresh(),
            color: color.clamped(),
            alpha: alpha.clamp(0.0, 1.0),
            factor: factor.clamp(0.0, 1.0),
            is_bound: false,
        }
    }

    pub fn bound(color: Rgb, alpha: f64, factor: f64) -> Self {
        Self { is_bound: true, ..Self::new(color, alpha, factor) }
    }

    pub fn id(&self) -> StepId { self.id }
    pub fn color(&self) -> Rgb { self.color }
    pub fn alpha(&self) -> f64 { self.alpha }
    pub fn factor(&self) -> f64 { self.factor }
    pub fn is_bound(&self) -> bool { self.is_bound }

    /// Restore one stop from a persisted document, clamping as it goes.
    pub fn load(v: &Value) -> Self {
        let color = v
            .get("color")
            .and_then(|c| match c {
                Value::Number(n) => n.as_u64().map(|h| Rgb::from_hex(h as u32)),
                other => serde_json::from_value::<Rgb>(other.clone()).ok(),
            })
            .unwrap_or(Rgb::BLACK);
        let mut step = Self::new(color, json_f64(v, "alpha", 1.0), json_f64(v, "factor", 0.0));
        step.is_bound = json_bool(v, "isBound", false);
        step.id = StepId::from_json(v.get("id").unwrap_or(&Value::Null));
        step
    }
}

impl From<Value> for ColorRampStep {
    fn from(v: Value) -> Self {
        Self::load(&v)
    }
}

/// Ordered gradient stops. Mutations do not re-sort; call [`ColorRamp::sort`]
/// after editing factors and before rasterizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct ColorRamp {
    steps: Vec<ColorRampStep>,
    max_size: usize,
    locked_size: bool,
}

impl ColorRamp {
    /// Ramp from an initial stop list, sorted by factor.
    pub fn new(steps: Vec<ColorRampStep>) -> Self {
        let mut ramp = Self { steps, max_size: DEFAULT_MAX_SIZE, locked_size: false };
        ramp.sort();
        ramp
    }

    /// Two-stop ramp between bound endpoints.
    pub fn between(start: Rgb, start_alpha: f64, end: Rgb, end_alpha: f64) -> Self {
        Self::new(vec![
            ColorRampStep::bound(start, start_alpha, 0.0),
            ColorRampStep::bound(end, end_alpha, 1.0),
        ])
    }

    pub fn steps(&self) -> &[ColorRampStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn is_locked(&self) -> bool {
        self.locked_size
    }

    pub fn lock(&mut self) {
        self.locked_size = true;
    }

    pub fn unlock(&mut self) {
        self.locked_size = false;
    }

    pub fn step(&self, id: StepId) -> Result<&ColorRampStep, RampError> {
        self.steps.iter().find(|s| s.id == id).ok_or(RampError::NotFound(id))
    }

    fn step_mut(&mut self, id: StepId) -> Result<&mut ColorRampStep, RampError> {
        self.steps.iter_mut().find(|s| s.id == id).ok_or(RampError::NotFound(id))
    }

    /// Append a stop. The ramp is left unsorted.
    pub fn add_step(&mut self, factor: f64, color: Rgb, alpha: f64) -> Result<StepId, RampError> {
        if self.locked_size {
            return Err(RampError::Locked);
        }
        if self.steps.len() >= self.max_size {
            return Err(RampError::CapacityExceeded { max_size: self.max_size });
        }
        let step = ColorRampStep::new(color, alpha, factor);
        let id = step.id;
        self.steps.push(step);
        Ok(id)
    }

    pub fn remove_step(&mut self, id: StepId) -> Result<ColorRampStep, RampError> {
        if self.locked_size {
            return Err(RampError::Locked);
        }
        let idx = self.steps.iter().position(|s| s.id == id).ok_or(RampError::NotFound(id))?;
        if self.steps[idx].is_bound {
            return Err(RampError::BoundStep(id));
        }
        Ok(self.steps.remove(idx))
    }

    pub fn set_step_color(&mut self, id: StepId, color: Rgb) -> Result<bool, RampError> {
        let step = self.step_mut(id)?;
        let color = color.clamped();
        let changed = step.color != color;
        step.color = color;
        Ok(changed)
    }

    pub fn set_step_alpha(&mut self, id: StepId, alpha: f64) -> Result<bool, RampError> {
        let step = self.step_mut(id)?;
        let alpha = alpha.clamp(0.0, 1.0);
        let changed = step.alpha != alpha;
        step.alpha = alpha;
        Ok(changed)
    }

    /// Move an inner stop. Endpoints stay pinned at 0 and 1.
    pub fn set_step_factor(&mut self, id: StepId, factor: f64) -> Result<bool, RampError> {
        let step = self.step_mut(id)?;
        if step.is_bound {
            return Err(RampError::BoundStep(id));
        }
        let factor = factor.clamp(0.0, 1.0);
        let changed = step.factor != factor;
        step.factor = factor;
        Ok(changed)
    }

    /// Stable ascending sort by factor.
    pub fn sort(&mut self) {
        self.steps.sort_by(|a, b| a.factor.total_cmp(&b.factor));
    }

    /// Restore from a persisted document. A document without both endpoints
    /// is rejected wholesale in favour of `defaults`.
    pub fn load(v: &Value, defaults: &Self) -> Self {
        let steps: Vec<ColorRampStep> = match v.get("steps") {
            Some(Value::Array(items)) => items.iter().map(ColorRampStep::load).collect(),
            _ => return defaults.clone(),
        };
        if steps.iter().filter(|s| s.is_bound).count() < 2 {
            return defaults.clone();
        }
        let max_size = v
            .get("maxSize")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
            .unwrap_or(defaults.max_size)
            .max(steps.len());
        let mut ramp = Self::new(steps);
        ramp.max_size = max_size;
        ramp.locked_size = json_bool(v, "lockedSize", defaults.locked_size);
        ramp
    }

    /// Ocean to snow gradient used for fresh planet surfaces.
    pub fn default_surface() -> Self {
        Self::new(vec![
            ColorRampStep::bound(Rgb::from_hex(0x0b2545), 1.0, 0.0),
            ColorRampStep::new(Rgb::from_hex(0x1d5c8c), 1.0, 0.3),
            ColorRampStep::new(Rgb::from_hex(0xd8c690), 1.0, 0.42),
            ColorRampStep::new(Rgb::from_hex(0x4c7a34), 1.0, 0.5),
            ColorRampStep::new(Rgb::from_hex(0x6e5f50), 1.0, 0.75),
            ColorRampStep::bound(Rgb::WHITE, 1.0, 1.0),
        ])
    }

    /// Black to white, the fallback for a standalone ramp document without endpoints.
    pub fn default_grayscale() -> Self {
        Self::between(Rgb::BLACK, 1.0, Rgb::WHITE, 1.0)
    }

    pub fn default_clouds() -> Self {
        Self::between(Rgb::WHITE, 0.0, Rgb::WHITE, 1.0)
    }

    pub fn default_ring() -> Self {
        Self::new(vec![
            ColorRampStep::bound(Rgb::from_hex(0x6b5a48), 0.0, 0.0),
            ColorRampStep::new(Rgb::from_hex(0xb8a58c), 0.8, 0.35),
            ColorRampStep::new(Rgb::from_hex(0x8c7a64), 0.4, 0.7),
            ColorRampStep::bound(Rgb::from_hex(0x6b5a48), 0.0, 1.0),
        ])
    }
}

impl From<Value> for ColorRamp {
    fn from(v: Value) -> Self {
        Self::load(&v, &Self::default_grayscale())
    }
}
