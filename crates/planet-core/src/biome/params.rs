use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::color::Rgb;
use crate::noise::params::json_f64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BiomeError {
    #[error("no biome with id {0}")]
    NotFound(BiomeId),
}

/// Opaque, stable identity of a biome region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BiomeId(pub u32);

impl BiomeId {
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

impl std::fmt::Display for BiomeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// How the geographic gradient shapes a temperature or humidity field.
/// The numeric values are what the shading stage receives as a uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GradientMode {
    NoiseOnly = 0,
    Polar = 1,
    #[default]
    Realistic = 2,
}

impl GradientMode {
    pub fn as_uniform(self) -> f64 {
        self as u8 as f64
    }

    /// Accepts the persisted forms: a number (0/1/2) or the variant name.
    pub fn from_json(v: &Value) -> Option<Self> {
        match v {
            Value::Number(n) => match n.as_f64()?.round() as i64 {
                0 => Some(Self::NoiseOnly),
                1 => Some(Self::Polar),
                2 => Some(Self::Realistic),
                _ => None,
            },
            Value::String(_) => serde_json::from_value(v.clone()).ok(),
            _ => None,
        }
    }
}

/// Axis-aligned region in (temperature, humidity) space. The coupled setters
/// keep `min ≤ max` on both axes: moving one bound past the other drags it along.
/// Deserialization runs through [`BiomeParameters::load`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct BiomeParameters {
    id: BiomeId,
    temp_min: f64,
    temp_max: f64,
    humi_min: f64,
    humi_max: f64,
    color: Rgb,
    smoothness: f64,
}

impl BiomeParameters {
    pub fn new(
        temp_min: f64,
        temp_max: f64,
        humi_min: f64,
        humi_max: f64,
        color: Rgb,
        smoothness: f64,
    ) -> Self {
        let mut b = Self {
            id: BiomeId::fresh(),
            temp_min: 0.0,
            temp_max: 0.0,
            humi_min: 0.0,
            humi_max: 0.0,
            color: color.clamped(),
            smoothness: 0.0,
        };
        b.set_temp_max(temp_max);
        b.set_temp_min(temp_min);
        b.set_humi_max(humi_max);
        b.set_humi_min(humi_min);
        b.set_smoothness(smoothness);
        b
    }

    pub fn id(&self) -> BiomeId { self.id }
    pub fn temp_min(&self) -> f64 { self.temp_min }
    pub fn temp_max(&self) -> f64 { self.temp_max }
    pub fn humi_min(&self) -> f64 { self.humi_min }
    pub fn humi_max(&self) -> f64 { self.humi_max }
    pub fn color(&self) -> Rgb { self.color }
    pub fn smoothness(&self) -> f64 { self.smoothness }

    pub fn set_temp_min(&mut self, v: f64) -> bool {
        let v = v.clamp(0.0, 1.0);
        let changed = v != self.temp_min || v > self.temp_max;
        self.temp_min = v;
        self.temp_max = self.temp_max.max(v);
        changed
    }

    pub fn set_temp_max(&mut self, v: f64) -> bool {
        let v = v.clamp(0.0, 1.0);
        let changed = v != self.temp_max || v < self.temp_min;
        self.temp_max = v;
        self.temp_min = self.temp_min.min(v);
        changed
    }

    pub fn set_humi_min(&mut self, v: f64) -> bool {
        let v = v.clamp(0.0, 1.0);
        let changed = v != self.humi_min || v > self.humi_max;
        self.humi_min = v;
        self.humi_max = self.humi_max.max(v);
        changed
    }

    pub fn set_humi_max(&mut self, v: f64) -> bool {
        let v = v.clamp(0.0, 1.0);
        let changed = v != self.humi_max || v < self.humi_min;
        self.humi_max = v;
        self.humi_min = self.humi_min.min(v);
        changed
    }

    pub fn set_color(&mut self, c: Rgb) -> bool {
        let c = c.clamped();
        let changed = c != self.color;
        self.color = c;
        changed
    }

    pub fn set_smoothness(&mut self, v: f64) -> bool {
        let v = v.clamp(0.0, 1.0);
        let changed = v != self.smoothness;
        self.smoothness = v;
        changed
    }

    /// Restore one region from a persisted document. The id is kept when
    /// present so host-side selections survive a reload.
    pub fn load(v: &Value) -> Self {
        let color = v
            .get("color")
            .and_then(|c| match c {
                Value::Number(n) => n.as_u64().map(|h| Rgb::from_hex(h as u32)),
                other => serde_json::from_value::<Rgb>(other.clone()).ok(),
            })
            .unwrap_or(Rgb::WHITE);
        let mut b = Self::new(
            json_f64(v, "tempMin", 0.0),
            json_f64(v, "tempMax", 1.0),
            json_f64(v, "humiMin", 0.0),
            json_f64(v, "humiMax", 1.0),
            color,
            json_f64(v, "smoothness", 0.1),
        );
        b.id = BiomeId::from_json(v.get("id").unwrap_or(&Value::Null));
        b
    }
}

impl From<Value> for BiomeParameters {
    fn from(v: Value) -> Self {
        Self::load(&v)
    }
}

/// Regions in composition order: later entries blend over earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BiomeList(Vec<BiomeParameters>);

impl BiomeList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, biome: BiomeParameters) -> BiomeId {
        let id = biome.id();
        self.0.push(biome);
        id
    }

    pub fn get(&self, id: BiomeId) -> Result<&BiomeParameters, BiomeError> {
        self.0.iter().find(|b| b.id == id).ok_or(BiomeError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: BiomeId) -> Result<&mut BiomeParameters, BiomeError> {
        self.0.iter_mut().find(|b| b.id == id).ok_or(BiomeError::NotFound(id))
    }

    pub fn remove(&mut self, id: BiomeId) -> Result<BiomeParameters, BiomeError> {
        let idx = self.0.iter().position(|b| b.id == id).ok_or(BiomeError::NotFound(id))?;
        Ok(self.0.remove(idx))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BiomeParameters> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[BiomeParameters] {
        &self.0
    }

    pub fn load(v: &Value) -> Self {
        match v {
            Value::Array(items) => Self(items.iter().map(BiomeParameters::load).collect()),
            _ => Self::new(),
        }
    }
}

impl From<Vec<BiomeParameters>> for BiomeList {
    fn from(v: Vec<BiomeParameters>) -> Self {
        Self(v)
    }
}

impl<'a> IntoIterator for &'a BiomeList {
    type Item = &'a BiomeParameters;
    type IntoIter = std::slice::Iter<'a, BiomeParameters>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raising_min_pushes_max() {
        let mut b = BiomeParameters::new(0.2, 0.4, 0.1, 0.3, Rgb::WHITE, 0.5);
        assert!(b.set_temp_min(0.7));
        assert_eq!(b.temp_min(), 0.7);
        assert_eq!(b.temp_max(), 0.7);
    }

    #[test]
    fn lowering_max_pulls_min() {
        let mut b = BiomeParameters::new(0.2, 0.4, 0.5, 0.9, Rgb::WHITE, 0.5);
        b.set_humi_max(0.3);
        assert_eq!(b.humi_max(), 0.3);
        assert_eq!(b.humi_min(), 0.3);
    }

    #[test]
    fn bounds_are_clamped() {
        let b = BiomeParameters::new(-1.0, 4.0, 0.0, 1.0, Rgb::WHITE, 2.0);
        assert_eq!((b.temp_min(), b.temp_max(), b.smoothness()), (0.0, 1.0, 1.0));
    }

    #[test]
    fn missing_id_is_not_found() {
        let mut list = BiomeList::new();
        let id = list.push(BiomeParameters::new(0.0, 1.0, 0.0, 1.0, Rgb::WHITE, 0.1));
        let ghost = BiomeId(id.0.wrapping_add(1));
        assert_eq!(list.remove(ghost), Err(BiomeError::NotFound(ghost)));
        assert!(list.remove(id).is_ok());
        assert!(list.is_empty());
    }

    #[test]
    fn load_accepts_hex_colors_and_keeps_ids() {
        let b = BiomeParameters::load(&json!({ "id": 77, "tempMin": 0.5, "color": 0xff0000 }));
        assert_eq!(b.id(), BiomeId(77));
        assert_eq!(b.temp_min(), 0.5);
        assert_eq!(b.temp_max(), 1.0);
        assert_eq!(b.color(), Rgb::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn gradient_mode_reads_numbers_and_names() {
        assert_eq!(GradientMode::from_json(&json!(1)), Some(GradientMode::Polar));
        assert_eq!(GradientMode::from_json(&json!("NOISE_ONLY")), Some(GradientMode::NoiseOnly));
        assert_eq!(GradientMode::from_json(&json!(9)), None);
        assert_eq!(GradientMode::Realistic.as_uniform(), 2.0);
    }

    #[test]
    fn deserialized_regions_are_clamped() {
        let list: BiomeList = serde_json::from_value(json!([
            { "id": 3, "tempMin": 0.9, "tempMax": 0.1, "humiMin": -4.0, "smoothness": 5.0,
              "color": { "r": 2.0, "g": 0.25, "b": -1.0 } }
        ]))
        .unwrap();
        let b = &list.as_slice()[0];
        assert_eq!(b.id(), BiomeId(3));
        assert_eq!((b.temp_min(), b.temp_max()), (0.9, 0.9));
        assert_eq!((b.humi_min(), b.humi_max(), b.smoothness()), (0.0, 1.0, 1.0));
        assert_eq!(b.color(), Rgb::new(1.0, 0.25, 0.0));
    }

    #[test]
    fn oversized_ids_are_not_truncated() {
        let a = BiomeParameters::load(&json!({ "id": (1u64 << 32) + 7 }));
        assert_ne!(a.id(), BiomeId(7));
    }
}
