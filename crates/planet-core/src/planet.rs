//! Planet configuration aggregate: every input the surface pipeline reads.
//!
//! The host owns one of these per planet. The core only borrows it for the
//! duration of a bake or a texture recompute.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::biome::{default_biomes, BiomeError, BiomeId, BiomeList, BiomeParameters, GradientMode};
use crate::changes::{ChangeKey, ChangeSet};
use crate::noise::params::json_bool;
use crate::noise::{DisplacementParameters, NoiseParameters};
use crate::ramp::{ColorRamp, RampError};

static NULL: Value = Value::Null;

#[derive(Debug, Error)]
pub enum PlanetError {
    #[error("invalid planet document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Ramp(#[from] RampError),
    #[error(transparent)]
    Biome(#[from] BiomeError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RampKind {
    Surface,
    Clouds,
    Ring,
}

impl RampKind {
    pub fn change_key(self) -> ChangeKey {
        match self {
            RampKind::Surface => ChangeKey::SurfaceRamp,
            RampKind::Clouds => ChangeKey::CloudsRamp,
            RampKind::Ring => ChangeKey::RingRamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct PlanetData {
    #[serde(rename = "planetSurfaceNoise")]
    pub surface_noise: NoiseParameters,
    #[serde(rename = "planetSurfaceDisplacement")]
    pub surface_displacement: DisplacementParameters,
    #[serde(rename = "planetSurfaceShowWarping")]
    pub warping_enabled: bool,
    #[serde(rename = "planetSurfaceShowDisplacement")]
    pub displacement_enabled: bool,
    #[serde(rename = "biomesEnabled")]
    pub biomes_enabled: bool,
    #[serde(rename = "biomesParams")]
    pub biomes: BiomeList,
    #[serde(rename = "biomesTemperatureNoise")]
    pub temperature_noise: NoiseParameters,
    #[serde(rename = "biomesHumidityNoise")]
    pub humidity_noise: NoiseParameters,
    #[serde(rename = "biomesTemperatureMode")]
    pub temperature_mode: GradientMode,
    #[serde(rename = "biomesHumidityMode")]
    pub humidity_mode: GradientMode,
    #[serde(rename = "planetSurfaceColorRamp")]
    pub surface_ramp: ColorRamp,
    #[serde(rename = "cloudsColorRamp")]
    pub clouds_ramp: ColorRamp,
    #[serde(rename = "ringColorRamp")]
    pub ring_ramp: ColorRamp,
}

fn default_temperature_noise() -> NoiseParameters {
    NoiseParameters::new(2.5, 1.0, 2.0, 4)
}

fn default_humidity_noise() -> NoiseParameters {
    NoiseParameters::new(3.0, 1.0, 2.0, 4)
}

impl Default for PlanetData {
    fn default() -> Self {
        Self {
            surface_noise: NoiseParameters::default(),
            surface_displacement: DisplacementParameters::default(),
            warping_enabled: false,
            displacement_enabled: false,
            biomes_enabled: true,
            biomes: default_biomes(),
            temperature_noise: default_temperature_noise(),
            humidity_noise: default_humidity_noise(),
            temperature_mode: GradientMode::Realistic,
            humidity_mode: GradientMode::Realistic,
            surface_ramp: ColorRamp::default_surface(),
            clouds_ramp: ColorRamp::default_clouds(),
            ring_ramp: ColorRamp::default_ring(),
        }
    }
}

impl PlanetData {
    /// Restore from a saved document. Anything missing or malformed falls
    /// back to its default on its own; only non-JSON input is an error.
    pub fn load(json: &str) -> Result<Self, PlanetError> {
        let doc: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&doc))
    }

    /// Same as [`PlanetData::load`] for an already parsed document.
    pub fn from_value(doc: &Value) -> Self {
        let d = Self::default();
        let field = |key: &str| doc.get(key).unwrap_or(&NULL);
        let mode = |key: &str, fallback| GradientMode::from_json(field(key)).unwrap_or(fallback);

        Self {
            surface_noise: NoiseParameters::load(field("planetSurfaceNoise"), &d.surface_noise),
            surface_displacement: DisplacementParameters::load(
                field("planetSurfaceDisplacement"),
                &d.surface_displacement,
            ),
            warping_enabled: json_bool(doc, "planetSurfaceShowWarping", d.warping_enabled),
            displacement_enabled: json_bool(doc, "planetSurfaceShowDisplacement", d.displacement_enabled),
            biomes_enabled: json_bool(doc, "biomesEnabled", d.biomes_enabled),
            biomes: match field("biomesParams") {
                Value::Null => d.biomes,
                v => BiomeList::load(v),
            },
            temperature_noise: NoiseParameters::load(field("biomesTemperatureNoise"), &d.temperature_noise),
            humidity_noise: NoiseParameters::load(field("biomesHumidityNoise"), &d.humidity_noise),
            temperature_mode: mode("biomesTemperatureMode", d.temperature_mode),
            humidity_mode: mode("biomesHumidityMode", d.humidity_mode),
            surface_ramp: ColorRamp::load(field("planetSurfaceColorRamp"), &d.surface_ramp),
            clouds_ramp: ColorRamp::load(field("cloudsColorRamp"), &d.clouds_ramp),
            ring_ramp: ColorRamp::load(field("ringColorRamp"), &d.ring_ramp),
        }
    }

    pub fn to_json(&self) -> Result<String, PlanetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Reroll the noise channels from `seed`. Ramps and biome regions are kept.
    pub fn randomize(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.surface_noise.randomize(&mut rng);
        self.surface_displacement.randomize(&mut rng);
        self.temperature_noise.randomize(&mut rng);
        self.humidity_noise.randomize(&mut rng);
    }

    pub fn ramp(&self, kind: RampKind) -> &ColorRamp {
        match kind {
            RampKind::Surface => &self.surface_ramp,
            RampKind::Clouds => &self.clouds_ramp,
            RampKind::Ring => &self.ring_ramp,
        }
    }

    pub fn ramp_mut(&mut self, kind: RampKind) -> &mut ColorRamp {
        match kind {
            RampKind::Surface => &mut self.surface_ramp,
            RampKind::Clouds => &mut self.clouds_ramp,
            RampKind::Ring => &mut self.ring_ramp,
        }
    }

    /// Apply `edit` to one ramp, re-sort it, and record the change.
    pub fn edit_ramp<F>(&mut self, kind: RampKind, changes: &mut ChangeSet, edit: F) -> Result<(), PlanetError>
    where
        F: FnOnce(&mut ColorRamp) -> Result<bool, RampError>,
    {
        let ramp = self.ramp_mut(kind);
        let changed = edit(ramp)?;
        ramp.sort();
        changes.record(kind.change_key(), changed);
        Ok(())
    }

    /// Apply `edit` to one biome region and record the change.
    pub fn edit_biome<F>(&mut self, id: BiomeId, changes: &mut ChangeSet, edit: F) -> Result<(), PlanetError>
    where
        F: FnOnce(&mut BiomeParameters) -> bool,
    {
        let biome = self.biomes.get_mut(id)?;
        changes.record(ChangeKey::Biomes, edit(biome));
        Ok(())
    }

    pub fn add_biome(&mut self, biome: BiomeParameters, changes: &mut ChangeSet) -> BiomeId {
        changes.mark(ChangeKey::Biomes);
        self.biomes.push(biome)
    }

    pub fn remove_biome(&mut self, id: BiomeId, changes: &mut ChangeSet) -> Result<BiomeParameters, PlanetError> {
        let removed = self.biomes.remove(id)?;
        changes.mark(ChangeKey::Biomes);
        Ok(removed)
    }
}

impl From<Value> for PlanetData {
    fn from(doc: Value) -> Self {
        Self::from_value(&doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn saved_document_loads_back_identically() {
        let mut planet = PlanetData::default();
        planet.randomize(11);
        planet.warping_enabled = true;
        let json = planet.to_json().unwrap();
        assert_eq!(PlanetData::load(&json).unwrap(), planet);
    }

    #[test]
    fn empty_document_yields_defaults() {
        let loaded = PlanetData::load("{}").unwrap();
        let d = PlanetData::default();
        assert_eq!(loaded.surface_noise, d.surface_noise);
        assert_eq!(loaded.biomes.len(), d.biomes.len());
        assert_eq!(loaded.temperature_mode, GradientMode::Realistic);
    }

    #[test]
    fn malformed_fields_default_independently() {
        let loaded = PlanetData::load(
            r#"{ "planetSurfaceNoise": { "frequency": 7.5 }, "biomesHumidityMode": 0, "cloudsColorRamp": 3 }"#,
        )
        .unwrap();
        assert_eq!(loaded.surface_noise.frequency(), 7.5);
        assert_eq!(loaded.surface_noise.octaves(), NoiseParameters::default().octaves());
        assert_eq!(loaded.humidity_mode, GradientMode::NoiseOnly);
        let stops = |r: &ColorRamp| r.steps().iter().map(|s| (s.factor(), s.alpha(), s.color())).collect::<Vec<_>>();
        assert_eq!(stops(&loaded.clouds_ramp), stops(&ColorRamp::default_clouds()));
    }

    #[test]
    fn non_json_is_an_error() {
        assert!(matches!(PlanetData::load("not json"), Err(PlanetError::Json(_))));
    }

    #[test]
    fn ramp_edit_sorts_and_records() {
        let mut planet = PlanetData::default();
        let mut changes = ChangeSet::new();
        planet
            .edit_ramp(RampKind::Clouds, &mut changes, |r| r.add_step(0.5, Rgb::WHITE, 0.5).map(|_| true))
            .unwrap();
        assert_eq!(planet.clouds_ramp.steps()[1].factor(), 0.5);
        assert!(changes.contains(ChangeKey::CloudsRamp));
    }

    #[test]
    fn ramp_capacity_error_propagates() {
        let mut planet = PlanetData::default();
        let mut changes = ChangeSet::new();
        planet.ring_ramp.lock();
        let err = planet
            .edit_ramp(RampKind::Ring, &mut changes, |r| r.add_step(0.5, Rgb::WHITE, 1.0).map(|_| true))
            .unwrap_err();
        assert!(matches!(err, PlanetError::Ramp(RampError::Locked)));
        assert!(changes.is_empty());
    }

    #[test]
    fn biome_edits_track_changes() {
        let mut planet = PlanetData::default();
        let mut changes = ChangeSet::new();
        let id = planet.biomes.iter().next().unwrap().id();
        planet.edit_biome(id, &mut changes, |b| b.set_smoothness(0.9)).unwrap();
        assert!(changes.contains(ChangeKey::Biomes));

        planet.remove_biome(id, &mut changes).unwrap();
        let err = planet.edit_biome(id, &mut changes, |b| b.set_smoothness(0.1)).unwrap_err();
        assert!(matches!(err, PlanetError::Biome(BiomeError::NotFound(_))));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut planet = PlanetData::default();
        planet.randomize(3);
        planet.reset();
        assert_eq!(planet.surface_noise, NoiseParameters::default());
    }

    #[test]
    fn deserialize_clamps_like_load() {
        let doc = serde_json::json!({
            "planetSurfaceNoise": { "frequency": 500.0, "octaves": 90 },
            "biomesParams": [{ "id": 5, "tempMin": 0.9, "tempMax": 0.1, "humiMin": -4.0, "smoothness": 5.0 }]
        });
        let planet: PlanetData = serde_json::from_value(doc.clone()).unwrap();
        assert_eq!(planet, PlanetData::from_value(&doc));
        assert_eq!(planet.surface_noise.frequency(), crate::noise::params::MAX_FREQUENCY);
        assert_eq!(planet.surface_noise.octaves(), crate::noise::params::MAX_OCTAVES);
        let b = &planet.biomes.as_slice()[0];
        assert!(b.temp_min() <= b.temp_max());
        assert_eq!((b.humi_min(), b.smoothness()), (0.0, 1.0));
    }
}
