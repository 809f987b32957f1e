//! Dirty tracking for GPU re-upload.
//!
//! Parameter setters only report whether they changed something. The host
//! owns a [`ChangeSet`], records those reports against a key, and drains it
//! once per sync to decide which uniforms and textures to refresh.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeKey {
    SurfaceNoise,
    SurfaceDisplacement,
    SurfaceToggles,
    Biomes,
    TemperatureNoise,
    HumidityNoise,
    BiomeModes,
    SurfaceRamp,
    CloudsRamp,
    RingRamp,
}

impl ChangeKey {
    /// Whether a change under this key invalidates a baked lookup texture
    /// rather than just a uniform.
    pub fn needs_texture_rebuild(self) -> bool {
        matches!(self, Self::Biomes | Self::SurfaceRamp | Self::CloudsRamp | Self::RingRamp)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    keys: BTreeSet<ChangeKey>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` if `changed`; passes `changed` through for chaining.
    pub fn record(&mut self, key: ChangeKey, changed: bool) -> bool {
        if changed {
            self.keys.insert(key);
        }
        changed
    }

    pub fn mark(&mut self, key: ChangeKey) {
        self.keys.insert(key);
    }

    pub fn contains(&self, key: ChangeKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Take every pending key in a stable order, leaving the set empty.
    pub fn drain(&mut self) -> Vec<ChangeKey> {
        std::mem::take(&mut self.keys).into_iter().collect()
    }
}
