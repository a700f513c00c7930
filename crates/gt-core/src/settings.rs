//! Display settings with persisted-or-default resolution.
//!
//! The persisted store is owned by the host (e.g. browser local storage);
//! this module only knows the JSON shape it holds. Any key missing from the
//! stored object falls back to [`Settings::defaults`].

use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const VOLUME_RANGE: (f32, f32) = (0.0, 100.0);
pub const THICKNESS_RANGE: (f32, f32) = (1.0, 20.0);

/// Fully resolved settings, as consumed by rendering and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub volume: f32,
    /// Draw vertex labels.
    pub labels: bool,
    /// Read edge endpoints as from→to and annotate edges.
    pub directed: bool,
    /// Stroke width for vertices and edges; also the edge hit tolerance.
    pub thickness: f32,
}

impl Settings {
    pub fn defaults(dark_mode: bool) -> Self {
        Self {
            volume: 100.0,
            labels: true,
            directed: false,
            thickness: if dark_mode { 8.0 } else { 12.0 },
        }
    }

    pub fn get(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::Volume => SettingValue::Number(self.volume),
            SettingKey::Labels => SettingValue::Bool(self.labels),
            SettingKey::Directed => SettingValue::Bool(self.directed),
            SettingKey::Thickness => SettingValue::Number(self.thickness),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Volume,
    Labels,
    Directed,
    Thickness,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::Volume,
        SettingKey::Labels,
        SettingKey::Directed,
        SettingKey::Thickness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SettingKey::Volume => "volume",
            SettingKey::Labels => "labels",
            SettingKey::Directed => "directed",
            SettingKey::Thickness => "thickness",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Number(f32),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{b}"),
            SettingValue::Number(n) => write!(f, "{n}"),
        }
    }
}

/// The persisted object. Every field is optional; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f32>,
}

impl StoredSettings {
    /// Parse the persisted JSON. An empty string or `null` means nothing
    /// has been stored yet.
    pub fn from_json(json: &str) -> Result<Self> {
        let trimmed = json.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(Self::default());
        }
        let stored: Self =
            serde_json::from_str(trimmed).map_err(|e| GraphError::Settings(e.to_string()))?;
        // Hand-edited storage gets the same ranges as `set`.
        Ok(Self {
            volume: stored.volume.map(clamp_volume),
            thickness: stored.thickness.map(clamp_thickness),
            ..stored
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| GraphError::Settings(e.to_string()))
    }

    /// `stored[key] ?? defaults[key]`.
    pub fn effective(&self, key: SettingKey, defaults: &Settings) -> SettingValue {
        let stored = match key {
            SettingKey::Volume => self.volume.map(|n| SettingValue::Number(clamp_volume(n))),
            SettingKey::Labels => self.labels.map(SettingValue::Bool),
            SettingKey::Directed => self.directed.map(SettingValue::Bool),
            SettingKey::Thickness => {
                self.thickness.map(|n| SettingValue::Number(clamp_thickness(n)))
            }
        };
        stored.unwrap_or_else(|| defaults.get(key))
    }

    pub fn resolve(&self, defaults: &Settings) -> Settings {
        Settings {
            volume: self.volume.map_or(defaults.volume, clamp_volume),
            labels: self.labels.unwrap_or(defaults.labels),
            directed: self.directed.unwrap_or(defaults.directed),
            thickness: self.thickness.map_or(defaults.thickness, clamp_thickness),
        }
    }

    /// Store a value, clamping numbers to the key's range. A value of the
    /// wrong kind is rejected and nothing changes.
    pub fn set(&mut self, key: SettingKey, value: SettingValue) -> Result<()> {
        let stored = match (key, value) {
            (SettingKey::Volume, SettingValue::Number(n)) => {
                let n = clamp_volume(n);
                self.volume = Some(n);
                SettingValue::Number(n)
            }
            (SettingKey::Thickness, SettingValue::Number(n)) => {
                let n = clamp_thickness(n);
                self.thickness = Some(n);
                SettingValue::Number(n)
            }
            (SettingKey::Labels, SettingValue::Bool(b)) => {
                self.labels = Some(b);
                value
            }
            (SettingKey::Directed, SettingValue::Bool(b)) => {
                self.directed = Some(b);
                value
            }
            (key, value) => {
                return Err(GraphError::Settings(format!(
                    "{key} cannot be set to {value}"
                )));
            }
        };
        log::info!("{key} has been set to {stored}");
        Ok(())
    }
}

fn clamp_volume(n: f32) -> f32 {
    n.clamp(VOLUME_RANGE.0, VOLUME_RANGE.1)
}

/// Thickness is a whole number of logical pixels.
fn clamp_thickness(n: f32) -> f32 {
    n.round().clamp(THICKNESS_RANGE.0, THICKNESS_RANGE.1)
}
