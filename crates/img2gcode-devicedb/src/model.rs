use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, ProfileResult};

/// Laser parameters of a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserSettings {
    /// Feed speed in mm/min
    pub speed: f64,
    /// Laser power in percent
    pub power: f64,
    /// Line spacing in mm
    pub precision: f64,
    pub passes: u32,
}

impl Default for LaserSettings {
    fn default() -> Self {
        Self {
            speed: 1000.0,
            power: 50.0,
            precision: 0.1,
            passes: 1,
        }
    }
}

impl LaserSettings {
    pub fn validate(&self) -> ProfileResult<()> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(ProfileError::InvalidParameter {
                field: "speed",
                value: self.speed,
                expected: "a positive mm/min value",
            });
        }
        if !(0.0..=100.0).contains(&self.power) {
            return Err(ProfileError::InvalidParameter {
                field: "power",
                value: self.power,
                expected: "0 to 100 %",
            });
        }
        if !(self.precision.is_finite() && self.precision > 0.0) {
            return Err(ProfileError::InvalidParameter {
                field: "precision",
                value: self.precision,
                expected: "a positive mm value",
            });
        }
        if self.passes == 0 {
            return Err(ProfileError::InvalidParameter {
                field: "passes",
                value: 0.0,
                expected: "at least 1",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineProfile {
    pub name: String,
    pub key: String,
    #[serde(default)]
    pub settings: LaserSettings,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl MachineProfile {
    pub fn new(name: &str, settings: LaserSettings) -> ProfileResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ProfileError::MissingField("name".to_string()));
        }
        let key = sanitize_key(name);
        if key.is_empty() {
            return Err(ProfileError::InvalidName(name.to_string()));
        }
        settings.validate()?;
        let now = Utc::now();
        Ok(Self {
            name: name.to_string(),
            key,
            settings,
            created: now,
            modified: now,
        })
    }
}

/// Lower-cased identifier made of ASCII letters, digits and single
/// underscores.
pub fn sanitize_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            key.push(c.to_ascii_lowercase());
        } else if !key.is_empty() && !key.ends_with('_') {
            key.push('_');
        }
    }
    while key.ends_with('_') {
        key.pop();
    }
    key
}
