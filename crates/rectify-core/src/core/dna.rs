use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Geometric constants of a B-form double helix together with the constants used to build its
/// collision approximation.
///
/// All conversions between physical distances and discrete base counts go through this type so
/// that a helix built for an edge and the attachment frames measured on it always agree.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct HelixSpec {
    /// Rotation contributed by one base, in degrees.
    pub pitch: f64,
    /// Axial length contributed by one base, in nanometers.
    pub step: f64,
    /// Distance from the helix axis to the strand attachment points.
    pub radius: f64,
    /// Angular offset between the forward and backward strand on the same helix end, in degrees.
    pub opposite_rotation: f64,
    /// Radius of a single base sphere. Only used for the collision approximation.
    pub sphere_radius: f64,
    /// The end markers of the collision approximation are this many times `sphere_radius`.
    pub approximation_radius_multiplier: f64,
    pub density: f64,
}

impl Default for HelixSpec {
    fn default() -> Self {
        Self {
            pitch: 720.0 / 21.0,
            step: 0.334,
            radius: 1.0,
            opposite_rotation: 155.0,
            sphere_radius: 0.13,
            approximation_radius_multiplier: 4.0,
            density: 10.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum SpecLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid helix parameter '{name}': {value} (must be positive)")]
    Invalid { name: &'static str, value: f64 },
}

impl HelixSpec {
    pub fn load(path: &Path) -> Result<Self, SpecLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| SpecLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let spec: Self = toml::from_str(&content).map_err(|e| SpecLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<(), SpecLoadError> {
        let checks = [
            ("pitch", self.pitch),
            ("step", self.step),
            ("radius", self.radius),
            ("sphere-radius", self.sphere_radius),
            ("approximation-radius-multiplier", self.approximation_radius_multiplier),
            ("density", self.density),
        ];
        for (name, value) in checks {
            if !(value > 0.0) || !value.is_finite() {
                return Err(SpecLoadError::Invalid { name, value });
            }
        }
        Ok(())
    }

    /// Returns the rounded number of bases required to occupy `distance`. Ties round up.
    pub fn base_count_for_distance(&self, distance: f64) -> u32 {
        (distance / self.step + 0.5).floor().max(0.0) as u32
    }

    pub fn length_for_base_count(&self, bases: u32) -> f64 {
        f64::from(bases) * self.step
    }

    /// Total twist of a helix with `bases` bases, in degrees.
    pub fn rotation_for_base_count(&self, bases: u32) -> f64 {
        f64::from(bases) * self.pitch
    }

    /// The length a helix built to span `distance` will actually have.
    pub fn helix_length(&self, distance: f64) -> f64 {
        self.length_for_base_count(self.base_count_for_distance(distance))
    }

    pub fn helix_rotation(&self, distance: f64) -> f64 {
        self.rotation_for_base_count(self.base_count_for_distance(distance))
    }

    pub fn half_turn_length(&self) -> f64 {
        180.0 / self.pitch * self.step
    }

    pub fn full_turn_length(&self) -> f64 {
        360.0 / self.pitch * self.step
    }

    /// Smallest base count whose helix is longer than its own diameter.
    pub fn min_base_count(&self) -> u32 {
        (2.0 * self.radius / self.step).floor() as u32 + 1
    }

    pub fn is_valid_base_count(&self, bases: u32) -> bool {
        self.length_for_base_count(bases) > 2.0 * self.radius
    }
}
