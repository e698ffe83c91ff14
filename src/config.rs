//! Configuration constants and the serializable scene configuration.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};

/// Default gravity vector applied in the scene (Y-up).
pub const DEFAULT_GRAVITY: [f32; 3] = [0.0, -9.81, 0.0];

/// Default integration timestep (in seconds).
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// Default edge length of a broad-phase cell.
pub const DEFAULT_CELL_SIZE: f32 = 1.0;

/// Default number of buckets in the spatial hash table.
pub const DEFAULT_BUCKET_COUNT: usize = 1024;

/// Separation the default contact model drives every same-cell pair towards.
pub const DEFAULT_CONTACT_REST_LENGTH: f32 = 1.0;

/// Upper bound on ticks run by a single `Scene::advance` call.
pub const DEFAULT_MAX_TICKS_PER_FRAME: u32 = 8;

/// Initial capacity of a grid cell's occupant list.
pub const INITIAL_CELL_CAPACITY: usize = 4;

/// Most cells a single grid ray walk visits before giving up.
pub const MAX_RAY_CELLS: usize = 65_536;

/// Scene configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Gravity vector (default: -9.81 in Y)
    pub gravity: [f32; 3],

    /// Fixed timestep used by `Scene::advance`
    pub time_step: f32,

    /// Maximum ticks `Scene::advance` runs per call
    pub max_ticks_per_frame: u32,

    pub cell_size: f32,

    pub bucket_count: usize,

    /// Milliseconds a tick may take before a warning is logged
    pub tick_budget_ms: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            time_step: DEFAULT_TIME_STEP,
            max_ticks_per_frame: DEFAULT_MAX_TICKS_PER_FRAME,
            cell_size: DEFAULT_CELL_SIZE,
            bucket_count: DEFAULT_BUCKET_COUNT,
            tick_budget_ms: 16.0,
        }
    }
}

impl SceneConfig {
    /// Configuration without gravity, handy for isolated solver scenes.
    pub fn zero_gravity() -> Self {
        Self {
            gravity: [0.0; 3],
            ..Default::default()
        }
    }

    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity.to_array();
        self
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_bucket_count(mut self, bucket_count: usize) -> Self {
        self.bucket_count = bucket_count;
        self
    }

    pub fn with_time_step(mut self, time_step: f32) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn gravity_vec(&self) -> Vec3 {
        Vec3::from_array(self.gravity)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "cell size must be positive and finite, got {}",
                self.cell_size
            )));
        }
        if self.bucket_count == 0 {
            return Err(PhysicsError::InvalidConfig(
                "bucket count must be at least 1".to_string(),
            ));
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "time step must be positive and finite, got {}",
                self.time_step
            )));
        }
        if !self.gravity_vec().is_finite() {
            return Err(PhysicsError::InvalidConfig(format!(
                "gravity must be finite, got {:?}",
                self.gravity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SceneConfig::default().validate().is_ok());
        assert_eq!(SceneConfig::default().gravity_vec(), Vec3::new(0.0, -9.81, 0.0));
    }

    #[test]
    fn rejects_degenerate_values() {
        assert!(SceneConfig::default().with_cell_size(0.0).validate().is_err());
        assert!(SceneConfig::default().with_cell_size(f32::NAN).validate().is_err());
        assert!(SceneConfig::default().with_bucket_count(0).validate().is_err());
        assert!(SceneConfig::default().with_time_step(-1.0).validate().is_err());
        assert!(SceneConfig::default()
            .with_gravity(Vec3::new(0.0, f32::INFINITY, 0.0))
            .validate()
            .is_err());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: SceneConfig = serde_json::from_str(r#"{ "cell_size": 2.5 }"#)
            .expect("partial config should deserialize");
        assert_eq!(config.cell_size, 2.5);
        assert_eq!(config.bucket_count, DEFAULT_BUCKET_COUNT);
        assert_eq!(config.gravity, DEFAULT_GRAVITY);
    }
}
