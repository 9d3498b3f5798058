//! Physics configuration

use serde::{Deserialize, Serialize};

use crate::error::{PhysicsError, Result};

/// Physics world configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity vector (default: -9.81 in Y)
    pub gravity: [f32; 3],

    /// Gap kept between a moving character and the surfaces it touches
    pub character_offset: f32,

    /// Steepest slope a character can walk up, in degrees
    pub max_slope_climb_degrees: f32,

    /// Distance within which a character is pulled down onto the ground
    pub snap_to_ground: f32,

    /// Tallest ledge a character steps over without jumping (0 = disabled)
    pub autostep_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.81, 0.0],
            character_offset: 0.01,
            max_slope_climb_degrees: 45.0,
            snap_to_ground: 0.5,
            autostep_height: 0.3,
        }
    }
}

impl PhysicsConfig {
    /// Set gravity
    pub fn with_gravity(mut self, x: f32, y: f32, z: f32) -> Self {
        self.gravity = [x, y, z];
        self
    }

    /// Set the maximum climbable slope
    pub fn with_max_slope(mut self, degrees: f32) -> Self {
        self.max_slope_climb_degrees = degrees;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.character_offset > 0.0) {
            return Err(PhysicsError::InvalidConfig(
                "character_offset must be positive".into(),
            ));
        }
        if !(0.0..=90.0).contains(&self.max_slope_climb_degrees) {
            return Err(PhysicsError::InvalidConfig(format!(
                "max_slope_climb_degrees must be within [0, 90], got {}",
                self.max_slope_climb_degrees
            )));
        }
        if self.snap_to_ground < 0.0 || self.autostep_height < 0.0 {
            return Err(PhysicsError::InvalidConfig(
                "snap_to_ground and autostep_height must not be negative".into(),
            ));
        }
        Ok(())
    }
}
