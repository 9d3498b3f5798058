//! The walking observer
//!
//! A capsule that walks in a fixed direction across the terrain, falling
//! under gravity and sliding along obstacles. Its position drives chunk
//! streaming.

use serde::{Deserialize, Serialize};
use veldt_math::{Vec2, Vec3};
use veldt_physics::{ColliderShape, CollisionGroups, CollisionLayer, PhysicsWorld};

use crate::error::{Result, RuntimeError};

/// Observer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    /// Walking speed in m/s
    pub speed: f32,
    /// Capsule radius
    pub radius: f32,
    /// Half height of the capsule's cylindrical part
    pub half_height: f32,
    /// Starting position of the capsule center
    pub spawn: Vec3,
    /// Planar walking direction, normalized on use
    pub walk_direction: Vec2,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            radius: 0.4,
            half_height: 0.5,
            spawn: Vec3::new(0.0, 5.0, 0.0),
            walk_direction: Vec2::new(1.0, 0.3),
        }
    }
}

impl ObserverConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.radius > 0.0) || self.half_height < 0.0 {
            return Err(RuntimeError::InvalidConfig(
                "observer capsule needs a positive radius".into(),
            ));
        }
        if self.speed < 0.0 {
            return Err(RuntimeError::InvalidConfig("observer speed must not be negative".into()));
        }
        Ok(())
    }

    pub fn shape(&self) -> ColliderShape {
        ColliderShape::capsule(self.half_height, self.radius)
    }
}

/// Observer state
#[derive(Debug, Clone)]
pub struct Observer {
    config: ObserverConfig,
    position: Vec3,
    vertical_speed: f32,
    grounded: bool,
    distance_walked: f32,
}

impl Observer {
    pub fn new(config: ObserverConfig) -> Self {
        Self {
            position: config.spawn,
            config,
            vertical_speed: 0.0,
            grounded: false,
            distance_walked: 0.0,
        }
    }

    /// Capsule center
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Planar distance covered so far
    pub fn distance_walked(&self) -> f32 {
        self.distance_walked
    }

    /// Walk one step in the configured direction
    pub fn step(&mut self, world: &PhysicsWorld, dt: f32) -> Result<()> {
        self.walk(self.config.walk_direction, world, dt)
    }

    /// Walk one step in `direction`, applying gravity and collisions
    pub fn walk(&mut self, direction: Vec2, world: &PhysicsWorld, dt: f32) -> Result<()> {
        let len = direction.length();
        let planar = if len > f32::EPSILON {
            direction * (self.config.speed * dt / len)
        } else {
            Vec2::ZERO
        };

        let gravity = world.gravity()[1];
        self.vertical_speed = if self.grounded {
            gravity * dt
        } else {
            self.vertical_speed + gravity * dt
        };

        let filter = CollisionGroups::from_layer(
            CollisionLayer::OBSERVER,
            &[CollisionLayer::TERRAIN, CollisionLayer::OBSTACLES],
        );
        let movement = world.move_character(
            &self.config.shape(),
            self.position.to_array(),
            [planar.x, self.vertical_speed * dt, planar.z],
            dt,
            filter,
        )?;

        let moved = Vec3::from(movement.translation);
        self.distance_walked += moved.planar().length();
        self.position += moved;
        self.grounded = movement.grounded;
        if self.grounded {
            self.vertical_speed = 0.0;
        }
        Ok(())
    }
}
