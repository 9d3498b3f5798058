//! Physics world - static collision container

use crate::collider::{ColliderDesc, ColliderHandle, ColliderShape};
use crate::config::PhysicsConfig;
use crate::error::{PhysicsError, Result};
use crate::layers::CollisionGroups;
use crate::query::{to_query_filter, PhysicsQuery};
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::prelude as rapier;

/// Outcome of a character move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterMovement {
    /// Translation actually applied after collisions
    pub translation: [f32; 3],
    /// Whether the character ended the move standing on something
    pub grounded: bool,
}

/// Collision world holding the terrain and everything placed on it
///
/// All colliders are static. Newly created colliders become visible to
/// queries after [`PhysicsWorld::sync_query_pipeline`].
pub struct PhysicsWorld {
    /// Configuration
    config: PhysicsConfig,

    /// Query pipeline
    query_pipeline: rapier::QueryPipeline,

    /// Rigid body set (empty, required by the query API)
    bodies: rapier::RigidBodySet,

    /// Collider set
    colliders: rapier::ColliderSet,

    /// Colliders were added since the last sync
    dirty: bool,
}

impl PhysicsWorld {
    /// Create a new physics world
    pub fn new(config: PhysicsConfig) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "Creating physics world (gravity {:?}, max slope {}°)",
            config.gravity,
            config.max_slope_climb_degrees
        );
        Ok(Self {
            config,
            query_pipeline: rapier::QueryPipeline::new(),
            bodies: rapier::RigidBodySet::new(),
            colliders: rapier::ColliderSet::new(),
            dirty: false,
        })
    }

    /// Get the physics configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Get gravity
    pub fn gravity(&self) -> [f32; 3] {
        self.config.gravity
    }

    // ==================== Colliders ====================

    /// Create a static collider
    pub fn create_collider(&mut self, desc: ColliderDesc) -> Result<ColliderHandle> {
        let builder = desc.to_rapier_builder()?;
        let handle = self.colliders.insert(builder);
        self.dirty = true;
        Ok(ColliderHandle(handle))
    }

    /// User data stored on a collider
    pub fn collider_user_data(&self, handle: ColliderHandle) -> Result<u128> {
        self.colliders
            .get(handle.0)
            .map(|c| c.user_data)
            .ok_or(PhysicsError::ColliderNotFound(handle))
    }

    /// Manually sync the query pipeline with current colliders.
    /// Call this after adding colliders before querying them.
    pub fn sync_query_pipeline(&mut self) {
        if self.dirty {
            self.query_pipeline.update(&self.colliders);
            self.dirty = false;
        }
    }

    // ==================== Queries ====================

    /// Get a query interface for raycasting and overlap tests
    pub fn query(&self) -> PhysicsQuery<'_> {
        PhysicsQuery {
            query_pipeline: &self.query_pipeline,
            colliders: &self.colliders,
            bodies: &self.bodies,
        }
    }

    /// Move a character shape through the world, sliding along and stepping
    /// over what it hits
    pub fn move_character(
        &self,
        shape: &ColliderShape,
        position: [f32; 3],
        desired_translation: [f32; 3],
        delta_time: f32,
        filter: CollisionGroups,
    ) -> Result<CharacterMovement> {
        let shape = shape.to_rapier()?;
        let controller = self.character_controller();
        let pos = rapier::Isometry::translation(position[0], position[1], position[2]);

        let movement = controller.move_shape(
            delta_time,
            &self.bodies,
            &self.colliders,
            &self.query_pipeline,
            shape.as_ref(),
            &pos,
            rapier::Vector::new(
                desired_translation[0],
                desired_translation[1],
                desired_translation[2],
            ),
            to_query_filter(filter),
            |_| {},
        );

        Ok(CharacterMovement {
            translation: [
                movement.translation.x,
                movement.translation.y,
                movement.translation.z,
            ],
            grounded: movement.grounded,
        })
    }

    fn character_controller(&self) -> KinematicCharacterController {
        let snap = self.config.snap_to_ground;
        let step = self.config.autostep_height;
        KinematicCharacterController {
            offset: CharacterLength::Absolute(self.config.character_offset),
            max_slope_climb_angle: self.config.max_slope_climb_degrees.to_radians(),
            snap_to_ground: (snap > 0.0).then_some(CharacterLength::Absolute(snap)),
            autostep: (step > 0.0).then_some(CharacterAutostep {
                max_height: CharacterLength::Absolute(step),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    // ==================== Debug ====================

    /// Get number of colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }
}
