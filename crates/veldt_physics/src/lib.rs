//! Veldt Physics - Rapier 3D Collision World
//!
//! Static collision world backing terrain generation and the observer.
//!
//! # Features
//!
//! - Static colliders: triangle-mesh ground, sphere/box/cylinder obstacles
//! - Raycasting and sphere overlap queries
//! - Collision layers and filtering
//! - Kinematic character movement over the terrain
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │               PhysicsWorld               │
//! │  ┌─────────────┐  ┌───────────────────┐  │
//! │  │ ColliderSet │  │   QueryPipeline   │  │
//! │  └─────────────┘  └───────────────────┘  │
//! └──────────────────────────────────────────┘
//!           │                    │
//!           ▼                    ▼
//!     ┌──────────┐      ┌──────────────────┐
//!     │ Collider │      │  PhysicsQuery    │
//!     │   Desc   │      │ raycast/overlap  │
//!     └──────────┘      └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use veldt_physics::prelude::*;
//!
//! let mut physics = PhysicsWorld::new(PhysicsConfig::default())?;
//!
//! physics.create_collider(
//!     ColliderDesc::new(ColliderShape::cylinder(3.0, 0.6))
//!         .with_position(12.0, 3.0, -4.0)
//!         .with_collision_groups(CollisionGroups::obstacles()),
//! )?;
//! physics.sync_query_pipeline();
//!
//! let blocked = !physics
//!     .query()
//!     .overlap_sphere([10.0, 0.0, -4.0], 4.0, CollisionGroups::query(&[CollisionLayer::OBSTACLES]))
//!     .is_empty();
//! ```

pub mod collider;
pub mod config;
pub mod error;
pub mod layers;
pub mod query;
pub mod world;

pub mod prelude {
    //! Common imports for physics functionality
    pub use crate::collider::{ColliderDesc, ColliderHandle, ColliderShape};
    pub use crate::config::PhysicsConfig;
    pub use crate::error::{PhysicsError, Result};
    pub use crate::layers::{CollisionGroups, CollisionLayer};
    pub use crate::query::{PhysicsQuery, RaycastHit, RaycastOptions};
    pub use crate::world::{CharacterMovement, PhysicsWorld};
}

pub use collider::{ColliderDesc, ColliderHandle, ColliderShape};
pub use config::PhysicsConfig;
pub use error::{PhysicsError, Result};
pub use layers::{CollisionGroups, CollisionLayer};
pub use query::{PhysicsQuery, RaycastHit, RaycastOptions};
pub use world::{CharacterMovement, PhysicsWorld};
