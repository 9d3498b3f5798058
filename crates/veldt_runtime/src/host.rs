//! Physics-backed terrain host
//!
//! Implements [`TerrainHost`] on top of the Rapier collision world. Every
//! ground and obstacle becomes a static collider whose user data carries its
//! id, and the query pipeline is synced after each spawn so the placer sees
//! obstacles as soon as they exist.

use veldt_gen::{
    GroundMesh, GroundTemplate, ObjectId, ObstaclePrototype, PlacedObstacle, PrototypeShape,
    QueryLayer, SurfaceHit, SurfaceId, TerrainHost,
};
use veldt_math::{radians, Vec3};
use veldt_physics::{
    ColliderDesc, ColliderShape, CollisionGroups, CollisionLayer, PhysicsConfig, PhysicsWorld,
    RaycastOptions,
};

use crate::error::Result;

/// Terrain host backed by a [`PhysicsWorld`]
pub struct PhysicsHost {
    world: PhysicsWorld,
    next_id: u64,
    grounds: usize,
    obstacles: usize,
}

impl PhysicsHost {
    pub fn new(config: PhysicsConfig) -> Result<Self> {
        Ok(Self {
            world: PhysicsWorld::new(config)?,
            next_id: 1,
            grounds: 0,
            obstacles: 0,
        })
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn ground_count(&self) -> usize {
        self.grounds
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Insert a collider and make it queryable; failures are logged
    fn insert(&mut self, desc: ColliderDesc, what: &str) -> bool {
        match self.world.create_collider(desc) {
            Ok(_) => {
                self.world.sync_query_pipeline();
                true
            }
            Err(e) => {
                log::error!("Failed to create collider for {}: {}", what, e);
                false
            }
        }
    }
}

/// Half height of the column used for clearance checks, taller than any terrain
const CLEARANCE_COLUMN_HALF_HEIGHT: f32 = 1000.0;

fn layer_filter(layer: QueryLayer) -> CollisionGroups {
    match layer {
        QueryLayer::Terrain => CollisionGroups::query(&[CollisionLayer::TERRAIN]),
        QueryLayer::Obstacles => CollisionGroups::query(&[CollisionLayer::OBSTACLES]),
    }
}

/// Collider shape for a catalog prototype
pub fn prototype_shape(shape: &PrototypeShape) -> ColliderShape {
    match shape {
        PrototypeShape::Sphere { radius } => ColliderShape::sphere(*radius),
        PrototypeShape::Cylinder {
            radius,
            half_height,
        } => ColliderShape::cylinder(*half_height, *radius),
        PrototypeShape::Box { half_extents } => {
            ColliderShape::cuboid(half_extents[0], half_extents[1], half_extents[2])
        }
    }
}

impl TerrainHost for PhysicsHost {
    fn raycast_down(&self, origin: Vec3, max_distance: f32, layer: QueryLayer) -> Option<SurfaceHit> {
        let options = RaycastOptions::default()
            .with_max_distance(max_distance)
            .with_filter(layer_filter(layer));

        self.world
            .query()
            .raycast(origin.to_array(), Vec3::NEG_Y.to_array(), &options)
            .map(|hit| SurfaceHit {
                point: Vec3::from(hit.point),
                surface: SurfaceId(hit.user_data as u64),
            })
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32, layer: QueryLayer) -> Vec<ObjectId> {
        let query = self.world.query();
        query
            .overlap_column(
                center.to_array(),
                radius,
                CLEARANCE_COLUMN_HALF_HEIGHT,
                layer_filter(layer),
            )
            .into_iter()
            .map(|handle| ObjectId(query.user_data(handle.raw()) as u64))
            .collect()
    }

    fn spawn_ground(&mut self, origin: Vec3, mesh: &GroundMesh, template: &GroundTemplate) -> SurfaceId {
        let id = self.allocate_id();
        let desc = ColliderDesc::new(ColliderShape::trimesh(mesh.vertices.clone(), &mesh.indices))
            .with_position(origin.x, origin.y, origin.z)
            .with_collision_groups(CollisionGroups::terrain())
            .with_user_data(id as u128);

        if !self.insert(desc, &template.name) {
            return SurfaceId(id);
        }
        self.grounds += 1;
        log::debug!(
            "Spawned {} ground ({}) at ({}, {})",
            template.name,
            template.material,
            origin.x,
            origin.z
        );
        SurfaceId(id)
    }

    fn spawn_obstacle(&mut self, obstacle: &PlacedObstacle, prototype: &ObstaclePrototype) -> ObjectId {
        let id = self.allocate_id();
        let shape = prototype_shape(&prototype.shape);
        let p = obstacle.position;
        let desc = ColliderDesc::new(shape.clone())
            .with_position(p.x, p.y + shape.resting_offset(), p.z)
            .with_yaw(radians(obstacle.yaw_degrees))
            .with_collision_groups(CollisionGroups::obstacles())
            .with_user_data(id as u128);

        if self.insert(desc, &prototype.name) {
            self.obstacles += 1;
        }
        ObjectId(id)
    }
}
