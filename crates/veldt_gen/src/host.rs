//! Host environment interface
//!
//! Generation does not own colliders or scene objects. Whatever runs the
//! simulation (a physics engine, an editor, a test harness) implements
//! [`TerrainHost`]: it answers downward terrain probes and overlap queries,
//! and instantiates the grounds and obstacles the generator produces.

use veldt_math::{Vec2, Vec3};

use crate::catalog::{GroundTemplate, ObstaclePrototype};
use crate::mesh::GroundMesh;
use crate::placement::PlacedObstacle;

/// Identifier of a ground surface spawned into the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

/// Identifier of an obstacle object spawned into the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

/// Which set of objects a query considers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryLayer {
    /// Chunk ground surfaces
    Terrain,
    /// Placed obstacles and fence lines
    Obstacles,
}

/// Result of a downward probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Hit point in world space
    pub point: Vec3,
    /// Surface that was hit
    pub surface: SurfaceId,
}

/// Queries and object creation supplied by the host
pub trait TerrainHost {
    /// Cast a ray straight down from `origin`, returning the first surface hit
    /// within `max_distance` on `layer`
    fn raycast_down(&self, origin: Vec3, max_distance: f32, layer: QueryLayer) -> Option<SurfaceHit>;

    /// All objects on `layer` coming within `radius` of `center` on the
    /// ground plane, whatever their height
    fn overlap_sphere(&self, center: Vec3, radius: f32, layer: QueryLayer) -> Vec<ObjectId>;

    /// Instantiate a chunk ground with its world-space origin
    fn spawn_ground(&mut self, origin: Vec3, mesh: &GroundMesh, template: &GroundTemplate) -> SurfaceId;

    /// Instantiate a placed obstacle; it must be visible to subsequent overlap queries
    fn spawn_obstacle(&mut self, obstacle: &PlacedObstacle, prototype: &ObstaclePrototype) -> ObjectId;
}

struct MemoryGround {
    id: SurfaceId,
    origin: Vec3,
    mesh: GroundMesh,
}

/// Host that keeps everything in memory without a physics engine
///
/// Ground probes sample the stored meshes directly. Obstacles are treated as
/// vertical lines through their position, so the overlap query compares
/// planar distance only. Obstacles cannot be hit by probes.
#[derive(Default)]
pub struct MemoryHost {
    grounds: Vec<MemoryGround>,
    objects: Vec<(ObjectId, Vec3)>,
    next_id: u64,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ground_count(&self) -> usize {
        self.grounds.len()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// World positions of all spawned obstacles
    pub fn object_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.objects.iter().map(|(_, p)| *p)
    }

    /// Add a bare point object (not tied to a prototype)
    pub fn insert_object(&mut self, position: Vec3) -> ObjectId {
        let id = ObjectId(self.allocate_id());
        self.objects.push((id, position));
        id
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl TerrainHost for MemoryHost {
    fn raycast_down(&self, origin: Vec3, max_distance: f32, layer: QueryLayer) -> Option<SurfaceHit> {
        if layer != QueryLayer::Terrain {
            return None;
        }

        self.grounds
            .iter()
            .filter_map(|ground| {
                let local = origin.planar() - ground.origin.planar();
                let height = ground.mesh.height_at(local)? + ground.origin.y;
                let drop = origin.y - height;
                (drop >= 0.0 && drop <= max_distance).then(|| SurfaceHit {
                    point: origin.with_y(height),
                    surface: ground.id,
                })
            })
            // First surface from above is the highest one
            .max_by(|a, b| a.point.y.total_cmp(&b.point.y))
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32, layer: QueryLayer) -> Vec<ObjectId> {
        match layer {
            QueryLayer::Obstacles => self
                .objects
                .iter()
                .filter(|(_, p)| p.planar().distance(center.planar()) <= radius)
                .map(|(id, _)| *id)
                .collect(),
            QueryLayer::Terrain => self
                .grounds
                .iter()
                .filter(|g| {
                    let min = g.origin.planar();
                    let max = min + Vec2::splat(g.mesh.size);
                    let closest = Vec2::new(center.x.clamp(min.x, max.x), center.z.clamp(min.z, max.z));
                    closest.distance(center.planar()) <= radius
                })
                .map(|g| ObjectId(g.id.0))
                .collect(),
        }
    }

    fn spawn_ground(&mut self, origin: Vec3, mesh: &GroundMesh, _template: &GroundTemplate) -> SurfaceId {
        let id = SurfaceId(self.allocate_id());
        self.grounds.push(MemoryGround {
            id,
            origin,
            mesh: mesh.clone(),
        });
        id
    }

    fn spawn_obstacle(&mut self, obstacle: &PlacedObstacle, _prototype: &ObstaclePrototype) -> ObjectId {
        let id = ObjectId(self.allocate_id());
        self.objects.push((id, obstacle.position));
        id
    }
}
