//! Collider types

use crate::error::{PhysicsError, Result};
use crate::layers::CollisionGroups;
use rapier3d::prelude as rapier;
use serde::{Deserialize, Serialize};

/// Handle to a collider in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderHandle(pub(crate) rapier::ColliderHandle);

impl ColliderHandle {
    /// Get the raw Rapier handle
    pub fn raw(&self) -> rapier::ColliderHandle {
        self.0
    }
}

/// Collision shape type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Sphere with radius
    Sphere {
        radius: f32,
    },
    /// Box with half-extents
    Box {
        half_extents: [f32; 3],
    },
    /// Capsule aligned along Y axis
    CapsuleY {
        half_height: f32,
        radius: f32,
    },
    /// Cylinder aligned along Y axis
    CylinderY {
        half_height: f32,
        radius: f32,
    },
    /// Triangle mesh (static only)
    TriMesh {
        vertices: Vec<[f32; 3]>,
        indices: Vec<[u32; 3]>,
    },
}

impl Default for ColliderShape {
    fn default() -> Self {
        Self::Box {
            half_extents: [0.5, 0.5, 0.5],
        }
    }
}

impl ColliderShape {
    /// Create a sphere shape
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Create a box shape from half-extents
    pub fn cuboid(hx: f32, hy: f32, hz: f32) -> Self {
        Self::Box {
            half_extents: [hx, hy, hz],
        }
    }

    /// Create a capsule shape (Y-aligned)
    pub fn capsule(half_height: f32, radius: f32) -> Self {
        Self::CapsuleY { half_height, radius }
    }

    /// Create a cylinder shape (Y-aligned)
    pub fn cylinder(half_height: f32, radius: f32) -> Self {
        Self::CylinderY { half_height, radius }
    }

    /// Create a triangle mesh from a flat index list
    pub fn trimesh(vertices: Vec<[f32; 3]>, indices: &[u32]) -> Self {
        Self::TriMesh {
            vertices,
            indices: indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect(),
        }
    }

    /// Height of the shape's center above the point it stands on
    ///
    /// Spheres are left half-sunk into the ground, upright shapes are lifted
    /// so their base touches it.
    pub fn resting_offset(&self) -> f32 {
        match self {
            Self::Sphere { .. } | Self::TriMesh { .. } => 0.0,
            Self::Box { half_extents } => half_extents[1],
            Self::CapsuleY { half_height, radius } => half_height + radius,
            Self::CylinderY { half_height, .. } => *half_height,
        }
    }

    /// Build a Rapier shared shape
    pub(crate) fn to_rapier(&self) -> Result<rapier::SharedShape> {
        let shape = match self {
            Self::Sphere { radius } => rapier::SharedShape::ball(*radius),
            Self::Box { half_extents } => {
                rapier::SharedShape::cuboid(half_extents[0], half_extents[1], half_extents[2])
            }
            Self::CapsuleY { half_height, radius } => {
                rapier::SharedShape::capsule_y(*half_height, *radius)
            }
            Self::CylinderY { half_height, radius } => {
                rapier::SharedShape::cylinder(*half_height, *radius)
            }
            Self::TriMesh { vertices, indices } => {
                if indices.is_empty() {
                    return Err(PhysicsError::ShapeCreationFailed("triangle mesh has no faces".into()));
                }
                // One triangle shape per face, grouped into a compound
                let mut faces = Vec::with_capacity(indices.len());
                for tri in indices {
                    let corner = |i: u32| {
                        vertices
                            .get(i as usize)
                            .map(|v| rapier::Point::new(v[0], v[1], v[2]))
                            .ok_or_else(|| {
                                PhysicsError::ShapeCreationFailed(format!(
                                    "index {} out of bounds for {} vertices",
                                    i,
                                    vertices.len()
                                ))
                            })
                    };
                    let triangle = rapier::SharedShape::triangle(corner(tri[0])?, corner(tri[1])?, corner(tri[2])?);
                    faces.push((rapier::Isometry::identity(), triangle));
                }
                rapier::SharedShape::compound(faces)
            }
        };
        Ok(shape)
    }
}

/// Description for creating a static collider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColliderDesc {
    /// Collision shape
    pub shape: ColliderShape,
    /// World position
    pub position: [f32; 3],
    /// Rotation about the Y axis, in radians
    pub yaw: f32,
    /// Collision groups
    pub collision_groups: CollisionGroups,
    /// User data (surface or object id)
    pub user_data: u128,
}

impl Default for ColliderDesc {
    fn default() -> Self {
        Self {
            shape: ColliderShape::default(),
            position: [0.0, 0.0, 0.0],
            yaw: 0.0,
            collision_groups: CollisionGroups::ALL,
            user_data: 0,
        }
    }
}

impl ColliderDesc {
    /// Create a new collider description with a shape
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            ..Default::default()
        }
    }

    /// Set position
    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = [x, y, z];
        self
    }

    /// Set rotation about the Y axis
    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    /// Set collision groups
    pub fn with_collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Set user data
    pub fn with_user_data(mut self, data: u128) -> Self {
        self.user_data = data;
        self
    }

    /// Build a Rapier collider builder
    pub(crate) fn to_rapier_builder(&self) -> Result<rapier::ColliderBuilder> {
        let builder = rapier::ColliderBuilder::new(self.shape.to_rapier()?)
            .translation(rapier::Vector::new(
                self.position[0],
                self.position[1],
                self.position[2],
            ))
            .rotation(rapier::Vector::new(0.0, self.yaw, 0.0))
            .collision_groups(rapier::InteractionGroups::new(
                rapier::Group::from_bits_truncate(self.collision_groups.memberships),
                rapier::Group::from_bits_truncate(self.collision_groups.filter),
            ))
            .user_data(self.user_data);

        Ok(builder)
    }
}
