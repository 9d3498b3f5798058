//! Physics queries (raycasting, overlap tests)

use crate::collider::ColliderHandle;
use crate::layers::CollisionGroups;
use rapier3d::prelude as rapier;

/// Result of a raycast query
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit {
    /// The collider that was hit
    pub collider: ColliderHandle,
    /// Hit point in world space
    pub point: [f32; 3],
    /// Surface normal at hit point
    pub normal: [f32; 3],
    /// Distance from ray origin
    pub distance: f32,
    /// User data from the collider
    pub user_data: u128,
}

/// Options for raycast queries
#[derive(Debug, Clone)]
pub struct RaycastOptions {
    /// Maximum distance for the ray
    pub max_distance: f32,
    /// Treat shapes as solid, so rays starting inside hit at distance 0
    pub solid: bool,
    /// Collision groups filter
    pub filter: CollisionGroups,
}

impl Default for RaycastOptions {
    fn default() -> Self {
        Self {
            max_distance: f32::MAX,
            solid: true,
            filter: CollisionGroups::ALL,
        }
    }
}

impl RaycastOptions {
    /// Set maximum distance
    pub fn with_max_distance(mut self, distance: f32) -> Self {
        self.max_distance = distance;
        self
    }

    /// Set collision filter
    pub fn with_filter(mut self, filter: CollisionGroups) -> Self {
        self.filter = filter;
        self
    }
}

/// Query interface for physics world
pub struct PhysicsQuery<'a> {
    pub(crate) query_pipeline: &'a rapier::QueryPipeline,
    pub(crate) colliders: &'a rapier::ColliderSet,
    pub(crate) bodies: &'a rapier::RigidBodySet,
}

impl<'a> PhysicsQuery<'a> {
    /// Cast a ray and get the first hit
    pub fn raycast(
        &self,
        origin: [f32; 3],
        direction: [f32; 3],
        options: &RaycastOptions,
    ) -> Option<RaycastHit> {
        let ray = rapier::Ray::new(
            rapier::Point::new(origin[0], origin[1], origin[2]),
            rapier::Vector::new(direction[0], direction[1], direction[2]),
        );

        self.query_pipeline
            .cast_ray_and_get_normal(
                self.bodies,
                self.colliders,
                &ray,
                options.max_distance,
                options.solid,
                to_query_filter(options.filter),
            )
            .map(|(handle, intersection)| {
                let point = ray.point_at(intersection.time_of_impact);
                RaycastHit {
                    collider: ColliderHandle(handle),
                    point: [point.x, point.y, point.z],
                    normal: [
                        intersection.normal.x,
                        intersection.normal.y,
                        intersection.normal.z,
                    ],
                    distance: intersection.time_of_impact,
                    user_data: self.user_data(handle),
                }
            })
    }

    /// Get all colliders that overlap a sphere
    pub fn overlap_sphere(
        &self,
        center: [f32; 3],
        radius: f32,
        filter: CollisionGroups,
    ) -> Vec<ColliderHandle> {
        self.overlap_shape(center, &rapier::SharedShape::ball(radius), filter)
    }

    /// Get all colliders that overlap a Y-aligned cylinder centered on `center`
    ///
    /// With a large `half_height` this selects everything within `radius` of
    /// `center` on the ground plane, whatever its height.
    pub fn overlap_column(
        &self,
        center: [f32; 3],
        radius: f32,
        half_height: f32,
        filter: CollisionGroups,
    ) -> Vec<ColliderHandle> {
        self.overlap_shape(
            center,
            &rapier::SharedShape::cylinder(half_height, radius),
            filter,
        )
    }

    fn overlap_shape(
        &self,
        center: [f32; 3],
        shape: &rapier::SharedShape,
        filter: CollisionGroups,
    ) -> Vec<ColliderHandle> {
        let pos = rapier::Isometry::translation(center[0], center[1], center[2]);

        let mut results = Vec::new();
        self.query_pipeline.intersections_with_shape(
            self.bodies,
            self.colliders,
            &pos,
            shape.as_ref(),
            to_query_filter(filter),
            |handle| {
                results.push(ColliderHandle(handle));
                true // Continue
            },
        );

        results
    }

    /// User data of a collider, 0 if it no longer exists
    pub fn user_data(&self, handle: rapier::ColliderHandle) -> u128 {
        self.colliders.get(handle).map(|c| c.user_data).unwrap_or(0)
    }
}

pub(crate) fn to_query_filter(groups: CollisionGroups) -> rapier::QueryFilter<'static> {
    rapier::QueryFilter::new().groups(rapier::InteractionGroups::new(
        rapier::Group::from_bits_truncate(groups.memberships),
        rapier::Group::from_bits_truncate(groups.filter),
    ))
}
