//! Obstacle placement
//!
//! Scatters obstacles over a chunk footprint. Each candidate position must be
//! clear of every obstacle already in the host, including those of other
//! chunks, so chunks generated earlier constrain chunks generated later.

use rand::Rng;
use veldt_math::{Footprint, Vec3};

use crate::catalog::{ObstacleCatalog, ObstaclePrototype};
use crate::config::PlacementConfig;
use crate::host::{ObjectId, QueryLayer, TerrainHost};

/// What a placed instance is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    /// Regular obstacle drawn from the catalog
    Obstacle,
    /// Chunk boundary fence line
    Fence,
}

/// An obstacle instance placed in the world
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObstacle {
    /// Name of the prototype this instance was created from
    pub prototype: String,
    pub kind: ObstacleKind,
    /// World position, y resting on the terrain
    pub position: Vec3,
    /// Rotation about the vertical axis in degrees
    pub yaw_degrees: f32,
    /// Host object, set once spawned
    pub handle: Option<ObjectId>,
}

impl PlacedObstacle {
    pub fn is_fence(&self) -> bool {
        self.kind == ObstacleKind::Fence
    }
}

/// Outcome of populating one chunk
#[derive(Debug, Clone, Default)]
pub struct PlacementReport {
    /// Obstacles placed, in placement order
    pub obstacles: Vec<PlacedObstacle>,
    /// Fence line, if one was rolled
    pub fence: Option<PlacedObstacle>,
    /// Number of obstacles drawn for the chunk
    pub requested: usize,
    /// Obstacles abandoned after exhausting their attempts
    pub skipped: usize,
    /// Candidate positions tried in total
    pub attempts: usize,
}

impl PlacementReport {
    /// All placed instances, fence last
    pub fn into_instances(self) -> Vec<PlacedObstacle> {
        let mut all = self.obstacles;
        all.extend(self.fence);
        all
    }
}

/// Places obstacles and fences into a chunk footprint
pub struct ObstaclePlacer<'a> {
    config: &'a PlacementConfig,
    catalog: &'a ObstacleCatalog,
}

impl<'a> ObstaclePlacer<'a> {
    pub fn new(config: &'a PlacementConfig, catalog: &'a ObstacleCatalog) -> Self {
        Self { config, catalog }
    }

    /// Populate the footprint, spawning every accepted instance into `host`
    pub fn place<H, R>(&self, footprint: Footprint, host: &mut H, rng: &mut R) -> PlacementReport
    where
        H: TerrainHost + ?Sized,
        R: Rng + ?Sized,
    {
        let mut report = PlacementReport {
            requested: rng
                .random_range(self.config.obstacle_count_min..self.config.obstacle_count_max)
                as usize,
            ..Default::default()
        };

        for _ in 0..report.requested {
            let Some(position) = self.find_clear_position(footprint, host, rng, &mut report.attempts) else {
                report.skipped += 1;
                log::warn!(
                    "No clear position after {} attempts in chunk at ({}, {}); skipping obstacle",
                    self.config.max_attempts,
                    footprint.origin.x,
                    footprint.origin.z
                );
                continue;
            };

            let prototype = &self.catalog.obstacles[rng.random_range(0..self.catalog.obstacles.len())];
            let yaw = rng.random_range(-180.0f32..180.0);
            let obstacle = spawn(host, prototype, ObstacleKind::Obstacle, position, yaw);
            report.obstacles.push(obstacle);
        }

        if rng.random_bool(self.config.fence_probability) {
            let yaw = rng.random_range(0..4u32) as f32 * 90.0;
            let fence = spawn(host, &self.catalog.fence, ObstacleKind::Fence, footprint.center(), yaw);
            report.fence = Some(fence);
        }

        log::debug!(
            "Placed {}/{} obstacles in chunk at ({}, {}) using {} candidates{}",
            report.obstacles.len(),
            report.requested,
            footprint.origin.x,
            footprint.origin.z,
            report.attempts,
            if report.fence.is_some() { ", with fence" } else { "" }
        );

        report
    }

    /// Sample candidates until one is clear, then rest it on the terrain
    fn find_clear_position<H, R>(
        &self,
        footprint: Footprint,
        host: &H,
        rng: &mut R,
        attempts: &mut usize,
    ) -> Option<Vec3>
    where
        H: TerrainHost + ?Sized,
        R: Rng + ?Sized,
    {
        let min = footprint.min();
        let max = footprint.max();

        for _ in 0..self.config.max_attempts {
            *attempts += 1;
            let candidate = Vec3::new(
                rng.random_range(min.x..=max.x),
                0.0,
                rng.random_range(min.z..=max.z),
            );

            let probe_origin = candidate + Vec3::Y * self.config.probe_height;
            let y = host
                .raycast_down(probe_origin, self.config.probe_distance, QueryLayer::Terrain)
                .map(|hit| hit.point.y)
                .unwrap_or(0.0);
            let rested = candidate.with_y(y);

            if host
                .overlap_sphere(rested, self.config.clearance_radius, QueryLayer::Obstacles)
                .is_empty()
            {
                return Some(rested);
            }
        }

        None
    }
}

fn spawn<H: TerrainHost + ?Sized>(
    host: &mut H,
    prototype: &ObstaclePrototype,
    kind: ObstacleKind,
    position: Vec3,
    yaw_degrees: f32,
) -> PlacedObstacle {
    let mut obstacle = PlacedObstacle {
        prototype: prototype.name.clone(),
        kind,
        position,
        yaw_degrees,
        handle: None,
    };
    obstacle.handle = Some(host.spawn_obstacle(&obstacle, prototype));
    obstacle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::seed::WorldSeed;
    use veldt_math::Vec2;

    fn footprint() -> Footprint {
        Footprint::new(Vec2::new(0.0, 0.0), 50.0)
    }

    #[test]
    fn test_count_within_range() {
        let config = PlacementConfig::default().with_fence_probability(0.0);
        let catalog = ObstacleCatalog::default();
        let placer = ObstaclePlacer::new(&config, &catalog);

        for cell in 0..8 {
            let mut host = MemoryHost::new();
            let mut rng = WorldSeed::new(11).chunk_rng(cell, 0);
            let report = placer.place(footprint(), &mut host, &mut rng);
            assert!((20..40).contains(&report.requested));
            assert_eq!(report.obstacles.len() + report.skipped, report.requested);
            assert_eq!(host.object_count(), report.obstacles.len());
        }
    }

    #[test]
    fn test_obstacles_keep_clearance() {
        let config = PlacementConfig::default();
        let catalog = ObstacleCatalog::default();
        let placer = ObstaclePlacer::new(&config, &catalog);
        let mut host = MemoryHost::new();
        let mut rng = WorldSeed::new(5).chunk_rng(0, 0);

        let report = placer.place(footprint(), &mut host, &mut rng);
        let positions: Vec<_> = report.obstacles.iter().map(|o| o.position.planar()).collect();
        for (i, a) in positions.iter().enumerate() {
            for b in &positions[i + 1..] {
                assert!(a.distance(*b) >= config.clearance_radius);
            }
        }
    }

    #[test]
    fn test_obstacles_inside_footprint_with_valid_attributes() {
        let config = PlacementConfig::default();
        let catalog = ObstacleCatalog::default();
        let placer = ObstaclePlacer::new(&config, &catalog);
        let mut host = MemoryHost::new();
        let mut rng = WorldSeed::new(8).chunk_rng(2, 3);
        let fp = Footprint::new(Vec2::new(100.0, 150.0), 50.0);

        let report = placer.place(fp, &mut host, &mut rng);
        for o in &report.obstacles {
            assert!(fp.contains(o.position.planar()));
            assert!(o.yaw_degrees >= -180.0 && o.yaw_degrees < 180.0);
            assert!(catalog.obstacles.iter().any(|p| p.name == o.prototype));
            assert_eq!(o.kind, ObstacleKind::Obstacle);
            assert!(o.handle.is_some());
            // No terrain in the host, so the probe misses and y stays 0
            assert_eq!(o.position.y, 0.0);
        }
    }

    #[test]
    fn test_fence_always_and_never() {
        let catalog = ObstacleCatalog::default();

        let always = PlacementConfig::default().with_fence_probability(1.0);
        let mut host = MemoryHost::new();
        let report = ObstaclePlacer::new(&always, &catalog).place(
            footprint(),
            &mut host,
            &mut WorldSeed::new(1).chunk_rng(0, 0),
        );
        let fence = report.fence.as_ref().unwrap();
        assert!(fence.is_fence());
        assert_eq!(fence.prototype, "fence_line");
        assert_eq!(fence.position, Vec3::new(25.0, 0.0, 25.0));
        assert!([0.0, 90.0, 180.0, 270.0].contains(&fence.yaw_degrees));

        let never = PlacementConfig::default().with_fence_probability(0.0);
        let mut host = MemoryHost::new();
        let report = ObstaclePlacer::new(&never, &catalog).place(
            footprint(),
            &mut host,
            &mut WorldSeed::new(1).chunk_rng(0, 0),
        );
        assert!(report.fence.is_none());
    }

    #[test]
    fn test_fence_rate_roughly_ten_percent() {
        let config = PlacementConfig::default().with_obstacle_count(0, 1);
        let catalog = ObstacleCatalog::default();
        let placer = ObstaclePlacer::new(&config, &catalog);

        let fences = (0..2000)
            .filter(|&i| {
                let mut host = MemoryHost::new();
                let mut rng = WorldSeed::new(77).chunk_rng(i, -i);
                placer.place(footprint(), &mut host, &mut rng).fence.is_some()
            })
            .count();
        assert!((120..=280).contains(&fences), "fence count {}", fences);
    }

    #[test]
    fn test_starved_chunk_terminates() {
        let config = PlacementConfig::default()
            .with_fence_probability(0.0)
            .with_max_attempts(16);
        let catalog = ObstacleCatalog::default();
        let placer = ObstaclePlacer::new(&config, &catalog);
        let mut host = MemoryHost::new();

        // Blanket the footprint so no candidate can ever be clear
        for ix in 0..=25 {
            for iz in 0..=25 {
                host.insert_object(Vec3::new(ix as f32 * 2.0, 0.0, iz as f32 * 2.0));
            }
        }

        let mut rng = WorldSeed::new(3).chunk_rng(0, 0);
        let report = placer.place(footprint(), &mut host, &mut rng);
        assert!(report.obstacles.is_empty());
        assert_eq!(report.skipped, report.requested);
        assert_eq!(report.attempts, report.requested * 16);
    }

    #[test]
    fn test_blocked_spot_retries_elsewhere() {
        let config = PlacementConfig::default()
            .with_obstacle_count(1, 2)
            .with_fence_probability(0.0)
            .with_max_attempts(100_000);
        let catalog = ObstacleCatalog::default();
        let placer = ObstaclePlacer::new(&config, &catalog);
        let mut host = MemoryHost::new();

        // Cover every spot except a clear pocket around (40, 40)
        let pocket = Vec3::new(40.0, 0.0, 40.0);
        let mut blockers = Vec::new();
        for ix in 0..=25 {
            for iz in 0..=25 {
                let p = Vec3::new(ix as f32 * 2.0, 0.0, iz as f32 * 2.0);
                if p.distance(pocket) > 9.0 {
                    blockers.push(p);
                    host.insert_object(p);
                }
            }
        }

        let mut rng = WorldSeed::new(21).chunk_rng(0, 0);
        let report = placer.place(footprint(), &mut host, &mut rng);

        assert_eq!(report.obstacles.len(), 1);
        assert_eq!(report.skipped, 0);
        let placed = report.obstacles[0].position;
        assert!(placed.distance(pocket) < 9.0);
        assert!(blockers.iter().all(|b| b.distance(placed) > config.clearance_radius));
    }

    #[test]
    fn test_obstacles_rest_on_terrain() {
        use crate::catalog::GroundTemplate;
        use crate::mesh::GroundMesh;

        let mut host = MemoryHost::new();
        let mesh = GroundMesh {
            vertices: vec![
                [0.0, 1.5, 0.0],
                [50.0, 1.5, 0.0],
                [0.0, 1.5, 50.0],
                [50.0, 1.5, 50.0],
            ],
            indices: vec![0, 2, 1, 1, 2, 3],
            resolution: 1,
            size: 50.0,
        };
        host.spawn_ground(Vec3::ZERO, &mesh, &GroundTemplate::default());

        let config = PlacementConfig::default();
        let catalog = ObstacleCatalog::default();
        let mut rng = WorldSeed::new(4).chunk_rng(0, 0);
        let report = ObstaclePlacer::new(&config, &catalog).place(footprint(), &mut host, &mut rng);

        assert!(!report.obstacles.is_empty());
        for o in &report.obstacles {
            approx::assert_relative_eq!(o.position.y, 1.5, epsilon = 1e-5);
        }
    }
}
