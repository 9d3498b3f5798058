//! Integration tests for veldt_gen
//!
//! Builds whole chunks against the in-memory host: ground first, then
//! obstacles resting on it.

use veldt_gen::*;
use veldt_math::{Footprint, Vec2, Vec3};

fn generate(host: &mut MemoryHost, seed: WorldSeed, origin: Vec2, cell: (i32, i32)) -> PlacementReport {
    let terrain = TerrainConfig::default();
    let placement = PlacementConfig::default();
    let catalog = ObstacleCatalog::default();
    let field = NoiseHeightField::new(seed.noise_seed(), terrain.noise_frequency);

    let mut rng = seed.chunk_rng(cell.0, cell.1);
    let mesh = MeshSynthesizer::new(&field, &terrain).build_chunk(origin, &mut rng);
    host.spawn_ground(origin.with_y(0.0), &mesh, &catalog.ground);

    let footprint = Footprint::new(origin, terrain.chunk_size);
    ObstaclePlacer::new(&placement, &catalog).place(footprint, host, &mut rng)
}

#[test]
fn test_chunk_generation_is_reproducible() {
    let seed = WorldSeed::new(1234);
    let origin = Vec2::new(-25.0, -25.0);

    let mut first_host = MemoryHost::new();
    let first = generate(&mut first_host, seed, origin, (0, 0));
    let mut second_host = MemoryHost::new();
    let second = generate(&mut second_host, seed, origin, (0, 0));

    assert_eq!(first.obstacles, second.obstacles);
    assert_eq!(first.fence, second.fence);
}

#[test]
fn test_obstacles_rest_on_generated_ground() {
    let mut host = MemoryHost::new();
    let report = generate(&mut host, WorldSeed::new(9), Vec2::ZERO, (0, 0));

    assert_eq!(host.ground_count(), 1);
    for obstacle in &report.obstacles {
        let probe = obstacle.position.with_y(10.0);
        let hit = host.raycast_down(probe, 100.0, QueryLayer::Terrain).unwrap();
        approx::assert_relative_eq!(hit.point.y, obstacle.position.y, epsilon = 1e-4);
        assert!(obstacle.position.y.abs() <= 2.0);
    }
}

#[test]
fn test_neighbouring_chunks_respect_each_others_obstacles() {
    let seed = WorldSeed::new(55);
    let mut host = MemoryHost::new();

    let mut all = Vec::new();
    for (i, j) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        let origin = Vec2::new(i as f32 * 50.0, j as f32 * 50.0);
        all.extend(generate(&mut host, seed, origin, (i, j)).obstacles);
    }

    let clearance = PlacementConfig::default().clearance_radius;
    for (n, a) in all.iter().enumerate() {
        for b in &all[n + 1..] {
            assert!(
                a.position.planar().distance(b.position.planar()) >= clearance,
                "{:?} and {:?} are too close",
                a.position,
                b.position
            );
        }
    }
    assert_eq!(host.ground_count(), 4);
    assert!(host.object_count() >= all.len());
}

#[test]
fn test_catalog_drives_prototypes() {
    let catalog = ObstacleCatalog::from_toml_str(
        r#"
        [[obstacles]]
        name = "boulder"
        shape = { type = "sphere", radius = 2.0 }

        [fence]
        name = "hedge"
        shape = { type = "box", half_extents = [25.0, 1.5, 0.5] }
        "#,
    )
    .unwrap();
    let placement = PlacementConfig::default().with_fence_probability(1.0);
    let mut host = MemoryHost::new();
    let mut rng = WorldSeed::new(2).chunk_rng(0, 0);

    let report = ObstaclePlacer::new(&placement, &catalog).place(
        Footprint::new(Vec2::ZERO, 50.0),
        &mut host,
        &mut rng,
    );

    assert!(report.obstacles.iter().all(|o| o.prototype == "boulder"));
    assert_eq!(report.fence.as_ref().map(|f| f.prototype.as_str()), Some("hedge"));
    assert_eq!(report.fence.map(|f| f.position), Some(Vec3::new(25.0, 0.0, 25.0)));
}
