//! Chunk Index
//!
//! Registry of generated chunks keyed by grid cell. The grid is anchored at
//! the origin of the first chunk inserted; every later origin is that anchor
//! plus an integer multiple of the chunk size on each axis.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use veldt_gen::SurfaceId;
use veldt_math::Vec2;

use crate::chunk::{Chunk, GridCoord};
use crate::error::{Result, StreamError};

/// Tolerance, in cells, for treating an origin as grid aligned
const ALIGN_EPSILON: f32 = 1e-4;

/// Grid-keyed chunk registry
#[derive(Debug)]
pub struct ChunkIndex {
    chunk_size: f32,
    anchor: Option<Vec2>,
    chunks: HashMap<GridCoord, Chunk>,
    surfaces: HashMap<SurfaceId, GridCoord>,
}

impl ChunkIndex {
    pub fn new(chunk_size: f32) -> Self {
        Self {
            chunk_size,
            anchor: None,
            chunks: HashMap::new(),
            surfaces: HashMap::new(),
        }
    }

    pub fn chunk_size(&self) -> f32 {
        self.chunk_size
    }

    /// World origin of cell (0, 0), once the first chunk is in
    pub fn anchor(&self) -> Option<Vec2> {
        self.anchor
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Cell containing a world position
    pub fn cell_at(&self, position: Vec2) -> Option<GridCoord> {
        let anchor = self.anchor?;
        let rel = self.relative(position, anchor);
        Some(GridCoord::new(rel.x.floor() as i32, rel.z.floor() as i32))
    }

    /// World origin of a cell
    pub fn origin_of(&self, coord: GridCoord) -> Option<Vec2> {
        let anchor = self.anchor?;
        Some(Vec2::new(
            anchor.x + coord.i as f32 * self.chunk_size,
            anchor.z + coord.j as f32 * self.chunk_size,
        ))
    }

    /// Cell whose origin is `origin`
    ///
    /// While the index is empty any origin is acceptable and maps to (0, 0).
    pub fn coord_for_origin(&self, origin: Vec2) -> Result<GridCoord> {
        let Some(anchor) = self.anchor else {
            return Ok(GridCoord::ORIGIN);
        };
        let rel = self.relative(origin, anchor);
        let (i, j) = (rel.x.round(), rel.z.round());
        if (rel.x - i).abs() > ALIGN_EPSILON || (rel.z - j).abs() > ALIGN_EPSILON {
            return Err(StreamError::Misaligned {
                x: origin.x,
                z: origin.z,
            });
        }
        Ok(GridCoord::new(i as i32, j as i32))
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Whether a chunk exists with this origin
    pub fn exists(&self, origin: Vec2) -> bool {
        self.coord_for_origin(origin)
            .map(|c| self.contains(c))
            .unwrap_or(false)
    }

    /// Chunk with this origin
    pub fn get(&self, origin: Vec2) -> Option<&Chunk> {
        let coord = self.coord_for_origin(origin).ok()?;
        self.chunks.get(&coord)
    }

    pub fn get_cell(&self, coord: GridCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Chunk that owns a ground surface
    pub fn chunk_for_surface(&self, surface: SurfaceId) -> Option<&Chunk> {
        self.surfaces.get(&surface).and_then(|c| self.chunks.get(c))
    }

    /// Register a chunk
    ///
    /// The first insert fixes the grid anchor. The chunk's `coord` is
    /// recomputed from its origin and overwritten.
    pub fn insert(&mut self, mut chunk: Chunk) -> Result<&Chunk> {
        let origin = chunk.origin.planar();
        let coord = self.coord_for_origin(origin)?;

        match self.chunks.entry(coord) {
            Entry::Occupied(_) => Err(StreamError::DuplicateChunk(coord)),
            Entry::Vacant(slot) => {
                self.anchor.get_or_insert(origin);
                chunk.coord = coord;
                self.surfaces.insert(chunk.surface, coord);
                Ok(slot.insert(chunk))
            }
        }
    }

    /// Position in cell units from the anchor
    fn relative(&self, position: Vec2, anchor: Vec2) -> Vec2 {
        Vec2::new(
            (position.x - anchor.x) / self.chunk_size,
            (position.z - anchor.z) / self.chunk_size,
        )
    }

    /// All chunks, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.chunks.values()
    }

    pub fn coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.chunks.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veldt_gen::GroundMesh;
    use veldt_math::Vec3;

    fn chunk_at(x: f32, z: f32, surface: u64) -> Chunk {
        Chunk {
            coord: GridCoord::ORIGIN,
            origin: Vec3::new(x, 0.0, z),
            size: 50.0,
            surface: SurfaceId(surface),
            mesh: GroundMesh {
                vertices: Vec::new(),
                indices: Vec::new(),
                resolution: 1,
                size: 50.0,
            },
            obstacles: Vec::new(),
        }
    }

    #[test]
    fn test_first_insert_sets_anchor() {
        let mut index = ChunkIndex::new(50.0);
        assert!(index.is_empty());
        assert_eq!(index.anchor(), None);
        assert_eq!(index.cell_at(Vec2::ZERO), None);

        let coord = index.insert(chunk_at(-25.0, -25.0, 1)).unwrap().coord;
        assert_eq!(coord, GridCoord::ORIGIN);
        assert_eq!(index.anchor(), Some(Vec2::new(-25.0, -25.0)));
        assert!(index.exists(Vec2::new(-25.0, -25.0)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_grid_mapping() {
        let mut index = ChunkIndex::new(50.0);
        index.insert(chunk_at(-25.0, -25.0, 1)).unwrap();

        assert_eq!(index.cell_at(Vec2::new(0.0, 0.0)), Some(GridCoord::new(0, 0)));
        assert_eq!(index.cell_at(Vec2::new(30.0, -30.0)), Some(GridCoord::new(1, -1)));
        assert_eq!(index.cell_at(Vec2::new(-75.0, 24.9)), Some(GridCoord::new(-1, 0)));
        assert_eq!(index.origin_of(GridCoord::new(1, -1)), Some(Vec2::new(25.0, -75.0)));
        assert_eq!(
            index.coord_for_origin(Vec2::new(-75.0, 75.0)).unwrap(),
            GridCoord::new(-1, 2)
        );
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut index = ChunkIndex::new(50.0);
        index.insert(chunk_at(0.0, 0.0, 1)).unwrap();
        assert!(matches!(
            index.insert(chunk_at(0.0, 0.0, 2)),
            Err(StreamError::DuplicateChunk(c)) if c == GridCoord::ORIGIN
        ));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_misaligned_rejected() {
        let mut index = ChunkIndex::new(50.0);
        index.insert(chunk_at(0.0, 0.0, 1)).unwrap();
        assert!(matches!(
            index.insert(chunk_at(10.0, 0.0, 2)),
            Err(StreamError::Misaligned { .. })
        ));
        assert!(!index.exists(Vec2::new(10.0, 0.0)));
        assert!(index.get(Vec2::new(10.0, 0.0)).is_none());
    }

    #[test]
    fn test_surface_lookup() {
        let mut index = ChunkIndex::new(50.0);
        index.insert(chunk_at(0.0, 0.0, 7)).unwrap();
        index.insert(chunk_at(50.0, 0.0, 9)).unwrap();

        let chunk = index.chunk_for_surface(SurfaceId(9)).unwrap();
        assert_eq!(chunk.coord, GridCoord::new(1, 0));
        assert!(index.chunk_for_surface(SurfaceId(8)).is_none());
        assert_eq!(index.get(Vec2::new(50.0, 0.0)).map(|c| c.surface), Some(SurfaceId(9)));
    }
}
