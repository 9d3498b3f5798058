//! Chunk Definition
//!
//! A generated terrain tile and its position on the chunk grid.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};
use veldt_gen::{GroundMesh, ObjectId, PlacedObstacle, SurfaceId};
use veldt_math::{Footprint, Vec3};

/// Integer cell on the chunk grid, relative to the grid anchor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    pub i: i32,
    pub j: i32,
}

impl GridCoord {
    pub const ORIGIN: Self = Self { i: 0, j: 0 };

    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// The 3x3 block of cells centered here, row by row, self included
    pub fn neighborhood(self) -> impl Iterator<Item = GridCoord> {
        (-1..=1).flat_map(move |dj| (-1..=1).map(move |di| self + GridCoord::new(di, dj)))
    }
}

impl Add for GridCoord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.i + rhs.i, self.j + rhs.j)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

/// A generated terrain chunk
///
/// Created once by the streamer and never modified afterwards.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// Grid cell
    pub coord: GridCoord,

    /// World-space origin of the footprint, y = 0
    pub origin: Vec3,

    /// Side length in world units
    pub size: f32,

    /// Ground surface spawned into the host
    pub surface: SurfaceId,

    /// Generated ground mesh, local to `origin`
    pub mesh: GroundMesh,

    /// Obstacles in placement order, fence last if present
    pub obstacles: Vec<PlacedObstacle>,
}

impl Chunk {
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.origin.planar(), self.size)
    }

    /// Host handles of every instance in this chunk, in placement order
    pub fn obstacle_handles(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.obstacles.iter().filter_map(|o| o.handle)
    }

    pub fn fence(&self) -> Option<&PlacedObstacle> {
        self.obstacles.iter().find(|o| o.is_fence())
    }
}
