//! Chunk ground mesh synthesis

use rand::Rng;
use veldt_math::Vec2;

use crate::config::TerrainConfig;
use crate::noise_field::NoiseHeightField;

/// Grid mesh of one chunk, vertices local to the chunk origin
#[derive(Debug, Clone, PartialEq)]
pub struct GroundMesh {
    /// `(resolution + 1)^2` vertices in row-major order (z rows, x columns)
    pub vertices: Vec<[f32; 3]>,
    /// Triangle list, three indices per triangle
    pub indices: Vec<u32>,
    /// Cells along each edge
    pub resolution: u32,
    /// Side length in world units
    pub size: f32,
}

impl GroundMesh {
    /// Number of vertices per row
    #[inline]
    pub fn row_len(&self) -> usize {
        self.resolution as usize + 1
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate the triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Vertex at grid position `(ix, iz)`
    pub fn vertex(&self, ix: u32, iz: u32) -> Option<[f32; 3]> {
        if ix > self.resolution || iz > self.resolution {
            return None;
        }
        self.vertices.get(iz as usize * self.row_len() + ix as usize).copied()
    }

    /// Whether `(ix, iz)` lies on the outer ring of the grid
    #[inline]
    pub fn is_perimeter(&self, ix: u32, iz: u32) -> bool {
        ix == 0 || iz == 0 || ix == self.resolution || iz == self.resolution
    }

    /// Vertices on the outer ring
    pub fn perimeter_vertices(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        let r = self.resolution;
        (0..=r)
            .flat_map(move |iz| (0..=r).map(move |ix| (ix, iz)))
            .filter(move |&(ix, iz)| self.is_perimeter(ix, iz))
            .filter_map(move |(ix, iz)| self.vertex(ix, iz))
    }

    /// Interpolated surface height at a point local to the chunk origin
    ///
    /// Follows the same diagonal split as the triangulation, so the value is
    /// exactly the height of the triangle covering the point.
    pub fn height_at(&self, local: Vec2) -> Option<f32> {
        if local.x < 0.0 || local.z < 0.0 || local.x > self.size || local.z > self.size {
            return None;
        }
        let r = self.resolution;
        let step = self.size / r as f32;
        let cx = ((local.x / step).floor() as u32).min(r - 1);
        let cz = ((local.z / step).floor() as u32).min(r - 1);
        let fx = (local.x / step - cx as f32).clamp(0.0, 1.0);
        let fz = (local.z / step - cz as f32).clamp(0.0, 1.0);

        let h00 = self.vertex(cx, cz)?[1];
        let h10 = self.vertex(cx + 1, cz)?[1];
        let h01 = self.vertex(cx, cz + 1)?[1];
        let h11 = self.vertex(cx + 1, cz + 1)?[1];

        if fx + fz <= 1.0 {
            Some(h00 + fx * (h10 - h00) + fz * (h01 - h00))
        } else {
            Some(h11 + (1.0 - fx) * (h01 - h11) + (1.0 - fz) * (h10 - h11))
        }
    }
}

/// Builds chunk ground meshes from the height field
pub struct MeshSynthesizer<'a> {
    field: &'a NoiseHeightField,
    config: &'a TerrainConfig,
}

impl<'a> MeshSynthesizer<'a> {
    pub fn new(field: &'a NoiseHeightField, config: &'a TerrainConfig) -> Self {
        Self { field, config }
    }

    /// Build the mesh for a chunk using the configured resolution and size
    pub fn build_chunk<R: Rng + ?Sized>(&self, origin: Vec2, rng: &mut R) -> GroundMesh {
        self.build(origin, self.config.grid_resolution, self.config.chunk_size, rng)
    }

    /// Build a `(resolution + 1)^2` vertex grid spanning `[0, size]` on both axes
    ///
    /// Perimeter vertices stay at height 0 so neighbouring chunks always meet
    /// without seams. Interior heights are the noise sample at the vertex's
    /// world position scaled by an amplitude drawn per vertex.
    pub fn build<R: Rng + ?Sized>(
        &self,
        origin: Vec2,
        resolution: u32,
        size: f32,
        rng: &mut R,
    ) -> GroundMesh {
        let r = resolution.max(1);
        let row = r as usize + 1;
        let mut vertices = Vec::with_capacity(row * row);

        for iz in 0..=r {
            for ix in 0..=r {
                let x = ix as f32 * size / r as f32;
                let z = iz as f32 * size / r as f32;

                let y = if ix == 0 || iz == 0 || ix == r || iz == r {
                    0.0
                } else {
                    let amplitude =
                        rng.random_range(self.config.amplitude_min..self.config.amplitude_max);
                    self.field.sample(origin.x + x, origin.z + z) * amplitude
                };

                vertices.push([x, y, z]);
            }
        }

        let stride = r + 1;
        let mut indices = Vec::with_capacity((r * r * 6) as usize);
        for iz in 0..r {
            for ix in 0..r {
                let start = iz * stride + ix;

                indices.push(start);
                indices.push(start + stride);
                indices.push(start + 1);

                indices.push(start + 1);
                indices.push(start + stride);
                indices.push(start + stride + 1);
            }
        }

        GroundMesh {
            vertices,
            indices,
            resolution: r,
            size,
        }
    }
}
