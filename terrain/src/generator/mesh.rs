use nalgebra::Vector3;

use crate::{
    coords::{ChunkOrigin, Vec2, Vec3, CHUNK_SIZE},
    heightmap::Heightmap,
    mesh::{Aabb, ChunkMesh},
};

/// Builds a uniform grid mesh from a chunk heightmap. The grid resolution
/// always comes from the heightmap itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeshGenerator {}

impl MeshGenerator {
    pub fn new() -> Self {
        Self {}
    }

    pub fn generate_mesh(&self, origin: ChunkOrigin, heightmap: &Heightmap) -> ChunkMesh {
        let vertices = grid_vertices(heightmap);
        let uvs = vertices
            .iter()
            .map(|v| Vec2 { x: v.x + origin.x, y: v.z + origin.z })
            .collect();
        let indices = grid_indices(heightmap.resolution());
        let normals = smooth_normals(&vertices, &indices);
        let bounds = Aabb::from_points(&vertices);

        ChunkMesh {
            vertices,
            normals,
            uvs,
            indices,
            bounds,
        }
    }
}

// chunk-local positions, x outer / z inner to match the heightmap layout
fn grid_vertices(heightmap: &Heightmap) -> Vec<Vec3> {
    let spacing = CHUNK_SIZE / heightmap.resolution() as f32;
    let dim = heightmap.dim();
    let mut verts = Vec::with_capacity(dim * dim);

    for x in 0..dim {
        for z in 0..dim {
            verts.push(Vec3::new(x as f32 * spacing, heightmap.get(x, z), z as f32 * spacing));
        }
    }
    verts
}

/// Two triangles per grid cell. For the cell whose lower corner is vertex
/// `v`, the quad is `v`, `v + 1` (next z), `v + row` (next x) and
/// `v + row + 1`.
///
/// `(resolution + 1)²` must fit in a `u32`; see
/// [`crate::config::MAX_RESOLUTION`].
pub fn grid_indices(resolution: u32) -> Vec<u32> {
    let res = resolution;
    let row = res + 1;
    let mut idxs = Vec::with_capacity(res as usize * res as usize * 6);

    for x in 0..res {
        for z in 0..res {
            let v = x * row + z;
            idxs.extend([v, v + 1, v + row, v + 1, v + row + 1, v + row]);
        }
    }
    idxs
}

/// Per-vertex normals averaged over incident triangles, weighted by area.
fn smooth_normals(vertices: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let to_na = |v: &Vec3| Vector3::new(v.x, v.y, v.z);
    let mut sums = vec![Vector3::<f32>::zeros(); vertices.len()];

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let pa = to_na(&vertices[a]);
        // unnormalized cross product, so larger faces weigh more
        let face = (to_na(&vertices[b]) - pa).cross(&(to_na(&vertices[c]) - pa));
        sums[a] += face;
        sums[b] += face;
        sums[c] += face;
    }

    sums.into_iter()
        .map(|n| match n.try_normalize(f32::EPSILON) {
            Some(n) => Vec3::new(n.x, n.y, n.z),
            None => Vec3::UP,
        })
        .collect()
}
