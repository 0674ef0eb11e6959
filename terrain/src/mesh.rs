// src/mesh.rs

use crate::coords::{Vec2, Vec3};

/// Renderable and collidable geometry for one chunk, in chunk-local space.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkMesh {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// World-aligned texture coordinates, one per vertex.
    pub uvs: Vec<Vec2>,
    /// Three indices per triangle into `vertices`.
    pub indices: Vec<u32>,
    pub bounds: Aabb,
}

impl ChunkMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| [tri[0], tri[1], tri[2]])
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Smallest box enclosing every point, or a zero box at the origin for an
    /// empty set.
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };

        points.iter().skip(1).fold(
            Aabb { min: *first, max: *first },
            |acc, p| Aabb {
                min: Vec3::new(acc.min.x.min(p.x), acc.min.y.min(p.y), acc.min.z.min(p.z)),
                max: Vec3::new(acc.max.x.max(p.x), acc.max.y.max(p.y), acc.max.z.max(p.z)),
            },
        )
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    pub fn size(&self) -> Vec3 {
        Vec3::new(
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }
}
