// src/coords.rs

/// World units along one edge of a chunk.
pub const CHUNK_EDGE: u32 = 128;

/// [`CHUNK_EDGE`] as a float, for vertex positions.
pub const CHUNK_SIZE: f32 = CHUNK_EDGE as f32;

/// Chunk indices on the XZ plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoords {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoords {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// World-space offset of the chunk's (0, 0) corner.
    pub fn origin(&self) -> ChunkOrigin {
        WorldXZ {
            x: self.x as f32 * CHUNK_SIZE,
            z: self.z as f32 * CHUNK_SIZE,
        }
    }
}

/// A point on the XZ plane in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldXZ {
    pub x: f32,
    pub z: f32,
}

impl WorldXZ {
    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn distance(&self, other: &WorldXZ) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// World-space XZ offset of a chunk.
pub type ChunkOrigin = WorldXZ;

/// A 2D vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// A 3D vector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}
