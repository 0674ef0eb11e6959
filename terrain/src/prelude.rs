// src/prelude.rs
//! A convenient prelude re-exporting common terrain types.

pub use crate::chunk::{ChunkManager, ChunkPlacement, ChunkRegistry, ChunkSink, GeneratedChunk};
pub use crate::config::{
    ConfigError, GenerationSettings, IslandConfig, IslandSizePreset, ResolutionPreset, WorldSize,
    WorldSizePreset,
};
pub use crate::coords::{ChunkCoords, ChunkOrigin, Vec2, Vec3, WorldXZ, CHUNK_EDGE, CHUNK_SIZE};
pub use crate::generator::TerrainGenerator;
pub use crate::heightmap::Heightmap;
pub use crate::mesh::{Aabb, ChunkMesh};
