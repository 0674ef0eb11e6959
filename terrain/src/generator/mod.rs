mod heightmap;
mod mesh;

pub use heightmap::{island_falloff, HeightmapGenerator, IslandNoise};
pub use mesh::{grid_indices, MeshGenerator};

use crate::{
    config::GenerationSettings,
    coords::ChunkOrigin,
    mesh::ChunkMesh,
};

/// Turns a chunk origin into that chunk's mesh.
///
/// Holds only read-only state, so one instance can be shared by every worker
/// generating chunks of the same island.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    heightmap: HeightmapGenerator,
    mesh: MeshGenerator,
}

impl TerrainGenerator {
    pub fn new(settings: GenerationSettings) -> Self {
        Self {
            heightmap: HeightmapGenerator::new(settings),
            mesh: MeshGenerator::new(),
        }
    }

    pub fn settings(&self) -> &GenerationSettings {
        self.heightmap.settings()
    }

    pub fn generate(&self, origin: ChunkOrigin) -> ChunkMesh {
        let heightmap = self.heightmap.generate_chunk(origin);
        self.mesh.generate_mesh(origin, &heightmap)
    }
}

#[cfg(test)]
mod tests;
