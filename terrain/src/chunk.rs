// src/chunk.rs

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::{
    config::{ConfigError, GenerationSettings, IslandConfig},
    coords::{ChunkCoords, Vec3, WorldXZ},
    generator::TerrainGenerator,
    mesh::ChunkMesh,
};

/// Where a chunk's mesh sits in the world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChunkPlacement {
    pub translation: Vec3,
}

/// A finished chunk, ready to hand to a renderer or collider.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedChunk {
    pub coords: ChunkCoords,
    pub placement: ChunkPlacement,
    pub mesh: ChunkMesh,
}

/// Receives generated chunks. Each chunk is registered exactly once per run.
///
/// Implementations used with [`ChunkManager::par_generate_all`] are called
/// from several threads at once.
pub trait ChunkSink {
    fn register(&self, chunk: GeneratedChunk);
}

/// In-memory store of generated chunks keyed by grid position.
#[derive(Debug, Default)]
pub struct ChunkRegistry {
    chunks: Mutex<HashMap<ChunkCoords, GeneratedChunk>>,
}

impl ChunkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn get(&self, coords: ChunkCoords) -> Option<GeneratedChunk> {
        self.lock().get(&coords).cloned()
    }

    pub fn coords(&self) -> Vec<ChunkCoords> {
        let mut coords: Vec<_> = self.lock().keys().copied().collect();
        coords.sort();
        coords
    }

    /// All chunks ordered by X, then Z.
    pub fn into_chunks(self) -> Vec<GeneratedChunk> {
        let map = self.chunks.into_inner().unwrap_or_else(PoisonError::into_inner);
        let mut chunks: Vec<_> = map.into_values().collect();
        chunks.sort_by_key(|chunk| chunk.coords);
        chunks
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ChunkCoords, GeneratedChunk>> {
        // a panic mid-insert cannot leave the map half-written
        self.chunks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ChunkSink for ChunkRegistry {
    fn register(&self, chunk: GeneratedChunk) {
        let coords = chunk.coords;
        if self.lock().insert(coords, chunk).is_some() {
            warn!("Chunk ({}, {}) registered twice, keeping the newer mesh", coords.x, coords.z);
        }
    }
}

impl<F> ChunkSink for F
where
    F: Fn(GeneratedChunk),
{
    fn register(&self, chunk: GeneratedChunk) {
        self(chunk)
    }
}

/// Lays out the chunk grid of an island and drives generation for each cell.
#[derive(Clone, Debug)]
pub struct ChunkManager {
    config: IslandConfig,
    generator: TerrainGenerator,
}

impl ChunkManager {
    /// Validates the configuration up front. Nothing is generated for an
    /// invalid one.
    pub fn new(config: IslandConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let settings = GenerationSettings::from_config(&config);
        Ok(Self {
            generator: TerrainGenerator::new(settings),
            config,
        })
    }

    pub fn config(&self) -> &IslandConfig {
        &self.config
    }

    pub fn settings(&self) -> &GenerationSettings {
        self.generator.settings()
    }

    pub fn world_centre(&self) -> WorldXZ {
        self.settings().world_centre
    }

    pub fn vertical_offset(&self) -> f32 {
        self.config.vertical_offset()
    }

    pub fn chunk_count(&self) -> usize {
        self.config.world_size.chunk_count()
    }

    /// Every chunk position, X outer and Z inner.
    pub fn chunk_coords(&self) -> impl Iterator<Item = ChunkCoords> + '_ {
        let size = self.config.world_size;
        (0..size.x).flat_map(move |x| (0..size.z).map(move |z| ChunkCoords::new(x, z)))
    }

    pub fn generate_chunk(&self, coords: ChunkCoords) -> GeneratedChunk {
        let origin = coords.origin();
        let mesh = self.generator.generate(origin);
        debug!(
            "Generated chunk ({}, {}) with {} vertices, {} triangles",
            coords.x,
            coords.z,
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        GeneratedChunk {
            coords,
            placement: ChunkPlacement {
                translation: Vec3::new(origin.x, self.vertical_offset(), origin.z),
            },
            mesh,
        }
    }

    /// Generates the chunks one after another and returns how many were
    /// registered.
    pub fn generate_all<S: ChunkSink + ?Sized>(&self, sink: &S) -> usize {
        self.log_start();
        let mut count = 0;
        for coords in self.chunk_coords() {
            sink.register(self.generate_chunk(coords));
            count += 1;
        }
        info!("Generated {} chunks", count);
        count
    }

    /// Generates the chunks on the current rayon pool. Registration order is
    /// unspecified.
    pub fn par_generate_all<S: ChunkSink + Sync + ?Sized>(&self, sink: &S) -> usize {
        self.log_start();
        let coords: Vec<_> = self.chunk_coords().collect();
        coords
            .par_iter()
            .for_each(|&coords| sink.register(self.generate_chunk(coords)));
        info!("Generated {} chunks", coords.len());
        coords.len()
    }

    /// Convenience wrapper collecting every chunk in grid order.
    pub fn generate(&self) -> Vec<GeneratedChunk> {
        self.chunk_coords().map(|coords| self.generate_chunk(coords)).collect()
    }

    fn log_start(&self) {
        let centre = self.world_centre();
        info!(
            "Generating {}x{} island ({} chunks, resolution {}) around ({}, {})",
            self.config.world_size.x,
            self.config.world_size.z,
            self.chunk_count(),
            self.config.resolution,
            centre.x,
            centre.z
        );
    }
}
