use noise::{NoiseFn, Perlin};

use crate::{
    config::GenerationSettings,
    coords::{ChunkOrigin, WorldXZ, CHUNK_EDGE},
    heightmap::Heightmap,
};

/// Fixed frequency/weight pairs layered on top of the island when secondary
/// noise is enabled.
const SECONDARY_LAYERS: [(f32, f32); 3] = [(0.01, 0.5), (0.02, 0.3), (0.007, 0.3)];

/// Phase the clamped distance ratio is shifted by before taking its sine.
const FALLOFF_PHASE: f32 = 90.0;

/// Radial attenuation of terrain height.
///
/// The argument is clamped to `[0, 1]` and shifted by a constant 90 radians,
/// so the result stays within roughly `[0.11, 0.89]` and falls as `distance`
/// grows. Radii of zero or less pin the ratio to one end of the clamp.
pub fn island_falloff(distance: f32, island_radius: f32) -> f32 {
    (((1.0 + distance) / island_radius).clamp(0.0, 1.0) + FALLOFF_PHASE).sin()
}

/// Smooth 2D Perlin noise mapped into `[0, 1]`.
///
/// The permutation table is fixed; callers vary the output by offsetting the
/// input coordinates.
#[derive(Clone, Copy, Debug)]
pub struct IslandNoise {
    perlin: Perlin,
}

impl IslandNoise {
    pub fn new() -> Self {
        Self { perlin: Perlin::new(Perlin::DEFAULT_SEED) }
    }

    pub fn sample(&self, x: f32, z: f32) -> f32 {
        let value = self.perlin.get([x as f64, z as f64]) as f32;
        (value * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

impl Default for IslandNoise {
    fn default() -> Self {
        Self::new()
    }
}

fn sample_offset(step: u32, resolution: u32) -> f32 {
    (step as u64 * CHUNK_EDGE as u64 / resolution as u64) as f32
}

#[derive(Clone, Debug)]
pub struct HeightmapGenerator {
    noise: IslandNoise,
    settings: GenerationSettings,
}

impl HeightmapGenerator {
    pub fn new(settings: GenerationSettings) -> Self {
        Self {
            noise: IslandNoise::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Samples every vertex of the chunk, corners and far edges included, so
    /// neighbouring chunks share their border heights exactly.
    ///
    /// Noise is sampled at whole-unit offsets (`x * 128 / resolution`,
    /// truncated), which only match the vertex positions when the resolution
    /// divides 128. The far edge always lands on exactly 128.
    pub fn generate_chunk(&self, origin: ChunkOrigin) -> Heightmap {
        let resolution = self.settings.resolution;
        let dim = resolution as usize + 1;
        let mut heights = Vec::with_capacity(dim * dim);

        for x in 0..=resolution {
            for z in 0..=resolution {
                let world_x = origin.x + sample_offset(x, resolution);
                let world_z = origin.z + sample_offset(z, resolution);
                heights.push(self.sample_height(world_x, world_z));
            }
        }

        Heightmap::new(heights, resolution)
    }

    pub fn sample_height(&self, world_x: f32, world_z: f32) -> f32 {
        let s = &self.settings;

        let distance = s.world_centre.distance(&WorldXZ::new(world_x, world_z));
        let falloff = island_falloff(distance, s.island_radius);

        let primary = self.noise.sample(
            world_x * s.noise_scale + s.seed,
            world_z * s.noise_scale + s.seed,
        ) * falloff;

        let mut island = primary * falloff * primary;

        if s.secondary_noise {
            for (frequency, weight) in SECONDARY_LAYERS {
                island += self.noise.sample(world_x * frequency, world_z * frequency) * weight * falloff;
            }
        }

        island * s.max_height
    }
}
