// src/lib.rs

//! Procedural island terrain.
//!
//! An island is a grid of fixed-size chunks. Each chunk is meshed from a
//! height field made of Perlin noise attenuated by the distance to the
//! island centre, so the terrain rises in the middle and sinks toward the
//! edges. Chunk generation is a pure function of the chunk origin and the
//! shared settings; [`chunk::ChunkManager`] drives it over the whole grid.

pub mod chunk;
pub mod config;
pub mod coords;
pub mod generator;
pub mod heightmap;
pub mod mesh;
pub mod prelude;
