// src/heightmap.rs

/// Square grid of height samples covering one chunk, corners included.
///
/// Samples are stored row-major with X as the outer axis, so the sample at
/// grid position `(x, z)` lives at `x * dim + z`. This is the same order the
/// mesh emits its vertices in.
#[derive(Clone, Debug, PartialEq)]
pub struct Heightmap {
    data: Vec<f32>,
    dim: usize, // resolution + 1
}

impl Heightmap {
    pub fn new(data: Vec<f32>, resolution: u32) -> Self {
        let dim = resolution as usize + 1;
        assert!(data.len() == dim * dim);
        Self { data, dim }
    }

    /// Samples per edge.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn resolution(&self) -> u32 {
        (self.dim - 1) as u32
    }

    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.data[Self::index(self.dim, x, z)]
    }

    pub fn heights(&self) -> &[f32] {
        &self.data
    }

    pub fn min_max(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| (lo.min(h), hi.max(h)))
    }

    pub(crate) fn index(dim: usize, x: usize, z: usize) -> usize {
        x * dim + z
    }
}
