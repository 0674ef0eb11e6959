// src/config.rs

//! Island configuration: the values an editor or command line supplies once
//! per generation run, plus the derived settings every chunk reads.

use std::fs;
use std::path::Path;

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coords::{WorldXZ, CHUNK_SIZE};

/// Factor applied to the island height when secondary noise is on. The extra
/// layers add height of their own.
pub const SECONDARY_NOISE_HEIGHT_SCALE: f32 = 0.6;

/// Fraction of the configured height the island is lowered by when secondary
/// noise is on, so the shoreline sits at the water line.
pub const SECONDARY_NOISE_SINK: f32 = 0.045;

/// Largest resolution whose chunk mesh can be indexed with `u32`: both
/// `(resolution + 1)²` vertices and `resolution² * 6` indices stay within
/// `u32::MAX`.
pub const MAX_RESOLUTION: u32 = 26_754;

/// Upper bound (exclusive) for randomized seeds.
pub const MAX_RANDOM_SEED: i32 = 10_000;

/// An error raised for an unusable configuration. Generation never starts
/// when one of these is returned.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("resolution must be at least 1, got {0}")]
    InvalidResolution(u32),
    #[error("resolution {0} exceeds the maximum of {max}", max = MAX_RESOLUTION)]
    ResolutionTooLarge(u32),
    #[error("world size cannot be negative, got {x}x{z}")]
    NegativeWorldSize { x: i32, z: i32 },
    #[error("height cannot be negative, got {0}")]
    NegativeHeight(f32),
    #[error("`{field}` must be a finite number")]
    NonFinite { field: &'static str },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Island extent in chunks along X and Z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSize {
    pub x: i32,
    pub z: i32,
}

impl WorldSize {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub fn chunk_count(&self) -> usize {
        self.x.max(0) as usize * self.z.max(0) as usize
    }
}

impl Default for WorldSize {
    fn default() -> Self {
        WorldSizePreset::Small.into()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorldSizePreset {
    Small,
    Medium,
    Large,
}

impl From<WorldSizePreset> for WorldSize {
    fn from(preset: WorldSizePreset) -> Self {
        match preset {
            WorldSizePreset::Small => WorldSize::new(4, 4),
            WorldSizePreset::Medium => WorldSize::new(8, 8),
            WorldSizePreset::Large => WorldSize::new(16, 16),
        }
    }
}

/// Grid subdivisions per chunk edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionPreset {
    Low,
    Medium,
    High,
}

impl ResolutionPreset {
    pub fn resolution(self) -> u32 {
        match self {
            ResolutionPreset::Low => 16,
            ResolutionPreset::Medium => 64,
            ResolutionPreset::High => 128,
        }
    }
}

/// Island radius in world units. Each size matches the world size preset of
/// the same name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IslandSizePreset {
    Small,
    Medium,
    Large,
}

impl IslandSizePreset {
    pub fn radius(self) -> f32 {
        match self {
            IslandSizePreset::Small => 300.0,
            IslandSizePreset::Medium => 600.0,
            IslandSizePreset::Large => 1200.0,
        }
    }
}

fn default_resolution() -> u32 {
    ResolutionPreset::Low.resolution()
}

fn default_island_radius() -> f32 {
    IslandSizePreset::Small.radius()
}

fn default_noise_scale() -> f32 {
    0.01
}

fn default_height() -> f32 {
    150.0
}

/// Everything needed to generate one island.
///
/// `noise_scale` is conventionally kept within `[0, 0.015]`, and `height`
/// within `[0, 1000]`. Neither range is enforced. An `island_radius` of zero
/// or less is accepted and yields a flat, uniform island.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandConfig {
    pub world_size: WorldSize,
    pub resolution: u32,
    pub island_radius: f32,
    pub noise_scale: f32,
    /// Offset added to the primary noise input.
    pub seed: f32,
    pub height: f32,
    pub secondary_noise: bool,
}

impl Default for IslandConfig {
    fn default() -> Self {
        Self {
            world_size: WorldSize::default(),
            resolution: default_resolution(),
            island_radius: default_island_radius(),
            noise_scale: default_noise_scale(),
            seed: 0.0,
            height: default_height(),
            secondary_noise: false,
        }
    }
}

impl IslandConfig {
    pub fn small() -> Self {
        Self::from_presets(WorldSizePreset::Small, IslandSizePreset::Small)
    }

    pub fn medium() -> Self {
        Self::from_presets(WorldSizePreset::Medium, IslandSizePreset::Medium)
    }

    pub fn large() -> Self {
        Self::from_presets(WorldSizePreset::Large, IslandSizePreset::Large)
    }

    pub fn from_presets(world: WorldSizePreset, island: IslandSizePreset) -> Self {
        Self {
            world_size: world.into(),
            island_radius: island.radius(),
            ..Self::default()
        }
    }

    pub fn with_resolution(mut self, preset: ResolutionPreset) -> Self {
        self.resolution = preset.resolution();
        self
    }

    /// Picks a new whole-number seed in `[0, MAX_RANDOM_SEED)`.
    pub fn randomize_seed<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f32 {
        self.seed = rng.gen_range(0..MAX_RANDOM_SEED) as f32;
        self.seed
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution < 1 {
            return Err(ConfigError::InvalidResolution(self.resolution));
        }
        if self.resolution > MAX_RESOLUTION {
            return Err(ConfigError::ResolutionTooLarge(self.resolution));
        }
        if self.world_size.x < 0 || self.world_size.z < 0 {
            return Err(ConfigError::NegativeWorldSize {
                x: self.world_size.x,
                z: self.world_size.z,
            });
        }

        let floats = [
            ("island_radius", self.island_radius),
            ("noise_scale", self.noise_scale),
            ("seed", self.seed),
            ("height", self.height),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        if self.height < 0.0 {
            return Err(ConfigError::NegativeHeight(self.height));
        }
        Ok(())
    }

    /// Parses and validates a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: IslandConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        info!("Loaded island config from {}", path.display());
        Ok(config)
    }

    /// Centre of the island in world units.
    pub fn world_centre(&self) -> WorldXZ {
        WorldXZ {
            x: (self.world_size.x as f32 / 2.0) * CHUNK_SIZE,
            z: (self.world_size.z as f32 / 2.0) * CHUNK_SIZE,
        }
    }

    /// Height the synthesizer scales terrain by.
    pub fn effective_height(&self) -> f32 {
        if self.secondary_noise {
            self.height * SECONDARY_NOISE_HEIGHT_SCALE
        } else {
            self.height
        }
    }

    /// Vertical placement of the whole island.
    pub fn vertical_offset(&self) -> f32 {
        if self.secondary_noise {
            -(self.height * SECONDARY_NOISE_SINK)
        } else {
            0.0
        }
    }
}

/// Read-only values shared by every chunk generation in a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationSettings {
    pub world_centre: WorldXZ,
    pub resolution: u32,
    pub island_radius: f32,
    pub noise_scale: f32,
    pub seed: f32,
    /// Already scaled for secondary noise.
    pub max_height: f32,
    pub secondary_noise: bool,
}

impl GenerationSettings {
    pub fn from_config(config: &IslandConfig) -> Self {
        Self {
            world_centre: config.world_centre(),
            resolution: config.resolution,
            island_radius: config.island_radius,
            noise_scale: config.noise_scale,
            seed: config.seed,
            max_height: config.effective_height(),
            secondary_noise: config.secondary_noise,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_case::test_case;

    #[test]
    fn test_defaults_are_valid() {
        let config = IslandConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.world_size, WorldSize::new(4, 4));
        assert_eq!(config.resolution, 16);
        assert_relative_eq!(config.island_radius, 300.0);
        assert_relative_eq!(config.noise_scale, 0.01);
        assert_relative_eq!(config.height, 150.0);
        assert!(!config.secondary_noise);
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let config = IslandConfig { resolution: 0, ..IslandConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidResolution(0))));
    }

    #[test]
    fn test_resolution_limit() {
        let at_limit = IslandConfig { resolution: MAX_RESOLUTION, ..IslandConfig::default() };
        assert!(at_limit.validate().is_ok());

        let r = MAX_RESOLUTION as u64;
        assert!((r + 1) * (r + 1) <= u32::MAX as u64);
        assert!(r * r * 6 <= u32::MAX as u64);
        assert!((r + 1) * (r + 1) * 6 > u32::MAX as u64);

        for resolution in [MAX_RESOLUTION + 1, 30_000, 65_536, u32::MAX] {
            let config = IslandConfig { resolution, ..IslandConfig::default() };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::ResolutionTooLarge(r)) if r == resolution
            ));
        }
    }

    #[test_case(-1, 4)]
    #[test_case(4, -1)]
    #[test_case(-3, -3)]
    fn test_negative_world_size_rejected(x: i32, z: i32) {
        let config = IslandConfig { world_size: WorldSize::new(x, z), ..IslandConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::NegativeWorldSize { .. })));
    }

    #[test]
    fn test_empty_world_is_valid() {
        let config = IslandConfig { world_size: WorldSize::new(0, 5), ..IslandConfig::default() };
        assert!(config.validate().is_ok());
        assert_eq!(config.world_size.chunk_count(), 0);
    }

    #[test_case(0.0 ; "zero radius")]
    #[test_case(-50.0 ; "negative radius")]
    fn test_degenerate_radius_is_valid(radius: f32) {
        let config = IslandConfig { island_radius: radius, ..IslandConfig::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_height_rejected() {
        let config = IslandConfig { height: -1.0, ..IslandConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::NegativeHeight(_))));
    }

    #[test]
    fn test_non_finite_rejected() {
        let config = IslandConfig { noise_scale: f32::NAN, ..IslandConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite { field: "noise_scale" })
        ));
    }

    #[test]
    fn test_presets() {
        let medium = IslandConfig::medium();
        assert_eq!(medium.world_size, WorldSize::new(8, 8));
        assert_relative_eq!(medium.island_radius, 600.0);

        let large = IslandConfig::large().with_resolution(ResolutionPreset::High);
        assert_eq!(large.world_size, WorldSize::new(16, 16));
        assert_relative_eq!(large.island_radius, 1200.0);
        assert_eq!(large.resolution, 128);
    }

    #[test]
    fn test_world_centre() {
        let config = IslandConfig { world_size: WorldSize::new(2, 3), ..IslandConfig::default() };
        let centre = config.world_centre();
        assert_relative_eq!(centre.x, 128.0);
        assert_relative_eq!(centre.z, 192.0);
    }

    #[test]
    fn test_secondary_noise_scales_height_and_sinks_island() {
        let mut config = IslandConfig { height: 200.0, ..IslandConfig::default() };
        assert_relative_eq!(config.effective_height(), 200.0);
        assert_relative_eq!(config.vertical_offset(), 0.0);

        config.secondary_noise = true;
        assert_relative_eq!(config.effective_height(), 120.0);
        assert_relative_eq!(config.vertical_offset(), -9.0);

        let settings = GenerationSettings::from_config(&config);
        assert_relative_eq!(settings.max_height, 120.0);
    }

    #[test]
    fn test_randomize_seed_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut config = IslandConfig::default();
        for _ in 0..100 {
            let seed = config.randomize_seed(&mut rng);
            assert!((0.0..MAX_RANDOM_SEED as f32).contains(&seed));
            assert_eq!(seed.fract(), 0.0);
            assert_eq!(config.seed, seed);
        }
    }

    #[test]
    fn test_from_toml_partial() {
        let config = IslandConfig::from_toml_str(
            r#"
            resolution = 4
            seed = 12
            secondary_noise = true

            [world_size]
            x = 2
            z = 3
            "#,
        )
        .expect("valid config");

        assert_eq!(config.resolution, 4);
        assert_relative_eq!(config.seed, 12.0);
        assert!(config.secondary_noise);
        assert_eq!(config.world_size, WorldSize::new(2, 3));
        assert_relative_eq!(config.island_radius, 300.0);
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        assert!(matches!(
            IslandConfig::from_toml_str("resolution = 0"),
            Err(ConfigError::InvalidResolution(0))
        ));
        assert!(matches!(
            IslandConfig::from_toml_str("resolution = \"high\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = IslandConfig::load_from_file("does/not/exist/island.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
