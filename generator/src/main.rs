use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use colorgrad::Gradient;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use rand::thread_rng;

use island_terrain::prelude::*;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    Small,
    Medium,
    Large,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Detail {
    Low,
    Medium,
    High,
}

impl From<Detail> for ResolutionPreset {
    fn from(detail: Detail) -> Self {
        match detail {
            Detail::Low => ResolutionPreset::Low,
            Detail::Medium => ResolutionPreset::Medium,
            Detail::High => ResolutionPreset::High,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with island settings; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start from a named island size instead of the defaults
    #[arg(short, long, value_enum)]
    preset: Option<Preset>,

    /// Chunks along X
    #[arg(long)]
    world_x: Option<i32>,

    /// Chunks along Z
    #[arg(long)]
    world_z: Option<i32>,

    /// Grid subdivisions per chunk edge
    #[arg(short, long, conflicts_with = "detail")]
    resolution: Option<u32>,

    /// Named resolution
    #[arg(long, value_enum)]
    detail: Option<Detail>,

    /// Island radius in world units
    #[arg(long)]
    island_radius: Option<f32>,

    /// Primary noise frequency, conventionally within [0, 0.015]
    #[arg(long)]
    noise_scale: Option<f32>,

    /// Offset applied to the primary noise input
    #[arg(short, long, conflicts_with = "random_seed")]
    seed: Option<f32>,

    /// Pick a random seed in [0, 10000)
    #[arg(long)]
    random_seed: bool,

    /// Maximum island height
    #[arg(long)]
    height: Option<f32>,

    /// Layer extra fixed-frequency noise for a bumpier surface
    #[arg(long)]
    secondary_noise: bool,

    /// Worker threads for parallel generation; 0 uses every core
    #[arg(short, long, default_value_t = 0)]
    threads: usize,

    /// Generate one chunk at a time on the main thread
    #[arg(long)]
    serial: bool,

    /// The output PNG file path
    #[arg(short, long, default_value = "target/island.png")]
    output: PathBuf,

    /// Outline each chunk on the height image
    #[arg(long)]
    wireframe: bool,

    /// Pixels per vertex when rendering the image
    #[arg(long, default_value_t = 2)]
    scale: u32,
}

impl Args {
    fn island_config(&self) -> Result<IslandConfig, ConfigError> {
        let mut config = match (&self.config, self.preset) {
            (Some(path), _) => IslandConfig::load_from_file(path)?,
            (None, Some(Preset::Small)) => IslandConfig::small(),
            (None, Some(Preset::Medium)) => IslandConfig::medium(),
            (None, Some(Preset::Large)) => IslandConfig::large(),
            (None, None) => IslandConfig::default(),
        };

        if let Some(x) = self.world_x {
            config.world_size.x = x;
        }
        if let Some(z) = self.world_z {
            config.world_size.z = z;
        }
        if let Some(detail) = self.detail {
            config = config.with_resolution(detail.into());
        }
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if let Some(radius) = self.island_radius {
            config.island_radius = radius;
        }
        if let Some(scale) = self.noise_scale {
            config.noise_scale = scale;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.random_seed {
            let seed = config.randomize_seed(&mut thread_rng());
            log::info!("Using random seed {}", seed);
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.secondary_noise {
            config.secondary_noise = true;
        }

        config.validate()?;
        Ok(config)
    }
}

struct TerrainVisualizer {
    gradient: Gradient,
}

impl TerrainVisualizer {
    fn new() -> Result<Self, Box<dyn Error>> {
        let gradient = colorgrad::CustomGradient::new()
            .colors(&[
                colorgrad::Color::new(0.0, 0.0, 0.5, 1.0),   // Deep water
                colorgrad::Color::new(0.0, 0.0, 1.0, 1.0),   // Shallow water
                colorgrad::Color::new(0.9, 0.9, 0.2, 1.0),   // Beach
                colorgrad::Color::new(0.0, 0.6, 0.0, 1.0),   // Grass
                colorgrad::Color::new(0.5, 0.3, 0.0, 1.0),   // Mountain
                colorgrad::Color::new(1.0, 1.0, 1.0, 1.0),   // Snow
            ])
            .domain(&[0.0, 0.3, 0.35, 0.4, 0.8, 1.0])
            .build()
            .map_err(|e| format!("invalid height gradient: {:?}", e))?;

        Ok(Self { gradient })
    }

    /// Top-down height image of the whole island, one sample per vertex.
    fn render_heights(&self, chunks: &[GeneratedChunk], config: &IslandConfig, scale: u32) -> RgbImage {
        let res = config.resolution as usize;
        let dim = res + 1;
        let samples_x = config.world_size.x.max(0) as usize * res + 1;
        let samples_z = config.world_size.z.max(0) as usize * res + 1;

        let mut combined = vec![0.0_f32; samples_x * samples_z];
        for chunk in chunks {
            let base_x = chunk.coords.x as usize * res;
            let base_z = chunk.coords.z as usize * res;
            for x in 0..dim {
                for z in 0..dim {
                    let h = chunk.mesh.vertices[x * dim + z].y;
                    combined[(base_z + z) * samples_x + base_x + x] = h;
                }
            }
        }

        let (lo, hi) = combined
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| (lo.min(h), hi.max(h)));
        let range = if hi > lo { hi - lo } else { 1.0 };

        let mut img = RgbImage::new(samples_x as u32 * scale, samples_z as u32 * scale);
        for z in 0..samples_z {
            for x in 0..samples_x {
                let color = {
                    let h = combined[z * samples_x + x];
                    let c = self.gradient.at(((h - lo) / range) as f64);
                    Rgb([(c.r * 255.0) as u8, (c.g * 255.0) as u8, (c.b * 255.0) as u8])
                };
                for dy in 0..scale {
                    for dx in 0..scale {
                        img.put_pixel(x as u32 * scale + dx, z as u32 * scale + dy, color);
                    }
                }
            }
        }
        img
    }

    /// Outlines every chunk's square footprint over `base`.
    fn wireframe_on_heightmap(base: &RgbImage, chunks: &[GeneratedChunk], config: &IslandConfig, scale: u32) -> RgbImage {
        let mut img = base.clone();
        let (w, h) = img.dimensions();
        let color = Rgb([255, 0, 0]);
        let pixels_per_unit = config.resolution as f32 / CHUNK_SIZE * scale as f32;
        let to_pixel = |x: f32, z: f32| {
            (
                (x * pixels_per_unit).clamp(0.0, w as f32 - 1.0),
                (z * pixels_per_unit).clamp(0.0, h as f32 - 1.0),
            )
        };

        for chunk in chunks {
            let t = chunk.placement.translation;
            let corners = [
                to_pixel(t.x, t.z),
                to_pixel(t.x + CHUNK_SIZE, t.z),
                to_pixel(t.x + CHUNK_SIZE, t.z + CHUNK_SIZE),
                to_pixel(t.x, t.z + CHUNK_SIZE),
            ];
            for i in 0..corners.len() {
                draw_line_segment_mut(&mut img, corners[i], corners[(i + 1) % corners.len()], color);
            }
        }
        img
    }
}

fn generate(manager: &ChunkManager, args: &Args) -> Result<Vec<GeneratedChunk>, Box<dyn Error>> {
    let registry = ChunkRegistry::new();
    if args.serial {
        manager.generate_all(&registry);
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build()?;
        log::info!("Generating on {} threads", pool.current_num_threads());
        pool.install(|| manager.par_generate_all(&registry));
    }
    Ok(registry.into_chunks())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = args.island_config()?;
    let manager = ChunkManager::new(config)?;
    let visualizer = TerrainVisualizer::new()?;

    let chunks = generate(&manager, &args)?;

    let vertices: usize = chunks.iter().map(|c| c.mesh.vertex_count()).sum();
    let triangles: usize = chunks.iter().map(|c| c.mesh.triangle_count()).sum();
    let peak = chunks
        .iter()
        .map(|c| c.mesh.bounds.max.y)
        .fold(0.0_f32, f32::max);
    log::info!(
        "Island has {} chunks, {} vertices, {} triangles, peak height {:.2}, offset {:.2}",
        chunks.len(),
        vertices,
        triangles,
        peak,
        manager.vertical_offset()
    );

    if chunks.is_empty() {
        log::warn!("World size is empty, nothing to render");
        return Ok(());
    }

    log::info!("Saving island preview to {}...", args.output.display());
    let mut img = visualizer.render_heights(&chunks, manager.config(), args.scale);
    if args.wireframe {
        img = TerrainVisualizer::wireframe_on_heightmap(&img, &chunks, manager.config(), args.scale);
    }
    img.save(&args.output)?;
    log::info!("Done!");
    Ok(())
}
