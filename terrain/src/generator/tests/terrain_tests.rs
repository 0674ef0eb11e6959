use crate::{
    config::{GenerationSettings, IslandConfig, WorldSize},
    coords::ChunkCoords,
    generator::TerrainGenerator,
};

fn generator(config: IslandConfig) -> TerrainGenerator {
    TerrainGenerator::new(GenerationSettings::from_config(&config))
}

fn base_config() -> IslandConfig {
    IslandConfig {
        world_size: WorldSize::new(3, 3),
        resolution: 8,
        noise_scale: 0.012,
        seed: 17.0,
        ..IslandConfig::default()
    }
}

#[test]
fn test_generation_is_deterministic() {
    let origin = ChunkCoords::new(1, 2).origin();
    let a = generator(base_config()).generate(origin);
    let b = generator(base_config()).generate(origin);

    assert_eq!(a, b);
    let bits = |m: &crate::mesh::ChunkMesh| m.vertices.iter().map(|v| v.y.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn test_seed_keeps_topology() {
    let origin = ChunkCoords::new(1, 1).origin();
    let a = generator(base_config()).generate(origin);
    let b = generator(IslandConfig { seed: 18.0, ..base_config() }).generate(origin);

    assert_eq!(a.vertices.len(), b.vertices.len());
    assert_eq!(a.indices, b.indices);
    assert_eq!(a.uvs, b.uvs);
    assert!(a.vertices.iter().zip(&b.vertices).any(|(p, q)| p.y != q.y));
}

#[test]
fn test_zero_height_mesh_is_flat() {
    let config = IslandConfig { height: 0.0, secondary_noise: true, ..base_config() };
    let mesh = generator(config).generate(ChunkCoords::new(2, 0).origin());
    assert!(mesh.vertices.iter().all(|v| v.y == 0.0));
    assert_eq!(mesh.bounds.size().y, 0.0);
}

#[test]
fn test_degenerate_radius_still_meshes() {
    for island_radius in [0.0, -10.0] {
        let mesh = generator(IslandConfig { island_radius, ..base_config() })
            .generate(ChunkCoords::new(0, 0).origin());
        assert_eq!(mesh.vertices.len(), 81);
        assert!(mesh.vertices.iter().all(|v| v.y.is_finite()));
        assert!(mesh.normals.iter().all(|n| n.y.is_finite()));
    }
}

#[test]
fn test_neighbouring_chunks_share_edges() {
    let terrain = generator(base_config());
    let a = terrain.generate(ChunkCoords::new(0, 1).origin());
    let b = terrain.generate(ChunkCoords::new(0, 2).origin());

    // far z edge of `a` against near z edge of `b`
    let dim = 9;
    for x in 0..dim {
        let left = a.vertices[x * dim + dim - 1];
        let right = b.vertices[x * dim];
        assert_eq!(left.y, right.y);
        assert_eq!(a.uvs[x * dim + dim - 1], b.uvs[x * dim]);
    }
}
