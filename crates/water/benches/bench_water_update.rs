use std::hint::black_box;
use std::time::Instant;

use lagoon_noise::{NoiseConfig, NoiseSynthesizer};
use lagoon_water::{GridMesh, WaterSurfaceSimulator};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn make_simulator() -> WaterSurfaceSimulator {
    let mut rng = StdRng::seed_from_u64(42);
    let config = NoiseConfig::new(0.3, 0.5, 6);
    let x = NoiseSynthesizer::from_config(&config, &mut rng).expect("valid noise config");
    let z = NoiseSynthesizer::from_config(&config, &mut rng).expect("valid noise config");
    WaterSurfaceSimulator::new(x, z)
}

fn bench_update(segments: usize, iterations: usize) {
    let sim = make_simulator();
    let mut mesh = GridMesh::new(100.0, 100.0, segments, segments).expect("valid grid");

    let start = Instant::now();
    for i in 0..iterations {
        sim.update(black_box(&mut mesh), i as f64 / 60.0);
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  update ({} vertices, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        mesh.vertex_count()
    );
}

fn bench_displace_only(segments: usize, iterations: usize) {
    let sim = make_simulator();
    let mesh = GridMesh::new(100.0, 100.0, segments, segments).expect("valid grid");
    let mut positions = lagoon_common::SurfaceMesh::positions(&mesh).to_vec();

    let start = Instant::now();
    for i in 0..iterations {
        sim.displace(black_box(&mut positions), i as f64 / 60.0);
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  displace ({} vertices, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        positions.len()
    );
}

fn main() {
    println!("=== water surface benchmarks ===");
    for segments in [32, 64, 128] {
        bench_update(segments, 100);
        bench_displace_only(segments, 100);
    }
}
