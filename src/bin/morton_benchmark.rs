use anyhow::{Context, Result};
use morton_encoding::{EncoderConfig, MortonEncoder};
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

const BATCH_SIZES: &[usize] = &[1_000, 100_000, 1_000_000, 4_000_000];
const ITERATIONS: u32 = 10;

fn random_points(count: usize, seed: u64) -> Vec<[f32; 3]> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            [
                rng.gen_range(-500.0..500.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(0.0..1000.0),
            ]
        })
        .collect()
}

fn time_encoder(encoder: &MortonEncoder, points: &[[f32; 3]]) -> Result<(Duration, u64)> {
    let start = Instant::now();
    let mut checksum = 0u64;
    for _ in 0..ITERATIONS {
        let codes = encoder.encode(points)?;
        checksum ^= codes.iter().fold(0u64, |acc, &c| acc.wrapping_add(c));
        std::hint::black_box(&codes);
    }
    Ok((start.elapsed() / ITERATIONS, checksum))
}

/// Usage: morton_benchmark [config.toml]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let base = match std::env::args().nth(1) {
        Some(path) => EncoderConfig::from_toml_file(&path)
            .with_context(|| format!("Failed to load encoder config from {}", path))?,
        None => EncoderConfig::default(),
    };

    println!("Morton Encoding Batch Benchmark");
    println!("===============================\n");
    println!("Configuration:");
    println!("  Bits per axis: {}", base.bits_per_axis);
    println!("  Parallel threshold: {}", base.parallel_threshold);
    println!("  CPU cores: {}", num_cpus::get());
    println!();

    let sequential = MortonEncoder::new(base.clone().with_parallel_threshold(usize::MAX))?;
    let parallel = MortonEncoder::new(base.with_parallel_threshold(0))?;
    log::info!("Parallel encoder running on {} threads", parallel.num_threads());

    for &count in BATCH_SIZES {
        let points = random_points(count, 0x5EED ^ count as u64);

        let (seq_time, seq_sum) = time_encoder(&sequential, &points)?;
        let (par_time, par_sum) = time_encoder(&parallel, &points)?;
        anyhow::ensure!(
            seq_sum == par_sum,
            "Sequential and parallel codes differ for {} points",
            count
        );

        println!("{} points", count);
        println!(
            "  Sequential: {:?} ({:.1} Mpts/s)",
            seq_time,
            count as f64 / seq_time.as_secs_f64() / 1e6
        );
        println!(
            "  Parallel:   {:?} ({:.1} Mpts/s, {:.2}x speedup)",
            par_time,
            count as f64 / par_time.as_secs_f64() / 1e6,
            seq_time.as_secs_f64() / par_time.as_secs_f64()
        );
    }

    Ok(())
}
