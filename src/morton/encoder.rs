//! Batch Morton encoder
//!
//! Runs the bounding reduction, then quantizes and interleaves every point.
//! Small batches stay on the calling thread; larger ones go through rayon,
//! writing into disjoint slices of the output so order always matches input.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::bounds::BoundingCube;
use super::quantize::Quantizer;
use crate::config::EncoderConfig;
use crate::error::{MortonError, MortonResult};
use crate::point::Point3;

/// Points handed to one rayon task at minimum
const MIN_SPLIT_LEN: usize = 1024;

/// Encodes point batches into 3 * `bits_per_axis` bit Morton codes.
#[derive(Default)]
pub struct MortonEncoder {
    config: EncoderConfig,
    pool: Option<ThreadPool>,
}

impl std::fmt::Debug for MortonEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MortonEncoder")
            .field("config", &self.config)
            .field("dedicated_pool", &self.pool.is_some())
            .finish()
    }
}

impl MortonEncoder {
    pub fn new(config: EncoderConfig) -> MortonResult<Self> {
        config.validate()?;

        let pool = match config.num_threads {
            Some(num_threads) => {
                log::debug!("Building Morton encoder pool with {} threads", num_threads);
                Some(
                    ThreadPoolBuilder::new()
                        .num_threads(num_threads)
                        .thread_name(|i| format!("morton-encode-{}", i))
                        .build()?,
                )
            }
            None => None,
        };

        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn bits_per_axis(&self) -> u32 {
        self.config.bits_per_axis
    }

    /// Number of threads a parallel call will use
    pub fn num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    fn is_parallel(&self, len: usize) -> bool {
        len >= self.config.parallel_threshold
    }

    fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Bounding cube of `points`, reduced in parallel for large batches
    pub fn bounds<P: Point3 + Sync>(&self, points: &[P]) -> MortonResult<BoundingCube> {
        if self.is_parallel(points.len()) {
            self.install(|| BoundingCube::par_from_points(points))
        } else {
            BoundingCube::from_points(points)
        }
    }

    /// Morton codes of `points`, normalized to the batch's own bounding cube.
    ///
    /// Fails with [`MortonError::EmptyBatch`] when `points` is empty.
    /// NaN or infinite coordinates never panic but their codes are
    /// unspecified.
    pub fn encode<P: Point3 + Sync>(&self, points: &[P]) -> MortonResult<Vec<u64>> {
        let cube = self.bounds(points)?;
        self.encode_with_cube(points, &cube)
    }

    /// Morton codes of `points` against a caller-supplied cube. Coordinates
    /// outside the cube are clamped onto its faces.
    pub fn encode_with_cube<P: Point3 + Sync>(
        &self,
        points: &[P],
        cube: &BoundingCube,
    ) -> MortonResult<Vec<u64>> {
        let mut codes = vec![0u64; points.len()];
        self.encode_into_with_cube(points, cube, &mut codes)?;
        Ok(codes)
    }

    /// Like [`encode`](Self::encode) but writes into `out`, which must have
    /// the same length as `points`.
    pub fn encode_into<P: Point3 + Sync>(&self, points: &[P], out: &mut [u64]) -> MortonResult<()> {
        check_output_len(points.len(), out.len())?;
        let cube = self.bounds(points)?;
        self.encode_into_with_cube(points, &cube, out)
    }

    /// Row-major `N x 3` coordinate buffer
    pub fn encode_flat(&self, coords: &[f32]) -> MortonResult<Vec<u64>> {
        let points: &[[f32; 3]] = bytemuck::try_cast_slice(coords)
            .map_err(|_| MortonError::MalformedBuffer { len: coords.len() })?;
        self.encode(points)
    }

    /// Per-axis grid coordinates each point is interleaved from
    pub fn quantize<P: Point3 + Sync>(&self, points: &[P]) -> MortonResult<Vec<[u32; 3]>> {
        let cube = self.bounds(points)?;
        let quantizer = Quantizer::new(&cube, self.config.bits_per_axis)?;

        if self.is_parallel(points.len()) {
            Ok(self.install(|| {
                points
                    .par_iter()
                    .with_min_len(MIN_SPLIT_LEN)
                    .map(|p| quantizer.quantize(p.coords()))
                    .collect::<Vec<_>>()
            }))
        } else {
            Ok(points.iter().map(|p| quantizer.quantize(p.coords())).collect())
        }
    }

    fn encode_into_with_cube<P: Point3 + Sync>(
        &self,
        points: &[P],
        cube: &BoundingCube,
        out: &mut [u64],
    ) -> MortonResult<()> {
        check_output_len(points.len(), out.len())?;
        let quantizer = Quantizer::new(cube, self.config.bits_per_axis)?;

        if self.is_parallel(points.len()) {
            log::debug!(
                "Encoding {} points on {} threads, cube min {:?} size {}",
                points.len(),
                self.num_threads(),
                cube.min,
                cube.size
            );
            self.install(|| {
                out.par_iter_mut()
                    .zip(points.par_iter())
                    .with_min_len(MIN_SPLIT_LEN)
                    .for_each(|(code, p)| *code = quantizer.encode(p.coords()));
            });
        } else {
            log::trace!(
                "Encoding {} points sequentially, cube min {:?} size {}",
                points.len(),
                cube.min,
                cube.size
            );
            for (code, p) in out.iter_mut().zip(points) {
                *code = quantizer.encode(p.coords());
            }
        }
        Ok(())
    }
}

fn check_output_len(expected: usize, actual: usize) -> MortonResult<()> {
    if expected != actual {
        return Err(MortonError::OutputLength { expected, actual });
    }
    Ok(())
}

/// Encode with the default configuration (21 bits per axis, global pool)
pub fn encode_points<P: Point3 + Sync>(points: &[P]) -> MortonResult<Vec<u64>> {
    MortonEncoder::default().encode(points)
}
