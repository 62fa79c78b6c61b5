//! Float to integer grid quantization
//!
//! Offsets from the cube minimum are f64 subtractions of f32 operands, the
//! same operation that produced the cube size, so the point that defines the
//! size normalizes to exactly 1.0 and finite extents never overflow.

use super::bounds::BoundingCube;
use super::morton3d::{morton_encode, MAX_BITS_PER_AXIS};
use crate::error::{MortonError, MortonResult};

#[derive(Debug, Clone, Copy)]
pub struct Quantizer {
    min: [f32; 3],
    size: f64,
    max_cell: f64,
    degenerate: bool,
}

impl Quantizer {
    /// Fails with [`MortonError::InvalidBitWidth`] unless `bits` is in `1..=21`.
    pub fn new(cube: &BoundingCube, bits: u32) -> MortonResult<Self> {
        if bits == 0 || bits > MAX_BITS_PER_AXIS {
            return Err(MortonError::InvalidBitWidth { bits });
        }
        Ok(Self {
            min: cube.min,
            size: cube.size,
            max_cell: ((1u64 << bits) - 1) as f64,
            degenerate: cube.is_degenerate(),
        })
    }

    /// Largest cell index on each axis (`2^bits - 1`)
    pub fn max_cell(&self) -> u32 {
        self.max_cell as u32
    }

    #[inline(always)]
    fn quantize_axis(&self, value: f32, axis: usize) -> u32 {
        if self.degenerate {
            return 0;
        }
        let normalized = (f64::from(value) - f64::from(self.min[axis])) / self.size;
        // clamp before the cast so out-of-cube values saturate instead of
        // spilling into the neighbouring axis bits; NaN casts to 0
        (normalized * self.max_cell).floor().clamp(0.0, self.max_cell) as u32
    }

    #[inline(always)]
    pub fn quantize(&self, p: [f32; 3]) -> [u32; 3] {
        [
            self.quantize_axis(p[0], 0),
            self.quantize_axis(p[1], 1),
            self.quantize_axis(p[2], 2),
        ]
    }

    #[inline(always)]
    pub fn encode(&self, p: [f32; 3]) -> u64 {
        let [x, y, z] = self.quantize(p);
        morton_encode(x, y, z)
    }
}
