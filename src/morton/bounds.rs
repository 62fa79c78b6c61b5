//! Bounding cube of a point batch
//!
//! The cube is anchored at the componentwise minimum of the batch and its
//! side is the largest axis extent, so every point of the batch fits inside.

use rayon::prelude::*;

use crate::error::{MortonError, MortonResult};
use crate::point::Point3;

/// Axis-aligned cube used as the normalization domain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCube {
    pub min: [f32; 3],
    /// Side length, taken as an f64 difference so finite extents never overflow
    pub size: f64,
}

/// Running min/max accumulator. Associative and commutative, so it can be
/// folded per rayon split and merged in any order.
#[derive(Debug, Clone, Copy)]
struct Extent {
    min: [f32; 3],
    max: [f32; 3],
}

impl Extent {
    fn empty() -> Self {
        Self {
            min: [f32::INFINITY; 3],
            max: [f32::NEG_INFINITY; 3],
        }
    }

    #[inline(always)]
    fn include(mut self, p: [f32; 3]) -> Self {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(p[axis]);
            self.max[axis] = self.max[axis].max(p[axis]);
        }
        self
    }

    fn merge(mut self, other: Self) -> Self {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(other.min[axis]);
            self.max[axis] = self.max[axis].max(other.max[axis]);
        }
        self
    }

    fn into_cube(self) -> BoundingCube {
        let size = (0..3)
            .map(|axis| f64::from(self.max[axis]) - f64::from(self.min[axis]))
            .fold(f64::NEG_INFINITY, f64::max);

        let cube = BoundingCube { min: self.min, size };
        if !cube.is_finite() {
            log::warn!(
                "Bounding cube is not finite (min {:?}, size {}); codes are unspecified",
                cube.min,
                cube.size
            );
        }
        cube
    }
}

impl BoundingCube {
    pub fn new(min: [f32; 3], size: f64) -> Self {
        Self { min, size }
    }

    /// Single fused min/max pass over the batch
    pub fn from_points<P: Point3>(points: &[P]) -> MortonResult<Self> {
        if points.is_empty() {
            return Err(MortonError::EmptyBatch);
        }

        let extent = points
            .iter()
            .fold(Extent::empty(), |acc, p| acc.include(p.coords()));
        Ok(extent.into_cube())
    }

    /// Tree reduction of the same min/max on the current rayon pool
    pub fn par_from_points<P: Point3 + Sync>(points: &[P]) -> MortonResult<Self> {
        if points.is_empty() {
            return Err(MortonError::EmptyBatch);
        }

        let extent = points
            .par_iter()
            .fold(Extent::empty, |acc, p| acc.include(p.coords()))
            .reduce(Extent::empty, Extent::merge);
        Ok(extent.into_cube())
    }

    pub fn max(&self) -> [f32; 3] {
        self.min.map(|v| (f64::from(v) + self.size) as f32)
    }

    /// All points coincide; every point quantizes to the origin cell
    pub fn is_degenerate(&self) -> bool {
        // also catches a NaN size
        !(self.size > 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.min.iter().all(|v| v.is_finite()) && self.size.is_finite()
    }
}
