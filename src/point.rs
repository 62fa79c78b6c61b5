//! Point types accepted by the encoder

use glam::Vec3;

/// Anything that can be read as an `(x, y, z)` triple.
pub trait Point3 {
    fn coords(&self) -> [f32; 3];
}

impl Point3 for [f32; 3] {
    #[inline(always)]
    fn coords(&self) -> [f32; 3] {
        *self
    }
}

impl Point3 for (f32, f32, f32) {
    #[inline(always)]
    fn coords(&self) -> [f32; 3] {
        [self.0, self.1, self.2]
    }
}

impl Point3 for Vec3 {
    #[inline(always)]
    fn coords(&self) -> [f32; 3] {
        self.to_array()
    }
}
