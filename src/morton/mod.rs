/// Morton encoding (Z-order curve) of 3D point batches
///
/// Points are normalized into the cube spanned by their own batch,
/// quantized to `bits_per_axis` bits per axis and bit-interleaved so that
/// spatially close points get numerically close codes.

pub mod bounds;
pub mod encoder;
pub mod morton3d;
pub mod quantize;

pub use bounds::BoundingCube;
pub use encoder::{encode_points, MortonEncoder};
pub use morton3d::{compact_bits, morton_decode, morton_encode, spread_bits, MAX_BITS_PER_AXIS};
pub use quantize::Quantizer;

// Code layout: bit i of x sits at 3i, y at 3i + 1, z at 3i + 2.
// With the default 21 bits per axis a code fills the low 63 bits of a u64.
// Comparing codes is a locality hint, not a distance metric.
