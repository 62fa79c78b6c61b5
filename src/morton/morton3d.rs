/// Morton encoding/decoding for 3D integer coordinates
///
/// Uses magic-number bit spreading so the cost does not grow with the
/// number of bits per axis.

/// Largest supported bit width per axis (3 * 21 = 63 bits fit in a u64)
pub const MAX_BITS_PER_AXIS: u32 = 21;

const AXIS_MASK: u64 = (1 << MAX_BITS_PER_AXIS) - 1;

/// Bits of the x axis inside a code; y and z are this mask shifted by 1 and 2
pub const MAGIC_X: u64 = 0x1249249249249249;
pub const MAGIC_Y: u64 = MAGIC_X << 1;
pub const MAGIC_Z: u64 = MAGIC_X << 2;

/// Spreads the low 21 bits of `v` to every 3rd bit
#[inline(always)]
pub fn spread_bits(v: u32) -> u64 {
    let mut x = v as u64 & AXIS_MASK;
    x = (x | (x << 32)) & 0x001F00000000FFFF;
    x = (x | (x << 16)) & 0x001F0000FF0000FF;
    x = (x | (x << 8)) & 0x100F00F00F00F00F;
    x = (x | (x << 4)) & 0x10C30C30C30C30C3;
    x = (x | (x << 2)) & MAGIC_X;
    x
}

/// Compacts every 3rd bit back to a 21-bit integer
#[inline(always)]
pub fn compact_bits(v: u64) -> u32 {
    let mut x = v & MAGIC_X;
    x = (x | (x >> 2)) & 0x10C30C30C30C30C3;
    x = (x | (x >> 4)) & 0x100F00F00F00F00F;
    x = (x | (x >> 8)) & 0x001F0000FF0000FF;
    x = (x | (x >> 16)) & 0x001F00000000FFFF;
    x = (x | (x >> 32)) & AXIS_MASK;
    x as u32
}

/// Encode 3D coordinates into Morton code (Z-order)
///
/// Bit `i` of x lands on bit `3i`, y on `3i + 1` and z on `3i + 2`.
/// Supports up to 21 bits per coordinate.
#[inline(always)]
pub fn morton_encode(x: u32, y: u32, z: u32) -> u64 {
    debug_assert!(x < (1 << MAX_BITS_PER_AXIS), "x coordinate too large for Morton encoding");
    debug_assert!(y < (1 << MAX_BITS_PER_AXIS), "y coordinate too large for Morton encoding");
    debug_assert!(z < (1 << MAX_BITS_PER_AXIS), "z coordinate too large for Morton encoding");

    spread_bits(x) | (spread_bits(y) << 1) | (spread_bits(z) << 2)
}

/// Decode Morton code back to 3D coordinates
#[inline(always)]
pub fn morton_decode(morton: u64) -> (u32, u32, u32) {
    let x = compact_bits(morton);
    let y = compact_bits(morton >> 1);
    let z = compact_bits(morton >> 2);
    (x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Per-bit interleave, kept as the oracle for the magic-number version
    fn spread_bits_reference(v: u32) -> u64 {
        let mut result = 0u64;
        for i in 0..MAX_BITS_PER_AXIS {
            if (v >> i) & 1 != 0 {
                result |= 1u64 << (i * 3);
            }
        }
        result
    }

    #[test]
    fn test_spread_matches_reference() {
        let samples = [
            0u32, 1, 2, 3, 0x155555, 0x0AAAAA, 0x1FFFFF, 1023, 1024, 123_456, 2_000_000,
        ];
        for v in samples {
            assert_eq!(spread_bits(v), spread_bits_reference(v), "Failed for {:#x}", v);
        }
        for shift in 0..MAX_BITS_PER_AXIS {
            let v = 1u32 << shift;
            assert_eq!(spread_bits(v), spread_bits_reference(v));
        }
    }

    #[test]
    fn test_spread_ignores_high_bits() {
        assert_eq!(spread_bits(1 << 21), 0);
        assert_eq!(spread_bits(u32::MAX), spread_bits(0x1FFFFF));
    }

    #[test]
    fn test_morton_encode_decode() {
        let test_cases = [
            (0, 0, 0),
            (1, 1, 1),
            (7, 7, 7),
            (15, 15, 15),
            (100, 200, 50),
            (1000, 2000, 500),
            (0x1FFFFF, 0, 0x1FFFFF),
        ];

        for (x, y, z) in test_cases {
            let morton = morton_encode(x, y, z);
            let (dx, dy, dz) = morton_decode(morton);
            assert_eq!((x, y, z), (dx, dy, dz), "Failed for ({}, {}, {})", x, y, z);
        }
    }

    #[test]
    fn test_axis_bit_positions() {
        assert_eq!(morton_encode(0, 0, 0), 0);
        assert_eq!(morton_encode(1, 0, 0), 1);
        assert_eq!(morton_encode(0, 1, 0), 2);
        assert_eq!(morton_encode(0, 0, 1), 4);
        assert_eq!(morton_encode(1, 1, 1), 7);
        assert_eq!(morton_encode(2, 0, 0), 8);
    }

    #[test]
    fn test_full_width_fills_63_bits() {
        let max = (1 << MAX_BITS_PER_AXIS) - 1;
        assert_eq!(morton_encode(max, 0, 0), MAGIC_X);
        assert_eq!(morton_encode(0, max, 0), MAGIC_Y);
        assert_eq!(morton_encode(0, 0, max), MAGIC_Z);
        assert_eq!(morton_encode(max, max, max), u64::MAX >> 1);
    }

    #[test]
    fn test_morton_locality() {
        let base = morton_encode(100, 100, 100);
        let neighbor = morton_encode(101, 100, 100);

        assert!((neighbor as i64 - base as i64).abs() < 100);
    }
}
