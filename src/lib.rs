//! Morton (Z-order) codes for batches of 3D points.
//!
//! ```
//! use morton_encoding::encode_points;
//!
//! let codes = encode_points(&[[0.0f32, 0.0, 0.0], [5.0, 2.0, 1.0]]).unwrap();
//! assert_eq!(codes.len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod morton;
pub mod point;

pub use config::EncoderConfig;
pub use error::{MortonError, MortonResult};
pub use morton::{encode_points, morton_decode, morton_encode, BoundingCube, MortonEncoder};
pub use point::Point3;
