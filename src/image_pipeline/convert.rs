//! Format conversion module
//!
//! Lossless reshaping of sensor formats and the lossy 16 → 8 bit reduction
//! required before compression.

mod depth;
mod unpack;

pub use depth::{CANONICAL_BIT_DEPTH, denormalize, normalize, scale_to_full_range};
pub use unpack::{unpack_mono12_packed, unpack_mono_packed};
