//! Image codec module
//!
//! Lossy compression of canonical 8-bit frames and the statistics used to
//! verify that reconstructions stay within tolerance.

mod frame_codec;
mod jpeg_codec;
pub mod tolerance;
pub mod types;

pub use frame_codec::FrameCodec;
pub use jpeg_codec::JpegCodec;
pub use tolerance::{DeviationStats, Tolerance, compare};
pub use types::{EncodedImage, MAX_QUALITY, MIN_QUALITY};
