//! Image processing pipeline module
//!
//! Sensor frames of 8 or 16 bits per sample are normalized to a canonical
//! 8-bit form, compressed with a standard lossy codec and decoded again.
//! Packed sensor formats, orientation transforms and lossless golden files
//! sit alongside the codec.

pub mod codec;
pub mod common;
pub mod conversions;
pub mod convert;
pub mod frame;
pub mod golden;
pub mod transform;

#[cfg(test)]
pub(crate) mod test_frames;

pub use common::{FrameError, Result};

pub use frame::{Frame, Orientation, RawLayout, Rotation, Samples};

pub use convert::{
    CANONICAL_BIT_DEPTH, denormalize, normalize, scale_to_full_range, unpack_mono_packed,
    unpack_mono12_packed,
};

pub use transform::{flip, rotate};

pub use codec::{DeviationStats, EncodedImage, FrameCodec, JpegCodec, Tolerance, compare};

pub use golden::{GoldenConfig, GoldenConfigBuilder, StandardTiffWriter, TiffCompression, TiffWriter, read_tiff_frame};

pub use conversions::{CodecConfig, CodecConfigBuilder, RoundTripPipeline, RoundTripReport};
