//! Bit-depth conversion between sensor frames and the canonical 8-bit frame.

use crate::image_pipeline::common::error::{FrameError, Result};
use crate::image_pipeline::frame::{Frame, Samples};

/// Bit depth the codec works in.
pub const CANONICAL_BIT_DEPTH: u32 = 8;

/// Converts a frame to the canonical 8-bit representation.
///
/// 8-bit frames come back unchanged. 16-bit samples are truncated to their
/// high byte (`s / 256`, no rounding); the tolerance contract of the codec
/// is calibrated against this truncation. Channel order and orientation are
/// preserved.
pub fn normalize(frame: &Frame) -> Result<Frame> {
    match frame.samples() {
        Samples::Eight(_) => Ok(frame.clone()),
        Samples::Sixteen(data) => {
            let truncated: Vec<u8> = data.iter().map(|&s| (s >> 8) as u8).collect();
            Ok(Frame::from_u8(frame.width(), frame.height(), frame.channels(), truncated)?
                .with_orientation(frame.orientation()))
        }
    }
}

/// Expands a canonical 8-bit frame back to `target_bit_depth`.
///
/// 8 → 8 is the identity; 8 → 16 places each sample in the high byte
/// (`s * 256`), so `normalize(denormalize(f, 16)) == f`.
///
/// # Errors
///
/// * `UnsupportedBitDepthError` - the input is not 8-bit, or the target is
///   neither 8 nor 16
pub fn denormalize(frame: &Frame, target_bit_depth: u32) -> Result<Frame> {
    let data = match frame.samples() {
        Samples::Eight(data) => data,
        Samples::Sixteen(_) => return Err(FrameError::UnsupportedBitDepthError(frame.bit_depth())),
    };

    match target_bit_depth {
        8 => Ok(frame.clone()),
        16 => {
            let expanded: Vec<u16> = data.iter().map(|&s| (s as u16) << 8).collect();
            Ok(Frame::from_u16(frame.width(), frame.height(), frame.channels(), expanded)?
                .with_orientation(frame.orientation()))
        }
        other => Err(FrameError::UnsupportedBitDepthError(other)),
    }
}

/// Shifts the samples of a 16-bit frame whose sensor resolution is below 16
/// bits up to the full container range.
///
/// Without this step a 12-bit image normalizes to values below 16.
/// Frames that are 8-bit or already full-range are returned unchanged.
pub fn scale_to_full_range(frame: &Frame) -> Result<Frame> {
    let data = match frame.samples() {
        Samples::Eight(_) => return Ok(frame.clone()),
        Samples::Sixteen(data) => data,
    };

    let shift = 16 - frame.significant_bits();
    if shift == 0 {
        return Ok(frame.clone());
    }

    // values above the declared resolution would overflow the shift
    let mask = u16::MAX >> shift;
    let scaled: Vec<u16> = data.iter().map(|&s| (s & mask) << shift).collect();
    Ok(Frame::from_u16(frame.width(), frame.height(), frame.channels(), scaled)?
        .with_orientation(frame.orientation()))
}
