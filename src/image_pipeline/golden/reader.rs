//! Golden-file loading

use std::io::Cursor;

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tracing::debug;

use crate::image_pipeline::common::error::{FrameError, Result};
use crate::image_pipeline::frame::Frame;

fn corrupt(e: tiff::TiffError) -> FrameError {
    FrameError::CorruptStreamError(e.to_string())
}

/// Loads a grayscale or RGB TIFF written by
/// [`StandardTiffWriter`](crate::image_pipeline::golden::StandardTiffWriter)
/// back into a frame.
///
/// # Errors
///
/// * `CorruptStreamError` - not a readable TIFF
/// * `UnsupportedChannelLayoutError` - anything but gray or RGB, including
///   palette, CMYK and YCbCr images
/// * `UnsupportedBitDepthError` - samples that are neither 8 nor 16 bits
pub fn read_tiff_frame(bytes: &[u8]) -> Result<Frame> {
    let mut decoder = Decoder::new(Cursor::new(bytes)).map_err(corrupt)?;
    let (width, height) = decoder.dimensions().map_err(corrupt)?;

    let (channels, bits) = match decoder.colortype().map_err(corrupt)? {
        ColorType::Gray(bits) => (1, bits),
        ColorType::RGB(bits) => (3, bits),
        ColorType::GrayA(_) => return Err(FrameError::UnsupportedChannelLayoutError(2)),
        ColorType::RGBA(_) | ColorType::CMYK(_) => {
            return Err(FrameError::UnsupportedChannelLayoutError(4));
        }
        ColorType::Palette(_) => return Err(FrameError::UnsupportedChannelLayoutError(1)),
        ColorType::YCbCr(_) => return Err(FrameError::UnsupportedChannelLayoutError(3)),
        ColorType::CMYKA(_) => return Err(FrameError::UnsupportedChannelLayoutError(5)),
        ColorType::Multiband { num_samples, .. } => {
            return Err(FrameError::UnsupportedChannelLayoutError(num_samples as u32));
        }
        _ => {
            let samples = decoder.get_tag_u32(Tag::SamplesPerPixel).unwrap_or(0);
            return Err(FrameError::UnsupportedChannelLayoutError(samples));
        }
    };
    if bits != 8 && bits != 16 {
        return Err(FrameError::UnsupportedBitDepthError(bits as u32));
    }
    debug!("Reading TIFF golden file: {}x{}x{} at {} bits", width, height, channels, bits);

    match decoder.read_image().map_err(corrupt)? {
        DecodingResult::U8(data) if bits == 8 => Frame::from_u8(width, height, channels, data),
        DecodingResult::U16(data) => Frame::from_u16(width, height, channels, data),
        _ => Err(FrameError::UnsupportedBitDepthError(bits as u32)),
    }
}
