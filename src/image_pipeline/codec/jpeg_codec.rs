//! Baseline JPEG codec built on the `image` crate.
//!
//! Grayscale frames are written as single-component JPEGs, RGB frames as
//! three-component YCbCr JPEGs. The output is a plain JFIF stream that any
//! standard JPEG decoder can read.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageFormat};
use tracing::debug;

use crate::image_pipeline::codec::frame_codec::FrameCodec;
use crate::image_pipeline::codec::types::{EncodedImage, MAX_QUALITY, MIN_QUALITY};
use crate::image_pipeline::common::error::{FrameError, Result};
use crate::image_pipeline::frame::Frame;

/// Start-of-image marker
const SOI: [u8; 2] = [0xFF, 0xD8];
/// End-of-image marker
const EOI: [u8; 2] = [0xFF, 0xD9];

/// JPEG implementation of [`FrameCodec`]. Stateless; one instance can be
/// shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegCodec;

/// Returns the complete JPEG stream inside `bytes`, without trailing zero
/// padding.
///
/// The entropy decoder is lenient with missing scan data, so truncation is
/// caught here: a complete stream starts with SOI and ends with EOI.
fn complete_stream(bytes: &[u8]) -> Result<&[u8]> {
    if bytes.is_empty() {
        return Err(FrameError::CorruptStreamError("empty payload".to_string()));
    }
    if !bytes.starts_with(&SOI) {
        return Err(FrameError::CorruptStreamError(
            "missing start-of-image marker".to_string(),
        ));
    }

    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    if end < SOI.len() + EOI.len() || !bytes[..end].ends_with(&EOI) {
        return Err(FrameError::CorruptStreamError(format!(
            "missing end-of-image marker, stream truncated at {} bytes?",
            bytes.len()
        )));
    }
    Ok(&bytes[..end])
}

impl FrameCodec for JpegCodec {
    /// Compresses a canonical 8-bit frame.
    ///
    /// # Errors
    ///
    /// * `InvalidQualityError` - `quality` outside `1..=100`
    /// * `UnsupportedBitDepthError` - the frame is not 8-bit; normalize first
    /// * `UnsupportedChannelLayoutError` - neither grayscale nor RGB
    /// * `EncodeError` - the encoder refused the frame (e.g. a side longer
    ///   than 65535 pixels)
    fn encode(&self, frame: &Frame, quality: u8) -> Result<EncodedImage> {
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(FrameError::InvalidQualityError(quality));
        }

        let pixels = frame
            .as_u8()
            .ok_or(FrameError::UnsupportedBitDepthError(frame.bit_depth()))?;

        let color_type = match frame.channels() {
            1 => ExtendedColorType::L8,
            3 => ExtendedColorType::Rgb8,
            other => return Err(FrameError::UnsupportedChannelLayoutError(other)),
        };

        debug!(
            "Encoding JPEG: {}x{}x{} at quality {}",
            frame.width(),
            frame.height(),
            frame.channels(),
            quality
        );

        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, quality)
            .encode(pixels, frame.width(), frame.height(), color_type)
            .map_err(|e| FrameError::EncodeError(e.to_string()))?;

        debug!(
            "JPEG encoding complete: {} -> {} bytes",
            pixels.len(),
            bytes.len()
        );
        Ok(EncodedImage::new(bytes, quality))
    }

    /// Decompresses a JPEG payload into an 8-bit frame with the encoded
    /// width, height and component count.
    ///
    /// # Errors
    ///
    /// * `CorruptStreamError` - empty, truncated or otherwise malformed payload
    fn decode(&self, encoded: &EncodedImage) -> Result<Frame> {
        debug!("Decoding JPEG image, {} bytes", encoded.len());

        let bytes = complete_stream(encoded.as_bytes())?;
        let image = image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)
            .map_err(|e| FrameError::CorruptStreamError(e.to_string()))?;

        let (width, height) = (image.width(), image.height());
        let (channels, data) = match image {
            DynamicImage::ImageLuma8(buffer) => (1, buffer.into_raw()),
            DynamicImage::ImageRgb8(buffer) => (3, buffer.into_raw()),
            // CMYK and other exotic streams from foreign encoders
            other => (3, other.to_rgb8().into_raw()),
        };

        debug!("Decoded image: {}x{}x{}", width, height, channels);
        Frame::from_u8(width, height, channels, data)
    }
}
