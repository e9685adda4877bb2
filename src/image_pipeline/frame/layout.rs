//! Raw sensor buffer ingestion.
//!
//! Acquisition hands over a flat byte buffer together with the declared
//! geometry. Nothing is inferred from the bytes themselves: 16-bit samples
//! are native-order `u16`, one pixel spans `channels * 2` bytes and rows
//! carry no padding.

use crate::image_pipeline::common::error::{FrameError, Result};
use crate::image_pipeline::frame::types::{Frame, Samples, expected_len};

/// Declared geometry of a raw sensor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLayout {
    pub width: u32,
    pub height: u32,
    pub channels: u32,
    pub bit_depth: u32,
}

impl RawLayout {
    pub fn new(width: u32, height: u32, channels: u32, bit_depth: u32) -> Self {
        Self {
            width,
            height,
            channels,
            bit_depth,
        }
    }

    /// Bytes per sample for the declared depth.
    fn sample_bytes(&self) -> Result<usize> {
        match self.bit_depth {
            8 => Ok(1),
            16 => Ok(2),
            other => Err(FrameError::InvalidFrameError(format!(
                "bit depth must be 8 or 16, got {}",
                other
            ))),
        }
    }

    /// Bytes between the start of two neighbouring pixels.
    pub fn pixel_stride(&self) -> Result<usize> {
        Ok(self.sample_bytes()? * self.channels as usize)
    }

    /// Exact byte length a buffer with this layout must have.
    pub fn byte_len(&self) -> Result<usize> {
        let samples = expected_len(self.width, self.height, self.channels)?;
        samples.checked_mul(self.sample_bytes()?).ok_or_else(|| {
            FrameError::InvalidFrameError("raw buffer size overflows usize".to_string())
        })
    }
}

impl Frame {
    /// Builds a frame from an acquisition buffer.
    ///
    /// # Errors
    ///
    /// * `InvalidFrameError` - the layout is invalid or `bytes` does not
    ///   have exactly `layout.byte_len()` bytes
    pub fn from_raw(layout: &RawLayout, bytes: &[u8]) -> Result<Self> {
        let expected = layout.byte_len()?;
        if bytes.len() != expected {
            return Err(FrameError::InvalidFrameError(format!(
                "raw buffer holds {} bytes, {}x{}x{} at {} bits requires {}",
                bytes.len(),
                layout.width,
                layout.height,
                layout.channels,
                layout.bit_depth,
                expected
            )));
        }

        let samples = if layout.bit_depth == 8 {
            Samples::Eight(bytes.to_vec())
        } else {
            Samples::Sixteen(
                bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
                    .collect(),
            )
        };

        Frame::new(layout.width, layout.height, layout.channels, samples)
    }

    /// Serializes the samples in the acquisition byte layout, the inverse of
    /// [`Frame::from_raw`].
    pub fn to_raw_bytes(&self) -> Vec<u8> {
        match self.samples() {
            Samples::Eight(data) => data.clone(),
            Samples::Sixteen(data) => data.iter().flat_map(|v| v.to_ne_bytes()).collect(),
        }
    }

    /// Layout describing this frame's raw serialization.
    pub fn raw_layout(&self) -> RawLayout {
        RawLayout::new(self.width(), self.height(), self.channels(), self.bit_depth())
    }
}
