//! Frame data types

use crate::image_pipeline::common::error::{FrameError, Result};
use crate::image_pipeline::frame::orientation::Orientation;

/// Sample storage of a frame. The variant carries the bit depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Samples {
    /// 8 bits per sample, values in `[0, 255]`
    Eight(Vec<u8>),
    /// 16 bits per sample, values in `[0, 65535]`
    Sixteen(Vec<u16>),
}

impl Samples {
    pub fn len(&self) -> usize {
        match self {
            Samples::Eight(data) => data.len(),
            Samples::Sixteen(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bit_depth(&self) -> u32 {
        match self {
            Samples::Eight(_) => 8,
            Samples::Sixteen(_) => 16,
        }
    }
}

/// One image capture: dimensions, channel count and a row-major,
/// channel-interleaved sample buffer.
///
/// A `Frame` cannot be mutated after construction. Every conversion in the
/// pipeline produces a new instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    channels: u32,
    samples: Samples,
    /// Bits of real sensor resolution inside the sample container
    /// (e.g. 12 for Mono12 data stored in 16-bit samples)
    significant_bits: u32,
    orientation: Orientation,
}

/// Number of samples a `width x height x channels` frame must hold.
///
/// Fails with `InvalidFrameError` when a dimension is zero, the channel
/// count is not 1 or 3, or the product overflows `usize`.
pub(crate) fn expected_len(width: u32, height: u32, channels: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(FrameError::InvalidFrameError(format!(
            "dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    if channels != 1 && channels != 3 {
        return Err(FrameError::InvalidFrameError(format!(
            "channels must be 1 or 3, got {}",
            channels
        )));
    }

    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels as usize))
        .ok_or_else(|| {
            FrameError::InvalidFrameError(format!(
                "{}x{}x{} overflows the addressable sample count",
                width, height, channels
            ))
        })
}

impl Frame {
    /// Builds a frame, checking the buffer length against
    /// `width * height * channels`.
    ///
    /// # Errors
    ///
    /// * `InvalidFrameError` - zero dimension, channel count other than 1
    ///   or 3, or a buffer of the wrong length
    pub fn new(width: u32, height: u32, channels: u32, samples: Samples) -> Result<Self> {
        let expected = expected_len(width, height, channels)?;
        if samples.len() != expected {
            return Err(FrameError::InvalidFrameError(format!(
                "buffer holds {} samples, {}x{}x{} requires {}",
                samples.len(),
                width,
                height,
                channels,
                expected
            )));
        }

        let significant_bits = samples.bit_depth();
        Ok(Self {
            width,
            height,
            channels,
            samples,
            significant_bits,
            orientation: Orientation::default(),
        })
    }

    pub fn from_u8(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, channels, Samples::Eight(data))
    }

    pub fn from_u16(width: u32, height: u32, channels: u32, data: Vec<u16>) -> Result<Self> {
        Self::new(width, height, channels, Samples::Sixteen(data))
    }

    /// Returns the same frame tagged with the sensor's real resolution.
    ///
    /// `bits` must lie in `1..=bit_depth`.
    pub fn with_significant_bits(mut self, bits: u32) -> Result<Self> {
        if bits == 0 || bits > self.bit_depth() {
            return Err(FrameError::InvalidFrameError(format!(
                "{} significant bits do not fit a {}-bit sample",
                bits,
                self.bit_depth()
            )));
        }
        self.significant_bits = bits;
        Ok(self)
    }

    pub(crate) fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u32 {
        self.channels
    }

    pub fn bit_depth(&self) -> u32 {
        self.samples.bit_depth()
    }

    pub fn significant_bits(&self) -> u32 {
        self.significant_bits
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    pub fn into_samples(self) -> Samples {
        self.samples
    }

    /// 8-bit sample view, `None` for 16-bit frames.
    pub fn as_u8(&self) -> Option<&[u8]> {
        match &self.samples {
            Samples::Eight(data) => Some(data),
            Samples::Sixteen(_) => None,
        }
    }

    /// 16-bit sample view, `None` for 8-bit frames.
    pub fn as_u16(&self) -> Option<&[u16]> {
        match &self.samples {
            Samples::Eight(_) => None,
            Samples::Sixteen(data) => Some(data),
        }
    }

    /// Total number of samples (`width * height * channels`).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Shape in row-major order: `[height, width]` for grayscale,
    /// `[height, width, channels]` for RGB.
    pub fn shape(&self) -> Vec<u32> {
        if self.channels == 1 {
            vec![self.height, self.width]
        } else {
            vec![self.height, self.width, self.channels]
        }
    }
}
