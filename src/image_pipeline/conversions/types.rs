//! Round-trip pipeline configuration types

use crate::image_pipeline::codec::{DeviationStats, EncodedImage, Tolerance};
use crate::image_pipeline::conversions::timing::PipelineTimings;

/// Largest side a baseline JPEG can describe
pub const JPEG_MAX_DIMENSION: u32 = 65535;

/// Configuration for the compress / decompress pipeline
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Compression quality, `1..=100`. Not clamped: out-of-range values are
    /// reported by the codec.
    pub quality: u8,
    /// Whether to validate image dimensions before compression
    pub validate_dimensions: bool,
    /// Upper bound for width and height when validation is enabled
    pub max_dimension: Option<u32>,
    /// Reconstruction error bound checked by `round_trip`
    pub tolerance: Tolerance,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            quality: 75,
            validate_dimensions: true,
            max_dimension: Some(JPEG_MAX_DIMENSION),
            tolerance: Tolerance::default(),
        }
    }
}

impl CodecConfig {
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::default()
    }
}

/// Builder for CodecConfig
#[derive(Default)]
pub struct CodecConfigBuilder {
    quality: Option<u8>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<u32>>,
    tolerance: Option<Tolerance>,
}

impl CodecConfigBuilder {
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn build(self) -> CodecConfig {
        let default = CodecConfig::default();
        CodecConfig {
            quality: self.quality.unwrap_or(default.quality),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            tolerance: self.tolerance.unwrap_or(default.tolerance),
        }
    }
}

/// Outcome of compressing a frame and checking its reconstruction
#[derive(Debug)]
pub struct RoundTripReport {
    /// Size of the canonical 8-bit frame in bytes
    pub canonical_len: usize,
    /// Compressed payload the statistics were measured on
    pub encoded: EncodedImage,
    /// Deviation of the decoded frame from the normalized reference
    pub stats: DeviationStats,
    /// Whether `stats` satisfies the configured tolerance
    pub passed: bool,
    pub timings: PipelineTimings,
}

impl RoundTripReport {
    pub fn encoded_len(&self) -> usize {
        self.encoded.len()
    }

    pub fn compression_ratio(&self) -> f64 {
        if self.encoded.is_empty() {
            0.0
        } else {
            self.canonical_len as f64 / self.encoded.len() as f64
        }
    }
}
