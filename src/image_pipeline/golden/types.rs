//! Golden-file export configuration types

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - balanced level
    Deflate,
}

/// Configuration for lossless golden-file export
#[derive(Debug, Clone)]
pub struct GoldenConfig {
    /// Compression method to use
    pub compression: TiffCompression,
    /// Predictor value for compression (typically 2 for horizontal differencing)
    pub predictor: Option<u16>,
}

impl Default for GoldenConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::Lzw,
            predictor: Some(2),
        }
    }
}

impl GoldenConfig {
    pub fn builder() -> GoldenConfigBuilder {
        GoldenConfigBuilder::default()
    }
}

/// Builder for GoldenConfig
#[derive(Default)]
pub struct GoldenConfigBuilder {
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
}

impl GoldenConfigBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn build(self) -> GoldenConfig {
        let default = GoldenConfig::default();
        GoldenConfig {
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
        }
    }
}
