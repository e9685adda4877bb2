use tracing::{info, instrument, warn};
use std::path::Path;

use crate::image_pipeline::{
    codec::{EncodedImage, FrameCodec, JpegCodec},
    common::error::{FrameError, Result},
    conversions::{
        timing::PipelineTimings,
        types::{CodecConfig, RoundTripReport},
    },
    convert::{denormalize, normalize},
    frame::{Frame, RawLayout},
};

/// normalize → encode → decode → denormalize, with dimension checks and
/// per-step spans.
pub struct RoundTripPipeline<C: FrameCodec> {
    codec: C,
    config: CodecConfig,
}

impl RoundTripPipeline<JpegCodec> {
    pub fn new(config: CodecConfig) -> Self {
        Self {
            codec: JpegCodec,
            config,
        }
    }
}

impl<C: FrameCodec> RoundTripPipeline<C> {
    pub fn with_custom(codec: C, config: CodecConfig) -> Self {
        Self { codec, config }
    }

    fn validate_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!(
                    "Image dimensions {}x{} exceed maximum {}",
                    width, height, max
                );
                return Err(FrameError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Normalizes a sensor frame and compresses it at the configured quality.
    #[instrument(skip(self, frame), fields(
        width = frame.width(),
        height = frame.height(),
        channels = frame.channels(),
        bit_depth = frame.bit_depth()
    ))]
    pub fn compress(&self, frame: &Frame) -> Result<EncodedImage> {
        self.compress_timed(frame, &mut PipelineTimings::new())
            .map(|(_, encoded)| encoded)
    }

    fn compress_timed(
        &self,
        frame: &Frame,
        timings: &mut PipelineTimings,
    ) -> Result<(Frame, EncodedImage)> {
        timings.time("validate_dimensions", || {
            let _span = tracing::info_span!("validate_dimensions").entered();
            self.validate_dimensions(frame.width(), frame.height())
        })?;

        let canonical = timings.time("normalize", || {
            let _span = tracing::info_span!("normalize").entered();
            normalize(frame)
        })?;

        let encoded = timings.time("encode", || {
            let _span = tracing::info_span!("encode", quality = self.config.quality).entered();
            self.codec.encode(&canonical, self.config.quality)
        })?;

        info!(
            raw_samples = frame.len(),
            encoded_len = encoded.len(),
            "Compression complete"
        );
        Ok((canonical, encoded))
    }

    /// Decompresses a payload and widens it to `target_bit_depth` (8 or 16).
    #[instrument(skip(self, encoded), fields(encoded_len = encoded.len()))]
    pub fn decompress(&self, encoded: &EncodedImage, target_bit_depth: u32) -> Result<Frame> {
        let decoded = {
            let _span = tracing::info_span!("decode").entered();
            self.codec.decode(encoded)?
        };

        let _span = tracing::info_span!("denormalize", target_bit_depth).entered();
        denormalize(&decoded, target_bit_depth)
    }

    /// Compresses `frame`, decodes the payload and measures the
    /// reconstruction against the normalized (not raw) reference.
    #[instrument(skip(self, frame), fields(width = frame.width(), height = frame.height()))]
    pub fn round_trip(&self, frame: &Frame) -> Result<RoundTripReport> {
        let mut timings = PipelineTimings::new();
        let (canonical, encoded) = self.compress_timed(frame, &mut timings)?;

        let decoded = timings.time("decode", || {
            let _span = tracing::info_span!("decode").entered();
            self.codec.decode(&encoded)
        })?;

        let stats = timings.time("compare", || {
            self.config.tolerance.measure(&canonical, &decoded)
        })?;
        let passed = self.config.tolerance.check(&stats);

        if passed {
            info!(
                exceeding = stats.exceeding,
                samples = stats.samples,
                max_abs_diff = stats.max_abs_diff,
                "Round trip within tolerance"
            );
        } else {
            warn!(
                exceeding = stats.exceeding,
                samples = stats.samples,
                max_abs_diff = stats.max_abs_diff,
                "Round trip exceeds tolerance"
            );
        }

        Ok(RoundTripReport {
            canonical_len: canonical.len(),
            encoded,
            stats,
            passed,
            timings,
        })
    }

    /// Reads a raw sensor file with the declared layout, compresses it and
    /// writes the payload to `output_path`.
    #[instrument(skip(self, input_path, output_path))]
    pub fn compress_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        layout: &RawLayout,
        output_path: Q,
    ) -> Result<EncodedImage> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Compressing raw file"
        );

        let frame = {
            let _span = tracing::info_span!("read_input_file").entered();
            let bytes = std::fs::read(input_path).map_err(|e| {
                FrameError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?;
            Frame::from_raw(layout, &bytes)?
        };

        let encoded = self.compress(&frame)?;

        {
            let _span = tracing::info_span!("write_output_file").entered();
            std::fs::write(output_path, encoded.as_bytes()).map_err(|e| {
                FrameError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
        }

        Ok(encoded)
    }

    /// Reads a compressed file, decompresses it to `target_bit_depth` and
    /// writes the samples in raw layout to `output_path`.
    #[instrument(skip(self, input_path, output_path))]
    pub fn decompress_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
        target_bit_depth: u32,
    ) -> Result<Frame> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Decompressing file"
        );

        let encoded = {
            let _span = tracing::info_span!("read_input_file").entered();
            let bytes = std::fs::read(input_path).map_err(|e| {
                FrameError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?;
            EncodedImage::new(bytes, self.config.quality)
        };

        let frame = self.decompress(&encoded, target_bit_depth)?;

        {
            let _span = tracing::info_span!("write_output_file").entered();
            std::fs::write(output_path, frame.to_raw_bytes()).map_err(|e| {
                FrameError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
        }

        Ok(frame)
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CodecConfig) {
        self.config = config;
    }
}
