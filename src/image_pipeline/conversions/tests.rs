use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::image_pipeline::codec::{EncodedImage, FrameCodec, Tolerance};
use crate::image_pipeline::common::error::{FrameError, Result};
use crate::image_pipeline::conversions::{
    CodecConfig, JPEG_MAX_DIMENSION, PipelineTimings, RoundTripPipeline,
};
use crate::image_pipeline::frame::{Frame, RawLayout};
use crate::image_pipeline::test_frames;

/// Lossless stand-in codec: remembers every frame it was asked to encode
/// and decodes to the most recent one.
struct MockCodec {
    should_fail: bool,
    encoded_frames: Arc<Mutex<Vec<Frame>>>,
}

impl MockCodec {
    fn new(should_fail: bool) -> (Self, Arc<Mutex<Vec<Frame>>>) {
        let encoded_frames = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                should_fail,
                encoded_frames: encoded_frames.clone(),
            },
            encoded_frames,
        )
    }
}

impl FrameCodec for MockCodec {
    fn encode(&self, frame: &Frame, quality: u8) -> Result<EncodedImage> {
        if self.should_fail {
            return Err(FrameError::EncodeError("Mock encode error".to_string()));
        }
        self.encoded_frames.lock().unwrap().push(frame.clone());
        Ok(EncodedImage::new(frame.to_raw_bytes(), quality))
    }

    fn decode(&self, _encoded: &EncodedImage) -> Result<Frame> {
        self.encoded_frames
            .lock()
            .unwrap()
            .last()
            .cloned()
            .ok_or_else(|| FrameError::CorruptStreamError("nothing encoded yet".to_string()))
    }
}

#[test]
fn test_config_builder() {
    let tolerance = Tolerance {
        max_abs_diff: 4,
        max_fraction: 0.01,
    };
    let config = CodecConfig::builder()
        .quality(90)
        .validate_dimensions(false)
        .max_dimension(Some(10000))
        .tolerance(tolerance)
        .build();

    assert_eq!(config.quality, 90);
    assert!(!config.validate_dimensions);
    assert_eq!(config.max_dimension, Some(10000));
    assert_eq!(config.tolerance, tolerance);
}

#[test]
fn test_config_defaults() {
    let config = CodecConfig::builder().build();
    assert_eq!(config.quality, 75);
    assert!(config.validate_dimensions);
    assert_eq!(config.max_dimension, Some(JPEG_MAX_DIMENSION));
    assert_eq!(config.tolerance, Tolerance::default());
}

#[test]
fn test_successful_compression() {
    let (codec, encoded_frames) = MockCodec::new(false);
    let pipeline = RoundTripPipeline::with_custom(codec, CodecConfig::default());

    let encoded = pipeline.compress(&test_frames::gray8(32, 16)).unwrap();

    assert_eq!(encoded.quality, 75);
    assert_eq!(encoded.len(), 32 * 16);
    assert_eq!(encoded_frames.lock().unwrap().len(), 1);
}

#[test]
fn test_codec_failure() {
    let (codec, encoded_frames) = MockCodec::new(true);
    let pipeline = RoundTripPipeline::with_custom(codec, CodecConfig::default());

    let result = pipeline.compress(&test_frames::gray8(8, 8));

    assert!(matches!(result.unwrap_err(), FrameError::EncodeError(_)));
    assert!(encoded_frames.lock().unwrap().is_empty());
}

#[test]
fn test_sixteen_bit_frame_normalized_before_encoding() {
    let (codec, encoded_frames) = MockCodec::new(false);
    let pipeline = RoundTripPipeline::with_custom(codec, CodecConfig::default());

    pipeline.compress(&test_frames::rgb16(24, 12)).unwrap();

    let frames = encoded_frames.lock().unwrap();
    assert_eq!(frames[0].bit_depth(), 8);
    assert_eq!(frames[0], test_frames::rgb8(24, 12));
}

#[test]
fn test_dimension_validation_success() {
    let (codec, _) = MockCodec::new(false);
    let config = CodecConfig::builder()
        .validate_dimensions(true)
        .max_dimension(Some(2000))
        .build();
    let pipeline = RoundTripPipeline::with_custom(codec, config);

    assert!(pipeline.compress(&test_frames::gray8(2000, 4)).is_ok());
}

#[test]
fn test_dimension_validation_failure() {
    let (codec, encoded_frames) = MockCodec::new(false);
    let config = CodecConfig::builder()
        .validate_dimensions(true)
        .max_dimension(Some(2000))
        .build();
    let pipeline = RoundTripPipeline::with_custom(codec, config);

    let result = pipeline.compress(&test_frames::gray8(2001, 4));

    assert!(matches!(
        result.unwrap_err(),
        FrameError::InvalidDimensions(2001, 4)
    ));
    assert!(encoded_frames.lock().unwrap().is_empty());
}

#[test]
fn test_dimension_validation_disabled() {
    let (codec, _) = MockCodec::new(false);
    let config = CodecConfig::builder()
        .validate_dimensions(false)
        .max_dimension(Some(16))
        .build();
    let pipeline = RoundTripPipeline::with_custom(codec, config);

    assert!(pipeline.compress(&test_frames::gray8(64, 64)).is_ok());
}

#[test]
fn test_decompress_to_sixteen_bits() {
    let (codec, _) = MockCodec::new(false);
    let pipeline = RoundTripPipeline::with_custom(codec, CodecConfig::default());

    let encoded = pipeline.compress(&test_frames::gray8(4, 4)).unwrap();
    let restored = pipeline.decompress(&encoded, 16).unwrap();

    assert_eq!(restored.bit_depth(), 16);
    let expected: Vec<u16> = test_frames::gray8(4, 4)
        .as_u8()
        .unwrap()
        .iter()
        .map(|&s| (s as u16) << 8)
        .collect();
    assert_eq!(restored.as_u16().unwrap(), expected.as_slice());
}

#[test]
fn test_decompress_rejects_unknown_target_depth() {
    let (codec, _) = MockCodec::new(false);
    let pipeline = RoundTripPipeline::with_custom(codec, CodecConfig::default());

    let encoded = pipeline.compress(&test_frames::gray8(4, 4)).unwrap();
    assert!(matches!(
        pipeline.decompress(&encoded, 12),
        Err(FrameError::UnsupportedBitDepthError(12))
    ));
}

#[test]
fn test_round_trip_report() {
    let (codec, encoded_frames) = MockCodec::new(false);
    let pipeline = RoundTripPipeline::with_custom(codec, CodecConfig::default());

    let report = pipeline.round_trip(&test_frames::rgb16(16, 8)).unwrap();

    assert!(report.passed);
    assert_eq!(report.canonical_len, 16 * 8 * 3);
    assert_eq!(report.stats.exceeding, 0);
    assert_eq!(report.compression_ratio(), 1.0);
    assert_eq!(report.encoded.bytes, test_frames::rgb8(16, 8).to_raw_bytes());
    assert_eq!(encoded_frames.lock().unwrap().len(), 1);
    for step in ["validate_dimensions", "normalize", "encode", "decode", "compare"] {
        assert!(report.timings.step(step).is_some(), "missing step {}", step);
    }
}

#[test]
fn test_jpeg_round_trip_passes_default_tolerance() {
    let pipeline = RoundTripPipeline::new(CodecConfig::default());
    let report = pipeline.round_trip(&test_frames::rgb16(96, 64)).unwrap();

    assert!(report.passed, "{:?}", report.stats);
    assert!(report.compression_ratio() > 1.0);

    let restored = pipeline.decompress(&report.encoded, 16).unwrap();
    assert_eq!(restored.shape(), vec![64, 96, 3]);
}

#[test]
fn test_set_config() {
    let mut pipeline = RoundTripPipeline::new(CodecConfig::default());
    pipeline.set_config(CodecConfig::builder().quality(40).build());
    assert_eq!(pipeline.config().quality, 40);
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let raw_path = dir.path().join("frame.raw");
    let jpeg_path = dir.path().join("frame.jpg");
    let restored_path = dir.path().join("restored.raw");

    let frame = test_frames::rgb16(48, 32);
    std::fs::write(&raw_path, frame.to_raw_bytes()).unwrap();

    let pipeline = RoundTripPipeline::new(CodecConfig::default());
    let encoded = pipeline
        .compress_file(&raw_path, &frame.raw_layout(), &jpeg_path)
        .unwrap();
    assert_eq!(std::fs::read(&jpeg_path).unwrap(), encoded.bytes);

    let restored = pipeline
        .decompress_file(&jpeg_path, &restored_path, 16)
        .unwrap();
    assert_eq!(restored.shape(), frame.shape());
    assert_eq!(
        std::fs::read(&restored_path).unwrap().len(),
        48 * 32 * 3 * 2
    );
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = RoundTripPipeline::new(CodecConfig::default());
    let layout = RawLayout::new(4, 4, 1, 8);

    let result = pipeline.compress_file(dir.path().join("absent.raw"), &layout, dir.path().join("out.jpg"));
    assert!(matches!(result.unwrap_err(), FrameError::InputReadError(_)));

    let result = pipeline.decompress_file(dir.path().join("absent.jpg"), dir.path().join("out.raw"), 8);
    assert!(matches!(result.unwrap_err(), FrameError::InputReadError(_)));
}

#[test]
fn test_unwritable_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let raw_path = dir.path().join("frame.raw");
    let frame = test_frames::gray8(8, 8);
    std::fs::write(&raw_path, frame.to_raw_bytes()).unwrap();

    let pipeline = RoundTripPipeline::new(CodecConfig::default());
    let result = pipeline.compress_file(
        &raw_path,
        &frame.raw_layout(),
        dir.path().join("missing_dir").join("out.jpg"),
    );
    assert!(matches!(result.unwrap_err(), FrameError::OutputWriteError(_)));
}

#[test]
fn test_timings_accumulate() {
    let mut timings = PipelineTimings::new();
    timings.record("encode", Duration::from_millis(3));
    timings.record("encode", Duration::from_millis(2));
    let answer = timings.time("decode", || 42);

    assert_eq!(answer, 42);
    assert_eq!(timings.step("encode"), Some(Duration::from_millis(5)));
    assert_eq!(timings.step("compare"), None);
    assert_eq!(timings.steps().len(), 3);
    assert!(timings.total() >= Duration::from_millis(5));

    let table = timings.to_string();
    assert!(table.contains("decode"));
    assert_eq!(table.lines().count(), 5);
}
