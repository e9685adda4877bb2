//! Pipeline conversions module
//!
//! Orchestrates normalization and compression of sensor frames, including
//! file-level entry points and step timing.

mod round_trip;
pub mod timing;
pub mod types;

#[cfg(test)]
mod tests;

pub use round_trip::RoundTripPipeline;
pub use timing::{PipelineTimings, StepTiming};
pub use types::{CodecConfig, CodecConfigBuilder, JPEG_MAX_DIMENSION, RoundTripReport};
