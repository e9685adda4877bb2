//! Reconstruction error statistics for lossy round trips.

use crate::image_pipeline::common::error::{FrameError, Result};
use crate::image_pipeline::frame::{Frame, Samples};

/// Per-sample deviation between a reference frame and its reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviationStats {
    /// Number of samples compared
    pub samples: usize,
    /// Samples whose absolute difference exceeds the threshold
    pub exceeding: usize,
    /// Threshold the `exceeding` count was taken against
    pub threshold: u32,
    /// Largest absolute difference seen
    pub max_abs_diff: u32,
}

impl DeviationStats {
    pub fn fraction_exceeding(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.exceeding as f64 / self.samples as f64
        }
    }
}

/// Bounded-error contract: strictly less than `max_fraction` of the samples
/// may differ by more than `max_abs_diff`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub max_abs_diff: u32,
    pub max_fraction: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            max_abs_diff: 10,
            max_fraction: 0.10,
        }
    }
}

impl Tolerance {
    /// Compares two frames against this tolerance's threshold.
    pub fn measure(&self, reference: &Frame, decoded: &Frame) -> Result<DeviationStats> {
        compare(reference, decoded, self.max_abs_diff)
    }

    pub fn check(&self, stats: &DeviationStats) -> bool {
        stats.fraction_exceeding() < self.max_fraction
    }
}

fn deviations<T: Copy + Into<u32>>(a: &[T], b: &[T], threshold: u32) -> (usize, u32) {
    a.iter().zip(b).fold((0, 0), |(exceeding, max), (&x, &y)| {
        let diff = Into::<u32>::into(x).abs_diff(y.into());
        (exceeding + usize::from(diff > threshold), max.max(diff))
    })
}

/// Counts the samples of `decoded` that differ from `reference` by more
/// than `threshold`.
///
/// # Errors
///
/// * `InvalidFrameError` - the frames differ in width, height, channel
///   count or bit depth
pub fn compare(reference: &Frame, decoded: &Frame, threshold: u32) -> Result<DeviationStats> {
    if reference.width() != decoded.width()
        || reference.height() != decoded.height()
        || reference.channels() != decoded.channels()
        || reference.bit_depth() != decoded.bit_depth()
    {
        return Err(FrameError::InvalidFrameError(format!(
            "cannot compare {}x{}x{}@{} with {}x{}x{}@{}",
            reference.width(),
            reference.height(),
            reference.channels(),
            reference.bit_depth(),
            decoded.width(),
            decoded.height(),
            decoded.channels(),
            decoded.bit_depth()
        )));
    }

    let (exceeding, max_abs_diff) = match (reference.samples(), decoded.samples()) {
        (Samples::Eight(a), Samples::Eight(b)) => deviations(a, b, threshold),
        (Samples::Sixteen(a), Samples::Sixteen(b)) => deviations(a, b, threshold),
        _ => {
            return Err(FrameError::InvalidFrameError(
                "sample storage does not match bit depth".to_string(),
            ));
        }
    };

    Ok(DeviationStats {
        samples: reference.len(),
        exceeding,
        threshold,
        max_abs_diff,
    })
}
