//! Geometric transforms: quarter-turn rotation and mirroring.
//!
//! Pixels move as a whole, so channel interleaving is kept. The frame's
//! [`Orientation`] records what has been applied since acquisition.

use crate::image_pipeline::common::error::{FrameError, Result};
use crate::image_pipeline::frame::{Frame, Orientation, Rotation, Samples};

/// Source pixel index for every destination pixel, in destination order.
fn remap<T: Copy>(data: &[T], channels: usize, order: impl Iterator<Item = usize>) -> Vec<T> {
    let mut out = Vec::with_capacity(data.len());
    for src in order {
        out.extend_from_slice(&data[src * channels..(src + 1) * channels]);
    }
    out
}

fn rebuild(
    frame: &Frame,
    width: u32,
    height: u32,
    orientation: Orientation,
    order: impl Iterator<Item = usize>,
) -> Result<Frame> {
    let channels = frame.channels() as usize;
    let samples = match frame.samples() {
        Samples::Eight(data) => Samples::Eight(remap(data, channels, order)),
        Samples::Sixteen(data) => Samples::Sixteen(remap(data, channels, order)),
    };
    Ok(Frame::new(width, height, frame.channels(), samples)?
        .with_significant_bits(frame.significant_bits())?
        .with_orientation(orientation))
}

/// Rotates a frame clockwise by `degrees` (0, 90, 180 or 270).
///
/// Quarter turns swap width and height.
///
/// # Errors
///
/// * `InvalidRotationError` - any other angle
pub fn rotate(frame: &Frame, degrees: u32) -> Result<Frame> {
    let rotation =
        Rotation::from_degrees(degrees).ok_or(FrameError::InvalidRotationError(degrees))?;

    let w = frame.width() as usize;
    let h = frame.height() as usize;
    let mut orientation = frame.orientation();
    orientation.rotation = orientation.rotation.then(rotation);

    match rotation {
        Rotation::Rotation0 => Ok(frame.clone()),
        // destination is h wide and w tall; row r, column c reads source
        // row (h - 1 - c), column r
        Rotation::Rotation90 => rebuild(
            frame,
            frame.height(),
            frame.width(),
            orientation,
            (0..w).flat_map(|r| (0..h).map(move |c| (h - 1 - c) * w + r)),
        ),
        Rotation::Rotation180 => rebuild(
            frame,
            frame.width(),
            frame.height(),
            orientation,
            (0..w * h).rev(),
        ),
        Rotation::Rotation270 => rebuild(
            frame,
            frame.height(),
            frame.width(),
            orientation,
            (0..w).flat_map(|r| (0..h).map(move |c| c * w + (w - 1 - r))),
        ),
    }
}

/// Mirrors a frame left-right (`horizontal`) and/or top-bottom
/// (`vertical`). Each requested flip toggles its orientation flag.
pub fn flip(frame: &Frame, horizontal: bool, vertical: bool) -> Result<Frame> {
    if !horizontal && !vertical {
        return Ok(frame.clone());
    }

    let w = frame.width() as usize;
    let h = frame.height() as usize;
    let mut orientation = frame.orientation();
    orientation.flip_x ^= horizontal;
    orientation.flip_y ^= vertical;

    rebuild(
        frame,
        frame.width(),
        frame.height(),
        orientation,
        (0..h).flat_map(move |r| {
            let src_row = if vertical { h - 1 - r } else { r };
            (0..w).map(move |c| {
                let src_col = if horizontal { w - 1 - c } else { c };
                src_row * w + src_col
            })
        }),
    )
}
