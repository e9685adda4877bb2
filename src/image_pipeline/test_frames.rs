//! Synthetic frames for tests: smooth content the way a defocused sensor
//! sees it, plus sensor noise confined to the low byte of 16-bit samples.

use crate::image_pipeline::frame::Frame;

fn smooth(x: u32, y: u32, width: u32, height: u32, phase: f32) -> u8 {
    let fx = x as f32 / width as f32;
    let fy = y as f32 / height as f32;
    let wave = (fx * 5.0 + phase).sin() * (fy * 3.0 + phase).cos();
    (30.0 + fx * 120.0 + fy * 60.0 + wave * 25.0).round().clamp(0.0, 255.0) as u8
}

pub(crate) fn gray8(width: u32, height: u32) -> Frame {
    let data = (0..height)
        .flat_map(|y| (0..width).map(move |x| smooth(x, y, width, height, 0.0)))
        .collect();
    Frame::from_u8(width, height, 1, data).unwrap()
}

pub(crate) fn rgb8_data(width: u32, height: u32) -> Vec<u8> {
    (0..height)
        .flat_map(|y| {
            (0..width).flat_map(move |x| {
                [
                    smooth(x, y, width, height, 0.0),
                    smooth(x, y, width, height, 1.3),
                    smooth(width - 1 - x, y, width, height, 2.1),
                ]
            })
        })
        .collect()
}

pub(crate) fn rgb8(width: u32, height: u32) -> Frame {
    Frame::from_u8(width, height, 3, rgb8_data(width, height)).unwrap()
}

/// 16-bit RGB frame whose high bytes equal [`rgb8`] and whose low bytes
/// are pseudo-random.
pub(crate) fn rgb16(width: u32, height: u32) -> Frame {
    let mut state: u32 = 0x2545_F491;
    let data = rgb8_data(width, height)
        .into_iter()
        .map(|high| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            ((high as u16) << 8) | (state & 0xFF) as u16
        })
        .collect();
    Frame::from_u16(width, height, 3, data).unwrap()
}

/// Full-contrast checkerboard with `cell`-pixel squares, repeated on every
/// channel.
pub(crate) fn checkerboard(width: u32, height: u32, channels: u32, cell: u32) -> Frame {
    let data = (0..height)
        .flat_map(|y| {
            (0..width).flat_map(move |x| {
                let value = if (x / cell + y / cell) % 2 == 0 { 0 } else { 255 };
                std::iter::repeat_n(value, channels as usize)
            })
        })
        .collect();
    Frame::from_u8(width, height, channels, data).unwrap()
}

/// Neutral step wedge: 16 vertical bands from black to white, band edges
/// falling inside compression blocks.
pub(crate) fn step_wedge(width: u32, height: u32, channels: u32) -> Frame {
    let band = width.div_ceil(16);
    let data = (0..height)
        .flat_map(|_| {
            (0..width).flat_map(move |x| {
                std::iter::repeat_n(((x / band) * 17) as u8, channels as usize)
            })
        })
        .collect();
    Frame::from_u8(width, height, channels, data).unwrap()
}
