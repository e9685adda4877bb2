//! Unpacking of bit-packed monochrome sensor formats into 16-bit frames.

use crate::image_pipeline::common::error::{FrameError, Result};
use crate::image_pipeline::frame::Frame;

fn pixel_count(width: u32, height: u32) -> Result<usize> {
    (width as usize).checked_mul(height as usize).ok_or_else(|| {
        FrameError::InvalidFrameError(format!("{}x{} overflows usize", width, height))
    })
}

fn check_len(data: &[u8], required: usize, format: &str) -> Result<()> {
    if data.len() < required {
        return Err(FrameError::InvalidFrameError(format!(
            "{} buffer holds {} bytes, {} required",
            format,
            data.len(),
            required
        )));
    }
    Ok(())
}

/// Unpacks GigE Vision `Mono12Packed` data.
///
/// Three bytes carry two pixels: the first and third byte hold the high
/// eight bits of pixel 0 and pixel 1, the middle byte holds their low
/// nibbles (pixel 0 in bits 0-3, pixel 1 in bits 4-7). A trailing odd pixel
/// occupies two bytes.
pub fn unpack_mono12_packed(data: &[u8], width: u32, height: u32) -> Result<Frame> {
    let pixels = pixel_count(width, height)?;
    let required = (pixels / 2)
        .checked_mul(3)
        .and_then(|n| n.checked_add(if pixels % 2 == 1 { 2 } else { 0 }))
        .ok_or_else(|| {
            FrameError::InvalidFrameError(format!("{}x{} overflows usize", width, height))
        })?;
    check_len(data, required, "Mono12Packed")?;

    let mut unpacked = Vec::with_capacity(pixels);
    for group in data[..required].chunks(3) {
        let b0 = group[0] as u16;
        let b1 = group[1] as u16;
        unpacked.push((b0 << 4) | (b1 & 0x0F));
        if let Some(&b2) = group.get(2) {
            unpacked.push(((b2 as u16) << 4) | (b1 >> 4));
        }
    }

    Frame::from_u16(width, height, 1, unpacked)?.with_significant_bits(12)
}

/// Unpacks LSB-first bit-packed `MonoXXp` data (Mono10p, Mono12p, Mono14p).
///
/// Pixel `i` occupies bits `[i * bits, (i + 1) * bits)` of the stream read
/// as a little-endian bit sequence.
///
/// # Errors
///
/// * `UnsupportedBitDepthError` - `bits` is outside `9..=15`; byte-aligned
///   depths are not packed formats
/// * `InvalidFrameError` - the buffer is shorter than
///   `ceil(width * height * bits / 8)` bytes
pub fn unpack_mono_packed(data: &[u8], width: u32, height: u32, bits: u32) -> Result<Frame> {
    if !(9..=15).contains(&bits) {
        return Err(FrameError::UnsupportedBitDepthError(bits));
    }

    let pixels = pixel_count(width, height)?;
    let total_bits = pixels.checked_mul(bits as usize).ok_or_else(|| {
        FrameError::InvalidFrameError(format!("{}x{} overflows usize", width, height))
    })?;
    check_len(data, total_bits.div_ceil(8), &format!("Mono{}p", bits))?;

    let mask = (1u32 << bits) - 1;
    let unpacked: Vec<u16> = (0..pixels)
        .map(|i| {
            let bit_pos = i * bits as usize;
            let byte = bit_pos / 8;
            // at most 7 + 15 bits are needed, so three bytes suffice
            let word = (0..3).fold(0u32, |acc, k| {
                acc | (data.get(byte + k).copied().unwrap_or(0) as u32) << (8 * k)
            });
            ((word >> (bit_pos % 8)) & mask) as u16
        })
        .collect();

    Frame::from_u16(width, height, 1, unpacked)?.with_significant_bits(bits)
}
