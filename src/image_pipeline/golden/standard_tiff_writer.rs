use std::io::Write;
use tiff::encoder::colortype;
use tracing::debug;
use crate::image_pipeline::common::error::{FrameError, Result};
use crate::image_pipeline::frame::{Frame, Samples};
use crate::image_pipeline::golden::types::{GoldenConfig, TiffCompression};
use crate::image_pipeline::golden::writer::TiffWriter;

pub struct StandardTiffWriter;

impl TiffWriter for StandardTiffWriter {
    fn write_tiff(&self, frame: &Frame, output: &mut dyn Write, config: &GoldenConfig) -> Result<()> {
        debug!(
            "Encoding TIFF golden file: {}x{}x{} at {} bits",
            frame.width(),
            frame.height(),
            frame.channels(),
            frame.bit_depth()
        );

        let mut buffer = Vec::new();

        let compression = match config.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::Deflate => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
        };

        {
            let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
                .map_err(|e| FrameError::EncodeError(e.to_string()))?
                .with_compression(compression);

            if let Some(predictor_val) = config.predictor {
                let predictor = match predictor_val {
                    2 => tiff::tags::Predictor::Horizontal,
                    _ => tiff::tags::Predictor::None,
                };
                encoder = encoder.with_predictor(predictor);
            }

            let (width, height) = (frame.width(), frame.height());
            let written = match (frame.channels(), frame.samples()) {
                (1, Samples::Eight(data)) => encoder.write_image::<colortype::Gray8>(width, height, data),
                (1, Samples::Sixteen(data)) => encoder.write_image::<colortype::Gray16>(width, height, data),
                (3, Samples::Eight(data)) => encoder.write_image::<colortype::RGB8>(width, height, data),
                (3, Samples::Sixteen(data)) => encoder.write_image::<colortype::RGB16>(width, height, data),
                (other, _) => return Err(FrameError::UnsupportedChannelLayoutError(other)),
            };
            written.map_err(|e| FrameError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
