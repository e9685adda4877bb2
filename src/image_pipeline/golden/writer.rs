use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::frame::Frame;
use crate::image_pipeline::golden::types::GoldenConfig;

pub trait TiffWriter {
    fn write_tiff(&self, frame: &Frame, output: &mut dyn Write, config: &GoldenConfig) -> Result<()>;
}
