use crate::image_pipeline::codec::types::EncodedImage;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::frame::Frame;

pub trait FrameCodec {
    fn encode(&self, frame: &Frame, quality: u8) -> Result<EncodedImage>;
    fn decode(&self, encoded: &EncodedImage) -> Result<Frame>;
}
