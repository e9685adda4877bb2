//! Golden-file module
//!
//! Lossless TIFF export and import of frames, so reference images can be
//! kept next to their compressed counterparts and compared later.

mod reader;
mod standard_tiff_writer;
pub mod types;
mod writer;

pub use reader::read_tiff_frame;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{GoldenConfig, GoldenConfigBuilder, TiffCompression};
pub use writer::TiffWriter;
