use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Invalid frame: {0}")]
    InvalidFrameError(String),

    #[error("Unsupported bit depth: {0}")]
    UnsupportedBitDepthError(u32),

    #[error("Unsupported channel layout: {0} channels")]
    UnsupportedChannelLayoutError(u32),

    #[error("Invalid quality {0}, expected a value in 1..=100")]
    InvalidQualityError(u8),

    #[error("Corrupt image stream: {0}")]
    CorruptStreamError(String),

    #[error("Invalid rotation {0}, expected 0, 90, 180 or 270 degrees")]
    InvalidRotationError(u32),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FrameError>;
