//! Encoded image types

/// Lowest accepted compression quality
pub const MIN_QUALITY: u8 = 1;
/// Highest accepted compression quality
pub const MAX_QUALITY: u8 = 100;

/// A compressed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Compressed payload, a complete baseline JPEG stream
    pub bytes: Vec<u8>,
    /// Quality the payload was produced with. Decoding does not need it.
    pub quality: u8,
}

impl EncodedImage {
    pub fn new(bytes: Vec<u8>, quality: u8) -> Self {
        Self { bytes, quality }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
