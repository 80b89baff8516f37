//! Error types for the halftone engine.
//!
//! Only boundary operations can fail: loading or wrapping image data, reading
//! options, and writing frames out. Runtime degradations (no drawing surface,
//! no subtractive blend, samples outside the image) are handled in place and
//! never surface as errors.

use std::fmt;

/// Errors from image acquisition, option loading and frame export.
#[derive(Debug)]
pub enum HalftoneError {
    /// Failed to decode or encode an image.
    ImageLoad(image::ImageError),
    /// Failed to read or write a file.
    Io(std::io::Error),
    /// Options JSON could not be parsed.
    Config(serde_json::Error),
    /// A raw RGBA buffer does not match its stated dimensions.
    PixelBufferSize { expected: usize, actual: usize },
}

impl fmt::Display for HalftoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalftoneError::ImageLoad(e) => write!(f, "Failed to load image: {}", e),
            HalftoneError::Io(e) => write!(f, "I/O error: {}", e),
            HalftoneError::Config(e) => write!(f, "Invalid halftone options: {}", e),
            HalftoneError::PixelBufferSize { expected, actual } => write!(
                f,
                "RGBA buffer size mismatch: expected {} bytes, got {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for HalftoneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HalftoneError::ImageLoad(e) => Some(e),
            HalftoneError::Io(e) => Some(e),
            HalftoneError::Config(e) => Some(e),
            HalftoneError::PixelBufferSize { .. } => None,
        }
    }
}

impl From<image::ImageError> for HalftoneError {
    fn from(e: image::ImageError) -> Self {
        HalftoneError::ImageLoad(e)
    }
}

impl From<std::io::Error> for HalftoneError {
    fn from(e: std::io::Error) -> Self {
        HalftoneError::Io(e)
    }
}

impl From<serde_json::Error> for HalftoneError {
    fn from(e: serde_json::Error) -> Self {
        HalftoneError::Config(e)
    }
}
