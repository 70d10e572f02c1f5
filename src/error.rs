use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("Failed to decode image {entry}: {source}")]
    ImageDecode {
        entry: String,
        #[source]
        source: image::ImageError,
    },

    #[error("JPEG encoding error: {0}")]
    JpegEncode(#[from] jpeg_encoder::EncodingError),

    #[error("Image too large for JPEG: {0}x{1}. Maximum allowed: 65535x65535")]
    DimensionsTooLarge(u32, u32),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Invalid quality value: {0}. Must be between 1 and 95")]
    InvalidQuality(i32),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Input path is not a file: {0}")]
    NotAFile(PathBuf),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, CompressionError>;
