use crate::constants::{MAX_QUALITY, MIN_QUALITY};
use crate::error::{CompressionError, Result};
use std::path::Path;

/// Validate that the input workbook exists and is a regular file.
///
/// Only metadata is read; nothing on disk is touched.
pub fn validate_input_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(CompressionError::FileNotFound(path.to_path_buf()));
    }

    if !path.is_file() {
        return Err(CompressionError::NotAFile(path.to_path_buf()));
    }

    Ok(())
}

/// Check that a JPEG quality is within `MIN_QUALITY..=MAX_QUALITY` and
/// narrow it to the encoder's `u8`.
pub fn validate_quality(quality: i32) -> Result<u8> {
    if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
        return Err(CompressionError::InvalidQuality(quality));
    }
    u8::try_from(quality).map_err(|_| CompressionError::InvalidQuality(quality))
}
