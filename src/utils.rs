/// Helpers shared by the pipeline, the reporter and the info command.
use crate::constants::{KIB, MIB, OUTPUT_SUFFIX, PROGRESS_SPINNER_TEMPLATE, RECOMPRESSIBLE_EXTENSIONS};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Component, Path, PathBuf};

/// Check if a media entry has an extension we re-encode (png/jpg/jpeg, any case).
pub fn is_recompressible_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            RECOMPRESSIBLE_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}

/// Derive `<stem>_compressed<.ext>` in the same directory as `input`.
///
/// # Example
/// ```
/// use std::path::Path;
/// use xlsx_squeeze::derive_output_path;
///
/// let out = derive_output_path(Path::new("reports/q3.xlsx"));
/// assert_eq!(out, Path::new("reports/q3_compressed.xlsx"));
/// ```
pub fn derive_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, OUTPUT_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, OUTPUT_SUFFIX),
    };

    input.with_file_name(file_name)
}

/// Zip entry name for a path relative to the extraction root.
///
/// Zip names always use `/`, regardless of the host separator.
pub fn archive_entry_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

pub fn to_kib(bytes: u64) -> f64 {
    bytes as f64 / KIB
}

pub fn to_mib(bytes: u64) -> f64 {
    bytes as f64 / MIB
}

/// Calculate compression ratio as a percentage
///
/// # Returns
/// * Positive means reduction, negative means increase, 0.0 when `original_size` is 0
pub fn calculate_compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}

/// Create a progress spinner; hidden when console output is suppressed.
pub fn create_progress_spinner(message: &str) -> ProgressBar {
    if !crate::logger::progress_enabled() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template(PROGRESS_SPINNER_TEMPLATE) {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb
}
