pub const DEFAULT_QUALITY: i32 = 70;
pub const MIN_QUALITY: i32 = 1;
pub const MAX_QUALITY: i32 = 95;

/// Directory inside an OOXML spreadsheet that holds embedded media.
pub const MEDIA_DIR: &str = "xl/media";

/// Inserted between the input file stem and its extension.
pub const OUTPUT_SUFFIX: &str = "_compressed";

/// Media extensions that get re-encoded. Everything else passes through.
pub const RECOMPRESSIBLE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

pub const TEMP_DIR_PREFIX: &str = "xlsx_squeeze_";
pub const TEMP_IMAGE_PREFIX: &str = "_temp_";

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
pub const BANNER_WIDTH: usize = 60;
pub const BANNER_TITLE: &str = "Excel Image Compression";

pub const KIB: f64 = 1024.0;
pub const MIB: f64 = 1024.0 * 1024.0;
