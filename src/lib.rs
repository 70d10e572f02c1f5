pub mod archive;
pub mod cli;
pub mod constants;
pub mod error;
pub mod info;
pub mod job;
pub mod logger;
pub mod processing;
pub mod report;
pub mod utils;
pub mod validation;

pub use archive::{extract_archive, pack_directory};
pub use error::{CompressionError, Result};
pub use info::{inspect_workbook, print_workbook_info, MediaEntryInfo};
pub use job::{compress_workbook, CompressionJob, JobReport};
pub use processing::{encode_jpeg, flatten_for_jpeg, recompress_image, ImageEntry};
pub use utils::{calculate_compression_ratio, derive_output_path, is_recompressible_image};
