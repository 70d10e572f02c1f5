//! Console report lines. Formatting lives here so the pipeline only decides
//! *when* to print and tests can check *what* gets printed.

use crate::constants::{BANNER_TITLE, BANNER_WIDTH};
use crate::info;
use crate::processing::ImageEntry;
use crate::utils::{calculate_compression_ratio, to_kib, to_mib};
use std::path::Path;

/// Signed percentage delta: `-x%` for a reduction, `+x%` for growth.
pub fn format_delta(before: u64, after: u64) -> String {
    let ratio = calculate_compression_ratio(before, after);
    if ratio > 0.0 {
        format!("-{:.1}%", ratio)
    } else if ratio < 0.0 {
        format!("+{:.1}%", ratio.abs())
    } else {
        "0.0%".to_string()
    }
}

pub fn format_image_line(entry: &ImageEntry) -> String {
    format!(
        "{}: {:.1}KB → {:.1}KB ({})",
        entry.name,
        to_kib(entry.size_before),
        to_kib(entry.size_after),
        format_delta(entry.size_before, entry.size_after)
    )
}

/// The closing "Reduction"/"Size change" line for the whole file.
pub fn format_size_change(original: u64, compressed: u64) -> String {
    let ratio = calculate_compression_ratio(original, compressed);
    if ratio > 0.0 {
        format!("Reduction:  {:.1}%", ratio)
    } else {
        format!("Size change: +{:.1}%", ratio.abs())
    }
}

pub fn print_banner() {
    let rule = "=".repeat(BANNER_WIDTH);
    info!("{}", rule);
    info!("{}", BANNER_TITLE);
    info!("{}", rule);
}

pub fn print_image_totals(total_before: u64, total_after: u64) {
    if total_before == 0 {
        return;
    }
    info!(
        "\n📊 Total images: {:.2}MB → {:.2}MB",
        to_mib(total_before),
        to_mib(total_after)
    );
    info!(
        "🎯 Image reduction: {:.1}%",
        calculate_compression_ratio(total_before, total_after)
    );
}

pub fn print_summary(original_size: u64, compressed_size: u64, output: &Path) {
    info!("\n✅ Done.");
    info!("Original:   {:.2} MB", to_mib(original_size));
    info!("Compressed: {:.2} MB", to_mib(compressed_size));
    info!("{}", format_size_change(original_size, compressed_size));
    info!("\n💾 Saved to: {}", output.display());
    info!("Original file was not modified.");
}
