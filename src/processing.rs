use crate::constants::TEMP_IMAGE_PREFIX;
use crate::error::{CompressionError, Result};
use crate::utils::is_recompressible_image;
use crate::verbose;
use image::{ColorType, DynamicImage, GenericImageView, ImageReader};
use jpeg_encoder::{ColorType as JpegColor, Encoder as JpegEncoder};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::Builder;

/// One recompressed media entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEntry {
    /// File name inside the media directory.
    pub name: String,
    pub size_before: u64,
    pub size_after: u64,
    /// Color layout of the decoded source image.
    pub color: ColorType,
    pub width: u32,
    pub height: u32,
    /// True when an alpha channel was dropped during re-encoding.
    pub flattened: bool,
}

/// List the media files that will be re-encoded, sorted by file name.
///
/// Only regular files directly inside `media_dir` with a png/jpg/jpeg
/// extension qualify. Other files are left for the re-pack to copy verbatim.
pub fn collect_media_images(media_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in fs::read_dir(media_dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && is_recompressible_image(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// Decode an image file, sniffing the format from its bytes.
///
/// Workbooks sometimes store JPEG data under a `.png` name, so the
/// extension is not trusted.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let entry = entry_name(path);
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    reader
        .decode()
        .map_err(|source| CompressionError::ImageDecode { entry, source })
}

/// Convert an image into a layout JPEG can hold.
///
/// Anything with an alpha channel is flattened to RGB; transparency is not
/// preserved. 8-bit grayscale stays grayscale.
///
/// # Returns
/// * The converted image and whether an alpha channel was dropped
pub fn flatten_for_jpeg(img: DynamicImage) -> (DynamicImage, bool) {
    let color = img.color();
    match color {
        ColorType::L8 | ColorType::Rgb8 => (img, false),
        ColorType::L16 => (DynamicImage::ImageLuma8(img.to_luma8()), false),
        other => (DynamicImage::ImageRgb8(img.to_rgb8()), other.has_alpha()),
    }
}

/// Encode an image as JPEG at `quality` (1-100) with optimized Huffman tables.
///
/// 8-bit grayscale is written as a single-channel JPEG; every other layout
/// is written as RGB.
pub fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let (width, height) = img.dimensions();
    let (w, h) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => return Err(CompressionError::DimensionsTooLarge(width, height)),
    };

    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new(&mut buffer, quality);
    encoder.set_optimized_huffman_tables(true);

    match img {
        DynamicImage::ImageLuma8(gray) => encoder.encode(gray.as_raw(), w, h, JpegColor::Luma)?,
        DynamicImage::ImageRgb8(rgb) => encoder.encode(rgb.as_raw(), w, h, JpegColor::Rgb)?,
        other => encoder.encode(other.to_rgb8().as_raw(), w, h, JpegColor::Rgb)?,
    }
    Ok(buffer)
}

/// Re-encode one media file as JPEG in place.
///
/// The new bytes go to a sibling temporary file which is then renamed over
/// the original, so the original name never holds a partial write. If
/// anything fails the temporary file is removed and the original is intact.
pub fn recompress_image(path: &Path, quality: u8) -> Result<ImageEntry> {
    let name = entry_name(path);
    let size_before = fs::metadata(path)?.len();

    let img = load_image(path)?;
    let color = img.color();
    let (width, height) = img.dimensions();

    let (img, flattened) = flatten_for_jpeg(img);
    if flattened {
        verbose!("{}: dropping alpha channel ({:?} -> RGB)", name, color);
    }
    let encoded = encode_jpeg(&img, quality)?;
    drop(img);

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let mut staged = Builder::new()
        .prefix(TEMP_IMAGE_PREFIX)
        .tempfile_in(parent)?;
    staged.write_all(&encoded)?;
    staged.as_file().sync_all()?;
    staged
        .persist(path)
        .map_err(|e| CompressionError::Io(e.error))?;

    let size_after = fs::metadata(path)?.len();

    Ok(ImageEntry {
        name,
        size_before,
        size_after,
        color,
        width,
        height,
        flattened,
    })
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
