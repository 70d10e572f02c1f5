use crate::constants::MEDIA_DIR;
use crate::error::Result;
use crate::info;
use crate::utils::{is_recompressible_image, to_kib};
use crate::validation::validate_input_path;
use image::{ColorType, ImageReader};
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

const MAX_PREALLOC: u64 = 64 << 20;

/// A media entry as stored in the workbook, read without extracting anything.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEntryInfo {
    /// Full zip name, e.g. `xl/media/image1.png`.
    pub name: String,
    pub compressed_size: u64,
    pub size: u64,
    /// Whether `compress` would re-encode this entry.
    pub recompressible: bool,
    /// Pixel dimensions and color layout, when the entry decodes as an image.
    pub image: Option<(u32, u32, ColorType)>,
}

/// List the files under `xl/media/` in a workbook.
pub fn inspect_workbook(path: &Path) -> Result<Vec<MediaEntryInfo>> {
    validate_input_path(path)?;

    let mut archive = ZipArchive::new(BufReader::new(File::open(path)?))?;
    let prefix = format!("{}/", MEDIA_DIR);

    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() || !entry.name().starts_with(&prefix) {
            continue;
        }

        let name = entry.name().to_string();
        let recompressible = is_recompressible_image(Path::new(&name));
        let image = if recompressible {
            let mut data = Vec::with_capacity(capacity_hint(entry.size()));
            entry.read_to_end(&mut data)?;
            sniff_image(&data)
        } else {
            None
        };

        entries.push(MediaEntryInfo {
            name,
            compressed_size: entry.compressed_size(),
            size: entry.size(),
            recompressible,
            image,
        });
    }

    Ok(entries)
}

/// Preallocation for an entry body. The declared size comes from the zip
/// header and is not trusted beyond `MAX_PREALLOC`.
fn capacity_hint(declared: u64) -> usize {
    usize::try_from(declared.min(MAX_PREALLOC)).unwrap_or(0)
}

fn sniff_image(data: &[u8]) -> Option<(u32, u32, ColorType)> {
    let img = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?
        .decode()
        .ok()?;
    Some((img.width(), img.height(), img.color()))
}

pub fn print_workbook_info(path: &Path) -> Result<()> {
    info!("📊 Analyzing workbook: {:?}", path);

    let entries = inspect_workbook(path)?;
    if entries.is_empty() {
        info!("No images found in Excel file.");
        return Ok(());
    }

    let recompressible = entries.iter().filter(|e| e.recompressible).count();
    info!(
        "📋 {} media entries, {} will be recompressed",
        entries.len(),
        recompressible
    );

    for entry in &entries {
        let short_name = entry.name.rsplit('/').next().unwrap_or(&entry.name);
        match (&entry.image, entry.recompressible) {
            (Some((w, h, color)), _) => {
                info!(
                    "  🖼️  {}: {:.1}KB, {}x{}, {:?}",
                    short_name,
                    to_kib(entry.size),
                    w,
                    h,
                    color
                );
                if color.has_alpha() {
                    info!("      💡 has transparency; it will be flattened to an opaque background");
                }
            }
            (None, true) => {
                info!(
                    "  ⚠️  {}: {:.1}KB, not decodable (compress will fail on this entry)",
                    short_name,
                    to_kib(entry.size)
                );
            }
            (None, false) => {
                info!(
                    "  📎 {}: {:.1}KB, kept as is",
                    short_name,
                    to_kib(entry.size)
                );
            }
        }
    }

    let total: u64 = entries.iter().map(|e| e.size).sum();
    info!("\n📦 Total media size: {:.1}KB", to_kib(total));
    Ok(())
}
