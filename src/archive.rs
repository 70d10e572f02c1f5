//! Zip container plumbing: unpack a workbook into a directory and pack a
//! directory back into a workbook.

use crate::error::{CompressionError, Result};
use crate::utils::archive_entry_name;
use crate::{verbose, warn};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Extract every entry of `archive_path` under `dest`, preserving relative paths.
///
/// Returns the zip names of the extracted files in archive order. Entries
/// whose names would land outside `dest` are skipped.
pub fn extract_archive(archive_path: &Path, dest: &Path) -> Result<Vec<String>> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    let mut extracted = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        let relative = match entry.enclosed_name() {
            Some(p) => p.to_path_buf(),
            None => {
                warn!(
                    "Skipping unsafe archive entry {}; it will be missing from the output",
                    entry.name()
                );
                continue;
            }
        };
        let out_path = dest.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = BufWriter::new(File::create(&out_path)?);
        io::copy(&mut entry, &mut out)?;

        verbose!("Extracted {} ({} bytes)", entry.name(), entry.size());
        extracted.push(archive_entry_name(&relative));
    }

    Ok(extracted)
}

/// Write every file under `root` into a new Deflate-compressed zip at `output`.
///
/// Files named in `entry_order` come first, in that order; anything else
/// follows sorted by path. The archive is built in a temporary sibling of
/// `output` and renamed into place only once it is complete, so an existing
/// file at `output` is either fully replaced or left alone.
///
/// Returns the number of entries written.
pub fn pack_directory(root: &Path, output: &Path, entry_order: &[String]) -> Result<usize> {
    let files = collect_tree_files(root, entry_order)?;

    let output_dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut staging = NamedTempFile::new_in(&output_dir)?;

    {
        let mut writer = ZipWriter::new(BufWriter::new(staging.as_file_mut()));
        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, path) in &files {
            writer.start_file(name.as_str(), options)?;
            let mut source = BufReader::new(File::open(path)?);
            io::copy(&mut source, &mut writer)?;
        }

        let buffered = writer.finish()?;
        buffered
            .into_inner()
            .map_err(|e| CompressionError::Io(e.into_error()))?
            .sync_all()?;
    }

    staging.persist(output).map_err(|e| CompressionError::Io(e.error))?;
    Ok(files.len())
}

/// All regular files under `root` as `(entry name, path)`, ordered for packing.
fn collect_tree_files(root: &Path, entry_order: &[String]) -> Result<Vec<(String, PathBuf)>> {
    let rank: HashMap<&str, usize> = entry_order
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| CompressionError::Io(io::Error::new(io::ErrorKind::Other, e)))?;
        files.push((archive_entry_name(relative), entry.path().to_path_buf()));
    }

    // Stable sort keeps walk order among names the input archive did not have.
    files.sort_by_key(|(name, _)| rank.get(name.as_str()).copied().unwrap_or(usize::MAX));
    Ok(files)
}
