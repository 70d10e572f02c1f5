use crate::archive::{extract_archive, pack_directory};
use crate::constants::{DEFAULT_QUALITY, MEDIA_DIR, TEMP_DIR_PREFIX};
use crate::error::Result;
use crate::processing::{collect_media_images, recompress_image, ImageEntry};
use crate::report::{format_image_line, print_banner, print_image_totals, print_summary};
use crate::utils::{create_progress_spinner, derive_output_path};
use crate::validation::{validate_input_path, validate_quality};
use crate::{info, verbose};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::{Builder, TempDir};

/// A single "shrink the images in this workbook" request.
///
/// Construction validates the input, so a `CompressionJob` that exists is
/// ready to run.
#[derive(Debug, Clone)]
pub struct CompressionJob {
    input: PathBuf,
    output: PathBuf,
    quality: u8,
    work_dir_root: Option<PathBuf>,
}

/// What a finished job did.
#[derive(Debug, Clone, Default)]
pub struct JobReport {
    pub output_path: PathBuf,
    /// `None` when the workbook has no `xl/media` directory.
    pub images: Option<Vec<ImageEntry>>,
    pub images_before: u64,
    pub images_after: u64,
    pub original_size: u64,
    pub compressed_size: u64,
    pub entries_written: usize,
}

impl JobReport {
    pub fn image_count(&self) -> usize {
        self.images.as_ref().map_or(0, Vec::len)
    }
}

impl CompressionJob {
    /// Validate `input` and `quality` and derive the output path.
    ///
    /// # Returns
    /// * `Err(CompressionError::FileNotFound)` if `input` does not exist
    /// * `Err(CompressionError::InvalidQuality)` if `quality` is outside 1..=95
    pub fn new(input: impl Into<PathBuf>, quality: i32) -> Result<Self> {
        let input = input.into();
        validate_input_path(&input)?;
        let quality = validate_quality(quality)?;
        let output = derive_output_path(&input);

        Ok(Self {
            input,
            output,
            quality,
            work_dir_root: None,
        })
    }

    /// Same as [`CompressionJob::new`] with the default quality of 70.
    pub fn with_default_quality(input: impl Into<PathBuf>) -> Result<Self> {
        Self::new(input, DEFAULT_QUALITY)
    }

    /// Create the working directory under `root` instead of the system temp dir.
    pub fn work_dir_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.work_dir_root = Some(root.into());
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Run the pipeline: extract, re-encode media images, re-pack, report.
    ///
    /// The working directory is removed whether this returns `Ok` or `Err`.
    pub fn run(&self) -> Result<JobReport> {
        let start_time = Instant::now();
        print_banner();

        let work_dir = self.create_work_dir()?;
        verbose!("Working directory: {}", work_dir.path().display());

        // On any early return below, dropping `work_dir` removes the tree and
        // ignores removal errors, so the original error is what surfaces.
        let mut report = self.process_in(work_dir.path())?;

        info!("🧹 Cleaning up temporary files...");
        work_dir.close()?;

        report.original_size = fs::metadata(&self.input)?.len();
        report.compressed_size = fs::metadata(&self.output)?.len();
        print_summary(report.original_size, report.compressed_size, &self.output);
        verbose!("Finished in {:.2?}", start_time.elapsed());

        Ok(report)
    }

    fn create_work_dir(&self) -> Result<TempDir> {
        let mut builder = Builder::new();
        builder.prefix(TEMP_DIR_PREFIX);
        let dir = match &self.work_dir_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(dir)
    }

    fn process_in(&self, work_dir: &Path) -> Result<JobReport> {
        let pb = create_progress_spinner("Extracting workbook contents...");
        let entry_order = extract_archive(&self.input, work_dir)?;
        pb.finish_and_clear();
        info!("📦 Extracted {} entries", entry_order.len());

        let mut report = JobReport {
            output_path: self.output.clone(),
            ..JobReport::default()
        };

        let media_dir = work_dir.join(MEDIA_DIR);
        if media_dir.is_dir() {
            let image_paths = collect_media_images(&media_dir)?;
            info!("🖼️  Found {} images", image_paths.len());

            let mut images = Vec::with_capacity(image_paths.len());
            for path in &image_paths {
                let entry = recompress_image(path, self.quality)?;
                info!("{}", format_image_line(&entry));
                report.images_before += entry.size_before;
                report.images_after += entry.size_after;
                images.push(entry);
            }
            report.images = Some(images);

            print_image_totals(report.images_before, report.images_after);
        } else {
            info!("No images found in Excel file.");
        }

        let pb = create_progress_spinner("Rebuilding workbook...");
        report.entries_written = pack_directory(work_dir, &self.output, &entry_order)?;
        pb.finish_and_clear();
        info!("📦 Rebuilt workbook with {} entries", report.entries_written);

        // The staging file is created 0600; mirror the input's mode instead.
        let permissions = fs::metadata(&self.input)?.permissions();
        fs::set_permissions(&self.output, permissions)?;

        Ok(report)
    }
}

/// Recompress the images in `input` and return the path of the new workbook.
///
/// Writes `<stem>_compressed<.ext>` next to `input`, replacing any existing
/// file of that name. `input` itself is never modified.
///
/// # Example
/// ```no_run
/// use xlsx_squeeze::compress_workbook;
///
/// let output = compress_workbook("quarterly.xlsx", 70)?;
/// assert!(output.ends_with("quarterly_compressed.xlsx"));
/// # Ok::<(), xlsx_squeeze::CompressionError>(())
/// ```
pub fn compress_workbook(input: impl AsRef<Path>, quality: i32) -> Result<PathBuf> {
    let job = CompressionJob::new(input.as_ref(), quality)?;
    let report = job.run()?;
    Ok(report.output_path)
}
