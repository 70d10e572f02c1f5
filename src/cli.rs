use crate::constants::DEFAULT_QUALITY;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "xlsx-squeeze",
    about = "Shrink Excel workbooks by recompressing the images embedded in them",
    long_about = "xlsx-squeeze unpacks an .xlsx workbook, re-encodes the PNG and JPEG images stored under \
                  xl/media as JPEG at the requested quality, and packs everything back into a new workbook. \
                  All other parts of the workbook are copied unchanged and the original file is never modified.",
    version,
    after_help = "EXAMPLES:\n  \
    xlsx-squeeze compress report.xlsx\n  \
    xlsx-squeeze compress report.xlsx -q 50\n  \
    xlsx-squeeze --quiet compress report.xlsx --temp-dir /var/tmp\n  \
    xlsx-squeeze info report.xlsx"
)]
pub struct Args {
    #[arg(short = 's', long, global = true, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, global = true, help = "Print per-entry details")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Recompress the images inside a workbook",
        long_about = "Write <name>_compressed.<ext> next to the input with every PNG/JPEG image under xl/media \
                      re-encoded as JPEG. Transparent images are flattened to an opaque background. \
                      An existing output file is overwritten."
    )]
    Compress {
        #[arg(help = "Workbook to compress")]
        input: PathBuf,

        #[arg(
            short = 'q',
            long,
            default_value_t = DEFAULT_QUALITY,
            allow_negative_numbers = true,
            help = "JPEG quality (1-95)",
            long_help = "JPEG quality from 1 (smallest, worst) to 95 (largest, best)."
        )]
        quality: i32,

        #[arg(
            long,
            value_name = "DIR",
            help = "Directory for the temporary working copy (default: system temp)"
        )]
        temp_dir: Option<PathBuf>,
    },

    #[command(
        about = "List the media stored in a workbook",
        long_about = "Show every entry under xl/media with its size, and for PNG/JPEG images their dimensions \
                      and color type. Nothing is written."
    )]
    Info {
        #[arg(help = "Workbook to analyze")]
        input: PathBuf,
    },
}
