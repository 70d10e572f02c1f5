use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use xlsx_squeeze::cli::{Args, Commands};
use xlsx_squeeze::logger::{set_verbosity, Verbosity};
use xlsx_squeeze::{error, print_workbook_info, CompressionJob};

fn main() -> ExitCode {
    let args = Args::parse();
    set_verbosity(Verbosity::from_flags(args.quiet, args.verbose));

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Compress { input, quality, temp_dir } => {
            compress(&input, quality, temp_dir.as_deref())?;
        }
        Commands::Info { input } => {
            print_workbook_info(&input)
                .with_context(|| format!("Failed to inspect {}", input.display()))?;
        }
    }

    Ok(())
}

fn compress(input: &Path, quality: i32, temp_dir: Option<&Path>) -> Result<()> {
    let mut job = CompressionJob::new(input, quality)?;
    if let Some(root) = temp_dir {
        job = job.work_dir_root(root);
    }

    job.run()
        .with_context(|| format!("Failed to compress {}", input.display()))?;
    Ok(())
}
