use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use timetable_converter::{dump_rows, ConvertOptions, ScheduleProcessor, ScheduleStorage, Workbook};

#[derive(Parser)]
#[command(author, version, about = "Convert timetable spreadsheet exports into a course list")]
struct Args {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert every spreadsheet in a directory into one JSON course list
    Convert {
        #[arg(long, default_value = "raw-data")]
        input: PathBuf,
        #[arg(long, default_value = "public/data.json")]
        output: PathBuf,
        /// Read every worksheet instead of only the first
        #[arg(long)]
        all_sheets: bool,
        /// Descend into subdirectories of the input directory
        #[arg(long)]
        recursive: bool,
        #[arg(long)]
        threads: Option<usize>,
        #[arg(long)]
        max_files: Option<usize>,
        /// Write single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print the first raw rows of a sheet for manual review
    Inspect {
        file: PathBuf,
        #[arg(long, default_value_t = 30)]
        rows: usize,
        /// Sheet name; defaults to the first sheet
        #[arg(long)]
        sheet: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match args.command {
        Command::Convert { input, output, all_sheets, recursive, threads, max_files, compact } => {
            let options = ConvertOptions {
                verbose_errors: args.verbose,
                max_files,
                parallel_threads: threads,
                all_sheets,
                recursive,
            };
            convert(options, &input, &output, compact)
        }
        Command::Inspect { file, rows, sheet } => inspect(&file, rows, sheet.as_deref()),
    }
}

fn convert(options: ConvertOptions, input: &Path, output: &Path, compact: bool) -> Result<()> {
    let processor = ScheduleProcessor::new(options);
    let result = processor.convert_directory(input)?;

    if result.stats.total_files == 0 {
        warn!("Nothing to convert; {} was not written", output.display());
        return Ok(());
    }

    let mut storage = ScheduleStorage::new(output);
    if compact {
        storage = storage.compact();
    }
    storage.save(&result.courses)?;

    let stats = &result.stats;
    info!("Data converted successfully! Saved to {}", output.display());
    info!("- Files: {} ({} failed, {} without courses)", stats.total_files, stats.error_files, stats.empty_files);
    info!("- Rows: {} headers, {} time rows, {} terminators, {} ignored",
        stats.rows.headers, stats.rows.time_rows, stats.rows.terminators, stats.rows.ignored);
    info!("- Courses: {}, sections: {}, duplicate sections merged: {}",
        stats.courses, stats.sections, stats.duplicate_sections);

    Ok(())
}

fn inspect(file: &Path, limit: usize, sheet: Option<&str>) -> Result<()> {
    let mut workbook = Workbook::open(file)?;
    let sheet = workbook.read_named_or_first(sheet)?;
    info!("Sheet '{}' has {} rows", sheet.name, sheet.rows.len());

    let dump = dump_rows(&sheet.rows, limit)
        .with_context(|| format!("Failed to dump rows of {}", file.display()))?;
    println!("{}", dump);
    Ok(())
}
