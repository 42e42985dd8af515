use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info, warn};
use memory_stats::memory_stats;
use tracheck::compare::compare;
use tracheck::duplicates::find_duplicates;
use tracheck::formats::tra::{parse_file, parse_file_pair};
use tracheck::formats::{Delimiter, TraError};

pub mod report;
use report::*;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Field delimiter of the input files.
    #[arg(value_enum, short, long, default_value_t = FieldDelimiter::Comma, global = true)]
    delimiter: FieldDelimiter,
    /// Emit the report as JSON instead of the human-readable summary.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum FieldDelimiter {
    Comma,
    Whitespace,
}

impl From<FieldDelimiter> for Delimiter {
    fn from(delimiter: FieldDelimiter) -> Self {
        match delimiter {
            FieldDelimiter::Comma => Delimiter::Comma,
            FieldDelimiter::Whitespace => Delimiter::Whitespace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check transition files for duplicate and malformed records.
    VerifyDuplicates {
        /// Transition files to check.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Check that two transition files encode the same relation.
    Compare {
        first: PathBuf,
        second: PathBuf,
    },
}

/// Runs the selected check; `Ok(true)` means findings were reported.
fn run(args: &Args) -> Result<bool, TraError> {
    let delimiter = args.delimiter.into();
    match &args.command {
        Command::VerifyDuplicates { files } => {
            let mut reports = Vec::with_capacity(files.len());
            for path in files {
                let parsed = parse_file(path, delimiter)?;
                let duplicates = find_duplicates(&parsed.relation);
                reports.push(FileReport::new(path, &parsed, &duplicates));
            }
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&reports).expect("serializing report")
                );
            } else {
                for report in &reports {
                    print_file(report);
                }
            }
            Ok(reports.iter().any(FileReport::has_findings))
        }
        Command::Compare { first, second } => {
            let (first_result, second_result) = parse_file_pair(first, second, delimiter);
            let first_parsed = first_result?;
            let second_parsed = second_result?;
            let outcome = compare(&first_parsed.relation, &second_parsed.relation);
            let report = CompareReport::new(
                FileReport::new(first, &first_parsed, &find_duplicates(&first_parsed.relation)),
                FileReport::new(
                    second,
                    &second_parsed,
                    &find_duplicates(&second_parsed.relation),
                ),
                &outcome,
            );
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).expect("serializing report")
                );
            } else {
                print_compare(&report);
            }
            Ok(report.has_findings())
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let (pre_physical_mem, pre_virtual_mem) = if let Some(usage) = memory_stats() {
        (usage.physical_mem, usage.virtual_mem)
    } else {
        warn!("Couldn't get the current memory usage :(");
        (0, 0)
    };
    let time_start = Instant::now();
    info!("Using [{:?}] as field delimiter.", args.delimiter);

    let code = match run(&args) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(1),
        Err(err) => {
            error!("{err}");
            ExitCode::from(2)
        }
    };

    let elapsed = time_start.elapsed();
    let (post_physical_mem, post_virtual_mem) = if let Some(usage) = memory_stats() {
        (usage.physical_mem, usage.virtual_mem)
    } else {
        warn!("Couldn't get the current memory usage :(");
        (0, 0)
    };
    info!(
        "Elapsed: {:?}. physical mem used: {:.2} MB. virtual mem used: {:.2} MB",
        elapsed,
        post_physical_mem.saturating_sub(pre_physical_mem) as f64 / 1048576.0,
        post_virtual_mem.saturating_sub(pre_virtual_mem) as f64 / 1048576.0
    );

    code
}
