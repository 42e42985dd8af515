use std::path::Path;

use serde::Serialize;
use tracheck::TransitionRecord;
use tracheck::compare::ComparisonOutcome;
use tracheck::duplicates::DuplicateReport;
use tracheck::formats::tra::Parsed;

const BANNER: &str = "=======================================";

/// Everything the checks found in one parsed file.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: String,
    pub records: usize,
    pub states: usize,
    pub malformed: Vec<MalformedItem>,
    pub duplicates: Vec<DuplicateItem>,
}

#[derive(Debug, Serialize)]
pub struct MalformedItem {
    pub line: usize,
    pub raw: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct DuplicateItem {
    pub source: usize,
    pub destination: usize,
    pub first_rate: f64,
    pub second_rate: f64,
    pub first_line: usize,
    pub second_line: usize,
}

#[derive(Debug, Serialize)]
pub struct TripleItem {
    pub source: usize,
    pub destination: usize,
    pub rate: f64,
}

/// The full result of a `compare` run: per-file diagnostics plus the
/// structural diff, so an equal verdict is never mistaken for two validated
/// files.
#[derive(Debug, Serialize)]
pub struct CompareReport {
    pub first: FileReport,
    pub second: FileReport,
    pub equal: bool,
    pub only_in_first: Vec<TripleItem>,
    pub only_in_second: Vec<TripleItem>,
}

impl FileReport {
    pub fn new(path: &Path, parsed: &Parsed, duplicates: &DuplicateReport) -> Self {
        Self {
            path: path.display().to_string(),
            records: parsed.relation.record_count(),
            states: parsed.relation.state_count(),
            malformed: parsed
                .malformed
                .iter()
                .map(|line| MalformedItem {
                    line: line.line,
                    raw: line.raw.clone(),
                    reason: line.reason.to_string(),
                })
                .collect(),
            duplicates: duplicates
                .entries()
                .iter()
                .map(|entry| DuplicateItem {
                    source: entry.source,
                    destination: entry.destination,
                    first_rate: entry.first_rate,
                    second_rate: entry.second_rate,
                    first_line: entry.first_line,
                    second_line: entry.second_line,
                })
                .collect(),
        }
    }

    pub fn has_findings(&self) -> bool {
        !self.malformed.is_empty() || !self.duplicates.is_empty()
    }
}

impl CompareReport {
    pub fn new(first: FileReport, second: FileReport, outcome: &ComparisonOutcome) -> Self {
        let (only_in_first, only_in_second) = match outcome {
            ComparisonOutcome::Equal => (Vec::new(), Vec::new()),
            ComparisonOutcome::Different {
                only_in_first,
                only_in_second,
            } => (triples(only_in_first), triples(only_in_second)),
        };
        Self {
            equal: outcome.is_equal(),
            first,
            second,
            only_in_first,
            only_in_second,
        }
    }

    pub fn has_findings(&self) -> bool {
        !self.equal || self.first.has_findings() || self.second.has_findings()
    }
}

fn triples(records: &[TransitionRecord]) -> Vec<TripleItem> {
    records
        .iter()
        .map(|record| TripleItem {
            source: record.source,
            destination: record.destination,
            rate: record.rate,
        })
        .collect()
}

/// Prints the summary counts of one file followed by its itemized findings.
pub fn print_file(report: &FileReport) {
    println!("{BANNER}");
    println!("file: {}", report.path);
    println!("  records: {}, states: {}", report.records, report.states);
    if report.malformed.is_empty() {
        println!("  no malformed lines");
    } else {
        println!("  malformed lines: {}", report.malformed.len());
        for item in &report.malformed {
            println!("    line {}: {:?} ({})", item.line, item.raw, item.reason);
        }
    }
    if report.duplicates.is_empty() {
        println!("  no duplicates found");
    } else {
        println!("  duplicates: {}", report.duplicates.len());
        for item in &report.duplicates {
            println!(
                "    ({}, {}): rate {} at line {} vs rate {} at line {}",
                item.source,
                item.destination,
                item.first_rate,
                item.first_line,
                item.second_rate,
                item.second_line
            );
        }
    }
}

pub fn print_compare(report: &CompareReport) {
    print_file(&report.first);
    print_file(&report.second);
    println!("{BANNER}");
    if report.equal {
        println!("transition files contain the same transitions");
    } else {
        println!("transition files differ");
        println!(
            "  only in {}: {}",
            report.first.path,
            report.only_in_first.len()
        );
        for item in &report.only_in_first {
            println!("    {} -> {} rate {}", item.source, item.destination, item.rate);
        }
        println!(
            "  only in {}: {}",
            report.second.path,
            report.only_in_second.len()
        );
        for item in &report.only_in_second {
            println!("    {} -> {} rate {}", item.source, item.destination, item.rate);
        }
    }
    println!("{BANNER}");
}
