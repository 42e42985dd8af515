//! Duplicate-transition detection within a single relation.
//!
//! A well-formed `.tra` file contains at most one record per
//! `(source, destination)` pair; a truncation engine that emits the same
//! pair twice has re-explored a state. The scan reports every further
//! occurrence of a pair against its first one.

use ahash::AHashMap;

use crate::TransitionRelation;

/// Two records for the same `(source, destination)` pair.
///
/// Carries both rates and both line numbers so a human can decide which
/// occurrence is authoritative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DuplicateEntry {
    pub source: usize,
    pub destination: usize,
    pub first_rate: f64,
    pub second_rate: f64,
    pub first_line: usize,
    pub second_line: usize,
}

/// Outcome of a duplicate scan.
#[derive(Clone, Debug, PartialEq)]
pub enum DuplicateReport {
    /// Every `(source, destination)` pair occurs at most once.
    Clean,
    /// One entry per occurrence beyond the first of a pair.
    Duplicates(Vec<DuplicateEntry>),
}

impl DuplicateReport {
    pub fn is_clean(&self) -> bool {
        matches!(self, DuplicateReport::Clean)
    }

    pub fn entries(&self) -> &[DuplicateEntry] {
        match self {
            DuplicateReport::Clean => &[],
            DuplicateReport::Duplicates(entries) => entries,
        }
    }
}

/// Scans *relation* for records sharing a `(source, destination)` pair.
///
/// The first occurrence of a pair (lowest line number) is the reference;
/// every further occurrence produces one [`DuplicateEntry`] against it.
/// Entries are ordered by source, destination, and the line of the offending
/// occurrence.
pub fn find_duplicates(relation: &TransitionRelation) -> DuplicateReport {
    // Occurrences of one pair always sit in the same source bucket, in line
    // order, so a first-seen map needs no global ordering pass.
    let mut first_seen: AHashMap<(usize, usize), (f64, usize)> = AHashMap::new();
    let mut entries = Vec::new();
    for (source, record) in relation.iter() {
        let key = (source, record.destination);
        match first_seen.get(&key) {
            None => {
                first_seen.insert(key, (record.rate, record.line));
            }
            Some(&(first_rate, first_line)) => entries.push(DuplicateEntry {
                source,
                destination: record.destination,
                first_rate,
                second_rate: record.rate,
                first_line,
                second_line: record.line,
            }),
        }
    }
    if entries.is_empty() {
        DuplicateReport::Clean
    } else {
        entries.sort_by_key(|entry| (entry.source, entry.destination, entry.second_line));
        DuplicateReport::Duplicates(entries)
    }
}
