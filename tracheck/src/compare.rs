//! Structural comparison of two transition relations.
//!
//! Two relations are equal when every `(source, destination)` pair present
//! in either is present in both with the same rate. Rates compare exactly on
//! the parsed value; the relation of a deterministic engine is expected to
//! be byte-reproducible.
//!
//! The comparison is a symmetric two-pass diff over independent read-only
//! maps: one pass over the first relation's keys against the second, one
//! pass over the second's remaining keys. Neither input is mutated and
//! nothing recurses.

use ahash::AHashMap;
use itertools::Itertools;

use crate::{TransitionRecord, TransitionRelation};

/// Outcome of comparing two relations.
#[derive(Clone, Debug, PartialEq)]
pub enum ComparisonOutcome {
    /// Both relations contain the same `(source, destination, rate)` triples.
    Equal,
    /// The relations differ.
    ///
    /// A pair present on one side only appears in that side's list; a pair
    /// present on both sides with different rates appears in both lists,
    /// each with its own rate. Lists are ordered by `(source, destination)`.
    Different {
        only_in_first: Vec<TransitionRecord>,
        only_in_second: Vec<TransitionRecord>,
    },
}

impl ComparisonOutcome {
    pub fn is_equal(&self) -> bool {
        matches!(self, ComparisonOutcome::Equal)
    }
}

/// The rate of the first record per `(source, destination)` pair.
///
/// Later occurrences of a pair are ignored here; duplicates are an
/// orthogonal finding, reported by [`crate::duplicates::find_duplicates`].
fn first_rates(relation: &TransitionRelation) -> AHashMap<(usize, usize), f64> {
    let mut rates = AHashMap::with_capacity(relation.record_count());
    for (source, record) in relation.iter() {
        rates.entry((source, record.destination)).or_insert(record.rate);
    }
    rates
}

/// Compares two relations for structural equality.
///
/// Never fails: relations parsed out of files with malformed lines compare
/// on their successfully parsed subset, and the caller surfaces the
/// malformed-line diagnostics alongside this outcome.
pub fn compare(first: &TransitionRelation, second: &TransitionRelation) -> ComparisonOutcome {
    let first_map = first_rates(first);
    let second_map = first_rates(second);

    let mut only_in_first = Vec::new();
    let mut only_in_second = Vec::new();

    for (source, destination) in first_map.keys().copied().sorted() {
        let rate = first_map[&(source, destination)];
        match second_map.get(&(source, destination)) {
            Some(&other) if other == rate => {}
            Some(&other) => {
                only_in_first.push(TransitionRecord {
                    source,
                    destination,
                    rate,
                });
                only_in_second.push(TransitionRecord {
                    source,
                    destination,
                    rate: other,
                });
            }
            None => only_in_first.push(TransitionRecord {
                source,
                destination,
                rate,
            }),
        }
    }
    for (source, destination) in second_map.keys().copied().sorted() {
        if !first_map.contains_key(&(source, destination)) {
            only_in_second.push(TransitionRecord {
                source,
                destination,
                rate: second_map[&(source, destination)],
            });
        }
    }

    if only_in_first.is_empty() && only_in_second.is_empty() {
        ComparisonOutcome::Equal
    } else {
        only_in_second.sort_by_key(|record| (record.source, record.destination));
        ComparisonOutcome::Different {
            only_in_first,
            only_in_second,
        }
    }
}
