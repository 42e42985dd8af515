pub mod compare;
pub mod duplicates;
pub mod formats;

use ahash::AHashMap;

/// A single transition of a CTMC, as read from one line of a `.tra` file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionRecord {
    pub source: usize,
    pub destination: usize,
    pub rate: f64,
}

/// One outgoing entry of a state.
///
/// Retains the 1-based line number it was parsed from, so duplicate findings
/// can point back at the offending lines of the input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outgoing {
    pub destination: usize,
    pub rate: f64,
    pub line: usize,
}

/// A sparse CTMC transition relation.
///
/// For every source state, the outgoing transitions in the order they
/// appeared in the input. The relation is built once by the parser and only
/// read afterwards; the duplicate detector and the comparator never mutate
/// it.
#[derive(Clone, Debug, Default)]
pub struct TransitionRelation {
    records: AHashMap<usize, Vec<Outgoing>>,
    state_count: usize,
    record_count: usize,
}

impl TransitionRelation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transition to the relation.
    ///
    /// A record sharing its `(source, destination)` pair with an earlier one
    /// is stored as well; duplicates are a reported finding, not a reason to
    /// drop data.
    pub fn push(&mut self, source: usize, destination: usize, rate: f64, line: usize) {
        self.records.entry(source).or_default().push(Outgoing {
            destination,
            rate,
            line,
        });
        self.state_count = self.state_count.max(source + 1).max(destination + 1);
        self.record_count += 1;
    }

    /// The outgoing transitions of *source*, in insertion order.
    pub fn outgoing(&self, source: usize) -> &[Outgoing] {
        self.records.get(&source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All records of the relation, line numbers included.
    ///
    /// Sources come out in hash order; entries of one source keep their
    /// insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Outgoing)> + '_ {
        self.records
            .iter()
            .flat_map(|(source, outgoing)| outgoing.iter().map(move |entry| (*source, entry)))
    }

    /// Highest state index observed plus one, `0` for an empty relation.
    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// Total number of parsed records, duplicates included.
    pub fn record_count(&self) -> usize {
        self.record_count
    }
}
