//! Input file formats.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod tra;

/// Fatal failures of a parse operation.
///
/// Malformed *content* never fails a parse; only the inability to read the
/// source does.
#[derive(Debug, Error)]
pub enum TraError {
    #[error("cannot read `{}`: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Field delimiter of a `.tra` file.
///
/// Both delimiters occur in engine output. The choice is an explicit
/// configuration option rather than auto-detected: detection is ambiguous
/// for lines that are malformed under either policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delimiter {
    #[default]
    Comma,
    Whitespace,
}

impl Delimiter {
    fn split(self, line: &str) -> Vec<&str> {
        match self {
            Delimiter::Comma => line.split(',').map(str::trim).collect(),
            Delimiter::Whitespace => line.split_whitespace().collect(),
        }
    }
}

/// Why a line failed to parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MalformedReason {
    /// The line does not split into exactly three fields.
    WrongFieldCount(usize),
    /// A state index field is not an unsigned integer.
    NonIntegerIndex,
    /// The rate field is not a number.
    NonNumericRate,
    /// A state index is negative.
    NegativeIndex,
    /// The rate is zero, negative, or not finite.
    NonPositiveRate,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::WrongFieldCount(found) => {
                write!(f, "expected 3 fields, found {found}")
            }
            MalformedReason::NonIntegerIndex => {
                write!(f, "state index is not an unsigned integer")
            }
            MalformedReason::NonNumericRate => write!(f, "rate is not a number"),
            MalformedReason::NegativeIndex => write!(f, "state index is negative"),
            MalformedReason::NonPositiveRate => {
                write!(f, "rate is not a positive finite number")
            }
        }
    }
}

/// A line that failed to parse, kept verbatim for diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct MalformedLine {
    /// 1-based line number.
    pub line: usize,
    pub raw: String,
    pub reason: MalformedReason,
}
