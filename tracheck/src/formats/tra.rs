//! The `.tra` transition-rate file format.
//!
//! The headerless dialect written by CTMC state-space truncation engines:
//! one record per line, fields `source`, `destination`, `rate` under a
//! configured delimiter, blank lines ignored. It is the rate-matrix export
//! format popularized by the *Markov Reward Model Checker* and its
//! descendants.

use std::path::Path;

use log::debug;

use crate::TransitionRelation;

use super::{Delimiter, MalformedLine, MalformedReason, TraError};

/// Result of parsing one `.tra` source to completion.
///
/// A source with malformed lines still counts as parsed: `relation` holds
/// every well-formed record and `malformed` holds everything else, so the
/// downstream checks run on the salvageable part.
#[derive(Clone, Debug, Default)]
pub struct Parsed {
    pub relation: TransitionRelation,
    pub malformed: Vec<MalformedLine>,
}

/// Parses `.tra` text into a [`TransitionRelation`].
///
/// Total over file content: a malformed line is recorded with its line
/// number, raw text, and a specific reason, and parsing continues with the
/// next line.
pub fn parse(input: &str, delimiter: Delimiter) -> Parsed {
    let mut parsed = Parsed::default();
    for (idx, raw) in input.lines().enumerate() {
        let number = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }
        match parse_line(raw, delimiter) {
            Ok((source, destination, rate)) => {
                parsed.relation.push(source, destination, rate, number);
            }
            Err(reason) => parsed.malformed.push(MalformedLine {
                line: number,
                raw: raw.to_owned(),
                reason,
            }),
        }
    }
    parsed
}

fn parse_line(raw: &str, delimiter: Delimiter) -> Result<(usize, usize, f64), MalformedReason> {
    let fields = delimiter.split(raw);
    let [source, destination, rate] = fields.as_slice() else {
        return Err(MalformedReason::WrongFieldCount(fields.len()));
    };
    let source = parse_index(source)?;
    let destination = parse_index(destination)?;
    let rate: f64 = rate.parse().map_err(|_| MalformedReason::NonNumericRate)?;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(MalformedReason::NonPositiveRate);
    }
    Ok((source, destination, rate))
}

fn parse_index(field: &str) -> Result<usize, MalformedReason> {
    field.parse().map_err(|_| {
        if field.parse::<i64>().is_ok_and(|value| value < 0) {
            MalformedReason::NegativeIndex
        } else {
            MalformedReason::NonIntegerIndex
        }
    })
}

/// Reads and parses the file at *path*.
///
/// The read is the only fallible step; it is scoped to this call, so the
/// handle is released on every exit path.
pub fn parse_file(path: &Path, delimiter: Delimiter) -> Result<Parsed, TraError> {
    let source = std::fs::read_to_string(path).map_err(|source| TraError::SourceUnavailable {
        path: path.to_owned(),
        source,
    })?;
    let parsed = parse(&source, delimiter);
    debug!(
        "Parsed {} records ({} malformed lines) from {}.",
        parsed.relation.record_count(),
        parsed.malformed.len(),
        path.display()
    );
    Ok(parsed)
}

/// Parses the two inputs of a comparison concurrently.
///
/// The parses share no state, so this is a plain fork-join over both files.
pub fn parse_file_pair(
    first: &Path,
    second: &Path,
    delimiter: Delimiter,
) -> (Result<Parsed, TraError>, Result<Parsed, TraError>) {
    rayon::join(
        || parse_file(first, delimiter),
        || parse_file(second, delimiter),
    )
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::Outgoing;

    use super::*;

    #[test]
    fn parses_comma_delimited_records() {
        let parsed = parse("0,1,2.5\n1,2,1.0\n", Delimiter::Comma);
        assert!(parsed.malformed.is_empty());
        assert_eq!(parsed.relation.record_count(), 2);
        assert_eq!(parsed.relation.state_count(), 3);
        assert_eq!(
            parsed.relation.outgoing(0),
            &[Outgoing {
                destination: 1,
                rate: 2.5,
                line: 1
            }]
        );
    }

    #[test]
    fn parses_whitespace_delimited_records() {
        let parsed = parse("0 1 2.5\n1 2 1.0\n", Delimiter::Whitespace);
        assert!(parsed.malformed.is_empty());
        assert_eq!(parsed.relation.record_count(), 2);
        assert_eq!(parsed.relation.state_count(), 3);
    }

    #[test]
    fn empty_input_yields_empty_relation() {
        let parsed = parse("", Delimiter::Comma);
        assert_eq!(parsed.relation.record_count(), 0);
        assert_eq!(parsed.relation.state_count(), 0);
        assert!(parsed.malformed.is_empty());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let parsed = parse("0,1,2.5\n\n   \n1,2,1.0\n\n", Delimiter::Comma);
        assert_eq!(parsed.relation.record_count(), 2);
        assert!(parsed.malformed.is_empty());
    }

    #[test]
    fn malformed_line_is_collected_and_parsing_continues() {
        let parsed = parse("abc,1,2.5\n0,1,2.5\n", Delimiter::Comma);
        assert_eq!(parsed.malformed.len(), 1);
        assert_eq!(parsed.malformed[0].line, 1);
        assert_eq!(parsed.malformed[0].raw, "abc,1,2.5");
        assert_eq!(parsed.malformed[0].reason, MalformedReason::NonIntegerIndex);
        assert_eq!(parsed.relation.record_count(), 1);
        assert_eq!(parsed.relation.outgoing(0).len(), 1);
    }

    #[test]
    fn wrong_field_count_is_reported() {
        let parsed = parse("0,1\n0,1,2.5,9\n", Delimiter::Comma);
        assert_eq!(parsed.malformed.len(), 2);
        assert_eq!(
            parsed.malformed[0].reason,
            MalformedReason::WrongFieldCount(2)
        );
        assert_eq!(
            parsed.malformed[1].reason,
            MalformedReason::WrongFieldCount(4)
        );
        assert_eq!(parsed.relation.record_count(), 0);
    }

    #[test]
    fn negative_index_is_distinguished_from_non_integer() {
        let parsed = parse("-1,2,0.5\n0,x,0.5\n", Delimiter::Comma);
        assert_eq!(parsed.malformed[0].reason, MalformedReason::NegativeIndex);
        assert_eq!(parsed.malformed[1].reason, MalformedReason::NonIntegerIndex);
    }

    #[test]
    fn non_numeric_rate_is_reported() {
        let parsed = parse("0,1,fast\n", Delimiter::Comma);
        assert_eq!(parsed.malformed[0].reason, MalformedReason::NonNumericRate);
    }

    #[test]
    fn non_positive_rate_is_flagged_not_silently_accepted() {
        let parsed = parse("0,1,0.0\n1,2,-2.5\n2,3,inf\n3,4,NaN\n", Delimiter::Comma);
        assert_eq!(parsed.malformed.len(), 4);
        assert!(
            parsed
                .malformed
                .iter()
                .all(|line| line.reason == MalformedReason::NonPositiveRate)
        );
        assert_eq!(parsed.relation.record_count(), 0);
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let err = parse_file(Path::new("no-such-file.tra"), Delimiter::Comma).unwrap_err();
        assert!(matches!(err, TraError::SourceUnavailable { .. }));
    }
}
