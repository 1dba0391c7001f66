use thiserror::Error;

use crate::entry::Entry;
use crate::error::LexiconError;

/// Why a data line was dropped.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    #[error("blank line")]
    Blank,

    #[error("no comma separating word and reference id")]
    MissingSeparator,

    #[error("word is empty")]
    EmptyWord,

    #[error("reference id is empty")]
    EmptyReferenceId,

    #[error("reference id contains characters outside [A-Za-z0-9_-]")]
    InvalidReferenceId,
}

/// Outcome of one parse pass over a dataset.
///
/// `accepted + rejected` always equals `lines`, the number of data lines
/// after the header.
#[derive(Debug, Default)]
pub struct ParseReport {
    /// Valid entries, in source order.
    pub entries: Vec<Entry>,

    /// Number of data lines that produced an entry.
    pub accepted: usize,

    /// Number of data lines that were dropped.
    pub rejected: usize,

    /// Number of data lines seen (header excluded).
    pub lines: usize,

    /// One [`LexiconError::MalformedRecord`] per dropped line. Only populated
    /// by [`parse_with_rejections`].
    pub rejections: Vec<LexiconError>,
}

/// Parse a `word,referenceId` dataset.
///
/// The first line is a header and is skipped whatever it contains. Each
/// remaining line is split at its **last** comma, so words may themselves
/// contain commas. Bad lines are counted and skipped; parsing never fails.
pub fn parse(raw: &str) -> ParseReport {
    parse_lines(raw, false)
}

/// Like [`parse`], additionally recording why each dropped line was dropped.
pub fn parse_with_rejections(raw: &str) -> ParseReport {
    parse_lines(raw, true)
}

pub(crate) fn parse_lines(raw: &str, collect_rejections: bool) -> ParseReport {
    let mut report = ParseReport::default();

    // Line 1 is the header.
    for (idx, line) in raw.lines().enumerate().skip(1) {
        report.lines += 1;
        let line_no = idx + 1;

        match parse_record(line) {
            Ok(entry) => {
                report.accepted += 1;
                report.entries.push(entry);
            }
            Err(reason) => {
                report.rejected += 1;
                tracing::debug!(line = line_no, %reason, "dropping malformed record");
                if collect_rejections {
                    report.rejections.push(LexiconError::MalformedRecord {
                        line: line_no,
                        reason,
                    });
                }
            }
        }
    }

    report
}

/// Parse a single data line.
pub fn parse_record(line: &str) -> Result<Entry, RejectReason> {
    if line.trim().is_empty() {
        return Err(RejectReason::Blank);
    }
    let (word, reference_id) = line
        .rsplit_once(',')
        .ok_or(RejectReason::MissingSeparator)?;
    Entry::new(word, reference_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "word,videoId\nHELLO,abc123\nhello world,def-456\nbad line no comma\n, emptyword\n";

    #[test]
    fn worked_example_counts() {
        let report = parse(SAMPLE);
        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected, 2);
        assert_eq!(report.lines, 4);
        assert_eq!(report.entries[0].word(), "HELLO");
        assert_eq!(report.entries[0].reference_id(), "abc123");
        assert_eq!(report.entries[1].word(), "hello world");
        assert_eq!(report.entries[1].reference_id(), "def-456");
        assert!(report.rejections.is_empty(), "rejections are opt-in");
    }

    #[test]
    fn header_is_skipped_even_if_it_looks_like_data() {
        let report = parse("apple,a1\nbanana,b2\n");
        assert_eq!(report.accepted, 1);
        assert_eq!(report.entries[0].word(), "banana");
    }

    #[test]
    fn splits_on_last_comma() {
        let e = parse_record("thank you, very much,xyz_9").unwrap();
        assert_eq!(e.word(), "thank you, very much");
        assert_eq!(e.reference_id(), "xyz_9");
    }

    #[test]
    fn classifies_rejections() {
        assert_eq!(parse_record("   "), Err(RejectReason::Blank));
        assert_eq!(parse_record("no comma"), Err(RejectReason::MissingSeparator));
        assert_eq!(parse_record("word,"), Err(RejectReason::EmptyReferenceId));
        assert_eq!(parse_record("word, a/b"), Err(RejectReason::InvalidReferenceId));
        // trailing comma leaves an empty id even if the word had commas
        assert_eq!(parse_record("a,b,"), Err(RejectReason::EmptyReferenceId));
    }

    #[test]
    fn collects_rejections_with_line_numbers() {
        let report = parse_with_rejections(SAMPLE);
        let lines: Vec<_> = report.rejections.iter().filter_map(|e| e.line()).collect();
        assert_eq!(lines, vec![4, 5]);
        assert!(report.rejections.iter().all(LexiconError::is_recoverable));
        assert!(matches!(
            report.rejections[1],
            LexiconError::MalformedRecord { reason: RejectReason::EmptyWord, .. }
        ));
    }

    #[test]
    fn handles_crlf_and_interior_blank_lines() {
        let report = parse("h\r\nA,a1\r\n\r\nB,b2\r\n");
        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.entries[1].reference_id(), "b2");
    }

    #[test]
    fn empty_and_header_only_inputs() {
        let report = parse("");
        assert_eq!((report.accepted, report.rejected, report.lines), (0, 0, 0));
        let report = parse("word,videoId");
        assert_eq!((report.accepted, report.rejected, report.lines), (0, 0, 0));
    }
}
