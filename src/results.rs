use std::time::Duration;

use crate::entry::Entry;
use crate::error::LexiconError;

/// The output of a query.
///
/// An empty result means "loaded, but nothing matched". Reading from a
/// [`Lexicon`](crate::Lexicon) that has never loaded fails with
/// [`LexiconError::NotLoaded`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResults {
    /// Total number of entries that matched, before any `limit`.
    pub matches: usize,

    /// Matched entries in source order, at most `limit` of them.
    pub entries: Vec<Entry>,
}

impl QueryResults {
    pub fn is_empty(&self) -> bool {
        self.matches == 0
    }

    /// Whether `limit` cut the returned entries short.
    pub fn is_truncated(&self) -> bool {
        self.entries.len() < self.matches
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl IntoIterator for QueryResults {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryResults {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Summary of a successful load or reload.
#[derive(Debug)]
pub struct LoadReport {
    /// Data lines that produced an entry.
    pub accepted: usize,

    /// Data lines that were dropped as malformed.
    pub rejected: usize,

    /// Accepted entries dropped as exact duplicates of an earlier line.
    pub duplicates: usize,

    /// Entries in the published snapshot (`accepted - duplicates`).
    pub entries: usize,

    /// One [`LexiconError::MalformedRecord`] per dropped line.
    /// Only populated if `.collect_rejections(true)` was set on the loader.
    pub rejections: Vec<LexiconError>,

    /// Load performance statistics.
    pub stats: LoadStats,
}

/// Timing for a load, fetch included.
#[derive(Debug, Clone, Copy)]
pub struct LoadStats {
    /// Data lines parsed (header excluded).
    pub lines: usize,

    /// Wall-clock time from fetch start to snapshot publication.
    pub duration: Duration,

    /// Lines parsed per second, 0 on zero-duration loads.
    pub lines_per_sec: usize,
}

impl LoadStats {
    pub(crate) fn compute(lines: usize, duration: Duration) -> Self {
        let lps = if duration.as_secs_f64() > 0.0 {
            (lines as f64 / duration.as_secs_f64()) as usize
        } else {
            0
        };
        Self {
            lines,
            duration,
            lines_per_sec: lps,
        }
    }
}
