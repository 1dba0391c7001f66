use std::fmt;
use std::str::FromStr;

use crate::entry::{uppercase_letter, Bucket, Entry};
use crate::error::LexiconError;
use crate::index::LexiconIndex;
use crate::results::QueryResults;
use crate::traits::Matcher;

// ---------------------------------------------------------------------------
// LetterFilter
// ---------------------------------------------------------------------------

/// First step of every query: which bucket to start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LetterFilter {
    /// Every entry.
    #[default]
    All,

    /// Entries whose word starts with this letter, case-insensitively.
    Letter(char),

    /// Entries whose word does not start with a letter.
    Other,
}

impl LetterFilter {
    /// Filter on a single letter, normalized to uppercase.
    ///
    /// # Errors
    ///
    /// [`LexiconError::InvalidLetter`] if `c` is not alphabetic.
    pub fn letter(c: char) -> Result<Self, LexiconError> {
        uppercase_letter(c)
            .map(Self::Letter)
            .ok_or_else(|| LexiconError::InvalidLetter(c.to_string()))
    }

    /// The bucket this filter reads from, or `None` for [`LetterFilter::All`].
    ///
    /// A hand-built `Letter` holding a non-letter maps to a bucket that
    /// never has entries, so the query comes back empty.
    pub fn bucket(self) -> Option<Bucket> {
        match self {
            Self::All       => None,
            Self::Letter(c) => Some(Bucket::Letter(uppercase_letter(c).unwrap_or(c))),
            Self::Other     => Some(Bucket::Other),
        }
    }
}

impl From<Bucket> for LetterFilter {
    fn from(bucket: Bucket) -> Self {
        match bucket {
            Bucket::Letter(c) => Self::Letter(c),
            Bucket::Other     => Self::Other,
        }
    }
}

/// Accepts `ALL`, `OTHER` (any case) or a single letter.
impl FromStr for LetterFilter {
    type Err = LexiconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        if s.eq_ignore_ascii_case("other") {
            return Ok(Self::Other);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::letter(c),
            _               => Err(LexiconError::InvalidLetter(s.to_string())),
        }
    }
}

impl fmt::Display for LetterFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All       => f.write_str("ALL"),
            Self::Letter(c) => write!(f, "{c}"),
            Self::Other     => f.write_str("OTHER"),
        }
    }
}

// ---------------------------------------------------------------------------
// QueryBuilder
// ---------------------------------------------------------------------------

/// A read-only query against one [`LexiconIndex`] snapshot.
///
/// Created via [`LexiconIndex::select`]. Steps run in a fixed order: letter
/// bucket, then substring, then the matcher ([`AllMatcher`] unless one was
/// set with [`with_matcher`](Self::with_matcher)), then `limit`.
/// Results always keep source order.
///
/// # Example
///
/// ```rust
/// use lexicon::{LetterFilter, LexiconIndex};
///
/// let index = LexiconIndex::from_text("word,id\nhello,h1\nhelp,h2\nwater,w1\n").unwrap();
/// let results = index
///     .select()
///     .letter(LetterFilter::letter('h').unwrap())
///     .matching("LP")
///     .run();
///
/// assert_eq!(results.matches, 1);
/// assert_eq!(results.entries[0].word(), "help");
/// ```
pub struct QueryBuilder<'a> {
    index:   &'a LexiconIndex,
    letter:  LetterFilter,
    pattern: Option<SubstringMatcher>,
    matcher: Box<dyn Matcher + 'a>,
    limit:   Option<usize>,
}

impl<'a> QueryBuilder<'a> {
    pub(crate) fn new(index: &'a LexiconIndex) -> Self {
        Self {
            index,
            letter:  LetterFilter::All,
            pattern: None,
            matcher: Box::new(AllMatcher),
            limit:   None,
        }
    }

    /// Restrict to one bucket. Defaults to [`LetterFilter::All`].
    pub fn letter(mut self, letter: LetterFilter) -> Self {
        self.letter = letter;
        self
    }

    /// Keep entries whose word contains `text`, ignoring case.
    ///
    /// `text` is a literal: regex metacharacters have no special meaning.
    /// An empty `text` keeps everything.
    pub fn matching(mut self, text: &str) -> Self {
        self.pattern = SubstringMatcher::new(text);
        self
    }

    /// Replace the default [`AllMatcher`] with a custom predicate, applied
    /// after the letter and substring steps.
    pub fn with_matcher(mut self, m: impl Matcher + 'a) -> Self {
        self.matcher = Box::new(m);
        self
    }

    /// Return at most `n` entries. [`QueryResults::matches`] still counts
    /// every match.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Execute the query.
    pub fn run(self) -> QueryResults {
        let index = self.index;
        let candidates: Box<dyn Iterator<Item = &Entry> + '_> = match self.letter.bucket() {
            None         => Box::new(index.entries().iter()),
            Some(bucket) => Box::new(
                index
                    .bucket_positions(bucket)
                    .iter()
                    .filter_map(|&pos| index.get(pos)),
            ),
        };

        let limit = self.limit.unwrap_or(usize::MAX);
        let mut matches = 0;
        let mut entries = Vec::new();

        for entry in candidates {
            if let Some(pattern) = &self.pattern {
                if !pattern.is_match(entry) {
                    continue;
                }
            }
            if !self.matcher.is_match(entry) {
                continue;
            }
            matches += 1;
            if entries.len() < limit {
                entries.push(entry.clone());
            }
        }

        QueryResults { matches, entries }
    }
}

// ---------------------------------------------------------------------------
// Built-in matchers
// ---------------------------------------------------------------------------

/// Matches entries whose word contains `pattern`, ignoring case.
#[derive(Debug, Clone)]
pub struct SubstringMatcher {
    pattern: String,
}

impl SubstringMatcher {
    /// `None` for an empty pattern, which would match everything anyway.
    pub fn new(pattern: &str) -> Option<Self> {
        if pattern.is_empty() {
            return None;
        }
        Some(Self { pattern: pattern.to_lowercase() })
    }
}

impl Matcher for SubstringMatcher {
    fn is_match(&self, entry: &Entry) -> bool {
        entry.word().to_lowercase().contains(&self.pattern)
    }
}

/// Matches every entry. The default matcher of a [`QueryBuilder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AllMatcher;

impl Matcher for AllMatcher {
    fn is_match(&self, _entry: &Entry) -> bool {
        true
    }
}
