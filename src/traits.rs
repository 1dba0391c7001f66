use crate::entry::Entry;
use crate::error::LexiconError;

/// Where raw dataset text comes from.
///
/// Implement this to load a lexicon from anything that can hand back the
/// `word,referenceId` text: a local file, an HTTP fetch, an embedded asset.
/// Fetching is the only I/O the crate performs and happens only during a
/// load or reload; queries never touch the source.
///
/// # Thread Safety
///
/// `Send + Sync` are required. A [`Lexicon`](crate::Lexicon) owns its source
/// and may be reloaded from any thread.
///
/// # Example
///
/// ```rust
/// use lexicon::{DatasetSource, LexiconError};
///
/// struct Embedded;
///
/// impl DatasetSource for Embedded {
///     fn fetch(&self) -> Result<String, LexiconError> {
///         Ok("word,videoId\nhello,abc123\n".to_string())
///     }
/// }
/// ```
pub trait DatasetSource: Send + Sync {
    /// Return the full dataset text, header line included.
    ///
    /// Return `Err` when the dataset cannot be read at all. A failed fetch
    /// during a reload leaves the active snapshot in service.
    fn fetch(&self) -> Result<String, LexiconError>;

    /// Short human-readable name used in log lines.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

/// Determines whether an entry belongs in a result set.
///
/// The built-in letter and substring steps cover the usual lookups.
/// Implement this for anything else (reference id prefixes, word length,
/// an allow-list of words) and pass it to
/// [`QueryBuilder::with_matcher`](crate::QueryBuilder::with_matcher).
///
/// # Thread Safety
///
/// `Send + Sync` are required so a query can be built on one thread and a
/// matcher shared between callers.
///
/// # Example
///
/// ```rust
/// use lexicon::{Entry, Matcher};
///
/// struct ShortWords(usize);
///
/// impl Matcher for ShortWords {
///     fn is_match(&self, entry: &Entry) -> bool {
///         entry.word().chars().count() <= self.0
///     }
/// }
/// ```
pub trait Matcher: Send + Sync {
    /// Returns `true` if this entry should be included in results.
    fn is_match(&self, entry: &Entry) -> bool;
}
