//! # lexicon
//!
//! In-memory sign-language lexicon: loads a `word,referenceId` dataset and
//! answers letter-bucket, substring and random-sample lookups.
//!
//! The crate owns parsing, the immutable [`LexiconIndex`], the query model
//! and the [`Lexicon`] façade that swaps snapshots on reload. It does **not**
//! own media playback, HTTP framing or any UI state; a `reference_id` is an
//! opaque token for the caller to resolve.
//!
//! # Quick Start
//!
//! ```rust
//! use lexicon::LetterFilter;
//!
//! let data = "word,videoId\n\
//!             HELLO,abc123\n\
//!             hello world,def-456\n\
//!             bad line no comma\n\
//!             , emptyword\n";
//!
//! let (lexicon, report) = lexicon::loader().text(data).load().unwrap();
//! assert_eq!(report.accepted, 2);
//! assert_eq!(report.rejected, 2);
//!
//! let h = lexicon.list_by_letter(LetterFilter::Letter('H')).unwrap();
//! assert_eq!(h.matches, 2);
//!
//! let world = lexicon.search("WORLD").unwrap();
//! assert_eq!(world.entries[0].word(), "hello world");
//! ```
//!
//! # Flashcards
//!
//! [`Lexicon::sample`] picks one entry uniformly at random, skipping words
//! the caller has shown recently. The random source is a parameter so tests
//! can seed it:
//!
//! ```rust
//! use std::collections::HashSet;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let (lexicon, _) = lexicon::loader()
//!     .text("word,videoId\nthank,t1\nplease,p1\n")
//!     .load()
//!     .unwrap();
//!
//! let recent: HashSet<&str> = ["thank"].into_iter().collect();
//! let mut rng = StdRng::seed_from_u64(9);
//! assert_eq!(lexicon.sample(&recent, &mut rng).unwrap().word(), "please");
//! ```
//!
//! # Custom Sources and Matchers
//!
//! Implement [`DatasetSource`] to load from somewhere other than a file or
//! a string, and [`Matcher`] to add predicates to a query:
//!
//! ```rust
//! use lexicon::{Entry, LexiconIndex, Matcher};
//!
//! struct IdPrefix(&'static str);
//!
//! impl Matcher for IdPrefix {
//!     fn is_match(&self, entry: &Entry) -> bool {
//!         entry.reference_id().starts_with(self.0)
//!     }
//! }
//!
//! let index = LexiconIndex::from_text("word,id\nwater,yt_1\nwave,vm_2\n").unwrap();
//! let results = index.select().matching("wa").with_matcher(IdPrefix("yt_")).run();
//! assert_eq!(results.matches, 1);
//! ```

#![forbid(unsafe_code)]

pub mod parser;

mod builder;
mod engine;
mod entry;
mod error;
mod index;
mod lexicon;
mod query;
mod results;
mod source;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::LoadBuilder;
pub use entry::{Bucket, Entry};
pub use error::LexiconError;
pub use index::LexiconIndex;
pub use lexicon::{parse_exclusions, Lexicon};
pub use parser::{parse, ParseReport, RejectReason};
pub use query::{AllMatcher, LetterFilter, QueryBuilder, SubstringMatcher};
pub use results::{LoadReport, LoadStats, QueryResults};
pub use source::{FileSource, TextSource};
pub use traits::{DatasetSource, Matcher};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`LoadBuilder`] to configure a [`Lexicon`].
///
/// # Example
///
/// ```rust
/// let (lexicon, report) = lexicon::loader()
///     .text("word,videoId\nwater,w1\nwave,w2\n")
///     .load()
///     .unwrap();
///
/// assert_eq!(report.entries, 2);
/// assert_eq!(lexicon.search("ter").unwrap().matches, 1);
/// ```
pub fn loader() -> LoadBuilder {
    LoadBuilder::default()
}
