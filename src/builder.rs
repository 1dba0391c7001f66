use std::path::PathBuf;

use crate::engine::LoadOptions;
use crate::error::LexiconError;
use crate::lexicon::Lexicon;
use crate::results::LoadReport;
use crate::source::{FileSource, TextSource};
use crate::traits::DatasetSource;

// ---------------------------------------------------------------------------
// LoadBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring a [`Lexicon`].
///
/// Created via [`lexicon::loader()`](crate::loader). Configure with chained
/// builder methods, then call [`load()`](LoadBuilder::load) to fetch the
/// first snapshot, or [`build()`](LoadBuilder::build) to get an empty
/// lexicon that is loaded later.
///
/// # Example
///
/// ```rust,ignore
/// let (lexicon, report) = lexicon::loader()
///     .file("assets/isl_dictionary.csv")
///     .collect_rejections(true)
///     .load()?;
/// ```
#[derive(Default)]
pub struct LoadBuilder {
    source:             Option<Box<dyn DatasetSource>>,
    collect_rejections: bool,
}

impl LoadBuilder {
    // ── Source ────────────────────────────────────────────────────────────

    /// Set where the dataset comes from. Every reload fetches from it again.
    pub fn source(mut self, s: impl DatasetSource + 'static) -> Self {
        self.source = Some(Box::new(s));
        self
    }

    /// Shorthand for `.source(FileSource::new(path))`.
    pub fn file(self, path: impl Into<PathBuf>) -> Self {
        self.source(FileSource::new(path))
    }

    /// Shorthand for `.source(TextSource::new(text))`.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.source(TextSource::new(text))
    }

    // ── Options ───────────────────────────────────────────────────────────

    /// Record every dropped line in [`LoadReport::rejections`].
    ///
    /// Disabled by default; the rejection count is always reported.
    pub fn collect_rejections(mut self, yes: bool) -> Self {
        self.collect_rejections = yes;
        self
    }

    // ── Finish ────────────────────────────────────────────────────────────

    /// Build a lexicon with no snapshot yet. Reads fail with
    /// [`LexiconError::NotLoaded`] until a reload succeeds.
    pub fn build(self) -> Lexicon {
        let opts = LoadOptions {
            collect_rejections: self.collect_rejections,
        };
        Lexicon::new(self.source, opts)
    }

    /// Build the lexicon and load its first snapshot.
    ///
    /// # Errors
    ///
    /// [`LexiconError::NoSource`] if no source was set, otherwise whatever
    /// the first [`Lexicon::reload`] returns.
    pub fn load(self) -> Result<(Lexicon, LoadReport), LexiconError> {
        if self.source.is_none() {
            return Err(LexiconError::NoSource);
        }
        let lexicon = self.build();
        let report = lexicon.reload()?;
        Ok((lexicon, report))
    }
}
