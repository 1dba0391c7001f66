use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;

use rand::Rng;

use crate::engine::{self, LoadOptions};
use crate::entry::Entry;
use crate::error::LexiconError;
use crate::index::LexiconIndex;
use crate::query::LetterFilter;
use crate::results::{LoadReport, QueryResults};
use crate::traits::DatasetSource;

/// The retrieval façade: owns the active snapshot and answers lookups.
///
/// A reload builds a complete [`LexiconIndex`] without holding any lock and
/// then swaps the shared `Arc` in one step, so readers see either the old
/// snapshot or the new one, never a partial build. A failed reload leaves
/// the old snapshot in service.
///
/// Reloads are serialized: each one holds `reload_lock` from fetch through
/// publish, so the last reload to finish is also the last one to have read
/// the source. Readers never touch that lock and only hold `active` long
/// enough to clone the `Arc`. Callers issuing many queries can take a
/// [`snapshot`](Self::snapshot) once and query it directly.
pub struct Lexicon {
    source:      Option<Box<dyn DatasetSource>>,
    opts:        LoadOptions,
    active:      RwLock<Option<Arc<LexiconIndex>>>,
    reload_lock: Mutex<()>,
}

impl Lexicon {
    pub(crate) fn new(source: Option<Box<dyn DatasetSource>>, opts: LoadOptions) -> Self {
        Self {
            source,
            opts,
            active:      RwLock::new(None),
            reload_lock: Mutex::new(()),
        }
    }

    // ── Loading ───────────────────────────────────────────────────────────

    /// Re-read the configured source and publish a new snapshot.
    ///
    /// # Errors
    ///
    /// [`LexiconError::NoSource`] without a source, the source's own error
    /// if the fetch fails, or [`LexiconError::EmptyDataset`] if no line was
    /// valid. In every error case the previous snapshot stays active.
    pub fn reload(&self) -> Result<LoadReport, LexiconError> {
        let source = self.source.as_deref().ok_or(LexiconError::NoSource)?;
        let _guard = self.reload_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let result = engine::load(source, self.opts);
        self.finish_reload(result)
    }

    /// Publish a new snapshot built from `raw` instead of the source.
    pub fn reload_from_text(&self, raw: &str) -> Result<LoadReport, LexiconError> {
        let _guard = self.reload_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let result = engine::load_text(raw, self.opts, Instant::now());
        self.finish_reload(result)
    }

    fn finish_reload(
        &self,
        result: Result<(LexiconIndex, LoadReport), LexiconError>,
    ) -> Result<LoadReport, LexiconError> {
        match result {
            Ok((index, report)) => {
                self.publish(index);
                tracing::info!(
                    accepted = report.accepted,
                    rejected = report.rejected,
                    duplicates = report.duplicates,
                    elapsed_ms = report.stats.duration.as_millis() as u64,
                    "published lexicon snapshot"
                );
                Ok(report)
            }
            Err(e) => {
                tracing::warn!(error = %e, loaded = self.is_loaded(), "reload failed, keeping previous snapshot");
                Err(e)
            }
        }
    }

    fn publish(&self, index: LexiconIndex) {
        let index = Arc::new(index);
        let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
        *active = Some(index);
    }

    // ── Snapshots ─────────────────────────────────────────────────────────

    pub fn is_loaded(&self) -> bool {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The active snapshot.
    ///
    /// # Errors
    ///
    /// [`LexiconError::NotLoaded`] before the first successful load.
    pub fn snapshot(&self) -> Result<Arc<LexiconIndex>, LexiconError> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(LexiconError::NotLoaded)
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// Letter filter then substring filter, source order.
    pub fn query(&self, letter: LetterFilter, text: &str) -> Result<QueryResults, LexiconError> {
        Ok(self.snapshot()?.query(letter, text))
    }

    /// Every entry, source order.
    pub fn list_all(&self) -> Result<QueryResults, LexiconError> {
        Ok(self.snapshot()?.list_all())
    }

    /// Entries in one bucket. A bucket with no entries gives an empty result.
    pub fn list_by_letter(&self, letter: LetterFilter) -> Result<QueryResults, LexiconError> {
        Ok(self.snapshot()?.list_by_letter(letter))
    }

    /// Case-insensitive literal substring search over every word.
    pub fn search(&self, text: &str) -> Result<QueryResults, LexiconError> {
        Ok(self.snapshot()?.search(text))
    }

    /// One random entry whose word is not in `exclude_recent`.
    ///
    /// See [`LexiconIndex::sample`] for the selection rules.
    pub fn sample<R, S>(&self, exclude_recent: &HashSet<S>, rng: &mut R) -> Result<Entry, LexiconError>
    where
        R: Rng + ?Sized,
        S: Borrow<str> + Hash + Eq,
    {
        let snapshot = self.snapshot()?;
        let entry = snapshot.sample(exclude_recent, rng)?;
        Ok(entry.clone())
    }

    /// [`sample`](Self::sample) using the thread-local RNG.
    pub fn sample_random<S>(&self, exclude_recent: &HashSet<S>) -> Result<Entry, LexiconError>
    where
        S: Borrow<str> + Hash + Eq,
    {
        self.sample(exclude_recent, &mut rand::rng())
    }
}

/// Split a comma-separated exclusion list (`"w1,w2"`) into a set.
///
/// Items are trimmed and empty items dropped. Words containing commas
/// cannot be expressed this way; build the set directly for those.
pub fn parse_exclusions(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_owned)
        .collect()
}
