use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;
use std::time::Instant;

use rand::Rng;

use crate::engine::{self, LoadOptions};
use crate::entry::{Bucket, Entry};
use crate::error::LexiconError;
use crate::query::{LetterFilter, QueryBuilder};
use crate::results::QueryResults;

/// An immutable, fully built lexicon snapshot.
///
/// Holds the entries in source order plus a first-letter map from
/// [`Bucket`] to the positions of the entries filed there. Positions within
/// a bucket are ascending, so every view over the index keeps source order.
///
/// There are no `&mut self` methods: a reload builds a new index and the
/// [`Lexicon`](crate::Lexicon) swaps it in.
#[derive(Debug, Default)]
pub struct LexiconIndex {
    entries:    Vec<Entry>,
    buckets:    HashMap<Bucket, Vec<usize>>,
    duplicates: usize,
}

impl LexiconIndex {
    /// Build an index from already validated entries. O(n).
    ///
    /// Exact duplicates (same word and same reference id) are dropped,
    /// keeping the first occurrence. The same word with different reference
    /// ids is kept as separate entries.
    pub fn build(entries: impl IntoIterator<Item = Entry>) -> Self {
        let mut seen    = HashSet::new();
        let mut kept    = Vec::new();
        let mut buckets = HashMap::<Bucket, Vec<usize>>::new();
        let mut duplicates = 0;

        for entry in entries {
            if seen.contains(&entry) {
                duplicates += 1;
                continue;
            }
            seen.insert(entry.clone());
            buckets.entry(entry.bucket()).or_default().push(kept.len());
            kept.push(entry);
        }

        if duplicates > 0 {
            tracing::debug!(duplicates, "dropped duplicate records");
        }

        Self { entries: kept, buckets, duplicates }
    }

    /// Parse raw dataset text and build an index from it.
    ///
    /// # Errors
    ///
    /// [`LexiconError::EmptyDataset`] if no line survives parsing. Partially
    /// bad data is not an error.
    pub fn from_text(raw: &str) -> Result<Self, LexiconError> {
        engine::load_text(raw, LoadOptions::default(), Instant::now()).map(|(index, _)| index)
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, source order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, position: usize) -> Option<&Entry> {
        self.entries.get(position)
    }

    /// Exact duplicates dropped during [`build`](Self::build).
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Entry count per non-empty bucket, letters ascending then `OTHER`.
    pub fn buckets(&self) -> BTreeMap<Bucket, usize> {
        self.buckets.iter().map(|(b, v)| (*b, v.len())).collect()
    }

    /// Positions of the entries in `bucket`, ascending. Empty if the bucket
    /// has no entries.
    pub(crate) fn bucket_positions(&self, bucket: Bucket) -> &[usize] {
        self.buckets.get(&bucket).map(Vec::as_slice).unwrap_or_default()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Start a query against this snapshot.
    pub fn select(&self) -> QueryBuilder<'_> {
        QueryBuilder::new(self)
    }

    /// Letter filter, then literal case-insensitive substring filter.
    pub fn query(&self, letter: LetterFilter, text: &str) -> QueryResults {
        self.select().letter(letter).matching(text).run()
    }

    pub fn list_all(&self) -> QueryResults {
        self.query(LetterFilter::All, "")
    }

    pub fn list_by_letter(&self, letter: LetterFilter) -> QueryResults {
        self.query(letter, "")
    }

    pub fn search(&self, text: &str) -> QueryResults {
        self.query(LetterFilter::All, text)
    }

    // ── Sampling ──────────────────────────────────────────────────────────

    /// Pick one entry uniformly at random among those whose word is not in
    /// `exclude_recent` (exact comparison).
    ///
    /// If every entry is excluded the exclusion is ignored for this call, so
    /// a non-empty index always yields an entry. The index keeps no record
    /// of what it returned; callers track recent words themselves.
    ///
    /// # Errors
    ///
    /// [`LexiconError::EmptyDataset`] if the index has no entries.
    pub fn sample<R, S>(&self, exclude_recent: &HashSet<S>, rng: &mut R) -> Result<&Entry, LexiconError>
    where
        R: Rng + ?Sized,
        S: Borrow<str> + Hash + Eq,
    {
        if self.entries.is_empty() {
            return Err(LexiconError::EmptyDataset { rejected: 0 });
        }

        let eligible: Vec<&Entry> = self
            .entries
            .iter()
            .filter(|e| !exclude_recent.contains(e.word()))
            .collect();

        if eligible.is_empty() {
            tracing::debug!(excluded = exclude_recent.len(), "every entry excluded, sampling from all");
            return Ok(&self.entries[rng.random_range(0..self.entries.len())]);
        }
        Ok(eligible[rng.random_range(0..eligible.len())])
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn entry(word: &str, id: &str) -> Entry {
        Entry::new(word, id).unwrap()
    }

    #[test]
    fn keeps_source_order_and_homonyms() {
        let index = LexiconIndex::build(vec![
            entry("bank", "b1"),
            entry("apple", "a1"),
            entry("bank", "b2"),
        ]);
        let words: Vec<_> = index.entries().iter().map(|e| e.reference_id()).collect();
        assert_eq!(words, vec!["b1", "a1", "b2"]);
        assert_eq!(index.duplicates(), 0);
    }

    #[test]
    fn drops_exact_duplicates_only() {
        let index = LexiconIndex::build(vec![
            entry("bank", "b1"),
            entry("bank", "b1"),
            entry("Bank", "b1"),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.duplicates(), 1);
    }

    #[test]
    fn buckets_are_case_insensitive_with_other() {
        let index = LexiconIndex::build(vec![
            entry("hello", "h1"),
            entry("Hi", "h2"),
            entry("42", "n1"),
            entry("apple", "a1"),
        ]);
        let counts: Vec<_> = index.buckets().into_iter().collect();
        assert_eq!(
            counts,
            vec![(Bucket::Letter('A'), 1), (Bucket::Letter('H'), 2), (Bucket::Other, 1)]
        );
        assert_eq!(index.bucket_positions(Bucket::Letter('H')), &[0, 1]);
        assert!(index.bucket_positions(Bucket::Letter('Z')).is_empty());
    }

    #[test]
    fn from_text_requires_one_valid_entry() {
        let err = LexiconIndex::from_text("word,id\nno comma\n,\n").unwrap_err();
        assert!(matches!(err, LexiconError::EmptyDataset { rejected: 2 }));

        let index = LexiconIndex::from_text("word,id\nno comma\nok,k1\n").unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn letters_with_multi_char_uppercase_keep_their_bucket() {
        let index = LexiconIndex::from_text("word,id\nstraße,s1\nßtraße,s2\nﬁsh,f1\n").unwrap();
        let words = |letter: LetterFilter| -> Vec<String> {
            index.list_by_letter(letter).into_iter().map(|e| e.word().to_string()).collect()
        };
        assert_eq!(words(LetterFilter::Letter('S')), vec!["straße", "ßtraße"]);
        assert_eq!(words(LetterFilter::Letter('F')), vec!["ﬁsh"]);
        assert!(words(LetterFilter::Other).is_empty());
    }

    #[test]
    fn build_accepts_empty_input() {
        let index = LexiconIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(index.list_all().is_empty());
    }

    #[test]
    fn sample_skips_excluded_words() {
        let index = LexiconIndex::build(vec![entry("one", "o1"), entry("two", "t1"), entry("three", "t3")]);
        let exclude: HashSet<&str> = ["one", "three"].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(index.sample(&exclude, &mut rng).unwrap().word(), "two");
        }
    }

    #[test]
    fn sample_ignores_exclusion_that_empties_the_pool() {
        let index = LexiconIndex::build(vec![entry("only", "o1")]);
        let exclude: HashSet<String> = ["only".to_string()].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(index.sample(&exclude, &mut rng).unwrap().word(), "only");
    }

    #[test]
    fn sample_is_reproducible_with_a_seed() {
        let index = LexiconIndex::build((0..20).map(|i| entry(&format!("w{i}"), &format!("id{i}"))));
        let none = HashSet::<String>::new();
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10)
                .map(|_| index.sample(&none, &mut rng).unwrap().reference_id().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }

    #[test]
    fn sample_covers_every_eligible_entry() {
        let index = LexiconIndex::build(vec![entry("a", "a1"), entry("b", "b1"), entry("c", "c1")]);
        let none = HashSet::<String>::new();
        let mut rng = StdRng::seed_from_u64(3);
        let seen: HashSet<String> = (0..200)
            .map(|_| index.sample(&none, &mut rng).unwrap().word().to_string())
            .collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn sample_on_empty_index_fails() {
        let index = LexiconIndex::build(Vec::new());
        let mut rng = StdRng::seed_from_u64(0);
        let err = index.sample(&HashSet::<String>::new(), &mut rng).unwrap_err();
        assert!(matches!(err, LexiconError::EmptyDataset { .. }));
    }
}
