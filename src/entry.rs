use std::fmt;

use crate::parser::RejectReason;

/// One word-to-reference record in the lexicon.
///
/// Both fields are trimmed and non-empty, and `reference_id` only contains
/// `[A-Za-z0-9_-]`. The only way to obtain an `Entry` is [`Entry::new`], so a
/// value of this type always satisfies those rules.
///
/// `word` keeps the case it had in the dataset; bucketing and search fold
/// case on the fly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    word:         String,
    reference_id: String,
}

impl Entry {
    /// Validate and build an entry. Surrounding whitespace is trimmed from
    /// both fields before validation.
    pub fn new(word: &str, reference_id: &str) -> Result<Self, RejectReason> {
        let word = word.trim();
        let reference_id = reference_id.trim();

        if word.is_empty() {
            return Err(RejectReason::EmptyWord);
        }
        if reference_id.is_empty() {
            return Err(RejectReason::EmptyReferenceId);
        }
        if !is_valid_reference_id(reference_id) {
            return Err(RejectReason::InvalidReferenceId);
        }

        Ok(Self {
            word:         word.to_owned(),
            reference_id: reference_id.to_owned(),
        })
    }

    /// Display form of the word, case as stored.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Opaque key handed back to the caller for media resolution.
    pub fn reference_id(&self) -> &str {
        &self.reference_id
    }

    /// The bucket this entry is filed under.
    pub fn bucket(&self) -> Bucket {
        Bucket::of(&self.word)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.word, self.reference_id)
    }
}

fn is_valid_reference_id(s: &str) -> bool {
    s.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

// ---------------------------------------------------------------------------
// Bucket
// ---------------------------------------------------------------------------

/// Key of the first-letter map.
///
/// Letters are stored uppercase; a letter whose uppercase form is several
/// characters files under the first of them. Anything whose first character
/// is not alphabetic (digits, punctuation, symbols) lands in [`Bucket::Other`].
///
/// Ordering is letters ascending, then `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    Letter(char),
    Other,
}

impl Bucket {
    /// Bucket for a (trimmed) word.
    pub fn of(word: &str) -> Self {
        word.chars()
            .next()
            .and_then(uppercase_letter)
            .map_or(Self::Other, Self::Letter)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Letter(c) => write!(f, "{c}"),
            Self::Other     => f.write_str("OTHER"),
        }
    }
}

/// Bucket letter for `c`: the first char of its uppercase form, so `ß`
/// (`SS`) files under `S` and `ﬁ` (`FI`) under `F`. `None` if `c` is not
/// alphabetic.
pub(crate) fn uppercase_letter(c: char) -> Option<char> {
    if !c.is_alphabetic() {
        return None;
    }
    c.to_uppercase().next().filter(|u| u.is_alphabetic())
}
