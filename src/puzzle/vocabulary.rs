use std::{collections::BTreeSet, fs, path::Path, sync::Arc};

use tracing::debug;

use crate::error::{Error, Result};

/// A candidate word.
///
/// Refcounted so that domains, snapshots, and assignments can alias
/// vocabulary entries instead of copying them.
pub type Word = Arc<str>;

/// The word list shared by all slots' initial domains.
///
/// Entries are normalized to uppercase and deduplicated. Words containing
/// anything other than ASCII letters are dropped, which keeps cell indices
/// and byte indices interchangeable everywhere downstream.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: Vec<Word>,
}

impl Vocabulary {
    /// Reads a word list from a file, one word per line.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_words(text.lines()))
    }

    /// Builds a vocabulary from raw entries, normalizing as it goes.
    pub fn from_words<I>(words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut kept = BTreeSet::new();
        let mut skipped = 0usize;
        for raw in words {
            let trimmed = raw.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
                kept.insert(trimmed.to_ascii_uppercase());
            } else {
                skipped += 1;
            }
        }
        if skipped > 0 {
            debug!(skipped, "dropped entries with non-letter characters");
        }
        Self {
            words: kept.into_iter().map(Into::into).collect(),
        }
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
