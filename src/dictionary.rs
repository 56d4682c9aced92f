//! Word-list membership.
//!
//! The engine only ever asks whether an uppercase string is a word. Where the
//! list comes from (file, network, test fixture) is up to the caller.

use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Bound;
use std::path::Path;

/// Membership test for uppercase words.
pub trait Dictionary: Send + Sync {
    fn contains(&self, word: &str) -> bool;

    /// Whether some word starts with `prefix`. Used by the move finder to cut
    /// dead branches early; the default never prunes.
    fn has_prefix(&self, _prefix: &str) -> bool {
        true
    }
}

impl Dictionary for HashSet<String> {
    fn contains(&self, word: &str) -> bool {
        HashSet::contains(self, word)
    }
}

/// Sorted in-memory word list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: BTreeSet<String>,
}

impl WordList {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// One word per line; surrounding whitespace and blank lines are ignored.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut words = BTreeSet::new();
        for line in reader.lines() {
            let word = line?.trim().to_uppercase();
            if !word.is_empty() {
                words.insert(word);
            }
        }
        Ok(Self { words })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = File::open(path.as_ref())?;
        let list = Self::from_reader(BufReader::new(file))?;
        log::info!(
            "Dictionary loaded from {}: {} words",
            path.as_ref().display(),
            list.len()
        );
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordList {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    fn has_prefix(&self, prefix: &str) -> bool {
        self.words
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .next()
            .is_some_and(|w| w.starts_with(prefix))
    }
}
