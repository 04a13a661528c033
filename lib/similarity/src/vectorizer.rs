//! Bag-of-words count vectorizer
//!
//! Documents are lowercased and split into runs of word characters
//! (alphanumeric or `_`). Runs shorter than two characters and stop words
//! are dropped. The vocabulary is sorted so term ids are stable across runs.

use crate::stopwords::StopWords;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sparse term counts of one document, sorted by term id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCounts {
    pub terms: Vec<u32>,
    pub counts: Vec<u32>,
}

impl TermCounts {
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of distinct terms
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.terms.iter().copied().zip(self.counts.iter().copied())
    }

    /// Squared L2 norm, exact in integers
    pub fn squared_norm(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c) * u64::from(c)).sum()
    }
}

/// Document-term count matrix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermMatrix {
    pub vocabulary: Vec<String>,
    pub rows: Vec<TermCounts>,
}

impl TermMatrix {
    #[inline]
    #[must_use]
    pub fn num_docs(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn num_terms(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn term_id(&self, term: &str) -> Option<u32> {
        self.vocabulary
            .binary_search_by(|t| t.as_str().cmp(term))
            .ok()
            .map(|i| i as u32)
    }
}

/// Split text into lowercase word tokens of at least two characters
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|s| s.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct CountVectorizer {
    stop_words: StopWords,
}

impl CountVectorizer {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    #[must_use]
    pub fn english() -> Self {
        Self::new(StopWords::english())
    }

    fn analyze(&self, doc: &str) -> Vec<String> {
        tokenize(doc)
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }

    /// Learn the vocabulary and count every document against it
    pub fn fit_transform<S: AsRef<str>>(&self, docs: &[S]) -> TermMatrix {
        let analyzed: Vec<Vec<String>> = docs.iter().map(|d| self.analyze(d.as_ref())).collect();

        let mut vocabulary: Vec<String> = analyzed.iter().flatten().cloned().collect();
        vocabulary.sort_unstable();
        vocabulary.dedup();

        let ids: AHashMap<&str, u32> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i as u32))
            .collect();

        let rows = analyzed
            .iter()
            .map(|tokens| {
                let mut counts: AHashMap<u32, u32> = AHashMap::new();
                for token in tokens {
                    *counts.entry(ids[token.as_str()]).or_insert(0) += 1;
                }
                let mut pairs: Vec<(u32, u32)> = counts.into_iter().collect();
                pairs.sort_unstable_by_key(|&(term, _)| term);
                let (terms, counts) = pairs.into_iter().unzip();
                TermCounts { terms, counts }
            })
            .collect::<Vec<_>>();

        debug!(
            "Vectorized {} documents over {} terms",
            rows.len(),
            vocabulary.len()
        );

        TermMatrix { vocabulary, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("action single-player steamachievements  x  sci_fi"),
            vec!["action", "single", "player", "steamachievements", "sci_fi"]
        );
        assert!(tokenize("    ").is_empty());
    }

    #[test]
    fn test_fit_transform_counts_and_stop_words() {
        let docs = ["action indie action the", "indie puzzle", "the of and"];
        let matrix = CountVectorizer::english().fit_transform(&docs);

        assert_eq!(matrix.vocabulary, vec!["action", "indie", "puzzle"]);
        assert_eq!(matrix.num_docs(), 3);
        assert_eq!(matrix.rows[0].terms, vec![0, 1]);
        assert_eq!(matrix.rows[0].counts, vec![2, 1]);
        assert_eq!(matrix.rows[1].terms, vec![1, 2]);
        assert!(matrix.rows[2].is_empty());
        assert_eq!(matrix.term_id("puzzle"), Some(2));
        assert_eq!(matrix.term_id("the"), None);
    }

    #[test]
    fn test_without_stop_words() {
        let matrix = CountVectorizer::new(StopWords::none()).fit_transform(&["the game"]);
        assert_eq!(matrix.vocabulary, vec!["game", "the"]);
        assert_eq!(matrix.rows[0].squared_norm(), 2);
    }
}
