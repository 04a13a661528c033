//! Query engine: top-k most similar catalog records for a title

use crate::error::{Error, Result};
use crate::index::NameIndex;
use crate::matrix::SimilarityMatrix;
use crate::record::CatalogRecord;
use serde::Serialize;

/// Number of recommendations returned by default
pub const DEFAULT_TOP_K: usize = 10;

/// A single ranked recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub row: usize,
    pub name: String,
    pub score: f32,
}

/// Rank every other catalog record by similarity to `title`.
///
/// The title is cleaned the same way catalog names are. The queried record
/// is excluded by row, scores are sorted descending with ties kept in row
/// order, and at most `limit` results are returned.
pub fn recommend(
    title: &str,
    matrix: &SimilarityMatrix,
    index: &NameIndex,
    catalog: &[CatalogRecord],
    limit: usize,
) -> Result<Vec<Recommendation>> {
    let row = index
        .lookup(title)
        .ok_or_else(|| Error::NotFound(title.to_string()))?;
    let scores = matrix.row(row).ok_or_else(|| Error::InvalidMatrix {
        expected: row + 1,
        actual: matrix.dim(),
    })?;

    let mut ranked: Vec<(usize, f32)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|&(i, _)| i != row)
        .collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(limit);

    ranked
        .into_iter()
        .map(|(i, score)| {
            let record = catalog.get(i).ok_or_else(|| Error::InvalidMatrix {
                expected: i + 1,
                actual: catalog.len(),
            })?;
            Ok(Recommendation {
                row: i,
                name: record.name.clone(),
                score,
            })
        })
        .collect()
}

/// Loaded model: similarity matrix, name index and catalog
#[derive(Debug, Clone)]
pub struct Recommender {
    matrix: SimilarityMatrix,
    index: NameIndex,
    catalog: Vec<CatalogRecord>,
    limit: usize,
}

impl Recommender {
    pub fn new(matrix: SimilarityMatrix, index: NameIndex, catalog: Vec<CatalogRecord>) -> Self {
        Self {
            matrix,
            index,
            catalog,
            limit: DEFAULT_TOP_K,
        }
    }

    /// Change the number of results per query
    pub fn with_limit(mut self, limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(Error::InvalidConfig("top-k must be at least 1".to_string()));
        }
        self.limit = limit;
        Ok(self)
    }

    pub fn recommend(&self, title: &str) -> Result<Vec<Recommendation>> {
        self.recommend_top(title, self.limit)
    }

    pub fn recommend_top(&self, title: &str, k: usize) -> Result<Vec<Recommendation>> {
        recommend(title, &self.matrix, &self.index, &self.catalog, k)
    }

    #[inline]
    pub fn record(&self, row: usize) -> Option<&CatalogRecord> {
        self.catalog.get(row)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn index(&self) -> &NameIndex {
        &self.index
    }

    pub fn catalog(&self) -> &[CatalogRecord] {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawFields;

    fn catalog(names: &[&str]) -> Vec<CatalogRecord> {
        names
            .iter()
            .map(|name| {
                CatalogRecord::from_raw(&RawFields {
                    name: name.to_string(),
                    ..Default::default()
                })
            })
            .collect()
    }

    /// Row i has similarity `1 / (1 + |i - j|)` to row j
    fn banded(n: usize) -> SimilarityMatrix {
        let rows = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| 1.0 / (1.0 + (i as f32 - j as f32).abs()))
                    .collect()
            })
            .collect();
        SimilarityMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_ranks_by_score_and_excludes_self() {
        let names = ["A", "B", "C", "D", "E"];
        let catalog = catalog(&names);
        let index = NameIndex::build(&catalog);
        let results = recommend("c", &banded(5), &index, &catalog, DEFAULT_TOP_K).unwrap();

        let got: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        // Ties (B/D, A/E) keep row order
        assert_eq!(got, vec!["B", "D", "A", "E"]);
        assert!(results.iter().all(|r| r.row != 2));
    }

    #[test]
    fn test_limit_caps_results() {
        let names: Vec<String> = (0..20).map(|i| format!("Game {i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let catalog = catalog(&refs);
        let index = NameIndex::build(&catalog);
        let results = recommend("Game 0", &banded(20), &index, &catalog, DEFAULT_TOP_K).unwrap();
        assert_eq!(results.len(), 10);
        assert_eq!(results[0].name, "Game 1");
        assert_eq!(results[9].name, "Game 10");
    }

    #[test]
    fn test_self_excluded_when_a_duplicate_precedes_it() {
        let catalog = catalog(&["Twin", "Original", "Other"]);
        let index = NameIndex::build(&catalog);
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 1.0, 0.0],
            vec![1.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ])
        .unwrap();
        let results = recommend("Original", &matrix, &index, &catalog, DEFAULT_TOP_K).unwrap();
        assert_eq!(results[0].name, "Twin");
        assert!(results.iter().all(|r| r.name != "Original"));
    }

    #[test]
    fn test_not_found() {
        let catalog = catalog(&["A"]);
        let index = NameIndex::build(&catalog);
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();
        let err = recommend("nonexistentgame123", &matrix, &index, &catalog, 10).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_recommender_limit() {
        let catalog = catalog(&["A", "B", "C"]);
        let index = NameIndex::build(&catalog);
        let recommender = Recommender::new(banded(3), index, catalog);
        assert_eq!(recommender.limit(), DEFAULT_TOP_K);
        assert!(recommender.clone().with_limit(0).is_err());

        let recommender = recommender.with_limit(1).unwrap();
        let results = recommender.recommend("B").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "A");
    }
}
