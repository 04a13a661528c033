//! All-pairs cosine similarity over a term-count matrix

use crate::vectorizer::{CountVectorizer, TermMatrix};
use gamerec_core::{CatalogRecord, Result, SimilarityMatrix};
use rayon::prelude::*;
use tracing::info;

/// Compute `dot(v_i, v_j) / (|v_i| * |v_j|)` for every pair of rows.
///
/// Dot products are accumulated in integers, so `(i, j)` and `(j, i)` are
/// bit-identical. Rows with at least one term have a diagonal of exactly
/// 1.0. A row with no terms scores 0.0 against everything, itself included.
pub fn cosine_similarity(terms: &TermMatrix) -> Result<SimilarityMatrix> {
    let n = terms.num_docs();

    // term -> [(doc, count)]
    let mut postings: Vec<Vec<(u32, u32)>> = vec![Vec::new(); terms.num_terms()];
    for (doc, row) in terms.rows.iter().enumerate() {
        for (term, count) in row.iter() {
            postings[term as usize].push((doc as u32, count));
        }
    }

    let norms: Vec<f64> = terms
        .rows
        .iter()
        .map(|row| (row.squared_norm() as f64).sqrt())
        .collect();

    let mut data = vec![0.0f32; n * n];
    if n > 0 {
        data.par_chunks_mut(n).enumerate().for_each(|(i, out)| {
            let row = &terms.rows[i];
            if row.is_empty() {
                return;
            }
            let mut dots = vec![0u64; n];
            for (term, count) in row.iter() {
                for &(doc, other) in &postings[term as usize] {
                    dots[doc as usize] += u64::from(count) * u64::from(other);
                }
            }
            for (j, dot) in dots.into_iter().enumerate() {
                if dot > 0 {
                    out[j] = (dot as f64 / (norms[i] * norms[j])) as f32;
                }
            }
            out[i] = 1.0;
        });
    }

    SimilarityMatrix::new(n, data)
}

/// Vectorize catalog soups and build the similarity matrix
pub fn build_similarity(catalog: &[CatalogRecord]) -> Result<SimilarityMatrix> {
    let soups: Vec<&str> = catalog.iter().map(|r| r.soup.as_str()).collect();
    let terms = CountVectorizer::english().fit_transform(&soups);
    info!(
        "Computing cosine similarity for {} records over {} terms",
        terms.num_docs(),
        terms.num_terms()
    );
    cosine_similarity(&terms)
}
