//! # gamerec Core
//!
//! Core library for the gamerec content-based recommender.
//!
//! This crate provides the data model and the query path:
//!
//! - [`CatalogRecord`] - A normalized game with its composed metadata soup
//! - [`NameIndex`] - Searchable name to catalog row mapping
//! - [`SimilarityMatrix`] - Dense all-pairs cosine similarity
//! - [`recommend`] / [`Recommender`] - Top-k lookup over the matrix
//!
//! ## Example
//!
//! ```rust
//! use gamerec_core::{CatalogRecord, NameIndex, RawFields, SimilarityMatrix, recommend};
//!
//! let catalog: Vec<CatalogRecord> = ["Portal", "Portal 2"]
//!     .iter()
//!     .map(|name| CatalogRecord::from_raw(&RawFields {
//!         name: name.to_string(),
//!         ..Default::default()
//!     }))
//!     .collect();
//! let index = NameIndex::build(&catalog);
//! let matrix = SimilarityMatrix::from_rows(vec![vec![1.0, 0.8], vec![0.8, 1.0]]).unwrap();
//!
//! let results = recommend("portal", &matrix, &index, &catalog, 10).unwrap();
//! assert_eq!(results[0].name, "Portal 2");
//! ```

pub mod error;
pub mod normalize;
pub mod record;
pub mod index;
pub mod matrix;
pub mod query;

pub use error::{Error, Result};
pub use record::{CatalogRecord, RawFields};
pub use index::NameIndex;
pub use matrix::SimilarityMatrix;
pub use query::{recommend, Recommendation, Recommender, DEFAULT_TOP_K};
