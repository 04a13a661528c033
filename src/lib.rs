//! # gamerec
//!
//! A small content-based game recommender.
//!
//! Given a game title, gamerec returns the ten most similar titles in a
//! catalog. Similarity is the cosine between bag-of-words vectors built from
//! each game's genre, details, tags, developer and publisher.
//!
//! ## Quick Start
//!
//! ```bash
//! gamerec --dataset dataset_steam_games.csv --cache-dir cache
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use gamerec::prelude::*;
//!
//! let manager = StorageManager::new(StoreConfig::default()).unwrap();
//! let (recommender, _source) = manager.open().unwrap();
//! for result in recommender.recommend("Portal 2").unwrap() {
//!     println!("{} ({:.3})", result.name, result.score);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - `gamerec-core` - Catalog records, normalization, name index, similarity matrix, query engine
//! - `gamerec-similarity` - Count vectorizer with English stop words, cosine matrix builder
//! - `gamerec-storage` - CSV loading and the on-disk cache

pub mod session;

// Re-export core types
pub use gamerec_core::{
    recommend, CatalogRecord, Error, NameIndex, RawFields, Recommendation, Recommender, Result,
    SimilarityMatrix, DEFAULT_TOP_K,
};

// Re-export similarity
pub use gamerec_similarity::{build_similarity, cosine_similarity, CountVectorizer};

// Re-export storage
pub use gamerec_storage::{CacheLayer, LoadSource, StorageManager, StoreConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        recommend, CatalogRecord, Error, NameIndex, Recommendation, Recommender, Result,
        SimilarityMatrix, StorageManager, StoreConfig, DEFAULT_TOP_K,
    };
}
