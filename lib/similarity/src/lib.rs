//! # gamerec Similarity
//!
//! Bag-of-words similarity for catalog records.
//!
//! - [`CountVectorizer`] - Tokenizes soups, removes English stop words, counts terms
//! - [`cosine_similarity`] - Dense all-pairs cosine matrix, built in parallel
//!
//! ## Example
//!
//! ```rust
//! use gamerec_similarity::{CountVectorizer, cosine_similarity};
//!
//! let terms = CountVectorizer::english().fit_transform(&["action rpg", "action puzzle"]);
//! let matrix = cosine_similarity(&terms).unwrap();
//! assert!(matrix.is_symmetric());
//! ```

pub mod stopwords;
pub mod vectorizer;
pub mod cosine;

pub use stopwords::{StopWords, ENGLISH_STOP_WORDS};
pub use vectorizer::{tokenize, CountVectorizer, TermCounts, TermMatrix};
pub use cosine::{build_similarity, cosine_similarity};
