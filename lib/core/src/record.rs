use crate::normalize::{clean, split_list, strip_non_ascii};
use serde::{Deserialize, Serialize};

/// Raw metadata of one dataset row, before normalization.
///
/// Missing cells are represented by empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    pub name: String,
    pub genre: String,
    pub game_details: String,
    pub popular_tags: String,
    pub developer: String,
    pub publisher: String,
}

/// One game in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Display name (ASCII only)
    pub name: String,
    /// Lookup key (see [`crate::normalize::clean`])
    pub searchable_name: String,
    pub genres: Vec<String>,
    pub details: Vec<String>,
    pub tags: Vec<String>,
    pub developers: Vec<String>,
    pub publishers: Vec<String>,
    /// Space-joined metadata used for vectorization
    pub soup: String,
}

impl CatalogRecord {
    /// Normalize raw fields and compose the soup
    #[must_use]
    pub fn from_raw(raw: &RawFields) -> Self {
        let genres = split_list(&raw.genre);
        let details = split_list(&raw.game_details);
        let tags = split_list(&raw.popular_tags);
        let developers = split_list(&raw.developer);
        let publishers = split_list(&raw.publisher);
        let soup = Self::compose_soup(&genres, &details, &tags, &developers, &publishers);

        Self {
            name: strip_non_ascii(&raw.name),
            searchable_name: clean(&raw.name),
            genres,
            details,
            tags,
            developers,
            publishers,
            soup,
        }
    }

    /// Join the metadata lists into a single text blob.
    ///
    /// Field order is genre, details, tags, developer, publisher. Tokens are
    /// not de-duplicated so repeats carry more weight.
    pub fn compose_soup(
        genres: &[String],
        details: &[String],
        tags: &[String],
        developers: &[String],
        publishers: &[String],
    ) -> String {
        [genres, details, tags, developers, publishers]
            .iter()
            .map(|field| field.join(" "))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
