//! Text normalization for catalog fields
//!
//! Two forms are produced from raw dataset text:
//! - the *searchable* form used as an index key (no spaces, lowercase, ASCII only)
//! - the *display* form shown to users (ASCII only, otherwise untouched)

/// Clean a raw string into its searchable form.
///
/// Spaces are removed, the text is lowercased and every character with a
/// code point of 128 or above is dropped. Applying it twice is a no-op.
pub fn clean(raw: &str) -> String {
    raw.replace(' ', "")
        .to_lowercase()
        .chars()
        .filter(char::is_ascii)
        .collect()
}

/// Drop non-ASCII characters, keeping case and spacing.
#[inline]
pub fn strip_non_ascii(raw: &str) -> String {
    raw.chars().filter(char::is_ascii).collect()
}

/// Clean a comma separated field and split it into tokens.
///
/// An empty field yields a single empty token, mirroring how a split of
/// an empty string behaves. Consumers joining tokens must tolerate it.
pub fn split_list(raw: &str) -> Vec<String> {
    clean(raw).split(',').map(str::to_string).collect()
}
