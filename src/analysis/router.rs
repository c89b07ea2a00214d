//! Bucket routing by first character.

/// Number of buckets in an index: 26 letters plus one catch-all.
pub const BUCKET_COUNT: usize = 27;

/// Bucket for words that do not start with an ASCII letter.
pub const OTHER_BUCKET: usize = 26;

/// Map a token to its bucket.
///
/// `a..z` and `A..Z` map to `0..=25`; anything else, including the empty
/// token, maps to [`OTHER_BUCKET`].
pub fn route(token: &str) -> usize {
    match token.as_bytes().first() {
        Some(b) if b.is_ascii_alphabetic() => (b.to_ascii_lowercase() - b'a') as usize,
        _ => OTHER_BUCKET,
    }
}
