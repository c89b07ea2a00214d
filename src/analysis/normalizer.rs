//! Token normalization.

/// Strip a raw token down to letters and medial apostrophes.
///
/// Alphabetic characters are always kept. An apostrophe is kept only when it
/// is neither the first nor the last character and both of its neighbours in
/// `raw` are alphabetic. Everything else is dropped, so an all-punctuation
/// token normalizes to the empty string.
///
/// ```
/// use wordex::analysis::normalize;
///
/// assert_eq!(normalize("it's"), "it's");
/// assert_eq!(normalize("'hello'"), "hello");
/// assert_eq!(normalize("!!!"), "");
/// ```
pub fn normalize(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut word = String::with_capacity(raw.len());

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_alphabetic() {
            word.push(c);
        } else if c == '\'' && is_medial(&chars, i) {
            word.push(c);
        }
    }

    word
}

fn is_medial(chars: &[char], i: usize) -> bool {
    i > 0
        && i + 1 < chars.len()
        && chars[i - 1].is_ascii_alphabetic()
        && chars[i + 1].is_ascii_alphabetic()
}
