// 🔢 Identifier Normalizer
// WISH ids: 5-7 digits, no leading zero. Everything else is not an entity.

/// Minimum identifier length (inclusive)
pub const MIN_LEN: usize = 5;

/// Maximum identifier length (inclusive)
pub const MAX_LEN: usize = 7;

/// Strip every non-digit character.
///
/// Always succeeds; the result may be empty or invalid, callers check
/// with [`is_valid`].
pub fn normalize(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// True iff `s` is a well-formed identifier
pub fn is_valid(s: &str) -> bool {
    (MIN_LEN..=MAX_LEN).contains(&s.len())
        && s.bytes().all(|b| b.is_ascii_digit())
        && !s.starts_with('0')
}

/// Normalize then validate in one step
pub fn parse(text: &str) -> Option<String> {
    let digits = normalize(text);
    if is_valid(&digits) {
        Some(digits)
    } else {
        None
    }
}

/// Split a references cell on runs of commas, whitespace and semicolons
pub fn split_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|t| !t.is_empty())
}

/// Ascending numeric order for valid identifiers.
///
/// Valid ids carry no leading zero, so shorter means smaller.
pub fn numeric_cmp(a: &str, b: &str) -> std::cmp::Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
