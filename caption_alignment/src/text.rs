/// Canonicalize a string for token comparison.
///
/// Lowercases, folds curly apostrophes to `'`, drops every character that
/// is not a letter, digit, whitespace or apostrophe, and collapses
/// whitespace runs to a single space.
///
/// # Example
/// ```
/// use caption_alignment::text::normalize;
///
/// assert_eq!(normalize("  We’re   READY!  "), "we're ready");
/// ```
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '\u{2019}' | '\u{2018}' => '\'',
            other => other,
        })
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '\'')
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split text into comparison tokens. Never yields empty tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
