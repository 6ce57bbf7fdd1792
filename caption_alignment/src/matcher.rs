use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::text::normalize;

/// Disfluencies that speech-to-text keeps but captions never contain.
static FILLER_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HashSet::from(["um", "uh", "ah", "er"]));

const NUMBER_WORDS: [&str; 21] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight",
    "nine", "ten", "eleven", "twelve", "thirteen", "fourteen", "fifteen",
    "sixteen", "seventeen", "eighteen", "nineteen", "twenty",
];

/// Digit form to word form, for 0 through 20.
static NUMBER_EQUIVALENTS: LazyLock<HashMap<String, &'static str>> =
    LazyLock::new(|| {
        NUMBER_WORDS
            .iter()
            .enumerate()
            .map(|(value, word)| (value.to_string(), *word))
            .collect()
    });

fn number_word(token: &str) -> Option<&'static str> {
    NUMBER_EQUIVALENTS.get(token).copied()
}

/// Compare two tokens that are already normalized.
pub(crate) fn normalized_tokens_match(caption: &str, transcript: &str) -> bool {
    if caption == transcript {
        return true;
    }

    match (number_word(caption), number_word(transcript)) {
        (Some(word), None) => word == transcript,
        (None, Some(word)) => word == caption,
        _ => false,
    }
}

/// Decide whether a caption token and a transcript token denote the same
/// spoken unit.
///
/// Both sides are normalized first. Tokens match when they are identical,
/// or when one is the digit form and the other the English word for the
/// same integer between 0 and 20.
///
/// # Example
/// ```
/// use caption_alignment::matcher::tokens_match;
///
/// assert!(tokens_match("5", "Five,"));
/// assert!(!tokens_match("5", "six"));
/// ```
pub fn tokens_match(caption_token: &str, transcript_token: &str) -> bool {
    normalized_tokens_match(
        &normalize(caption_token),
        &normalize(transcript_token),
    )
}

/// Whether a normalized transcript token is a filler word.
pub fn is_filler(token: &str) -> bool {
    FILLER_WORDS.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_tokens_match() {
        assert!(tokens_match("hello", "hello"));
        assert!(tokens_match("Hello", " hello,"));
        assert!(tokens_match("don't", "Don\u{2019}t"));
    }

    #[test]
    fn test_different_tokens_do_not_match() {
        assert!(!tokens_match("hello", "world"));
        assert!(!tokens_match("hello", ""));
    }

    #[test]
    fn test_number_words_match_in_both_directions() {
        assert!(tokens_match("5", "five"));
        assert!(tokens_match("five", "5"));
        assert!(tokens_match("0", "zero"));
        assert!(tokens_match("20", "Twenty."));
        assert!(tokens_match("12", "12"));
    }

    #[test]
    fn test_number_matching_is_conservative() {
        assert!(!tokens_match("21", "twentyone"));
        assert!(!tokens_match("5", "six"));
        assert!(!tokens_match("05", "five"));
        assert!(!tokens_match("five", "cinq"));
        assert!(!tokens_match("five", "fifteen"));
    }

    #[test]
    fn test_is_filler() {
        for filler in ["um", "uh", "ah", "er"] {
            assert!(is_filler(filler), "{filler} should be a filler");
        }
        assert!(!is_filler("umbrella"));
        assert!(!is_filler("hello"));
    }
}
