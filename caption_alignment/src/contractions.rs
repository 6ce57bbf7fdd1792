use std::collections::HashMap;
use std::sync::LazyLock;

const CONTRACTION_TABLE: &[(&str, &[&str])] = &[
    ("aren't", &["are", "not"]),
    ("can't", &["cannot"]),
    ("couldn't", &["could", "not"]),
    ("didn't", &["did", "not"]),
    ("doesn't", &["does", "not"]),
    ("don't", &["do", "not"]),
    ("hadn't", &["had", "not"]),
    ("hasn't", &["has", "not"]),
    ("haven't", &["have", "not"]),
    ("he'd", &["he", "would"]),
    ("he'll", &["he", "will"]),
    ("he's", &["he", "is"]),
    ("here's", &["here", "is"]),
    ("how's", &["how", "is"]),
    ("i'd", &["i", "would"]),
    ("i'll", &["i", "will"]),
    ("i'm", &["i", "am"]),
    ("i've", &["i", "have"]),
    ("isn't", &["is", "not"]),
    ("it'll", &["it", "will"]),
    ("it's", &["it", "is"]),
    ("let's", &["let", "us"]),
    ("mustn't", &["must", "not"]),
    ("shan't", &["shall", "not"]),
    ("she'd", &["she", "would"]),
    ("she'll", &["she", "will"]),
    ("she's", &["she", "is"]),
    ("shouldn't", &["should", "not"]),
    ("that's", &["that", "is"]),
    ("there's", &["there", "is"]),
    ("they'd", &["they", "would"]),
    ("they'll", &["they", "will"]),
    ("they're", &["they", "are"]),
    ("they've", &["they", "have"]),
    ("wasn't", &["was", "not"]),
    ("we'd", &["we", "would"]),
    ("we'll", &["we", "will"]),
    ("we're", &["we", "are"]),
    ("we've", &["we", "have"]),
    ("weren't", &["were", "not"]),
    ("what's", &["what", "is"]),
    ("where's", &["where", "is"]),
    ("who's", &["who", "is"]),
    ("won't", &["will", "not"]),
    ("wouldn't", &["would", "not"]),
    ("you'd", &["you", "would"]),
    ("you'll", &["you", "will"]),
    ("you're", &["you", "are"]),
    ("you've", &["you", "have"]),
];

static CONTRACTIONS: LazyLock<HashMap<&str, &[&str]>> =
    LazyLock::new(|| CONTRACTION_TABLE.iter().copied().collect());

/// Expand an English contraction into the words it stands for.
///
/// Tokens that are not in the table come back unchanged as a single
/// element, so the function can be flat-mapped over a whole caption.
///
/// # Example
/// ```
/// use caption_alignment::contractions::expand_contractions;
///
/// assert_eq!(expand_contractions("we're"), vec!["we", "are"]);
/// assert_eq!(expand_contractions("hello"), vec!["hello"]);
/// ```
pub fn expand_contractions(token: &str) -> Vec<String> {
    CONTRACTIONS.get(token.to_lowercase().as_str()).map_or_else(
        || vec![token.to_string()],
        |expansion| expansion.iter().map(|word| (*word).to_string()).collect(),
    )
}
