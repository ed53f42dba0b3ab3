use std::sync::LazyLock;

use regex::Regex;

use super::FALLBACK_CAPTION;

/// Words a caption must not end on.
const TRAILING_STOPWORDS: [&str; 14] = [
    "a", "an", "the", "of", "in", "on", "at", "for", "with", "to", "by", "from", "and", "or",
];

static WORD_RE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(r"\S+"));

/// Joins decoded words into a sentence and strips dangling trailing
/// articles, prepositions and conjunctions. Leading and inner stopwords are
/// kept. Yields [`FALLBACK_CAPTION`] when nothing is left.
pub fn clean<S: AsRef<str>>(words: &[S]) -> String {
    let joined = words
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");
    let mut tokens: Vec<&str> = match &*WORD_RE {
        Ok(re) => re.find_iter(&joined).map(|m| m.as_str()).collect(),
        Err(_) => joined.split_whitespace().collect(),
    };

    while tokens.last().is_some_and(|last| is_trailing_stopword(last)) {
        tokens.pop();
    }

    if tokens.is_empty() {
        return FALLBACK_CAPTION.to_string();
    }
    tokens.join(" ")
}

fn is_trailing_stopword(word: &str) -> bool {
    TRAILING_STOPWORDS
        .iter()
        .any(|stop| stop.eq_ignore_ascii_case(word))
}
