/// Characters kept at word edges: the `\w` class (letters, digits, `_`).
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn trim_edges(word: &str) -> &str {
    word.trim_matches(|c: char| !is_word_char(c))
}

/// Comparison key: lower-cased, leading/trailing non-word runs removed.
/// Internal punctuation stays, so "don't" keeps its apostrophe.
pub fn normalize_word(word: &str) -> String {
    trim_edges(word).to_lowercase()
}

/// Display form: edge punctuation removed, case kept. A word made only of
/// punctuation keeps its original form so labels are never blank.
pub fn strip_display(word: &str) -> String {
    let stripped = trim_edges(word);
    if stripped.is_empty() {
        word.to_string()
    } else {
        stripped.to_string()
    }
}

/// Whitespace word split that preserves case and punctuation.
pub fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

pub fn normalize_all<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    words.iter().map(|w| normalize_word(w.as_ref())).collect()
}
