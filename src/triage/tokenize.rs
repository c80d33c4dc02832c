use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Split on whitespace and runs of `,` `.` `-`.
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,.\-]+").expect("Invalid token separator regex"));

/// Default minimum token length in characters.
pub const MIN_TOKEN_LEN: usize = 3;

/// Lowercased input words, deduplicated, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    ordered: Vec<String>,
    lookup: HashSet<String>,
}

impl TokenSet {
    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    fn insert(&mut self, word: &str) {
        if self.lookup.insert(word.to_string()) {
            self.ordered.push(word.to_string());
        }
    }
}

/// Tokenize with the default minimum length.
pub fn tokenize(text: &str) -> TokenSet {
    tokenize_with_min(text, MIN_TOKEN_LEN)
}

/// Lowercase `text`, split it, and drop words shorter than `min_len` characters.
/// Never fails; empty input yields an empty set.
pub fn tokenize_with_min(text: &str, min_len: usize) -> TokenSet {
    let lower = text.to_lowercase();
    let mut tokens = TokenSet::default();
    for word in SEPARATORS.split(&lower) {
        if word.chars().count() >= min_len {
            tokens.insert(word);
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(tokens: &TokenSet) -> Vec<&str> {
        tokens.iter().collect()
    }

    #[test]
    fn lowercases_and_splits() {
        let tokens = tokenize("Sharp PAIN, fever.Cough-attack  today");
        assert_eq!(
            words(&tokens),
            vec!["sharp", "pain", "fever", "cough", "attack", "today"]
        );
    }

    #[test]
    fn drops_short_words() {
        let tokens = tokenize("I am ok but my ear is hot");
        assert_eq!(words(&tokens), vec!["but", "ear", "hot"]);
    }

    #[test]
    fn empty_input_yields_empty_set() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ,.- \n").is_empty());
    }

    #[test]
    fn duplicates_collapse_keeping_first_position() {
        let tokens = tokenize("fever headache fever");
        assert_eq!(tokens.len(), 2);
        assert_eq!(words(&tokens), vec!["fever", "headache"]);
        assert!(tokens.contains("headache"));
        assert!(!tokens.contains("cough"));
    }

    #[test]
    fn slashes_and_parentheses_stay_inside_words() {
        let tokens = tokenize("light/sound (worst");
        assert_eq!(words(&tokens), vec!["light/sound", "(worst"]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // "été" is 3 characters but 5 bytes.
        assert!(tokenize("été").contains("été"));
        assert!(tokenize_with_min("°c", 3).is_empty());
    }
}
