//! Token-to-term matching strategies.
//!
//! The production strategy is plain bidirectional substring containment. It
//! stands in for stemming: "breath" hits "breathing", and it also produces
//! visible false positives ("ear" hits "heart"). Both behaviours are part of
//! the contract and covered by tests. A different strategy can be plugged
//! into [`super::engine::TriageEngine`] without touching the pipeline.

use super::tokenize::TokenSet;

pub trait TermMatcher: Send + Sync {
    /// Does `token` (from the input) hit `term` (from the knowledge base)?
    fn matches(&self, token: &str, term: &str) -> bool;

    fn any_token_matches(&self, tokens: &TokenSet, term: &str) -> bool {
        tokens.iter().any(|token| self.matches(token, term))
    }
}

/// Either string contains the other. Empty strings never match.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainmentMatcher;

impl TermMatcher for ContainmentMatcher {
    fn matches(&self, token: &str, term: &str) -> bool {
        if token.is_empty() || term.is_empty() {
            return false;
        }
        token.contains(term) || term.contains(token)
    }
}

/// Token must equal the term or one of its whitespace-separated words.
#[derive(Debug, Clone, Copy, Default)]
pub struct WholeWordMatcher;

impl TermMatcher for WholeWordMatcher {
    fn matches(&self, token: &str, term: &str) -> bool {
        !token.is_empty() && (token == term || term.split_whitespace().any(|w| w == token))
    }
}
