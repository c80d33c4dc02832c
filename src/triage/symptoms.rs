use crate::config::ScoringConfig;
use crate::knowledge::types::SymptomEntry;

use super::matching::TermMatcher;
use super::tokenize::TokenSet;
use super::types::{Severity, SymptomMatch};

/// Ranked output of the symptom matcher.
#[derive(Debug, Clone, PartialEq)]
pub struct SymptomMatches {
    pub matches: Vec<SymptomMatch>,
    /// Severity reached while scoring. Never `Emergency`.
    pub severity: Severity,
    pub confidence: f64,
    pub matched_keywords: Vec<String>,
}

/// Raw score and recorded terms for one entry.
#[derive(Debug, Clone, PartialEq, Default)]
struct EntryScore {
    score: f64,
    matched_terms: Vec<String>,
}

/// Score every entry, keep those above zero, rank by confidence.
pub fn match_symptoms<M: TermMatcher + ?Sized>(
    symptoms: &[SymptomEntry],
    tokens: &TokenSet,
    matcher: &M,
    config: &ScoringConfig,
) -> SymptomMatches {
    let mut severity = Severity::Mild;
    let mut matches = Vec::new();
    let mut total_score = 0.0;

    for entry in symptoms {
        let scored = score_entry(entry, tokens, matcher, config);
        if scored.score <= 0.0 {
            continue;
        }

        if red_flag_hit(entry, tokens) {
            severity.escalate(Severity::High);
        } else if severity == Severity::Mild && scored.score > config.moderate_score_threshold {
            severity = Severity::Moderate;
        }

        let confidence =
            (scored.score / config.entry_confidence_divisor).min(config.entry_confidence_cap);

        tracing::debug!(
            symptom = entry.key.as_str(),
            score = scored.score,
            confidence,
            "Symptom entry matched"
        );

        total_score += scored.score;
        matches.push(SymptomMatch {
            symptom_key: entry.key.clone(),
            symptom_name: entry.name.clone(),
            confidence,
            score: scored.score,
            matched_terms: scored.matched_terms,
            treatments: entry.treatments.clone(),
            natural_remedies: entry.natural_remedies.clone(),
            red_flags: entry.red_flags.clone(),
            common_causes: entry.common_causes.clone(),
            variants: entry.types.clone(),
        });
    }

    // Stable: equal confidences keep knowledge-base order.
    matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let confidence = overall_confidence(total_score, matches.len(), config);
    let matched_keywords = collect_keywords(&matches);

    SymptomMatches {
        matches,
        severity,
        confidence,
        matched_keywords,
    }
}

/// Damped confidence for the whole result.
pub fn overall_confidence(total_score: f64, match_count: usize, config: &ScoringConfig) -> f64 {
    if match_count == 0 {
        return config.no_match_confidence;
    }
    let mean = total_score / (match_count as f64 * config.overall_confidence_divisor);
    (mean * config.overall_confidence_scale + config.overall_confidence_offset)
        .min(config.overall_confidence_cap)
}

fn score_entry<M: TermMatcher + ?Sized>(
    entry: &SymptomEntry,
    tokens: &TokenSet,
    matcher: &M,
    config: &ScoringConfig,
) -> EntryScore {
    let mut result = EntryScore::default();

    for term in entry.primary_terms() {
        if matcher.any_token_matches(tokens, &term) {
            result.score += config.primary_weight;
            result.matched_terms.push(term);
        }
    }

    for variant in &entry.types {
        for phrase in &variant.symptoms {
            let lower = phrase.to_lowercase();
            if lower.split_whitespace().any(|word| tokens.contains(word)) {
                result.score += config.secondary_weight;
                result.matched_terms.push(phrase.clone());
            }
        }

        for trigger in &variant.triggers {
            let lower = trigger.to_lowercase();
            if tokens.iter().any(|token| lower.contains(token)) {
                result.score += config.trigger_weight;
            }
        }
    }

    result
}

/// Any whitespace-separated word of any red flag present in the tokens.
fn red_flag_hit(entry: &SymptomEntry, tokens: &TokenSet) -> bool {
    entry.red_flags.iter().any(|flag| {
        flag.to_lowercase()
            .split_whitespace()
            .any(|word| tokens.contains(word))
    })
}

/// Order-preserving union of matched terms.
fn collect_keywords(matches: &[SymptomMatch]) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for term in matches.iter().flat_map(|m| m.matched_terms.iter()) {
        if !keywords.contains(term) {
            keywords.push(term.clone());
        }
    }
    keywords
}
