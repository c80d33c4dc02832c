use crate::knowledge::types::EmergencyCondition;

use super::matching::TermMatcher;
use super::tokenize::TokenSet;
use super::types::EmergencyMatch;

/// Urgency label attached to every emergency match.
pub const EMERGENCY_URGENCY: &str = "EMERGENCY - CALL 911";

/// Keywords for one condition: key parts, then every whitespace-separated
/// word of the warning and additional signs.
///
/// Unlike input tokens, sign words have no minimum length, so "to", "of" and
/// "or" stay in the pool and hit inputs such as "stomach" or "morning". The
/// detector errs toward flagging. Repeats are kept; each one counts as a hit.
pub fn keyword_pool(condition: &EmergencyCondition) -> Vec<String> {
    let mut pool: Vec<String> = condition
        .key
        .split('_')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect();

    for sign in condition
        .warning_signs
        .iter()
        .chain(condition.additional_signs.iter())
    {
        pool.extend(sign_words(sign));
    }

    pool
}

/// Lowercased words of a sign phrase with edge punctuation removed.
fn sign_words(sign: &str) -> Vec<String> {
    sign.to_lowercase()
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Scan the tokens against every emergency condition, in table order.
/// A condition is reported when at least one pool keyword hits a token.
pub fn detect_emergencies<M: TermMatcher + ?Sized>(
    conditions: &[EmergencyCondition],
    tokens: &TokenSet,
    matcher: &M,
) -> Vec<EmergencyMatch> {
    if tokens.is_empty() {
        return Vec::new();
    }

    conditions
        .iter()
        .filter_map(|condition| {
            let hits = keyword_pool(condition)
                .iter()
                .filter(|keyword| matcher.any_token_matches(tokens, keyword))
                .count();

            if hits == 0 {
                return None;
            }

            tracing::warn!(
                condition = condition.key.as_str(),
                match_strength = hits,
                "Emergency condition detected"
            );

            Some(EmergencyMatch {
                condition: condition.display_name(),
                condition_key: condition.key.clone(),
                actions: condition.immediate_actions.clone(),
                urgency: EMERGENCY_URGENCY.to_string(),
                match_strength: hits,
                warning_signs: condition.warning_signs.clone(),
                quick_checks: condition.quick_checks.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;
    use crate::triage::matching::{ContainmentMatcher, WholeWordMatcher};
    use crate::triage::tokenize::tokenize;

    fn detect(text: &str) -> Vec<EmergencyMatch> {
        let kb = KnowledgeBase::builtin();
        detect_emergencies(&kb.emergencies, &tokenize(text), &ContainmentMatcher)
    }

    fn has(pool: &[String], word: &str) -> bool {
        pool.iter().any(|k| k == word)
    }

    #[test]
    fn chest_pain_pool_contents() {
        let kb = KnowledgeBase::builtin();
        let pool = keyword_pool(kb.emergency("chest_pain").unwrap());
        assert_eq!(&pool[..2], &["chest".to_string(), "pain".to_string()]);
        assert!(has(&pool, "radiating"));
        assert!(has(&pool, "breath"));
        // Edge punctuation is stripped: "arm," becomes "arm".
        assert!(has(&pool, "arm"));
        assert!(!pool.iter().any(|k| k.ends_with(',')));
    }

    #[test]
    fn short_sign_words_stay_in_pool() {
        let kb = KnowledgeBase::builtin();
        let pool = keyword_pool(kb.emergency("chest_pain").unwrap());
        for word in ["to", "of", "or"] {
            assert!(has(&pool, word), "{word} missing");
        }
    }

    #[test]
    fn short_sign_words_hit_longer_tokens() {
        // "stomach" contains "to", "morning" contains "or".
        let flags = detect("upset stomach since this morning");
        let chest = flags.iter().find(|f| f.condition_key == "chest_pain").unwrap();
        assert_eq!(chest.match_strength, 2);
    }

    #[test]
    fn mild_allergy_signs_stay_out_of_pool() {
        let kb = KnowledgeBase::builtin();
        let condition = kb.emergency("allergic_reaction").unwrap();
        assert!(!condition.mild_signs.is_empty());
        let pool = keyword_pool(condition);
        assert!(!has(&pool, "mild"));
        assert!(!has(&pool, "hives"));
    }

    #[test]
    fn chest_pain_detected_with_actions() {
        let flags = detect("crushing chest pain since this morning");
        let chest = flags.iter().find(|f| f.condition_key == "chest_pain").unwrap();
        assert_eq!(chest.condition, "CHEST PAIN");
        assert_eq!(chest.actions[0], "Call 911 immediately");
        assert_eq!(chest.urgency, EMERGENCY_URGENCY);
        // "crushing", "chest" x2, "pain" x3, plus "or" inside "morning".
        assert_eq!(chest.match_strength, 7);
    }

    #[test]
    fn partial_word_hits_count() {
        // "breathing" contains the pool keyword "breath".
        let flags = detect("trouble breathing");
        let keys: Vec<&str> = flags.iter().map(|f| f.condition_key.as_str()).collect();
        assert!(keys.contains(&"chest_pain"));
        assert!(keys.contains(&"allergic_reaction"));
    }

    #[test]
    fn stroke_detected_from_additional_signs() {
        let flags = detect("sudden confusion");
        let stroke = flags.iter().find(|f| f.condition_key == "stroke").unwrap();
        assert!(!stroke.quick_checks.is_empty());
    }

    #[test]
    fn ordinary_complaint_not_flagged() {
        assert!(detect("I have a fever of 102 and a headache").is_empty());
    }

    #[test]
    fn empty_input_not_flagged() {
        assert!(detect("").is_empty());
    }

    #[test]
    fn whole_word_matcher_narrows_hits() {
        let kb = KnowledgeBase::builtin();
        let flags = detect_emergencies(
            &kb.emergencies,
            &tokenize("trouble breathing"),
            &WholeWordMatcher,
        );
        // Only allergic_reaction lists "breathing" verbatim.
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].condition_key, "allergic_reaction");
    }
}
