use crate::config::ScoringConfig;

use super::types::{Severity, SymptomMatch, TreatmentOption};

pub const EMERGENCY_DIRECTIVE: &str = "EMERGENCY SITUATION DETECTED - CALL 911 IMMEDIATELY";
const NOT_SPECIFIED: &str = "Not specified";
const VARIES: &str = "Varies";

const SELF_CARE: &[&str] = &[
    "General self-care:",
    "  • Stay well hydrated with water",
    "  • Get adequate rest and sleep",
    "  • Monitor symptoms and track changes",
    "  • Avoid known triggers when possible",
];

/// Human-facing guidance derived from severity and ranked matches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Guidance {
    pub recommendations: Vec<String>,
    pub treatment_options: Vec<TreatmentOption>,
    pub when_to_seek_help: Vec<String>,
}

/// Build guidance for an ordinary (non-emergency) analysis. Pure.
pub fn synthesize(severity: Severity, matches: &[SymptomMatch], config: &ScoringConfig) -> Guidance {
    Guidance {
        recommendations: recommendations(severity, matches, config),
        treatment_options: treatment_options(matches, config.max_treatment_options),
        when_to_seek_help: when_to_seek_help(severity),
    }
}

/// Guidance for the emergency short-circuit.
pub fn emergency_guidance() -> Guidance {
    Guidance {
        recommendations: vec![EMERGENCY_DIRECTIVE.to_string()],
        treatment_options: Vec::new(),
        when_to_seek_help: when_to_seek_help(Severity::Emergency),
    }
}

fn recommendations(
    severity: Severity,
    matches: &[SymptomMatch],
    config: &ScoringConfig,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    match severity {
        Severity::High => {
            lines.push("URGENT: Some symptoms may require immediate medical attention".into());
            lines.push("Consider calling your doctor or visiting urgent care".into());
        }
        Severity::Moderate => {
            lines.push("MODERATE CONCERN: Monitor symptoms closely".into());
            lines.push("Schedule appointment with healthcare provider if symptoms persist".into());
        }
        Severity::Mild | Severity::Emergency => {}
    }

    let Some(top) = matches.first() else {
        lines.push("No specific matches found in our medical database".into());
        lines.push(
            "Try describing symptoms more specifically (location, duration, intensity)".into(),
        );
        lines.push("If symptoms persist or worsen, consult a healthcare provider".into());
        return lines;
    };

    if top.confidence > config.strong_match_confidence {
        lines.push(format!("Strong match detected: {}", top.symptom_name));

        if !top.treatments.is_empty() {
            lines.push("Treatment options:".into());
            for treatment in top.treatments.iter().take(config.max_guidance_treatments) {
                lines.push(format!("  • {}: {}", treatment.name, treatment.dosage));
                if let Some(precautions) = &treatment.precautions {
                    lines.push(format!("    Caution: {precautions}"));
                }
                if let Some(effectiveness) = &treatment.effectiveness {
                    lines.push(format!("    Effectiveness: {effectiveness}"));
                }
            }
        }

        if !top.natural_remedies.is_empty() {
            lines.push("Natural remedies:".into());
            for remedy in top.natural_remedies.iter().take(config.max_guidance_remedies) {
                lines.push(format!("  • {remedy}"));
            }
        }
    }

    for other in matches.iter().skip(1) {
        lines.push(format!(
            "Also consistent with: {} ({}% match)",
            other.symptom_name,
            (other.confidence * 100.0).round() as u32
        ));
    }

    let red_flags: Vec<&String> = matches
        .iter()
        .flat_map(|m| m.red_flags.iter())
        .take(config.max_red_flags)
        .collect();
    if !red_flags.is_empty() {
        lines.push("SEEK IMMEDIATE CARE IF YOU EXPERIENCE:".into());
        for flag in red_flags {
            lines.push(format!("  • {flag}"));
        }
    }

    lines.extend(SELF_CARE.iter().map(|s| s.to_string()));
    lines
}

/// Every match's treatments, flattened in rank order, capped at `limit`.
fn treatment_options(matches: &[SymptomMatch], limit: usize) -> Vec<TreatmentOption> {
    matches
        .iter()
        .flat_map(|m| m.treatments.iter())
        .take(limit)
        .map(|t| TreatmentOption {
            medication: t.name.clone(),
            dosage: t.dosage.clone(),
            effectiveness: t.effectiveness.clone().unwrap_or_else(|| NOT_SPECIFIED.into()),
            precautions: t.precautions.clone(),
            onset: t.onset.clone().unwrap_or_else(|| VARIES.into()),
        })
        .collect()
}

/// Fixed follow-up advice per severity tier.
pub fn when_to_seek_help(severity: Severity) -> Vec<String> {
    let lines: [&str; 2] = match severity {
        Severity::Emergency => [
            "Call 911 or go to the nearest emergency department now",
            "Do not wait to see if symptoms improve",
        ],
        Severity::High => [
            "Seek medical attention within 24 hours",
            "Call doctor if symptoms worsen",
        ],
        Severity::Moderate => [
            "Schedule appointment within 2-3 days if symptoms persist",
            "Monitor symptoms closely",
        ],
        Severity::Mild => [
            "Self-care measures may be sufficient",
            "Consult healthcare provider if no improvement in 1 week",
        ],
    };
    lines.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::types::Treatment;

    fn make_treatment(name: &str, precautions: Option<&str>, effectiveness: Option<&str>) -> Treatment {
        Treatment {
            name: name.into(),
            dosage: "10mg".into(),
            max_daily: None,
            precautions: precautions.map(Into::into),
            effectiveness: effectiveness.map(Into::into),
            onset: None,
            notes: None,
        }
    }

    fn make_match(name: &str, confidence: f64, treatments: Vec<Treatment>, red_flags: &[&str]) -> SymptomMatch {
        SymptomMatch {
            symptom_key: name.to_lowercase(),
            symptom_name: name.into(),
            confidence,
            score: confidence * 5.0,
            matched_terms: vec![name.to_lowercase()],
            treatments,
            natural_remedies: vec!["Rest".into(), "Fluids".into(), "Cool room".into(), "Tea".into()],
            red_flags: red_flags.iter().map(|s| s.to_string()).collect(),
            common_causes: vec![],
            variants: vec![],
        }
    }

    fn config() -> ScoringConfig {
        ScoringConfig::default()
    }

    #[test]
    fn no_matches_short_circuits() {
        let guidance = synthesize(Severity::Mild, &[], &config());
        assert_eq!(guidance.recommendations.len(), 3);
        assert!(guidance.recommendations[0].starts_with("No specific matches"));
        assert!(guidance.treatment_options.is_empty());
        assert!(!guidance.recommendations.iter().any(|r| r == "General self-care:"));
    }

    #[test]
    fn high_severity_prepends_urgent_lines() {
        let matches = vec![make_match("Cough", 0.4, vec![], &[])];
        let recs = synthesize(Severity::High, &matches, &config()).recommendations;
        assert!(recs[0].starts_with("URGENT"));
    }

    #[test]
    fn moderate_severity_prepends_monitor_lines() {
        let recs = synthesize(Severity::Moderate, &[], &config()).recommendations;
        assert!(recs[0].starts_with("MODERATE CONCERN"));
        assert!(recs[2].starts_with("No specific matches"));
    }

    #[test]
    fn strong_top_match_lists_two_treatments_and_three_remedies() {
        let treatments = vec![
            make_treatment("Alpha", Some("Take with food"), Some("85%")),
            make_treatment("Beta", None, None),
            make_treatment("Gamma", None, None),
        ];
        let matches = vec![make_match("Fever", 0.8, treatments, &[])];
        let recs = synthesize(Severity::Mild, &matches, &config()).recommendations;

        assert!(recs.contains(&"Strong match detected: Fever".to_string()));
        assert!(recs.contains(&"  • Alpha: 10mg".to_string()));
        assert!(recs.contains(&"    Caution: Take with food".to_string()));
        assert!(recs.contains(&"    Effectiveness: 85%".to_string()));
        assert!(recs.contains(&"  • Beta: 10mg".to_string()));
        assert!(!recs.iter().any(|r| r.contains("Gamma")));
        assert!(recs.contains(&"  • Cool room".to_string()));
        assert!(!recs.contains(&"  • Tea".to_string()));
    }

    #[test]
    fn weak_top_match_gets_no_detail() {
        let matches = vec![make_match("Fever", 0.7, vec![make_treatment("Alpha", None, None)], &[])];
        let recs = synthesize(Severity::Mild, &matches, &config()).recommendations;
        assert!(!recs.iter().any(|r| r.starts_with("Strong match")));
        assert!(!recs.iter().any(|r| r.contains("Alpha")));
    }

    #[test]
    fn secondary_matches_are_named() {
        let matches = vec![
            make_match("Fever", 0.8, vec![], &[]),
            make_match("Headache", 0.8, vec![], &[]),
        ];
        let recs = synthesize(Severity::High, &matches, &config()).recommendations;
        assert!(recs.contains(&"Also consistent with: Headache (80% match)".to_string()));
    }

    #[test]
    fn red_flags_take_first_three_across_matches() {
        let matches = vec![
            make_match("Fever", 0.4, vec![], &["F1", "F2"]),
            make_match("Cough", 0.4, vec![], &["C1", "C2"]),
        ];
        let recs = synthesize(Severity::High, &matches, &config()).recommendations;
        let flags: Vec<&str> = recs
            .iter()
            .map(String::as_str)
            .filter(|r| r.starts_with("  • ") && r.chars().count() == 6)
            .collect();
        assert_eq!(flags, vec!["  • F1", "  • F2", "  • C1"]);
    }

    #[test]
    fn self_care_block_always_last() {
        let matches = vec![make_match("Cough", 0.4, vec![], &[])];
        let recs = synthesize(Severity::Mild, &matches, &config()).recommendations;
        assert_eq!(recs[recs.len() - SELF_CARE.len()], "General self-care:");
        assert_eq!(recs.last().unwrap(), "  • Avoid known triggers when possible");
    }

    #[test]
    fn treatment_options_flatten_and_cap() {
        let many = |prefix: &str| {
            (0..3)
                .map(|i| make_treatment(&format!("{prefix}{i}"), None, None))
                .collect::<Vec<_>>()
        };
        let matches = vec![
            make_match("Fever", 0.8, many("f"), &[]),
            make_match("Cough", 0.4, many("c"), &[]),
        ];
        let options = synthesize(Severity::Mild, &matches, &config()).treatment_options;
        let names: Vec<&str> = options.iter().map(|o| o.medication.as_str()).collect();
        assert_eq!(names, vec!["f0", "f1", "f2", "c0", "c1"]);
        assert_eq!(options[0].effectiveness, "Not specified");
        assert_eq!(options[0].onset, "Varies");
    }

    #[test]
    fn seek_help_keyed_by_severity() {
        assert_eq!(when_to_seek_help(Severity::High)[0], "Seek medical attention within 24 hours");
        assert!(when_to_seek_help(Severity::Moderate)[0].contains("2-3 days"));
        assert!(when_to_seek_help(Severity::Mild)[1].contains("1 week"));
    }

    #[test]
    fn emergency_guidance_is_single_directive() {
        let guidance = emergency_guidance();
        assert_eq!(guidance.recommendations, vec![EMERGENCY_DIRECTIVE.to_string()]);
        assert!(guidance.treatment_options.is_empty());
        assert!(guidance.when_to_seek_help[0].starts_with("Call 911"));
    }
}
