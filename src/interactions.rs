//! Pairwise drug interaction lookup.
//!
//! Matching is on raw lowercase substrings of the supplied names, not tokens,
//! so dosage-suffixed entries such as "Aspirin 81mg" still hit.

use serde::{Deserialize, Serialize};

use crate::knowledge::types::{DrugInteractionRule, InteractionSeverity};
use crate::knowledge::KnowledgeBase;

pub const TOO_FEW_MEDICATIONS: &str = "Need at least 2 medications to check interactions";

/// A HIGH-severity interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub combination: String,
    pub risk: String,
    pub severity: InteractionSeverity,
    pub mechanism: Option<String>,
    pub monitoring: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InteractionWarning {
    /// A MODERATE-severity pair.
    Combination {
        combination: String,
        warning: String,
        severity: InteractionSeverity,
    },
    /// Informational message when the check could not run.
    Notice { message: String },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InteractionReport {
    pub interactions: Vec<Interaction>,
    pub warnings: Vec<InteractionWarning>,
}

impl InteractionReport {
    pub fn has_high_risk(&self) -> bool {
        !self.interactions.is_empty()
    }
}

/// Check every rule against the supplied medication names.
/// Fewer than two names is not an error: the report carries a notice instead.
pub fn check_interactions<S: AsRef<str>>(
    knowledge: &KnowledgeBase,
    medications: &[S],
) -> InteractionReport {
    if medications.len() < 2 {
        return InteractionReport {
            interactions: Vec::new(),
            warnings: vec![InteractionWarning::Notice {
                message: TOO_FEW_MEDICATIONS.to_string(),
            }],
        };
    }

    let names: Vec<String> = medications
        .iter()
        .map(|m| m.as_ref().to_lowercase())
        .collect();

    let interactions: Vec<Interaction> = knowledge
        .rules_with_severity(InteractionSeverity::High)
        .filter(|rule| pair_present(rule, &names))
        .map(|rule| Interaction {
            combination: rule.combination(),
            risk: rule.risk.clone(),
            severity: InteractionSeverity::High,
            mechanism: rule.mechanism.clone(),
            monitoring: rule.monitoring.clone(),
        })
        .collect();

    let warnings: Vec<InteractionWarning> = knowledge
        .rules_with_severity(InteractionSeverity::Moderate)
        .filter(|rule| pair_present(rule, &names))
        .map(|rule| InteractionWarning::Combination {
            combination: rule.combination(),
            warning: rule.risk.clone(),
            severity: InteractionSeverity::Moderate,
        })
        .collect();

    tracing::debug!(
        medications = names.len(),
        interactions = interactions.len(),
        warnings = warnings.len(),
        "Drug interaction check complete"
    );

    InteractionReport {
        interactions,
        warnings,
    }
}

/// Some name contains side A and some name (possibly the same one) contains side B.
fn pair_present(rule: &DrugInteractionRule, names: &[String]) -> bool {
    let (a, b) = &rule.pair;
    names.iter().any(|n| a.matches(n)) && names.iter().any(|n| b.matches(n))
}
