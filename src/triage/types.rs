use serde::{Deserialize, Serialize};

use crate::knowledge::types::{SymptomVariant, Treatment};

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Triage tier. Ordered: a pass may only move it upward.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Mild,
    Moderate,
    High,
    /// Only the emergency-condition table produces this tier.
    Emergency,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Emergency => "emergency",
        }
    }

    /// Raise to `to` if it is more severe. Never lowers.
    pub fn escalate(&mut self, to: Severity) {
        if to > *self {
            *self = to;
        }
    }
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

/// A knowledge-base symptom scored against the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomMatch {
    pub symptom_key: String,
    pub symptom_name: String,
    /// Per-entry confidence in (0, entry cap].
    pub confidence: f64,
    /// Raw accumulated score.
    pub score: f64,
    /// Primary terms and variant phrases that hit. Triggers are never listed.
    pub matched_terms: Vec<String>,
    pub treatments: Vec<Treatment>,
    pub natural_remedies: Vec<String>,
    pub red_flags: Vec<String>,
    pub common_causes: Vec<String>,
    pub variants: Vec<SymptomVariant>,
}

/// An emergency condition whose keyword pool hit the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyMatch {
    /// Display name, e.g. `CHEST PAIN`.
    pub condition: String,
    pub condition_key: String,
    pub actions: Vec<String>,
    pub urgency: String,
    /// Number of pool keywords that hit.
    pub match_strength: usize,
    pub warning_signs: Vec<String>,
    pub quick_checks: Vec<String>,
}

/// Treatment reshaped for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentOption {
    pub medication: String,
    pub dosage: String,
    pub effectiveness: String,
    pub precautions: Option<String>,
    pub onset: String,
}

// ---------------------------------------------------------------------------
// AnalysisResult
// ---------------------------------------------------------------------------

/// Outcome of one analysis call. Always well-formed, whatever the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub matches: Vec<SymptomMatch>,
    pub severity: Severity,
    /// Non-empty only when `severity` is `Emergency`.
    pub emergency_flags: Vec<EmergencyMatch>,
    pub confidence: f64,
    pub recommendations: Vec<String>,
    pub treatment_options: Vec<TreatmentOption>,
    pub when_to_seek_help: Vec<String>,
    pub matched_keywords: Vec<String>,
    /// Wall-clock time spent in the engine. Diagnostic only.
    pub response_time_ms: u64,
}

impl AnalysisResult {
    pub fn is_emergency(&self) -> bool {
        self.severity == Severity::Emergency
    }

    /// Top-ranked match, if any.
    pub fn top_match(&self) -> Option<&SymptomMatch> {
        self.matches.first()
    }
}
