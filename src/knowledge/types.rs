use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Symptom entries
// ---------------------------------------------------------------------------

/// A curated symptom with its matching vocabulary and care guidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomEntry {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub severity_levels: Vec<SeverityTier>,
    /// Sub-variants (e.g. tension vs. migraine headache).
    #[serde(default)]
    pub types: Vec<SymptomVariant>,
    #[serde(default)]
    pub treatments: Vec<Treatment>,
    #[serde(default)]
    pub natural_remedies: Vec<String>,
    /// Warning phrases. A word of any of these present in the input escalates to `high`.
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub common_causes: Vec<String>,
    #[serde(default)]
    pub regions: Vec<BodyRegion>,
}

impl SymptomEntry {
    /// Terms checked by primary matching: key, lowercased name, then synonyms.
    /// Key and name stay separate terms even when they spell the same word.
    pub fn primary_terms(&self) -> Vec<String> {
        let mut terms = Vec::with_capacity(self.synonyms.len() + 2);
        terms.push(self.key.clone());
        terms.push(self.name.to_lowercase());
        terms.extend(self.synonyms.iter().map(|s| s.to_lowercase()));
        terms
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityTier {
    pub level: String,
    pub threshold: String,
    pub concern: String,
    pub action: String,
    pub response_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomVariant {
    pub key: String,
    /// Descriptive phrases; any verbatim word hit adds secondary score.
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Trigger phrases; a token contained in one adds trigger score.
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub treatment: Vec<String>,
    #[serde(default)]
    pub causes: Vec<String>,
    #[serde(default)]
    pub characteristics: Vec<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub prevalence: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treatment {
    pub name: String,
    pub dosage: String,
    #[serde(default)]
    pub max_daily: Option<String>,
    #[serde(default)]
    pub precautions: Option<String>,
    /// Percentage string, e.g. "85%".
    #[serde(default)]
    pub effectiveness: Option<String>,
    #[serde(default)]
    pub onset: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRegion {
    pub region: String,
    pub organs: Vec<String>,
}

// ---------------------------------------------------------------------------
// Emergency conditions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergencyCondition {
    pub key: String,
    #[serde(default)]
    pub warning_signs: Vec<String>,
    #[serde(default)]
    pub additional_signs: Vec<String>,
    pub immediate_actions: Vec<String>,
    #[serde(default)]
    pub differential: Vec<DifferentialNote>,
    /// Bedside checks shown alongside the actions (e.g. FAST for stroke).
    #[serde(default)]
    pub quick_checks: Vec<String>,
    /// Lesser presentations of the same condition. Reference only: these
    /// never enter the emergency keyword pool.
    #[serde(default)]
    pub mild_signs: Vec<String>,
}

impl EmergencyCondition {
    /// Display form of the key: `chest_pain` -> `CHEST PAIN`.
    pub fn display_name(&self) -> String {
        self.key.replace('_', " ").to_uppercase()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferentialNote {
    pub condition: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Drug interactions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InteractionSeverity {
    High,
    Moderate,
}

impl InteractionSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Moderate => "MODERATE",
        }
    }
}

/// One side of an interaction pair. Matches a medication name containing
/// `name` or any alias as a substring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugTerm {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl DrugTerm {
    pub fn matches(&self, medication_lower: &str) -> bool {
        std::iter::once(&self.name)
            .chain(self.aliases.iter())
            .any(|term| medication_lower.contains(term.to_lowercase().as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugInteractionRule {
    pub pair: (DrugTerm, DrugTerm),
    pub severity: InteractionSeverity,
    /// Risk (HIGH) or warning text (MODERATE).
    pub risk: String,
    #[serde(default)]
    pub mechanism: Option<String>,
    #[serde(default)]
    pub monitoring: Option<String>,
}

impl DrugInteractionRule {
    /// Label in the `drug_a + drug_b` form used by reports.
    pub fn combination(&self) -> String {
        format!("{} + {}", self.pair.0.name, self.pair.1.name)
    }
}

// ---------------------------------------------------------------------------
// ServiceStats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStats {
    pub total_symptoms: usize,
    pub emergency_conditions: usize,
    pub high_risk_interactions: usize,
    /// Count of moderate interaction warnings.
    pub drug_interactions: usize,
    pub last_updated: NaiveDate,
}

// ---------------------------------------------------------------------------
// KnowledgeError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Knowledge base load failed ({0}): {1}")]
    Load(String, String),

    #[error("Knowledge base parse failed ({0}): {1}")]
    Parse(String, String),

    #[error("Duplicate symptom key: {0}")]
    DuplicateSymptomKey(String),

    #[error("Duplicate emergency condition key: {0}")]
    DuplicateEmergencyKey(String),

    #[error("Symptom {0} has an empty name")]
    EmptySymptomName(String),

    #[error("Symptom named {0:?} has an empty key")]
    EmptySymptomKey(String),

    #[error("Emergency condition {0} defines no immediate actions")]
    MissingImmediateActions(String),

    #[error("Interaction rule {0} has an empty drug term")]
    EmptyDrugTerm(String),

    #[error("Internal lock failed")]
    LockFailed,
}
