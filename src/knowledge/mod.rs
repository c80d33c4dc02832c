pub mod types;
pub mod builtin;
pub mod store;

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use self::types::{
    DrugInteractionRule, EmergencyCondition, InteractionSeverity, KnowledgeError,
    ServiceStats, SymptomEntry,
};

/// Immutable medical knowledge used by the triage engine.
///
/// Built once per process (see [`KnowledgeBase::builtin`]) or loaded from a
/// JSON file of the same shape. Never mutated after construction; a reload
/// replaces the whole value through [`store::KnowledgeStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    pub symptoms: Vec<SymptomEntry>,
    pub emergencies: Vec<EmergencyCondition>,
    pub interactions: Vec<DrugInteractionRule>,
    pub last_updated: NaiveDate,
}

impl KnowledgeBase {
    /// The curated data set shipped with the crate.
    pub fn builtin() -> Self {
        builtin::build()
    }

    /// Load and validate a knowledge base from a JSON file.
    pub fn load(path: &Path) -> Result<Self, KnowledgeError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| KnowledgeError::Load(path.display().to_string(), e.to_string()))?;
        Self::from_json(&json, &path.display().to_string())
    }

    /// Parse and validate a knowledge base from JSON text. `source` labels errors.
    pub fn from_json(json: &str, source: &str) -> Result<Self, KnowledgeError> {
        let kb: Self = serde_json::from_str(json)
            .map_err(|e| KnowledgeError::Parse(source.to_string(), e.to_string()))?;
        kb.validate()?;
        tracing::info!(
            source,
            symptoms = kb.symptoms.len(),
            emergencies = kb.emergencies.len(),
            interactions = kb.interactions.len(),
            "Knowledge base loaded"
        );
        Ok(kb)
    }

    /// Check the data-integrity invariants. A failure is a configuration defect.
    pub fn validate(&self) -> Result<(), KnowledgeError> {
        let mut symptom_keys = HashSet::new();
        for entry in &self.symptoms {
            if entry.key.trim().is_empty() {
                return Err(KnowledgeError::EmptySymptomKey(entry.name.clone()));
            }
            if !symptom_keys.insert(entry.key.as_str()) {
                return Err(KnowledgeError::DuplicateSymptomKey(entry.key.clone()));
            }
            if entry.name.trim().is_empty() {
                return Err(KnowledgeError::EmptySymptomName(entry.key.clone()));
            }
        }

        let mut emergency_keys = HashSet::new();
        for condition in &self.emergencies {
            if !emergency_keys.insert(condition.key.as_str()) {
                return Err(KnowledgeError::DuplicateEmergencyKey(condition.key.clone()));
            }
            if condition.immediate_actions.is_empty() {
                return Err(KnowledgeError::MissingImmediateActions(condition.key.clone()));
            }
        }

        // A blank name or alias is a substring of every medication.
        for rule in &self.interactions {
            let (a, b) = &rule.pair;
            let blank = [a, b].iter().any(|term| {
                std::iter::once(&term.name)
                    .chain(term.aliases.iter())
                    .any(|t| t.trim().is_empty())
            });
            if blank {
                return Err(KnowledgeError::EmptyDrugTerm(rule.combination()));
            }
        }

        Ok(())
    }

    pub fn symptom(&self, key: &str) -> Option<&SymptomEntry> {
        self.symptoms.iter().find(|s| s.key == key)
    }

    pub fn emergency(&self, key: &str) -> Option<&EmergencyCondition> {
        self.emergencies.iter().find(|c| c.key == key)
    }

    /// Interaction rules of one severity, in table order.
    pub fn rules_with_severity(
        &self,
        severity: InteractionSeverity,
    ) -> impl Iterator<Item = &DrugInteractionRule> {
        self.interactions
            .iter()
            .filter(move |r| r.severity == severity)
    }

    pub fn stats(&self) -> ServiceStats {
        ServiceStats {
            total_symptoms: self.symptoms.len(),
            emergency_conditions: self.emergencies.len(),
            high_risk_interactions: self.rules_with_severity(InteractionSeverity::High).count(),
            drug_interactions: self
                .rules_with_severity(InteractionSeverity::Moderate)
                .count(),
            last_updated: self.last_updated,
        }
    }
}
