//! Free-text symptom triage.
//!
//! Pipeline: tokenize, scan the emergency table, score symptom entries,
//! then synthesize guidance. [`engine::TriageEngine`] wires the stages
//! together over one knowledge snapshot.

pub mod types;
pub mod tokenize;
pub mod matching;
pub mod emergency;
pub mod symptoms;
pub mod recommend;
pub mod engine;

pub use engine::TriageEngine;
pub use matching::{ContainmentMatcher, TermMatcher, WholeWordMatcher};
pub use types::{AnalysisResult, EmergencyMatch, Severity, SymptomMatch, TreatmentOption};
