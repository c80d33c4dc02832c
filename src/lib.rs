pub mod config;
pub mod knowledge; // Curated medical reference data + snapshot store
pub mod triage; // Symptom analysis pipeline
pub mod interactions; // Pairwise drug interaction lookup
pub mod calculators; // BMI + pain scale

use std::path::Path;
use std::sync::{Arc, LazyLock};

use tracing_subscriber::EnvFilter;

pub use calculators::{calculate_bmi, describe_pain_level, BmiReading, CalculatorError};
pub use interactions::{InteractionReport, InteractionWarning};
pub use knowledge::store::KnowledgeStore;
pub use knowledge::types::{KnowledgeError, ServiceStats};
pub use knowledge::KnowledgeBase;
pub use triage::{AnalysisResult, Severity, TriageEngine};

/// Process-wide knowledge, seeded with the built-in data set.
static DEFAULT_STORE: LazyLock<Arc<KnowledgeStore>> = LazyLock::new(|| {
    Arc::new(KnowledgeStore::builtin().expect("Built-in knowledge base failed validation"))
});

/// Process-wide engine following [`DEFAULT_STORE`].
static DEFAULT_ENGINE: LazyLock<TriageEngine> =
    LazyLock::new(|| TriageEngine::from_store(Arc::clone(&DEFAULT_STORE)));

/// Install the global `tracing` subscriber. Honors `RUST_LOG`.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();

    tracing::info!("{} v{} ready", config::APP_NAME, config::APP_VERSION);
}

/// Analyze free-text symptoms against the built-in knowledge base.
pub fn analyze_symptoms(text: &str) -> AnalysisResult {
    DEFAULT_ENGINE.analyze(text)
}

pub fn check_drug_interactions<S: AsRef<str>>(medications: &[S]) -> InteractionReport {
    DEFAULT_ENGINE.check_interactions(medications)
}

pub fn service_stats() -> ServiceStats {
    DEFAULT_ENGINE.stats()
}

/// Replace the process-wide knowledge with a JSON knowledge file.
/// On any load or validation error the current knowledge stays in place.
pub fn reload_knowledge(path: &Path) -> Result<(), KnowledgeError> {
    DEFAULT_STORE.reload_from(path)
}
