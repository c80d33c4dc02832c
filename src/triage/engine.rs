use std::sync::Arc;
use std::time::Instant;

use crate::config::ScoringConfig;
use crate::interactions::{check_interactions, InteractionReport};
use crate::knowledge::store::KnowledgeStore;
use crate::knowledge::types::ServiceStats;
use crate::knowledge::KnowledgeBase;

use super::emergency::detect_emergencies;
use super::matching::{ContainmentMatcher, TermMatcher};
use super::recommend::{emergency_guidance, synthesize, Guidance};
use super::symptoms::match_symptoms;
use super::tokenize::tokenize_with_min;
use super::types::{AnalysisResult, Severity};

/// Where the engine reads its knowledge from.
enum KnowledgeSource {
    /// One snapshot for the engine's whole life.
    Fixed(Arc<KnowledgeBase>),
    /// Whatever the store holds when a call starts. Reloads take effect on
    /// the next call; a call in flight keeps its snapshot.
    Store(Arc<KnowledgeStore>),
}

/// Composes tokenizer, emergency detector, symptom matcher and
/// recommendation synthesizer over a knowledge snapshot.
///
/// Holds no mutable state: `analyze` is pure apart from the timing field
/// and log output, and the engine can be shared across threads.
pub struct TriageEngine<M: TermMatcher = ContainmentMatcher> {
    source: KnowledgeSource,
    config: ScoringConfig,
    matcher: M,
}

impl TriageEngine<ContainmentMatcher> {
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self::with_config(knowledge, ScoringConfig::default())
    }

    /// Engine over the built-in knowledge base with default scoring.
    pub fn builtin() -> Self {
        Self::new(Arc::new(KnowledgeBase::builtin()))
    }

    pub fn with_config(knowledge: Arc<KnowledgeBase>, config: ScoringConfig) -> Self {
        Self::with_matcher(knowledge, config, ContainmentMatcher)
    }

    /// Engine that follows `store`: each call analyzes against the current snapshot.
    pub fn from_store(store: Arc<KnowledgeStore>) -> Self {
        Self::from_store_with(store, ScoringConfig::default(), ContainmentMatcher)
    }
}

impl<M: TermMatcher> TriageEngine<M> {
    pub fn with_matcher(knowledge: Arc<KnowledgeBase>, config: ScoringConfig, matcher: M) -> Self {
        Self {
            source: KnowledgeSource::Fixed(knowledge),
            config,
            matcher,
        }
    }

    pub fn from_store_with(store: Arc<KnowledgeStore>, config: ScoringConfig, matcher: M) -> Self {
        Self {
            source: KnowledgeSource::Store(store),
            config,
            matcher,
        }
    }

    /// Knowledge snapshot the next call would use.
    pub fn knowledge(&self) -> Arc<KnowledgeBase> {
        match &self.source {
            KnowledgeSource::Fixed(knowledge) => Arc::clone(knowledge),
            KnowledgeSource::Store(store) => store.current(),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn stats(&self) -> ServiceStats {
        self.knowledge().stats()
    }

    pub fn check_interactions<S: AsRef<str>>(&self, medications: &[S]) -> InteractionReport {
        check_interactions(&self.knowledge(), medications)
    }

    /// Analyze a free-text symptom description.
    ///
    /// Emergency detection runs first and short-circuits: when any condition
    /// hits, no symptom matching is done and the result carries only the
    /// emergency directive. Never fails; unmatched input yields a mild result
    /// with floor confidence.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let start = Instant::now();
        let knowledge = self.knowledge();
        let tokens = tokenize_with_min(text, self.config.min_token_len);

        let emergency_flags = detect_emergencies(&knowledge.emergencies, &tokens, &self.matcher);

        let result = if !emergency_flags.is_empty() {
            let Guidance {
                recommendations,
                treatment_options,
                when_to_seek_help,
            } = emergency_guidance();

            AnalysisResult {
                matches: Vec::new(),
                severity: Severity::Emergency,
                emergency_flags,
                confidence: self.config.emergency_confidence,
                recommendations,
                treatment_options,
                when_to_seek_help,
                matched_keywords: Vec::new(),
                response_time_ms: elapsed_ms(start),
            }
        } else {
            let scored = match_symptoms(&knowledge.symptoms, &tokens, &self.matcher, &self.config);
            let guidance = synthesize(scored.severity, &scored.matches, &self.config);

            AnalysisResult {
                matches: scored.matches,
                severity: scored.severity,
                emergency_flags: Vec::new(),
                confidence: scored.confidence,
                recommendations: guidance.recommendations,
                treatment_options: guidance.treatment_options,
                when_to_seek_help: guidance.when_to_seek_help,
                matched_keywords: scored.matched_keywords,
                response_time_ms: elapsed_ms(start),
            }
        };

        // Never log the patient's text, only the outcome.
        tracing::info!(
            severity = result.severity.as_str(),
            matches = result.matches.len(),
            emergency_flags = result.emergency_flags.len(),
            confidence = result.confidence,
            processing_ms = result.response_time_ms,
            "Symptom analysis complete"
        );

        result
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
