use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "clinic-triage";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,clinic_triage=debug"
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid scoring config ({0}): {1}")]
    InvalidValue(&'static str, String),

    #[error("Config parse failed: {0}")]
    Parse(String),
}

// ═══════════════════════════════════════════════════════════
// ScoringConfig
// ═══════════════════════════════════════════════════════════

/// Weights, caps and limits for the triage pipeline.
///
/// The defaults are empirically chosen values carried over unchanged from the
/// production scorer. They are tunable knobs, not derived quantities: change
/// them only against new calibration data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Tokens shorter than this are discarded.
    pub min_token_len: usize,
    /// Score added per matched key/name/synonym.
    pub primary_weight: f64,
    /// Score added per matched variant symptom phrase.
    pub secondary_weight: f64,
    /// Score added per variant trigger containing a token.
    pub trigger_weight: f64,
    /// Per-entry confidence = min(entry_confidence_cap, score / entry_confidence_divisor).
    pub entry_confidence_divisor: f64,
    pub entry_confidence_cap: f64,
    /// Overall confidence = min(cap, (sum / (count * divisor)) * scale + offset).
    pub overall_confidence_divisor: f64,
    pub overall_confidence_scale: f64,
    pub overall_confidence_offset: f64,
    pub overall_confidence_cap: f64,
    /// Overall confidence when nothing matched.
    pub no_match_confidence: f64,
    /// Overall confidence when an emergency short-circuits the analysis.
    pub emergency_confidence: f64,
    /// Raw entry score above which `mild` becomes `moderate`.
    pub moderate_score_threshold: f64,
    /// Top-match confidence above which detailed treatment guidance is emitted.
    pub strong_match_confidence: f64,
    pub max_guidance_treatments: usize,
    pub max_guidance_remedies: usize,
    pub max_red_flags: usize,
    pub max_treatment_options: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_token_len: 3,
            primary_weight: 2.0,
            secondary_weight: 1.0,
            trigger_weight: 0.5,
            entry_confidence_divisor: 5.0,
            entry_confidence_cap: 0.95,
            overall_confidence_divisor: 3.0,
            overall_confidence_scale: 0.8,
            overall_confidence_offset: 0.1,
            overall_confidence_cap: 0.92,
            no_match_confidence: 0.05,
            emergency_confidence: 0.98,
            moderate_score_threshold: 2.0,
            strong_match_confidence: 0.7,
            max_guidance_treatments: 2,
            max_guidance_remedies: 3,
            max_red_flags: 3,
            max_treatment_options: 5,
        }
    }
}

impl ScoringConfig {
    /// Parse a (possibly partial) JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the confidence bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let caps = [
            ("entry_confidence_cap", self.entry_confidence_cap),
            ("overall_confidence_cap", self.overall_confidence_cap),
            ("no_match_confidence", self.no_match_confidence),
            ("emergency_confidence", self.emergency_confidence),
            ("strong_match_confidence", self.strong_match_confidence),
        ];
        for (name, value) in caps {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue(name, value.to_string()));
            }
        }

        let divisors = [
            ("entry_confidence_divisor", self.entry_confidence_divisor),
            ("overall_confidence_divisor", self.overall_confidence_divisor),
        ];
        for (name, value) in divisors {
            if !(value > 0.0) {
                return Err(ConfigError::InvalidValue(name, value.to_string()));
            }
        }

        if self.min_token_len == 0 {
            return Err(ConfigError::InvalidValue("min_token_len", "0".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_clinic_triage() {
        assert_eq!(APP_NAME, "clinic-triage");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn defaults_are_valid() {
        assert!(ScoringConfig::default().validate().is_ok());
    }

    #[test]
    fn defaults_keep_production_constants() {
        let config = ScoringConfig::default();
        assert_eq!(config.primary_weight, 2.0);
        assert_eq!(config.secondary_weight, 1.0);
        assert_eq!(config.trigger_weight, 0.5);
        assert_eq!(config.entry_confidence_divisor, 5.0);
        assert_eq!(config.overall_confidence_divisor, 3.0);
        assert_eq!(config.emergency_confidence, 0.98);
    }

    #[test]
    fn partial_override_fills_defaults() {
        let config = ScoringConfig::from_json(r#"{"primary_weight": 3.0}"#).unwrap();
        assert_eq!(config.primary_weight, 3.0);
        assert_eq!(config.secondary_weight, 1.0);
        assert_eq!(config.max_treatment_options, 5);
    }

    #[test]
    fn cap_above_one_rejected() {
        let err = ScoringConfig::from_json(r#"{"entry_confidence_cap": 1.5}"#).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue("entry_confidence_cap", "1.5".into())
        );
    }

    #[test]
    fn zero_divisor_rejected() {
        let err = ScoringConfig::from_json(r#"{"overall_confidence_divisor": 0.0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue("overall_confidence_divisor", _)
        ));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = ScoringConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
