use super::estimator::EstimatorConfig;
use super::evidence::{ExtractionPatterns, FinancialTextExtractor, PatternError};
use super::gatekeeper::GatekeeperRules;
use super::identity::LegalSuffixes;
use super::pipeline::QueryTemplates;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Every static table the pipeline reads, bundled for swapping as a unit.
///
/// Missing sections in an override file fall back to the standard tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleBook {
    pub suffixes: LegalSuffixes,
    pub gatekeeper: GatekeeperRules,
    pub patterns: ExtractionPatterns,
    pub estimator: EstimatorConfig,
    pub queries: QueryTemplates,
}

impl RuleBook {
    pub fn standard() -> Self {
        Self {
            suffixes: LegalSuffixes::standard(),
            gatekeeper: GatekeeperRules::standard(),
            patterns: ExtractionPatterns::standard(),
            estimator: EstimatorConfig::standard(),
            queries: QueryTemplates::standard(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RuleBookError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RuleBookError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, RuleBookError> {
        let book: Self = serde_json::from_str(raw)?;
        book.validate()?;
        Ok(book)
    }

    pub fn validate(&self) -> Result<(), RuleBookError> {
        let estimator = &self.estimator;
        let jitter = estimator.jitter;
        if !(jitter.low.is_finite() && jitter.high.is_finite())
            || jitter.low <= 0.0
            || jitter.low > jitter.high
        {
            return Err(RuleBookError::Invalid(format!(
                "jitter bounds [{}, {}] must be positive and ordered",
                jitter.low, jitter.high
            )));
        }

        let factors = estimator
            .dso_table
            .iter()
            .map(|rule| rule.factor)
            .chain(std::iter::once(estimator.default_dso));
        for factor in factors {
            if !factor.is_finite() || !(0.0..=1.0).contains(&factor) {
                return Err(RuleBookError::Invalid(format!(
                    "DSO factor {factor} must lie in [0, 1]"
                )));
            }
        }

        let bases = estimator
            .heuristics
            .iter()
            .map(|rule| rule.base)
            .chain(std::iter::once(estimator.default_heuristic));
        for base in bases {
            if !base.base_sales_mm_usd.is_finite() || base.base_sales_mm_usd < 0.0 {
                return Err(RuleBookError::Invalid(format!(
                    "heuristic base {} must be a non-negative figure",
                    base.base_sales_mm_usd
                )));
            }
        }

        if self.patterns.0.is_empty() {
            return Err(RuleBookError::Invalid(
                "at least one extraction pattern is required".to_string(),
            ));
        }
        FinancialTextExtractor::new(&self.patterns)?;

        if !self.queries.evidence.contains("{company}") {
            return Err(RuleBookError::Invalid(
                "evidence query template must contain {company}".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RuleBookError {
    #[error("failed to read rule book {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid rule book JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid rule book: {0}")]
    Invalid(String),
    #[error(transparent)]
    Pattern(#[from] PatternError),
}
