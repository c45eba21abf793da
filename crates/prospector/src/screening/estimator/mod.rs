mod config;
mod jitter;

pub use config::{
    DsoRule, EstimatorConfig, HeuristicBase, HeuristicConfidence, HeuristicRule, JitterBounds,
};
pub use jitter::{FixedJitter, JitterSource, RngJitter};

use crate::screening::evidence::round2;
use crate::screening::identity::strip_diacritics;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// How a candidate's name was discovered. Drives the heuristic base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OriginType {
    Ranking,
    Tender,
    Contract,
    Mention,
}

impl OriginType {
    /// Lenient parse; unknown values fall back to `Mention`.
    pub fn parse(value: &str) -> Self {
        Self::from_label(value).unwrap_or(Self::Mention)
    }

    /// Strict parse of the Spanish or English label; `None` for anything else.
    pub fn from_label(value: &str) -> Option<Self> {
        match strip_diacritics(value.trim()).to_ascii_uppercase().as_str() {
            "RANKING" => Some(Self::Ranking),
            "LICITACION" | "TENDER" => Some(Self::Tender),
            "CONTRATO" | "CONTRACT" => Some(Self::Contract),
            "MENCION" | "MENTION" => Some(Self::Mention),
            _ => None,
        }
    }
}

impl fmt::Display for OriginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OriginType::Ranking => "RANKING",
            OriginType::Tender => "TENDER",
            OriginType::Contract => "CONTRACT",
            OriginType::Mention => "MENTION",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstimationMethod {
    Evidence,
    Heuristic,
}

impl fmt::Display for EstimationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimationMethod::Evidence => f.write_str("Evidence"),
            EstimationMethod::Heuristic => f.write_str("Heuristic"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Low => f.write_str("Low"),
            Confidence::Medium => f.write_str("Medium"),
            Confidence::High => f.write_str("High"),
        }
    }
}

/// Annual sales and receivables estimate, both in million USD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub sales_mm_usd: f64,
    pub receivables_mm_usd: f64,
    pub method: EstimationMethod,
    pub confidence: Confidence,
}

#[derive(Debug, thiserror::Error)]
pub enum EstimationError {
    #[error("evidence amount {0} is not a finite non-negative figure")]
    InvalidEvidence(f64),
    #[error("jitter multiplier {value} outside [{low}, {high}]")]
    JitterOutOfBounds { value: f64, low: f64, high: f64 },
}

/// Hybrid estimator: explicit evidence when present, otherwise a base value
/// keyed by origin type with bounded jitter.
#[derive(Debug, Clone)]
pub struct Estimator {
    config: EstimatorConfig,
}

impl Estimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn standard() -> Self {
        Self::new(EstimatorConfig::standard())
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Receivables share for a sector; always resolves through the default.
    pub fn dso_factor(&self, sector: &str) -> f64 {
        let sector = strip_diacritics(&sector.to_lowercase());
        self.config
            .dso_table
            .iter()
            .find(|rule| {
                let keyword = strip_diacritics(&rule.keyword.to_lowercase());
                !keyword.is_empty() && sector.contains(&keyword)
            })
            .map(|rule| rule.factor)
            .unwrap_or(self.config.default_dso)
    }

    /// A zero amount is indistinguishable from missing evidence and takes the
    /// heuristic path.
    pub fn estimate(
        &self,
        candidate: &str,
        sector: &str,
        evidence_mm_usd: Option<f64>,
        origin: OriginType,
        jitter: &mut dyn JitterSource,
    ) -> Result<EstimationResult, EstimationError> {
        let dso = self.dso_factor(sector);

        if let Some(amount) = evidence_mm_usd {
            if !amount.is_finite() || amount < 0.0 {
                return Err(EstimationError::InvalidEvidence(amount));
            }
            if amount > 0.0 {
                debug!(candidate, amount, dso, "estimating from explicit evidence");
                return Ok(EstimationResult {
                    sales_mm_usd: amount,
                    receivables_mm_usd: round2(amount * dso),
                    method: EstimationMethod::Evidence,
                    confidence: Confidence::High,
                });
            }
        }

        let base = self.config.heuristic_for(origin);
        let bounds = self.config.jitter;
        let multiplier = jitter.sample(bounds.low, bounds.high);
        if !bounds.contains(multiplier) {
            return Err(EstimationError::JitterOutOfBounds {
                value: multiplier,
                low: bounds.low,
                high: bounds.high,
            });
        }

        let sales = (base.base_sales_mm_usd * multiplier).round();
        debug!(candidate, %origin, multiplier, sales, "estimating from heuristic base");

        Ok(EstimationResult {
            sales_mm_usd: sales,
            receivables_mm_usd: round2(sales * dso),
            method: EstimationMethod::Heuristic,
            confidence: base.confidence.into(),
        })
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dso_factor_matches_first_keyword_or_default() {
        let estimator = Estimator::standard();
        assert_eq!(estimator.dso_factor("Proveedores Minería"), 0.25);
        assert_eq!(estimator.dso_factor("mining-like sector"), 0.25);
        assert_eq!(estimator.dso_factor("Empresas de Construcción"), 0.30);
        assert_eq!(estimator.dso_factor("Clínicas y Salud"), 0.28);
        assert_eq!(estimator.dso_factor("Agroindustria"), 0.20);
        assert_eq!(estimator.dso_factor("Transporte y Logística"), 0.15);
        assert_eq!(estimator.dso_factor("Software"), 0.18);
        assert_eq!(estimator.dso_factor(""), 0.18);
    }

    #[test]
    fn evidence_path_uses_amount_with_high_confidence() {
        let result = Estimator::standard()
            .estimate(
                "Empresa A",
                "Proveedores Minería",
                Some(45.0),
                OriginType::Ranking,
                &mut FixedJitter(1.0),
            )
            .expect("estimate");
        assert_eq!(result.sales_mm_usd, 45.0);
        assert_eq!(result.receivables_mm_usd, 11.25);
        assert_eq!(result.method, EstimationMethod::Evidence);
        assert_eq!(result.confidence, Confidence::High);
    }

    #[test]
    fn evidence_path_ignores_jitter() {
        let result = Estimator::standard()
            .estimate(
                "Empresa A",
                "Software",
                Some(12.34),
                OriginType::Mention,
                &mut FixedJitter(99.0),
            )
            .expect("jitter is never drawn for evidence");
        assert_eq!(result.sales_mm_usd, 12.34);
        assert_eq!(result.receivables_mm_usd, 2.22);
    }

    #[test]
    fn zero_evidence_falls_back_to_heuristic() {
        let result = Estimator::standard()
            .estimate(
                "Empresa B",
                "Software",
                Some(0.0),
                OriginType::Ranking,
                &mut FixedJitter(1.0),
            )
            .expect("estimate");
        assert_eq!(result.method, EstimationMethod::Heuristic);
        assert_eq!(result.sales_mm_usd, 45.0);
        assert_eq!(result.receivables_mm_usd, 8.1);
        assert_eq!(result.confidence, Confidence::Medium);
    }

    #[test]
    fn heuristic_table_sets_base_and_confidence() {
        let estimator = Estimator::standard();
        let cases = [
            (OriginType::Ranking, 45.0, Confidence::Medium),
            (OriginType::Tender, 50.0, Confidence::Medium),
            (OriginType::Contract, 30.0, Confidence::Low),
            (OriginType::Mention, 10.0, Confidence::Low),
        ];
        for (origin, base, confidence) in cases {
            let result = estimator
                .estimate("Empresa", "Agro", None, origin, &mut FixedJitter(1.0))
                .expect("estimate");
            assert_eq!(result.sales_mm_usd, base, "{origin}");
            assert_eq!(result.confidence, confidence, "{origin}");
            assert_ne!(result.confidence, Confidence::High);
        }
    }

    #[test]
    fn heuristic_rounds_jittered_sales_to_integer() {
        let result = Estimator::standard()
            .estimate("Empresa", "Software", None, OriginType::Ranking, &mut FixedJitter(1.2))
            .expect("estimate");
        assert_eq!(result.sales_mm_usd, 54.0);

        let result = Estimator::standard()
            .estimate("Empresa", "Software", None, OriginType::Contract, &mut FixedJitter(0.95))
            .expect("estimate");
        assert_eq!(result.sales_mm_usd, 29.0);
        assert_eq!(result.receivables_mm_usd, 5.22);
    }

    #[test]
    fn heuristic_ranking_stays_within_bounds_over_many_trials() {
        let estimator = Estimator::standard();
        let mut jitter = RngJitter::seeded(42);
        for _ in 0..5_000 {
            let result = estimator
                .estimate("Empresa B", "Minería", None, OriginType::Ranking, &mut jitter)
                .expect("estimate");
            assert!(
                (40.0..=54.0).contains(&result.sales_mm_usd),
                "sales {} out of range",
                result.sales_mm_usd
            );
            assert_eq!(result.sales_mm_usd.fract(), 0.0);
            assert_eq!(
                result.receivables_mm_usd,
                round2(result.sales_mm_usd * 0.25)
            );
        }
    }

    #[test]
    fn rejects_jitter_outside_bounds() {
        let err = Estimator::standard()
            .estimate("Empresa", "Software", None, OriginType::Ranking, &mut FixedJitter(5.0))
            .expect_err("out of bounds");
        assert!(matches!(err, EstimationError::JitterOutOfBounds { .. }));

        let err = Estimator::standard()
            .estimate("Empresa", "Software", None, OriginType::Ranking, &mut FixedJitter(f64::NAN))
            .expect_err("nan");
        assert!(matches!(err, EstimationError::JitterOutOfBounds { .. }));
    }

    #[test]
    fn rejects_negative_or_non_finite_evidence() {
        let estimator = Estimator::standard();
        for amount in [-1.0, f64::INFINITY, f64::NAN] {
            assert!(matches!(
                estimator.estimate(
                    "Empresa",
                    "Agro",
                    Some(amount),
                    OriginType::Ranking,
                    &mut FixedJitter(1.0),
                ),
                Err(EstimationError::InvalidEvidence(_))
            ));
        }
    }

    #[test]
    fn missing_origin_uses_default_heuristic() {
        let mut config = EstimatorConfig::standard();
        config.heuristics.retain(|rule| rule.origin != OriginType::Tender);
        let result = Estimator::new(config)
            .estimate("Empresa", "Agro", None, OriginType::Tender, &mut FixedJitter(1.0))
            .expect("estimate");
        assert_eq!(result.sales_mm_usd, 10.0);
        assert_eq!(result.confidence, Confidence::Low);
    }

    #[test]
    fn origin_parse_accepts_spanish_and_english_labels() {
        assert_eq!(OriginType::parse("RANKING"), OriginType::Ranking);
        assert_eq!(OriginType::parse("Licitación"), OriginType::Tender);
        assert_eq!(OriginType::parse("tender"), OriginType::Tender);
        assert_eq!(OriginType::parse("CONTRATO"), OriginType::Contract);
        assert_eq!(OriginType::parse("press"), OriginType::Mention);
    }

    #[test]
    fn strict_origin_label_rejects_unknown_values() {
        assert_eq!(OriginType::from_label(" Mención "), Some(OriginType::Mention));
        assert_eq!(OriginType::from_label("contract"), Some(OriginType::Contract));
        assert_eq!(OriginType::from_label("RANKNG"), None);
        assert_eq!(OriginType::from_label(""), None);
    }
}
