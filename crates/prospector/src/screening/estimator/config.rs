use super::{Confidence, OriginType};
use serde::{Deserialize, Serialize};

/// Sector keyword mapped to the share of annual sales held as receivables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DsoRule {
    pub keyword: String,
    pub factor: f64,
}

/// Confidence tiers a heuristic estimate may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeuristicConfidence {
    Medium,
    Low,
}

impl From<HeuristicConfidence> for Confidence {
    fn from(value: HeuristicConfidence) -> Self {
        match value {
            HeuristicConfidence::Medium => Confidence::Medium,
            HeuristicConfidence::Low => Confidence::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeuristicBase {
    pub base_sales_mm_usd: f64,
    pub confidence: HeuristicConfidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeuristicRule {
    pub origin: OriginType,
    #[serde(flatten)]
    pub base: HeuristicBase,
}

/// Inclusive range the heuristic multiplier is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JitterBounds {
    pub low: f64,
    pub high: f64,
}

impl JitterBounds {
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.low && value <= self.high
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Checked in order against the sector; first keyword found wins.
    pub dso_table: Vec<DsoRule>,
    pub default_dso: f64,
    pub heuristics: Vec<HeuristicRule>,
    /// Used for origins missing from `heuristics`.
    pub default_heuristic: HeuristicBase,
    pub jitter: JitterBounds,
}

impl EstimatorConfig {
    pub fn standard() -> Self {
        let dso = |keyword: &str, factor: f64| DsoRule {
            keyword: keyword.to_string(),
            factor,
        };
        let heuristic = |origin, base_sales_mm_usd, confidence| HeuristicRule {
            origin,
            base: HeuristicBase {
                base_sales_mm_usd,
                confidence,
            },
        };

        Self {
            dso_table: vec![
                dso("mineria", 0.25),
                dso("mining", 0.25),
                dso("construccion", 0.30),
                dso("construction", 0.30),
                dso("salud", 0.28),
                dso("health", 0.28),
                dso("agro", 0.20),
                dso("logistica", 0.15),
                dso("logistics", 0.15),
            ],
            default_dso: 0.18,
            heuristics: vec![
                heuristic(OriginType::Ranking, 45.0, HeuristicConfidence::Medium),
                heuristic(OriginType::Tender, 50.0, HeuristicConfidence::Medium),
                heuristic(OriginType::Contract, 30.0, HeuristicConfidence::Low),
                heuristic(OriginType::Mention, 10.0, HeuristicConfidence::Low),
            ],
            default_heuristic: HeuristicBase {
                base_sales_mm_usd: 10.0,
                confidence: HeuristicConfidence::Low,
            },
            jitter: JitterBounds {
                low: 0.9,
                high: 1.2,
            },
        }
    }

    pub(crate) fn heuristic_for(&self, origin: OriginType) -> HeuristicBase {
        self.heuristics
            .iter()
            .find(|rule| rule.origin == origin)
            .map(|rule| rule.base)
            .unwrap_or(self.default_heuristic)
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self::standard()
    }
}
