use crate::screening::estimator::{Confidence, EstimationMethod};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate that passed the gate and cleared the sales threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProspectRecord {
    pub name: String,
    pub normalized_name: String,
    pub sales_mm_usd: f64,
    pub receivables_mm_usd: f64,
    pub method: EstimationMethod,
    pub confidence: Confidence,
    /// Raw money excerpt behind an evidence-based figure.
    pub evidence_excerpt: Option<String>,
}

/// Where in the pipeline a candidate was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionStage {
    Gatekeeper,
    Threshold,
    Processing,
}

impl fmt::Display for RejectionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionStage::Gatekeeper => f.write_str("gatekeeper"),
            RejectionStage::Threshold => f.write_str("threshold"),
            RejectionStage::Processing => f.write_str("processing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionRecord {
    pub name: String,
    pub stage: RejectionStage,
    pub reason: String,
}

/// Accepted and rejected candidates, each in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningOutcome {
    pub accepted: Vec<ProspectRecord>,
    pub rejected: Vec<RejectionRecord>,
}

impl ScreeningOutcome {
    pub fn summary(&self) -> OutcomeSummary {
        let rejected_at =
            |stage| self.rejected.iter().filter(|record| record.stage == stage).count();
        let accepted_by =
            |method| self.accepted.iter().filter(|record| record.method == method).count();

        OutcomeSummary {
            accepted: self.accepted.len(),
            rejected: self.rejected.len(),
            gated: rejected_at(RejectionStage::Gatekeeper),
            below_threshold: rejected_at(RejectionStage::Threshold),
            failed: rejected_at(RejectionStage::Processing),
            evidence_backed: accepted_by(EstimationMethod::Evidence),
            heuristic: accepted_by(EstimationMethod::Heuristic),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub gated: usize,
    pub below_threshold: usize,
    pub failed: usize,
    pub evidence_backed: usize,
    pub heuristic: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Completed,
    /// Discovery produced no names; nothing was screened.
    NoCandidatesFound,
}

/// Full record of one sector run, discovery included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub sector: String,
    pub status: RunStatus,
    pub discovery_query: String,
    pub min_sales_mm_usd: f64,
    pub candidates: Vec<String>,
    pub outcome: ScreeningOutcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
