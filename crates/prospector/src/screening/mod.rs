//! Prospect screening: identity normalization, eligibility gating, evidence
//! extraction, sales/receivables estimation, and the per-sector pipeline
//! that sequences them.

pub mod estimator;
pub mod evidence;
pub mod gatekeeper;
pub mod identity;
pub mod pipeline;
mod rulebook;

pub use estimator::{
    Confidence, DsoRule, EstimationError, EstimationMethod, EstimationResult, Estimator,
    EstimatorConfig, FixedJitter, HeuristicBase, HeuristicConfidence, HeuristicRule,
    JitterBounds, JitterSource, OriginType, RngJitter,
};
pub use evidence::{
    CurrencyNormalizer, EvidenceLabel, ExchangeRates, ExtractionPatterns,
    FinancialTextExtractor, PatternError, PatternFamily, PatternSpec, TextEvidence,
};
pub use gatekeeper::{EligibilityReason, EligibilityVerdict, Gatekeeper, GatekeeperRules};
pub use identity::{normalize_name, CandidateName, LegalSuffixes};
pub use pipeline::{
    CorpusError, CorpusSearchProvider, DelimitedNameExtractor, NameExtractor, OutcomeSummary,
    ProspectPipeline, ProspectRecord, QueryTemplates, RejectionRecord, RejectionStage,
    RunReport, RunStatus, ScreeningOutcome, SearchError, SearchProvider, SearchThrottle,
};
pub use rulebook::{RuleBook, RuleBookError};
