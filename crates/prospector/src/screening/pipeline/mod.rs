//! Per-sector orchestration: discovery, gating, evidence hunt, estimation,
//! and the sales threshold.
//!
//! Candidates are processed strictly one after another; a failure while
//! processing one candidate becomes a rejection and never aborts the batch.

mod collaborators;
mod corpus;
mod records;
mod throttle;

#[cfg(test)]
mod tests;

pub use collaborators::{
    DelimitedNameExtractor, NameExtractor, QueryTemplates, SearchError, SearchProvider,
};
pub use corpus::{CorpusError, CorpusSearchProvider};
pub use records::{
    OutcomeSummary, ProspectRecord, RejectionRecord, RejectionStage, RunReport, RunStatus,
    ScreeningOutcome,
};
pub use throttle::SearchThrottle;

use crate::config::ScreeningConfig;
use crate::screening::estimator::{
    EstimationError, EstimationMethod, EstimationResult, Estimator, JitterSource, RngJitter,
};
use crate::screening::evidence::{CurrencyNormalizer, FinancialTextExtractor};
use crate::screening::gatekeeper::{EligibilityVerdict, Gatekeeper};
use crate::screening::identity::CandidateName;
use crate::screening::{RuleBook, RuleBookError};
use chrono::Utc;
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
enum CandidateError {
    #[error("blank candidate name")]
    BlankName,
    #[error(transparent)]
    Estimation(#[from] EstimationError),
}

enum Assessment {
    Gated(EligibilityVerdict),
    Estimated {
        candidate: CandidateName,
        estimate: EstimationResult,
        excerpt: Option<String>,
    },
}

/// Sequences the screening components over a list of candidate names.
pub struct ProspectPipeline<S, N> {
    search: S,
    names: N,
    queries: QueryTemplates,
    gatekeeper: Gatekeeper,
    extractor: FinancialTextExtractor,
    currency: CurrencyNormalizer,
    estimator: Estimator,
    jitter: Box<dyn JitterSource>,
    throttle: SearchThrottle,
    config: ScreeningConfig,
}

impl<S, N> ProspectPipeline<S, N>
where
    S: SearchProvider,
    N: NameExtractor,
{
    /// Builds a pipeline drawing heuristic jitter from OS entropy.
    pub fn new(
        search: S,
        names: N,
        rules: RuleBook,
        config: ScreeningConfig,
    ) -> Result<Self, RuleBookError> {
        Self::with_jitter(search, names, rules, config, Box::new(RngJitter::from_entropy()))
    }

    pub fn with_jitter(
        search: S,
        names: N,
        rules: RuleBook,
        config: ScreeningConfig,
        jitter: Box<dyn JitterSource>,
    ) -> Result<Self, RuleBookError> {
        rules.validate()?;
        let RuleBook {
            suffixes,
            gatekeeper,
            patterns,
            estimator,
            queries,
        } = rules;

        Ok(Self {
            search,
            names,
            queries,
            gatekeeper: Gatekeeper::new(gatekeeper, suffixes),
            extractor: FinancialTextExtractor::new(&patterns)?,
            currency: CurrencyNormalizer::new(config.rates),
            estimator: Estimator::new(estimator),
            jitter,
            throttle: SearchThrottle::new(config.search_delay),
            config,
        })
    }

    pub fn config(&self) -> &ScreeningConfig {
        &self.config
    }

    /// Discovers candidates for `sector` and screens them.
    ///
    /// An empty discovery result is reported as `NoCandidatesFound` rather
    /// than an error.
    pub fn run(&mut self, sector: &str) -> RunReport {
        let started_at = Utc::now();
        let discovery_query = self.queries.discovery_query(sector);
        info!(sector, query = %discovery_query, "starting candidate discovery");

        let text = self.fetch(&discovery_query);
        let candidates = self.names.extract_names(&text);

        let (status, outcome) = if candidates.is_empty() {
            warn!(sector, "discovery found no candidate names");
            (RunStatus::NoCandidatesFound, ScreeningOutcome::default())
        } else {
            info!(sector, count = candidates.len(), "discovered candidates");
            (RunStatus::Completed, self.screen(sector, &candidates))
        };

        RunReport {
            sector: sector.to_string(),
            status,
            discovery_query,
            min_sales_mm_usd: self.config.min_sales_mm_usd,
            candidates,
            outcome,
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Screens candidates in input order.
    pub fn screen<T: AsRef<str>>(&mut self, sector: &str, candidates: &[T]) -> ScreeningOutcome {
        let mut outcome = ScreeningOutcome::default();
        let threshold = self.config.min_sales_mm_usd;

        for name in candidates.iter().map(AsRef::as_ref) {
            match self.assess(sector, name) {
                Ok(Assessment::Gated(verdict)) => {
                    debug!(candidate = name, reason = %verdict.reason, "rejected by gatekeeper");
                    outcome.rejected.push(RejectionRecord {
                        name: name.to_string(),
                        stage: RejectionStage::Gatekeeper,
                        reason: verdict.reason.to_string(),
                    });
                }
                Ok(Assessment::Estimated {
                    candidate,
                    estimate,
                    excerpt,
                }) if estimate.sales_mm_usd >= threshold => {
                    info!(
                        candidate = name,
                        sales = estimate.sales_mm_usd,
                        method = %estimate.method,
                        "prospect accepted"
                    );
                    outcome.accepted.push(ProspectRecord {
                        name: candidate.raw,
                        normalized_name: candidate.normalized,
                        sales_mm_usd: estimate.sales_mm_usd,
                        receivables_mm_usd: estimate.receivables_mm_usd,
                        method: estimate.method,
                        confidence: estimate.confidence,
                        evidence_excerpt: excerpt,
                    });
                }
                Ok(Assessment::Estimated { estimate, .. }) => {
                    debug!(candidate = name, sales = estimate.sales_mm_usd, "below threshold");
                    outcome.rejected.push(RejectionRecord {
                        name: name.to_string(),
                        stage: RejectionStage::Threshold,
                        reason: format!(
                            "sales < threshold ({} < {})",
                            estimate.sales_mm_usd, threshold
                        ),
                    });
                }
                Err(err) => {
                    warn!(candidate = name, error = %err, "candidate processing failed");
                    outcome.rejected.push(RejectionRecord {
                        name: name.to_string(),
                        stage: RejectionStage::Processing,
                        reason: format!("processing failed: {err}"),
                    });
                }
            }
        }

        let summary = outcome.summary();
        info!(
            sector,
            accepted = summary.accepted,
            rejected = summary.rejected,
            evidence_backed = summary.evidence_backed,
            "screening finished"
        );
        outcome
    }

    fn assess(&mut self, sector: &str, name: &str) -> Result<Assessment, CandidateError> {
        if name.trim().is_empty() {
            return Err(CandidateError::BlankName);
        }

        let candidate = CandidateName::new(name, self.gatekeeper.suffixes());
        let verdict = self.gatekeeper.validate_candidate(&candidate);
        if !verdict.valid {
            return Ok(Assessment::Gated(verdict));
        }

        let query = self.queries.evidence_query(name);
        let text = self.fetch(&query);
        let evidence = self.extractor.extract(&text);
        let amount = evidence
            .excerpt
            .as_deref()
            .map(|excerpt| self.currency.to_usd_millions(Some(excerpt)));
        debug!(
            candidate = name,
            excerpt = evidence.excerpt.as_deref().unwrap_or("-"),
            family = ?evidence.family,
            "evidence scan complete"
        );

        let estimate = self.estimator.estimate(
            name,
            sector,
            amount,
            self.config.origin,
            self.jitter.as_mut(),
        )?;

        let excerpt = match estimate.method {
            EstimationMethod::Evidence => evidence.excerpt,
            EstimationMethod::Heuristic => None,
        };

        Ok(Assessment::Estimated {
            candidate,
            estimate,
            excerpt,
        })
    }

    fn fetch(&mut self, query: &str) -> String {
        self.throttle.wait();
        match self.search.search(query) {
            Ok(text) => text,
            Err(err) => {
                warn!(query, error = %err, "search failed; continuing without results");
                String::new()
            }
        }
    }
}
