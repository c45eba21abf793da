use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::ScreeningConfig;
use crate::screening::pipeline::{
    CorpusSearchProvider, DelimitedNameExtractor, NameExtractor, ProspectPipeline, SearchError,
    SearchProvider,
};
use crate::screening::{FixedJitter, JitterSource, OriginType, RuleBook};

/// Returns canned text per query and remembers every query it saw.
#[derive(Default)]
pub(super) struct RecordingSearch {
    responses: HashMap<String, String>,
    failing: Vec<String>,
    pub(super) queries: RefCell<Vec<String>>,
}

impl RecordingSearch {
    pub(super) fn respond(mut self, query: impl Into<String>, text: impl Into<String>) -> Self {
        self.responses.insert(query.into(), text.into());
        self
    }

    pub(super) fn fail_on(mut self, query: impl Into<String>) -> Self {
        self.failing.push(query.into());
        self
    }
}

impl SearchProvider for RecordingSearch {
    fn search(&self, query: &str) -> Result<String, SearchError> {
        self.queries.borrow_mut().push(query.to_string());
        if self.failing.iter().any(|failing| failing == query) {
            return Err(SearchError::Unavailable("connection reset".to_string()));
        }
        Ok(self.responses.get(query).cloned().unwrap_or_default())
    }
}

/// Ignores the text and returns a fixed candidate list.
pub(super) struct StaticNames(pub(super) Vec<String>);

impl NameExtractor for StaticNames {
    fn extract_names(&self, _text: &str) -> Vec<String> {
        self.0.clone()
    }
}

pub(super) const MINING: &str = "mining-like sector";

pub(super) fn screening_config(threshold: f64) -> ScreeningConfig {
    ScreeningConfig {
        min_sales_mm_usd: threshold,
        origin: OriginType::Ranking,
        search_delay: Duration::ZERO,
        ..ScreeningConfig::default()
    }
}

pub(super) fn evidence_query(company: &str) -> String {
    RuleBook::standard().queries.evidence_query(company)
}

pub(super) fn discovery_query(sector: &str) -> String {
    RuleBook::standard().queries.discovery_query(sector)
}

pub(super) fn pipeline_with<S, N>(
    search: S,
    names: N,
    threshold: f64,
    jitter: impl JitterSource + 'static,
) -> ProspectPipeline<S, N>
where
    S: SearchProvider,
    N: NameExtractor,
{
    ProspectPipeline::with_jitter(
        search,
        names,
        RuleBook::standard(),
        screening_config(threshold),
        Box::new(jitter),
    )
    .expect("standard rule book builds")
}

pub(super) fn pipeline(search: RecordingSearch) -> ProspectPipeline<RecordingSearch, StaticNames> {
    pipeline_with(search, StaticNames(Vec::new()), 30.0, FixedJitter(1.0))
}

/// Recording search feeding the delimited name extractor, for discovery runs.
pub(super) fn recording_delimited_pipeline(
    search: RecordingSearch,
) -> ProspectPipeline<RecordingSearch, DelimitedNameExtractor> {
    pipeline_with(search, DelimitedNameExtractor::default(), 30.0, FixedJitter(1.0))
}

pub(super) fn corpus_pipeline(
    entries: Vec<(&str, &str)>,
) -> ProspectPipeline<CorpusSearchProvider, DelimitedNameExtractor> {
    pipeline_with(
        CorpusSearchProvider::from_entries(entries),
        DelimitedNameExtractor::default(),
        30.0,
        FixedJitter(1.0),
    )
}

pub(super) fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
