use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search backend unavailable: {0}")]
    Unavailable(String),
}

/// Web-search backend. Failures are degraded to empty text by the pipeline.
pub trait SearchProvider {
    fn search(&self, query: &str) -> Result<String, SearchError>;
}

/// Turns free text into an ordered list of distinct company names.
pub trait NameExtractor {
    fn extract_names(&self, text: &str) -> Vec<String>;
}

/// Reads comma- or newline-separated names, as produced by a list-style
/// summarizer, dropping code fences, short fragments, and repeats.
#[derive(Debug, Clone, Copy)]
pub struct DelimitedNameExtractor {
    min_chars: usize,
}

impl DelimitedNameExtractor {
    pub fn new(min_chars: usize) -> Self {
        Self { min_chars }
    }
}

impl Default for DelimitedNameExtractor {
    fn default() -> Self {
        Self::new(4)
    }
}

impl NameExtractor for DelimitedNameExtractor {
    fn extract_names(&self, text: &str) -> Vec<String> {
        let cleaned = text
            .replace("```json", "")
            .replace("```", "")
            .replace('\n', ",");

        let mut seen = HashSet::new();
        cleaned
            .split(',')
            .map(str::trim)
            .filter(|name| name.chars().count() >= self.min_chars)
            .filter(|name| seen.insert(name.to_string()))
            .map(str::to_string)
            .collect()
    }
}

/// Search query templates; `{sector}` and `{company}` are substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryTemplates {
    pub discovery: String,
    pub evidence: String,
}

impl QueryTemplates {
    pub fn standard() -> Self {
        Self {
            discovery: "Ranking principales empresas {sector} Chile ventas facturación".to_string(),
            evidence: "\"{company}\" estados financieros memoria anual ventas facturación Chile"
                .to_string(),
        }
    }

    pub fn discovery_query(&self, sector: &str) -> String {
        self.discovery.replace("{sector}", sector.trim())
    }

    pub fn evidence_query(&self, company: &str) -> String {
        self.evidence.replace("{company}", company.trim())
    }
}

impl Default for QueryTemplates {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimited_extractor_cleans_list_output() {
        let text = concat!(
            "```json\n",
            "Constructora Andes, Grúas Sur\n",
            "SMU, Constructora Andes,  Minera Puerto Norte  \n",
            "```"
        );
        let names = DelimitedNameExtractor::default().extract_names(text);
        assert_eq!(
            names,
            vec![
                "Constructora Andes".to_string(),
                "Grúas Sur".to_string(),
                "Minera Puerto Norte".to_string(),
            ]
        );
    }

    #[test]
    fn delimited_extractor_handles_empty_text() {
        assert!(DelimitedNameExtractor::default()
            .extract_names("")
            .is_empty());
    }

    #[test]
    fn templates_substitute_placeholders() {
        let templates = QueryTemplates::standard();
        assert_eq!(
            templates.discovery_query(" Proveedores Minería "),
            "Ranking principales empresas Proveedores Minería Chile ventas facturación"
        );
        assert_eq!(
            templates.evidence_query("Empresa A"),
            "\"Empresa A\" estados financieros memoria anual ventas facturación Chile"
        );
    }
}
