use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which phrasing a pattern family recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternFamily {
    /// Sales keyword, then a money token.
    SalesThenAmount,
    /// Money token, then a sales keyword.
    AmountThenSales,
    /// Contract or award keyword, then a money token.
    ContractAward,
}

impl fmt::Display for PatternFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PatternFamily::SalesThenAmount => "sales-then-amount",
            PatternFamily::AmountThenSales => "amount-then-sales",
            PatternFamily::ContractAward => "contract-award",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSpec {
    pub family: PatternFamily,
    /// Matched case-insensitively; capture group 1 is the money excerpt.
    pub pattern: String,
}

/// Ordered pattern families; earlier families take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionPatterns(pub Vec<PatternSpec>);

const MONEY_WITH_UF: &str = r"(?:US\$|USD|\$|CLP|UF)\s?[0-9.,]+(?:\s?(?:millones|MM|M))?";
const MONEY: &str = r"(?:US\$|USD|\$|CLP)\s?[0-9.,]+(?:\s?(?:millones|MM|M))?";

impl ExtractionPatterns {
    pub fn standard() -> Self {
        Self(vec![
            PatternSpec {
                family: PatternFamily::SalesThenAmount,
                pattern: format!(
                    r"(?:ventas|ingresos|facturaci[oó]n|sales|revenues?).{{0,40}}?({MONEY_WITH_UF})"
                ),
            },
            PatternSpec {
                family: PatternFamily::AmountThenSales,
                pattern: format!(r"({MONEY}).{{0,20}}?(?:ventas|ingresos|sales|revenues?)"),
            },
            PatternSpec {
                family: PatternFamily::ContractAward,
                pattern: format!(
                    r"(?:adjudic[oó]|contrato|contract|awarded).{{0,30}}?({MONEY})"
                ),
            },
        ])
    }
}

impl Default for ExtractionPatterns {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("{family} pattern does not compile: {source}")]
    Invalid {
        family: PatternFamily,
        #[source]
        source: regex::Error,
    },
    #[error("{family} pattern has no capture group for the amount")]
    MissingCapture { family: PatternFamily },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvidenceLabel {
    Explicit,
    NotAvailable,
}

impl fmt::Display for EvidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvidenceLabel::Explicit => f.write_str("Explicit"),
            EvidenceLabel::NotAvailable => f.write_str("N/A"),
        }
    }
}

/// Result of scanning a text for an explicit monetary mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEvidence {
    pub excerpt: Option<String>,
    pub label: EvidenceLabel,
    pub family: Option<PatternFamily>,
}

impl TextEvidence {
    fn none() -> Self {
        Self {
            excerpt: None,
            label: EvidenceLabel::NotAvailable,
            family: None,
        }
    }
}

/// Finds the first explicit sales, revenue, or contract amount in a text.
#[derive(Debug, Clone)]
pub struct FinancialTextExtractor {
    patterns: Vec<(PatternFamily, Regex)>,
}

impl FinancialTextExtractor {
    pub fn new(patterns: &ExtractionPatterns) -> Result<Self, PatternError> {
        let patterns = patterns
            .0
            .iter()
            .map(|spec| {
                let regex = RegexBuilder::new(&spec.pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| PatternError::Invalid {
                        family: spec.family,
                        source,
                    })?;
                if regex.captures_len() < 2 {
                    return Err(PatternError::MissingCapture {
                        family: spec.family,
                    });
                }
                Ok((spec.family, regex))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    pub fn standard() -> Result<Self, PatternError> {
        Self::new(&ExtractionPatterns::standard())
    }

    /// Returns capture group 1 of the first family that matches anywhere in
    /// `text`. Later families are not consulted once one matches.
    pub fn extract(&self, text: &str) -> TextEvidence {
        for (family, regex) in &self.patterns {
            if let Some(excerpt) = regex
                .captures(text)
                .and_then(|captures| captures.get(1))
                .map(|found| found.as_str().trim().to_string())
            {
                return TextEvidence {
                    excerpt: Some(excerpt),
                    label: EvidenceLabel::Explicit,
                    family: Some(*family),
                };
            }
        }

        TextEvidence::none()
    }
}
