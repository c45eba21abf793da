//! Monetary evidence: locating an explicit figure in free text and
//! converting it into million-USD.

mod currency;
mod extractor;

pub use currency::{CurrencyNormalizer, ExchangeRates};
pub(crate) use currency::round2;
pub use extractor::{
    EvidenceLabel, ExtractionPatterns, FinancialTextExtractor, PatternError, PatternFamily,
    PatternSpec, TextEvidence,
};
