use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Ordered legal-entity suffixes, each carrying its leading space.
///
/// Only the first entry found at the end of a name is removed, so longer
/// forms must precede shorter forms they overlap with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegalSuffixes(Vec<String>);

impl LegalSuffixes {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(suffixes.into_iter().map(Into::into).collect())
    }

    pub fn standard() -> Self {
        Self::new([
            " spa", " sa", " s a", " ltda", " limitada", " gmbh", " llc", " inc", " corp",
            " holding",
        ])
    }

    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for LegalSuffixes {
    fn default() -> Self {
        Self::standard()
    }
}

/// Canonical comparison form of a company name.
///
/// Lowercases, drops diacritics, drops `.` and `,`, turns `-` into a space,
/// collapses whitespace, then strips at most one trailing legal suffix.
/// Characters without a decomposition (symbols, CJK) are kept as they are.
pub fn normalize_name(value: &str, suffixes: &LegalSuffixes) -> String {
    let folded = strip_diacritics(&value.to_lowercase());
    let cleaned = folded.replace(['.', ','], "").replace('-', " ");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    let stripped = suffixes
        .iter()
        .find(|suffix| collapsed.ends_with(suffix))
        .map(|suffix| &collapsed[..collapsed.len() - suffix.len()])
        .unwrap_or(&collapsed);

    stripped.trim().to_string()
}

/// Canonical decomposition with combining marks removed: "Ñuble" becomes
/// "Nuble", "北京" stays "北京".
pub(crate) fn strip_diacritics(value: &str) -> String {
    value.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// A discovered company name alongside its normalized identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateName {
    pub raw: String,
    pub normalized: String,
}

impl CandidateName {
    pub fn new(raw: impl Into<String>, suffixes: &LegalSuffixes) -> Self {
        let raw = raw.into();
        let normalized = normalize_name(&raw, suffixes);
        Self { raw, normalized }
    }

    /// Trimmed, lowercased raw name; substring rules run against this form.
    pub fn lowercase(&self) -> String {
        self.raw.trim().to_lowercase()
    }
}
