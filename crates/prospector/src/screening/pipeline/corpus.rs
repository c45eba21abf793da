use super::collaborators::{SearchError, SearchProvider};
use crate::screening::identity::{normalize_name, LegalSuffixes};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum CorpusError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for CorpusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorpusError::Io(err) => write!(f, "failed to read search corpus: {}", err),
            CorpusError::Csv(err) => write!(f, "invalid search corpus CSV data: {}", err),
        }
    }
}

impl std::error::Error for CorpusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CorpusError::Io(err) => Some(err),
            CorpusError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CorpusError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CorpusError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Clone)]
struct CorpusEntry {
    key: String,
    text: String,
}

/// Offline search backend over pre-collected snippets.
///
/// A query returns every snippet whose topic appears in it as a whole-word
/// phrase, joined by newlines, in corpus order.
#[derive(Debug, Clone, Default)]
pub struct CorpusSearchProvider {
    entries: Vec<CorpusEntry>,
}

impl CorpusSearchProvider {
    pub fn from_entries<I, T, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (T, S)>,
        T: AsRef<str>,
        S: Into<String>,
    {
        let entries = entries
            .into_iter()
            .filter_map(|(topic, text)| {
                let key = match_key(topic.as_ref());
                (!key.is_empty()).then(|| CorpusEntry {
                    key,
                    text: text.into(),
                })
            })
            .collect();
        Self { entries }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CorpusError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads `Topic,Text` rows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CorpusError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut rows = Vec::new();

        for record in csv_reader.deserialize::<CorpusRow>() {
            let row = record?;
            rows.push((row.topic, row.text));
        }

        Ok(Self::from_entries(rows))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SearchProvider for CorpusSearchProvider {
    fn search(&self, query: &str) -> Result<String, SearchError> {
        let query = format!(" {} ", match_key(query));
        let hits: Vec<&str> = self
            .entries
            .iter()
            .filter(|entry| query.contains(&format!(" {} ", entry.key)))
            .map(|entry| entry.text.as_str())
            .collect();
        Ok(hits.join("\n"))
    }
}

#[derive(Debug, Deserialize)]
struct CorpusRow {
    #[serde(rename = "Topic")]
    topic: String,
    #[serde(rename = "Text")]
    text: String,
}

fn match_key(value: &str) -> String {
    normalize_name(&value.replace(['"', '\''], " "), &LegalSuffixes::none())
}
