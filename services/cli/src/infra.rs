use prospector::error::AppError;
use prospector::screening::{
    CorpusSearchProvider, FixedJitter, JitterSource, OriginType, RngJitter, RuleBook,
};
use std::path::Path;

/// Standard tables, or the override file when one is given.
pub(crate) fn load_rules(path: Option<&Path>) -> Result<RuleBook, AppError> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading rule book override");
            Ok(RuleBook::from_path(path)?)
        }
        None => Ok(RuleBook::standard()),
    }
}

/// Without a corpus every search comes back empty, so only heuristic
/// estimates are possible.
pub(crate) fn load_corpus(path: Option<&Path>) -> Result<CorpusSearchProvider, AppError> {
    match path {
        Some(path) => {
            let corpus = CorpusSearchProvider::from_path(path)?;
            tracing::info!(path = %path.display(), entries = corpus.len(), "search corpus loaded");
            Ok(corpus)
        }
        None => {
            tracing::warn!("no search corpus given; evidence lookups will find nothing");
            Ok(CorpusSearchProvider::default())
        }
    }
}

pub(crate) fn load_candidates(path: &Path) -> Result<Vec<String>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(parse_candidates(&raw))
}

/// One name per line; blank lines and `#` comments are skipped.
pub(crate) fn parse_candidates(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub(crate) fn jitter_source(seed: Option<u64>, fixed: Option<f64>) -> Box<dyn JitterSource> {
    match (fixed, seed) {
        (Some(value), _) => Box::new(FixedJitter(value)),
        (None, Some(seed)) => Box::new(RngJitter::seeded(seed)),
        (None, None) => Box::new(RngJitter::from_entropy()),
    }
}

pub(crate) fn parse_origin(raw: &str) -> Result<OriginType, String> {
    OriginType::from_label(raw)
        .ok_or_else(|| format!("'{raw}' is not one of RANKING, TENDER, CONTRACT, MENTION"))
}

pub(crate) fn parse_threshold(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .ok_or_else(|| format!("'{raw}' is not a non-negative number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_lists_skip_blanks_and_comments() {
        let raw = "# mining suppliers\nEmpresa A\n\n  Constructora Andes  \n#Banco XYZ\n";
        assert_eq!(
            parse_candidates(raw),
            vec!["Empresa A".to_string(), "Constructora Andes".to_string()]
        );
    }

    #[test]
    fn origin_flag_rejects_unknown_labels() {
        assert_eq!(parse_origin("TENDER"), Ok(OriginType::Tender));
        assert_eq!(parse_origin("licitación"), Ok(OriginType::Tender));
        assert!(parse_origin("newsletter").is_err());
    }

    #[test]
    fn threshold_must_be_non_negative() {
        assert_eq!(parse_threshold(" 12.5 "), Ok(12.5));
        assert!(parse_threshold("-1").is_err());
        assert!(parse_threshold("NaN").is_err());
        assert!(parse_threshold("ten").is_err());
    }

    #[test]
    fn missing_rule_file_surfaces_as_rule_book_error() {
        let error = load_rules(Some(Path::new("./no-such-rules.json")))
            .expect_err("expected rule book error");
        assert!(matches!(error, AppError::RuleBook(_)));
    }

    #[test]
    fn fixed_jitter_wins_over_seed() {
        let mut jitter = jitter_source(Some(7), Some(1.1));
        assert_eq!(jitter.sample(0.9, 1.2), 1.1);
    }
}
