mod config;
mod rules;

pub use config::GatekeeperRules;

use crate::screening::identity::{normalize_name, CandidateName, LegalSuffixes};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Rule-based eligibility classifier for discovered company names.
///
/// Rules run in a fixed order: institutional, intangible, listed issuer,
/// multinational, financial holding. Swapping the token tables never
/// changes that order.
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    rules: GatekeeperRules,
    suffixes: LegalSuffixes,
    listed: HashSet<String>,
}

impl Gatekeeper {
    pub fn new(rules: GatekeeperRules, suffixes: LegalSuffixes) -> Self {
        let listed = rules
            .listed_issuers
            .iter()
            .map(|issuer| normalize_name(issuer, &suffixes))
            .filter(|issuer| !issuer.is_empty())
            .collect();

        Self {
            rules,
            suffixes,
            listed,
        }
    }

    pub fn standard() -> Self {
        Self::new(GatekeeperRules::standard(), LegalSuffixes::standard())
    }

    pub fn suffixes(&self) -> &LegalSuffixes {
        &self.suffixes
    }

    pub fn validate(&self, name: &str) -> EligibilityVerdict {
        self.validate_candidate(&CandidateName::new(name, &self.suffixes))
    }

    pub fn validate_candidate(&self, candidate: &CandidateName) -> EligibilityVerdict {
        EligibilityVerdict::from(rules::evaluate(candidate, &self.rules, &self.listed))
    }
}

/// Why a name was accepted or rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EligibilityReason {
    Ok,
    Institutional(String),
    Intangible(String),
    ListedPublic,
    Multinational,
    FinancialHoldingPassive,
}

impl fmt::Display for EligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EligibilityReason::Ok => write!(f, "OK"),
            EligibilityReason::Institutional(token) => write!(f, "Institutional({token})"),
            EligibilityReason::Intangible(token) => write!(f, "Intangible({token})"),
            EligibilityReason::ListedPublic => write!(f, "ListedPublic"),
            EligibilityReason::Multinational => write!(f, "Multinational"),
            EligibilityReason::FinancialHoldingPassive => write!(f, "FinancialHoldingPassive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub valid: bool,
    pub reason: EligibilityReason,
}

impl From<EligibilityReason> for EligibilityVerdict {
    fn from(reason: EligibilityReason) -> Self {
        Self {
            valid: reason == EligibilityReason::Ok,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_supplier() {
        let verdict = Gatekeeper::standard().validate("Empresa A");
        assert!(verdict.valid);
        assert_eq!(verdict.reason, EligibilityReason::Ok);
        assert_eq!(verdict.reason.to_string(), "OK");
    }

    #[test]
    fn rejects_each_rule_family() {
        let gate = Gatekeeper::standard();
        assert_eq!(
            gate.validate("Ministry of Mines").reason,
            EligibilityReason::Institutional("ministry".to_string())
        );
        assert_eq!(
            gate.validate("Merco Talento").reason,
            EligibilityReason::Intangible("merco".to_string())
        );
        assert_eq!(
            gate.validate("Besalco S.A.").reason,
            EligibilityReason::ListedPublic
        );
        assert_eq!(
            gate.validate("Enel Green Power Chile").reason,
            EligibilityReason::Multinational
        );
        assert_eq!(
            gate.validate("Banco XYZ").reason,
            EligibilityReason::FinancialHoldingPassive
        );
    }

    #[test]
    fn institutional_wins_over_later_rules() {
        let verdict = Gatekeeper::standard().validate("Ministerio de Obras Públicas y Google");
        assert!(!verdict.valid);
        assert_eq!(
            verdict.reason,
            EligibilityReason::Institutional("ministerio".to_string())
        );
    }

    #[test]
    fn intangible_wins_over_financial() {
        let verdict = Gatekeeper::standard().validate("Ranking Capital Partners");
        assert_eq!(
            verdict.reason,
            EligibilityReason::Intangible("ranking".to_string())
        );
    }

    #[test]
    fn listed_issuer_requires_exact_normalized_match() {
        let gate = Gatekeeper::standard();
        assert_eq!(
            gate.validate("Echeverria Izquierdo S.A.").reason,
            EligibilityReason::ListedPublic
        );
        assert!(gate.validate("Socovesa Sur Montajes").valid);
    }

    #[test]
    fn symbols_and_non_latin_names_are_not_transliterated_into_tokens() {
        let gate = Gatekeeper::standard();
        for name in ["Acme 🏦 SpA", "北京建设 SpA", "Café™ Ltda"] {
            let verdict = gate.validate(name);
            assert!(verdict.valid, "{name:?} gated as {}", verdict.reason);
        }
    }

    #[test]
    fn verdict_is_deterministic() {
        let gate = Gatekeeper::standard();
        let first = gate.validate("Seguros Andinos Ltda");
        for _ in 0..10 {
            assert_eq!(gate.validate("Seguros Andinos Ltda"), first);
        }
        assert_eq!(first.reason.to_string(), "FinancialHoldingPassive");
    }

    #[test]
    fn swapped_tables_keep_rule_order() {
        let rules = GatekeeperRules {
            institutional: vec!["cooperativa".to_string()],
            intangible: Vec::new(),
            listed_issuers: vec!["Acme".to_string()],
            multinationals: vec!["acme".to_string()],
            financial: vec!["acme".to_string()],
        };
        let gate = Gatekeeper::new(rules, LegalSuffixes::standard());

        assert_eq!(gate.validate("Acme SpA").reason, EligibilityReason::ListedPublic);
        assert_eq!(
            gate.validate("Acme Norte").reason,
            EligibilityReason::Multinational
        );
        assert_eq!(
            gate.validate("Cooperativa Acme").reason,
            EligibilityReason::Institutional("cooperativa".to_string())
        );
        assert!(gate.validate("Ministerio de Minería").valid);
    }
}
