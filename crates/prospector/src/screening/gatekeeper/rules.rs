use super::config::GatekeeperRules;
use super::EligibilityReason;
use crate::screening::identity::CandidateName;
use std::collections::HashSet;

pub(crate) struct RuleInput<'a> {
    pub lowercase: &'a str,
    pub normalized: &'a str,
    pub rules: &'a GatekeeperRules,
    pub listed: &'a HashSet<String>,
}

type Rule = fn(&RuleInput<'_>) -> Option<EligibilityReason>;

/// Evaluation order; the first rule that fires decides the verdict.
const RULES: [Rule; 5] = [
    institutional,
    intangible,
    listed_public,
    multinational,
    financial_holding,
];

pub(crate) fn evaluate(
    candidate: &CandidateName,
    rules: &GatekeeperRules,
    listed: &HashSet<String>,
) -> EligibilityReason {
    let lowercase = candidate.lowercase();
    let input = RuleInput {
        lowercase: &lowercase,
        normalized: &candidate.normalized,
        rules,
        listed,
    };

    RULES
        .iter()
        .find_map(|rule| rule(&input))
        .unwrap_or(EligibilityReason::Ok)
}

fn first_contained<'t>(haystack: &str, tokens: &'t [String]) -> Option<&'t str> {
    tokens
        .iter()
        .map(String::as_str)
        .filter(|token| !token.is_empty())
        .find(|token| haystack.contains(token))
}

fn institutional(input: &RuleInput<'_>) -> Option<EligibilityReason> {
    first_contained(input.lowercase, &input.rules.institutional)
        .map(|token| EligibilityReason::Institutional(token.to_string()))
}

fn intangible(input: &RuleInput<'_>) -> Option<EligibilityReason> {
    first_contained(input.lowercase, &input.rules.intangible)
        .map(|token| EligibilityReason::Intangible(token.to_string()))
}

fn listed_public(input: &RuleInput<'_>) -> Option<EligibilityReason> {
    input
        .listed
        .contains(input.normalized)
        .then_some(EligibilityReason::ListedPublic)
}

fn multinational(input: &RuleInput<'_>) -> Option<EligibilityReason> {
    first_contained(input.normalized, &input.rules.multinationals)
        .map(|_| EligibilityReason::Multinational)
}

fn financial_holding(input: &RuleInput<'_>) -> Option<EligibilityReason> {
    first_contained(input.normalized, &input.rules.financial)
        .map(|_| EligibilityReason::FinancialHoldingPassive)
}
