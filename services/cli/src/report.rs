use crate::infra::{
    jitter_source, load_candidates, load_corpus, load_rules, parse_origin, parse_threshold,
};
use chrono::SecondsFormat;
use clap::Args;
use prospector::config::AppConfig;
use prospector::error::AppError;
use prospector::screening::{
    CurrencyNormalizer, DelimitedNameExtractor, FinancialTextExtractor, Gatekeeper, OriginType,
    ProspectPipeline, RuleBookError, RunReport, RunStatus, ScreeningOutcome,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args, Debug)]
pub(crate) struct ScreenArgs {
    /// Sector to prospect, e.g. "proveedores mineria"
    #[arg(long)]
    pub(crate) sector: String,
    /// Minimum estimated sales in million USD (overrides PROSPECT_MIN_SALES_MM_USD)
    #[arg(long, value_parser = parse_threshold)]
    pub(crate) threshold: Option<f64>,
    /// How the candidates were found: RANKING, TENDER, CONTRACT or MENTION
    #[arg(long, value_parser = parse_origin)]
    pub(crate) origin: Option<OriginType>,
    /// Pause between searches in milliseconds (overrides PROSPECT_SEARCH_DELAY_MS)
    #[arg(long)]
    pub(crate) delay_ms: Option<u64>,
    /// CSV of Topic,Text snippets used as the search backend
    #[arg(long)]
    pub(crate) corpus: Option<PathBuf>,
    /// File with one candidate per line; skips discovery
    #[arg(long)]
    pub(crate) candidates: Option<PathBuf>,
    /// JSON rule book overriding the standard tables
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Seed for the heuristic jitter, for reproducible runs
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Fixed heuristic multiplier instead of a random draw
    #[arg(long)]
    pub(crate) jitter: Option<f64>,
    /// Emit the result as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct GateArgs {
    /// Company names to check
    #[arg(required = true)]
    pub(crate) names: Vec<String>,
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct AmountArgs {
    /// Money excerpts such as "US$ 50 millones" or "UF 300.000"
    #[arg(required = true)]
    pub(crate) excerpts: Vec<String>,
    /// Treat each argument as free text and extract the money excerpt first
    #[arg(long)]
    pub(crate) from_text: bool,
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct RulesArgs {
    /// Validate and print this override instead of the standard tables
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
}

pub(crate) fn run_screening(args: ScreenArgs, config: AppConfig) -> Result<(), AppError> {
    let ScreenArgs {
        sector,
        threshold,
        origin,
        delay_ms,
        corpus,
        candidates,
        rules,
        seed,
        jitter,
        json,
    } = args;

    let mut screening = config.screening;
    if let Some(threshold) = threshold {
        screening.min_sales_mm_usd = threshold;
    }
    if let Some(origin) = origin {
        screening.origin = origin;
    }
    if let Some(delay_ms) = delay_ms {
        screening.search_delay = Duration::from_millis(delay_ms);
    }

    let rules = load_rules(rules.as_deref())?;
    let search = load_corpus(corpus.as_deref())?;
    let mut pipeline = ProspectPipeline::with_jitter(
        search,
        DelimitedNameExtractor::default(),
        rules,
        screening,
        jitter_source(seed, jitter),
    )?;

    match candidates {
        Some(path) => {
            let names = load_candidates(&path)?;
            tracing::info!(sector = %sector, count = names.len(), "screening supplied candidates");
            let outcome = pipeline.screen(&sector, &names);
            if json {
                print_json(&outcome);
            } else {
                let threshold = pipeline.config().min_sales_mm_usd;
                println!("Prospect screening: {} (supplied list)", sector);
                println!("Threshold: US$ {:.2} MM", threshold);
                render_outcome(&outcome);
            }
        }
        None => {
            let report = pipeline.run(&sector);
            if json {
                print_json(&report);
            } else {
                render_report(&report);
            }
        }
    }

    Ok(())
}

pub(crate) fn run_gate(args: GateArgs) -> Result<(), AppError> {
    let rules = load_rules(args.rules.as_deref())?;
    let gatekeeper = Gatekeeper::new(rules.gatekeeper, rules.suffixes);

    for name in &args.names {
        let verdict = gatekeeper.validate(name);
        let status = if verdict.valid { "eligible" } else { "rejected" };
        println!("{:<40} {:<9} {}", name, status, verdict.reason);
    }
    Ok(())
}

pub(crate) fn run_normalize_amount(args: AmountArgs, config: AppConfig) -> Result<(), AppError> {
    let normalizer = CurrencyNormalizer::new(config.screening.rates);
    let extractor = if args.from_text {
        let rules = load_rules(args.rules.as_deref())?;
        Some(FinancialTextExtractor::new(&rules.patterns).map_err(RuleBookError::from)?)
    } else {
        None
    };

    for input in &args.excerpts {
        let excerpt = match &extractor {
            Some(extractor) => extractor.extract(input).excerpt,
            None => Some(input.clone()),
        };
        let usd = normalizer.to_usd_millions(excerpt.as_deref());
        println!(
            "{:<30} -> US$ {:.2} MM",
            excerpt.as_deref().unwrap_or("N/A"),
            usd
        );
    }
    Ok(())
}

pub(crate) fn show_rules(args: RulesArgs) -> Result<(), AppError> {
    let rules = load_rules(args.rules.as_deref())?;
    rules.validate()?;
    print_json(&rules);
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => eprintln!("JSON output unavailable: {}", err),
    }
}

fn render_report(report: &RunReport) {
    println!("Prospect run: {}", report.sector);
    println!(
        "Started {} | {} ms",
        report.started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        (report.finished_at - report.started_at).num_milliseconds()
    );
    println!("Discovery query: {}", report.discovery_query);
    println!("Threshold: US$ {:.2} MM", report.min_sales_mm_usd);

    if report.status == RunStatus::NoCandidatesFound {
        println!("\nNo candidates found for this sector.");
        return;
    }

    println!("Candidates discovered: {}", report.candidates.len());
    render_outcome(&report.outcome);
}

fn render_outcome(outcome: &ScreeningOutcome) {
    let summary = outcome.summary();

    if outcome.accepted.is_empty() {
        println!("\nAccepted prospects: none");
    } else {
        println!("\nAccepted prospects");
        for record in &outcome.accepted {
            println!(
                "- {} | sales US$ {:.2} MM | receivables US$ {:.2} MM | {} / {}",
                record.name,
                record.sales_mm_usd,
                record.receivables_mm_usd,
                record.method,
                record.confidence
            );
            if let Some(excerpt) = &record.evidence_excerpt {
                println!("  evidence: {}", excerpt);
            }
        }
    }

    if !outcome.rejected.is_empty() {
        println!("\nRejected");
        for record in &outcome.rejected {
            println!("- {} [{}] {}", record.name, record.stage, record.reason);
        }
    }

    println!(
        "\n{} accepted ({} evidence, {} heuristic) | {} gated | {} below threshold | {} failed",
        summary.accepted,
        summary.evidence_backed,
        summary.heuristic,
        summary.gated,
        summary.below_threshold,
        summary.failed
    );
}
