use crate::report::{
    run_gate, run_normalize_amount, run_screening, show_rules, AmountArgs, GateArgs, RulesArgs,
    ScreenArgs,
};
use clap::{Parser, Subcommand};
use prospector::config::AppConfig;
use prospector::error::AppError;
use prospector::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "prospector",
    about = "Screen candidate companies for a sector and estimate their sales and receivables",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Discover (or read) candidates for a sector and screen them
    Run(ScreenArgs),
    /// Check names against the eligibility rules only
    Gate(GateArgs),
    /// Convert money excerpts to million USD
    NormalizeAmount(AmountArgs),
    /// Print the effective rule book as JSON
    Rules(RulesArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    tracing::debug!(environment = ?config.environment, "configuration loaded");

    match cli.command {
        Command::Run(args) => run_screening(args, config),
        Command::Gate(args) => run_gate(args),
        Command::NormalizeAmount(args) => run_normalize_amount(args, config),
        Command::Rules(args) => show_rules(args),
    }
}
