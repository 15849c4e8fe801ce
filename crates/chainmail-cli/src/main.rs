//! Chainmail melee resolver
//!
//! Resolves one round of melee between an attacking and a defending unit and
//! prints the casualties and the post-melee morale outcome. Unit fields not
//! given as flags are prompted for on the terminal.

mod config;
mod input;
mod report;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chainmail_core::{Engine, SeededDice, Side, UnitType};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use input::{parse_count, parse_unit_type, Prompter};
use report::Format;

/// Chainmail melee resolver - one round of melee and morale
#[derive(Parser, Debug)]
#[command(name = "chainmail")]
#[command(about = "Resolve one round of Chainmail melee and post-melee morale")]
struct Args {
    /// Attacking unit type (e.g. HEAVY_HORSE); prompted for if omitted
    #[arg(long, value_parser = parse_unit_type)]
    attacker_type: Option<UnitType>,

    /// Attacking troop count; prompted for if omitted
    #[arg(long, value_parser = parse_count)]
    attacker_count: Option<u32>,

    /// Defending unit type; prompted for if omitted
    #[arg(long, value_parser = parse_unit_type)]
    defender_type: Option<UnitType>,

    /// Defending troop count; prompted for if omitted
    #[arg(long, value_parser = parse_count)]
    defender_count: Option<u32>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file replacing the standard combat tables
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log melee and morale details to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "chainmail_core=debug,chainmail=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let tables = config::load_tables(args.tables.as_deref())?;

    // Determine seed
    let seed = args
        .seed
        .unwrap_or_else(|| SeededDice::from_entropy().seed());
    tracing::info!(seed, "dice seeded");

    // Prompts go to stderr so stdout carries only the report.
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stderr());
    let attacker = prompter.unit(Side::Attacker, args.attacker_type, args.attacker_count)?;
    let defender = prompter.unit(Side::Defender, args.defender_type, args.defender_count)?;

    let mut engine = Engine::with_dice(tables, SeededDice::new(seed))?;
    let round = engine
        .resolve_round(&attacker, &defender)
        .context("failed to resolve round")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::render(&round, seed, args.format, &mut out)?;
    out.flush()?;
    Ok(())
}
