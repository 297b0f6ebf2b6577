//! PrimeMatch demonstration driver.
//!
//! Draws random bank and client batches, matches them in both execution
//! modes, and prints the results with timings and circuit cost. Then does
//! the same for the single-symbol slot matcher.
//!
//! ```text
//! primematch-demo [CONFIG.json]
//! ```
//!
//! `RUST_LOG` controls log output (default `info`).

use std::time::Instant;

use primematch_engine::{CircuitSummary, SlotMatcher, TypedMatcher, ensure_same_result};
use primematch_ingress::BatchSealer;
use primematch_types::sample::{random_round, random_slots};
use primematch_types::{
    ExecutionMode, MatchConfig, MatchReport, Party, PrimematchError, Result, RoundId,
    SealedBatch, SingleSymbolConfig, constants,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    tracing::info!(
        engine = constants::ENGINE_NAME,
        version = constants::VERSION,
        bank_orders = config.bank_orders,
        client_orders = config.client_orders,
        symbols = config.symbols,
        "Demo starting"
    );

    typed_round(config)?;
    slot_round(SingleSymbolConfig::default())
}

fn load_config() -> Result<MatchConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(MatchConfig::default());
    };
    let json = std::fs::read_to_string(&path)
        .map_err(|e| PrimematchError::Configuration(format!("cannot read {path}: {e}")))?;
    MatchConfig::from_json(&json)
}

fn typed_round(config: MatchConfig) -> Result<()> {
    let start = Instant::now();
    let mut matcher = TypedMatcher::new(config)?;
    let compile_time = start.elapsed();
    println!("Compilation took: {:.3} seconds", compile_time.as_secs_f64());
    println!();

    let sealer = BatchSealer::new(config);
    let mut rng = rand::thread_rng();
    let (bank, client) = random_round(&mut rng, &config)?;
    let round = RoundId(1);
    let bank = sealer.seal(round, Party::Bank, bank)?;
    let client = sealer.seal(round, Party::Client, client)?;

    println!("Sample Input:");
    println!();
    print_batch("Bank Orders", &bank);
    print_batch("Client Orders", &client);

    let simulated = matcher.match_batches(&bank, &client, ExecutionMode::Simulate)?;
    println!("Simulated Output:");
    println!();
    print_report(&simulated);

    let start = Instant::now();
    let executed = matcher.match_batches(&bank, &client, ExecutionMode::Execute)?;
    let execute_time = start.elapsed();
    println!("Actual Output:");
    println!();
    print_report(&executed);

    ensure_same_result(&simulated, &executed)?;

    let summary = CircuitSummary::of(matcher.circuit());
    println!("Complexity was: {}", summary.complexity);
    println!("Bit width: {}", summary.bit_width);
    println!(
        "Quantities in [{}, {}]",
        config.bounds.min_qty, config.bounds.max_qty
    );
    println!("Nb of symbols: {}", config.symbols);
    println!("Execution took: {:.3} seconds", execute_time.as_secs_f64());
    println!();
    print_summary(&summary)
}

fn slot_round(config: SingleSymbolConfig) -> Result<()> {
    let start = Instant::now();
    let mut matcher = SlotMatcher::new(config)?;
    println!(
        "Single-symbol compilation took: {:.3} seconds",
        start.elapsed().as_secs_f64()
    );
    println!();

    let mut rng = rand::thread_rng();
    let (bank, client) = random_slots(&mut rng, &config);

    let start = Instant::now();
    let (simulated, executed) = matcher.verify_modes(&bank, &client)?;
    let elapsed = start.elapsed();

    println!("Single-symbol Output:");
    println!();
    for (slot, fill) in executed.fills.iter().enumerate() {
        let label = matcher
            .layout()
            .describe(slot)
            .map(|(symbol, side)| format!("bank {side} {symbol}"))
            .unwrap_or_default();
        println!(
            "\t\t{:>3}\t{:>3}\t->\t{fill:>3}\t({label})",
            bank[slot], client[slot]
        );
    }
    println!();
    println!("Result root: {}", simulated.result_root_hex());

    let summary = CircuitSummary::of(matcher.circuit());
    println!("Complexity was: {}", summary.complexity);
    println!(
        "Quantities in [{}, {}]",
        config.bounds.min_qty, config.bounds.max_qty
    );
    println!("Nb of transactions: {}", config.slots());
    println!("Nb of symbols: {}", config.symbols);
    println!("Execution took: {:.3} seconds", elapsed.as_secs_f64());
    println!();
    print_summary(&summary)
}

fn print_batch(title: &str, batch: &SealedBatch) {
    println!("\t{title}:");
    for order in &batch.orders {
        println!("\t\t{order}");
    }
    println!();
}

fn print_report(report: &MatchReport) {
    println!("\tBank Orders:");
    for entry in report.bank_entries() {
        println!("\t\t{entry}");
    }
    println!();
    println!("\tClient Orders:");
    for entry in report.client_entries() {
        println!("\t\t{entry}");
    }
    println!();
    println!("\tResult root: {}", report.result_root_hex());
    println!();
}

fn print_summary(summary: &CircuitSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    println!();
    Ok(())
}
