// demos/src/bin/spoof_sim.rs
//
// Generates labelled spoofing traffic against a simulated book (default) or
// the logging paper venue. Nothing is ever routed to a real exchange.

use clap::Parser;
use rust_decimal::Decimal;
use spoofbook_rs::controller::{StopSignal, SystemClock};
use spoofbook_rs::exchange::build_exchange;
use spoofbook_rs::{
    Exchange, ExchangeError, ExchangeMode, RunConfig, Side, SpoofController, setup_logger,
};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "spoof_sim")]
#[command(about = "Spoofing order-flow generator for detection testing", long_about = None)]
struct Cli {
    /// TOML run configuration; flags below override its values
    #[arg(short, long)]
    config: Option<String>,

    /// Exchange to drive: sim or paper
    #[arg(short, long)]
    mode: Option<ExchangeMode>,

    /// Instrument label
    #[arg(long)]
    symbol: Option<String>,

    /// Spoof price levels per cycle
    #[arg(long)]
    layers: Option<u32>,

    /// Quantity of each spoof order
    #[arg(long)]
    layer_size: Option<Decimal>,

    /// Price distance between layers
    #[arg(long)]
    offset: Option<Decimal>,

    /// Seconds to hold the spoofs, counted from the end of the delay
    #[arg(long)]
    hold: Option<f64>,

    /// Seconds between the spoofs and the genuine order
    #[arg(long)]
    delay: Option<f64>,

    /// Seconds between cycles
    #[arg(long)]
    pause: Option<f64>,

    /// Stop after this many cycles
    #[arg(long)]
    cycles: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger();
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let mut paper = config.paper.clone();
    paper.paper = paper_flag();
    if config.mode == ExchangeMode::Paper && !paper.paper {
        warn!("EX_PAPER is not \"true\"; the paper venue will refuse every call");
    }
    let exchange = build_exchange(config.mode, &config.spoof.symbol, paper);
    if config.mode == ExchangeMode::Simulation {
        seed_liquidity(exchange.as_ref())?;
    }

    let stop = StopSignal::new();
    let mut controller =
        SpoofController::new(exchange, Arc::new(SystemClock::new()), config.spoof)?
            .with_stop_signal(stop.clone());

    let ctrl_c_stop = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received; stopping at the next step");
            ctrl_c_stop.stop();
        }
    });

    let stats = tokio::task::spawn_blocking(move || controller.run()).await??;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

fn build_config(cli: &Cli) -> Result<RunConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };

    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(symbol) = &cli.symbol {
        config.spoof.symbol = symbol.clone();
    }
    if let Some(layers) = cli.layers {
        config.spoof.layers = layers;
    }
    if let Some(layer_size) = cli.layer_size {
        config.spoof.layer_size = layer_size;
    }
    if let Some(offset) = cli.offset {
        config.spoof.offset = offset;
    }
    if let Some(hold) = cli.hold {
        config.spoof.hold = seconds(hold)?;
    }
    if let Some(delay) = cli.delay {
        config.spoof.delay = seconds(delay)?;
    }
    if let Some(pause) = cli.pause {
        config.spoof.pause = seconds(pause)?;
    }
    if cli.cycles.is_some() {
        config.spoof.max_cycles = cli.cycles;
    }

    config.spoof.validate()?;
    Ok(config)
}

fn seconds(value: f64) -> Result<Duration, Box<dyn std::error::Error>> {
    Duration::try_from_secs_f64(value)
        .map_err(|_| format!("expected a non-negative number of seconds, got {}", value).into())
}

/// Paper safety flag: only the exact value "true" (any case) keeps paper mode
fn paper_flag() -> bool {
    env::var("EX_PAPER")
        .map(|value| value.eq_ignore_ascii_case("true"))
        .unwrap_or(true)
}

/// Ten levels of liquidity on each side of 50 000, so cycles have a top of book
fn seed_liquidity(exchange: &dyn Exchange) -> Result<(), ExchangeError> {
    let best_bid = Decimal::new(499_995, 1);
    let best_ask = Decimal::new(500_005, 1);
    let step = Decimal::new(5, 1);

    for level in 0..10 {
        let distance = step * Decimal::from(level);
        exchange.submit(Side::Buy, best_bid - distance, Decimal::TEN)?;
        exchange.submit(Side::Sell, best_ask + distance, Decimal::TEN)?;
    }
    info!(
        "Seeded the {} venue with 20 resting orders (bid {:?} / ask {:?})",
        exchange.venue(),
        exchange.best_bid()?,
        exchange.best_ask()?
    );
    Ok(())
}
