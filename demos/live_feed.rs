//! Live dashboard feed in the terminal.
//!
//! Starts the refresh scheduler against the public API, prints the movers
//! and market stats on every update, and evaluates the alerts stored in
//! `./cointrack-state` against each new coin snapshot.
//!
//! ```sh
//! RUST_LOG=cointrack=debug cargo run --example live_feed --features native
//! ```

use std::sync::Arc;

use futures_util::StreamExt;
use tracing_subscriber::EnvFilter;

use cointrack::prelude::*;
use cointrack::shared::fmt::decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "cointrack=info".into()))
        .init();

    let config = TrackerConfig::default().with_env_overrides();
    config.validate()?;

    let client = Arc::new(TrackerClientBuilder::from_config(&config).build()?);
    let mut session = TrackerSession::load(FileStore::open("./cointrack-state")?);
    println!(
        "Loaded {} holdings and {} alerts",
        session.holdings().len(),
        session.alerts().len()
    );

    let scheduler = RefreshScheduler::start(client.clone(), config.refresh.clone());
    let feed = scheduler.feed();
    let mut events = scheduler.events();

    loop {
        tokio::select! {
            event = events.next() => {
                let Some(event) = event else { break };
                match event {
                    RefreshEvent::CoinsUpdated { count } => {
                        let coins = feed.coins().await;
                        println!("\n── {count} coins ──");
                        print_movers(&coins);
                        print_portfolio(&session, &coins);
                        for trigger in session.on_snapshot(&coins) {
                            println!("ALERT  {}", trigger.message());
                        }
                    }
                    RefreshEvent::MarketUpdated { .. } => {
                        let snapshot = feed.snapshot().await;
                        print_market(client.vs_currency(), &snapshot);
                    }
                    RefreshEvent::Failed { resource, error } => {
                        eprintln!("{resource} refresh failed: {error}");
                    }
                }
                session.expire_notifications();
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}

fn print_movers(coins: &CoinSnapshot) {
    let movers = market_movers(coins);
    for (label, list) in [("Gainers", &movers.gainers), ("Losers", &movers.losers)] {
        let line: Vec<String> = list
            .iter()
            .map(|c| format!("{} {}", c.ticker(), decimal::signed_percent(c.change_24h)))
            .collect();
        println!("{label:<8} {}", line.join("  "));
    }
}

fn print_portfolio(session: &TrackerSession<FileStore>, coins: &CoinSnapshot) {
    if session.holdings().is_empty() {
        return;
    }
    let totals = session.portfolio(coins).totals;
    println!(
        "Portfolio {}  invested {}  P/L {} ({})",
        decimal::usd(&totals.current_value),
        decimal::usd(&totals.invested),
        decimal::usd(&totals.gain),
        decimal::signed_percent(Some(totals.gain_percent)),
    );
}

fn print_market(vs_currency: &str, feed: &MarketFeed) {
    if let Some(global) = &feed.global {
        println!(
            "Market cap {}  volume {}  BTC dominance {}",
            decimal::abbr_usd(&global.market_cap(vs_currency)),
            decimal::abbr_usd(&global.volume(vs_currency)),
            decimal::percent(global.btc_dominance()),
        );
    }
    let trending: Vec<&str> = feed.trending.iter().map(|t| t.symbol.as_str()).collect();
    println!("Trending   {}", trending.join(", "));
}
