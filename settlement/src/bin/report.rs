//! Bet book report CLI
//!
//! Prints one channel's bets for one day with effective odds and GGR.
//!
//! Usage:
//!   cargo run --bin betbook-report -- --snapshot bets.json --channel 1 --date 2024-05-01
//!   cargo run --bin betbook-report -- --snapshot bets.json --channel 1 --locale en --json
//!   RUST_LOG=info cargo run --bin betbook-report -- --channel 1 --log-json

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use ledger_core::{BetBook, ChannelId, Snapshot};
use settlement::{format_money, kind_label, Config, DayView, Locale, SettlementEngine};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "betbook-report")]
#[command(about = "Show bets and GGR for one channel and day")]
struct Args {
    /// Bet book snapshot (JSON)
    #[arg(long, env = "BETBOOK_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Settlement config file (TOML); environment is used otherwise
    #[arg(long)]
    config: Option<PathBuf>,

    /// Channel ID
    #[arg(long)]
    channel: u64,

    /// Day to show (YYYY-MM-DD, UTC); today if omitted
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Label language (de, en)
    #[arg(long)]
    locale: Option<Locale>,

    /// Fail on bets whose channel is unknown
    #[arg(long, default_value = "false")]
    strict: bool,

    /// Print the view as JSON
    #[arg(long, default_value = "false")]
    json: bool,

    /// Write logs as JSON lines
    #[arg(long, default_value = "false")]
    log_json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr);
    if args.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::from_env().context("Failed to read config from environment")?,
    };
    if let Some(locale) = args.locale {
        config.locale = locale;
    }
    if args.strict {
        config.strict_channels = true;
    }

    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        locale = %config.locale,
        strict = config.strict_channels,
        "Starting report"
    );

    let snapshot_path = args
        .snapshot
        .clone()
        .or_else(|| config.snapshot_path.clone())
        .context("No snapshot given (--snapshot or BETBOOK_SNAPSHOT)")?;

    let snapshot = Snapshot::load(&snapshot_path)
        .with_context(|| format!("Failed to load snapshot {}", snapshot_path.display()))?;
    let book = BetBook::from_snapshot(ledger_core::Config::default(), snapshot)?;

    let day = args.date.unwrap_or_else(|| Utc::now().date_naive());
    let engine = SettlementEngine::new(config);
    let view = DayView::build(&engine, &book, ChannelId::new(args.channel), day)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_view(&view);
    Ok(())
}

fn print_view(view: &DayView) {
    let channel = view
        .channel
        .as_ref()
        .map(|c| format!("{} ({})", c.name, c.role))
        .unwrap_or_else(|| format!("#{} (unknown)", view.channel_id));

    println!("=== {} / {} ===", channel, view.day);
    println!();

    if view.rows.is_empty() {
        println!("No bets.");
        return;
    }

    println!(
        "{:>5}  {:<24} {:>10} {:>8}  {:<8} {:<28} {:>16}",
        "ID", "Match", "Stake", "Odds", "Kind", "Result", "GGR"
    );
    for row in &view.rows {
        println!(
            "{:>5}  {:<24} {:>10} {:>8}  {:<8} {:<28} {:>16}",
            row.bet_id.value(),
            truncate(&row.match_name, 24),
            row.stake.to_string(),
            row.effective_odds.round_dp(2).to_string(),
            kind_label(row.kind),
            row.result_label,
            format_money(row.ggr, &row.currency),
        );
    }

    let totals = view.totals();
    println!();
    for (currency, total) in &totals.ggr_by_currency {
        println!("GGR {:<6} {:>16}", currency, format_money(*total, currency));
    }
    println!("open: {}, settled: {}", totals.open, totals.settled);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
