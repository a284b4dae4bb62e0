use chrono::DateTime;
use clap::Subcommand;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Table};
use std::time::Duration;

use scout_core::{
    CachedPriceFeed, ChartPoint, ChartUnit, PriceCache, PriceClient, PriceTicker, ScoutConfig,
    TokenQuote,
};

#[derive(Subcommand)]
pub enum PricesCommand {
    #[command(about = "Show current quotes for the featured tokens")]
    Current {
        #[arg(
            short,
            long,
            default_value = "text",
            help = "Output format (text, json)"
        )]
        format: String,
    },

    #[command(about = "Show the price chart for a token address")]
    Chart {
        #[arg(help = "Token address on the Sonic chain")]
        address: String,

        #[arg(short, long, default_value = "h", help = "Time unit (h, d, w, m, y)")]
        unit: ChartUnit,
    },

    #[command(about = "Watch featured token quotes refresh live")]
    Watch,
}

pub async fn handle_prices_command(cmd: Option<PricesCommand>) -> anyhow::Result<()> {
    let config = ScoutConfig::load()?;

    match cmd.unwrap_or(PricesCommand::Current {
        format: "text".to_string(),
    }) {
        PricesCommand::Current { format } => cmd_prices_current(&config, &format).await,
        PricesCommand::Chart { address, unit } => cmd_prices_chart(&config, &address, unit).await,
        PricesCommand::Watch => cmd_prices_watch(&config).await,
    }
}

fn build_feed(config: &ScoutConfig) -> anyhow::Result<CachedPriceFeed> {
    let client = PriceClient::new(&config.prices)?;
    let cache = PriceCache::in_cache_dir(Duration::from_secs(config.prices.cache_ttl_secs))?;
    Ok(CachedPriceFeed::new(client, cache))
}

async fn cmd_prices_current(config: &ScoutConfig, format: &str) -> anyhow::Result<()> {
    let feed = build_feed(config)?;
    let quotes = feed.quotes().await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&quotes)?);
        return Ok(());
    }

    print_quotes_table(&quotes);
    Ok(())
}

async fn cmd_prices_chart(
    config: &ScoutConfig,
    address: &str,
    unit: ChartUnit,
) -> anyhow::Result<()> {
    let client = PriceClient::new(&config.prices)?;
    let points = client.chart(address, None, unit).await?;

    if points.is_empty() {
        println!("{}", "No chart data for this token.".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Date"),
            Cell::new("Open"),
            Cell::new("High"),
            Cell::new("Low"),
            Cell::new("Close"),
        ]);

    for point in &points {
        table.add_row(vec![
            Cell::new(format_date(config, point)),
            Cell::new(format_price(point.open)),
            Cell::new(format_price(point.high)),
            Cell::new(format_price(point.low)),
            Cell::new(format_price(point.price_usd)),
        ]);
    }

    println!("{table}");
    Ok(())
}

async fn cmd_prices_watch(config: &ScoutConfig) -> anyhow::Result<()> {
    let feed = build_feed(config)?;
    let interval = Duration::from_secs(config.prices.refresh_interval_secs);

    let ticker = PriceTicker::spawn(feed, interval);
    let mut updates = ticker.subscribe();

    println!("{}", "Watching featured token quotes. Ctrl-C to stop.".dimmed());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            update = updates.recv() => match update {
                Ok(quotes) => print_quotes_table(&quotes),
                Err(_) => break,
            },
        }
    }

    ticker.shutdown().await;
    Ok(())
}

fn print_quotes_table(quotes: &[TokenQuote]) {
    if quotes.is_empty() {
        println!("{}", "No quotes available.".yellow());
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Symbol"),
            Cell::new("Name"),
            Cell::new("Price (USD)"),
        ]);

    for quote in quotes {
        table.add_row(vec![
            Cell::new(&quote.token.symbol),
            Cell::new(&quote.token.name),
            Cell::new(quote.price_label()),
        ]);
    }

    println!("{table}");
}

fn format_price(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "-".to_string(),
    }
}

fn format_date(config: &ScoutConfig, point: &ChartPoint) -> String {
    DateTime::from_timestamp(point.date, 0)
        .map(|dt| dt.format(&config.display.datetime_format).to_string())
        .unwrap_or_else(|| point.date.to_string())
}
