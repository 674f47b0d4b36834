mod types;
mod pipeline;
mod sources;
mod engine;
mod config;
mod web;
mod error;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::{load_config, render_toml, DashboardConfig};
use engine::{MacroAggregator, MacroDataService};
use sources::{http_client, FredClient, GoogleNewsClient, YahooClient};
use web::{start_dashboard_server, AppState};

#[derive(Parser)]
#[command(name = "liquidity-terminal")]
#[command(version = "0.1.0")]
#[command(about = "Global macro & liquidity dashboard: Fed balance sheet, M2, dollar, credit spreads", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "terminal.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard
    Serve {
        /// Listen port (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Fetch the data once and print the current regime and metric changes
    Regime,
    /// Print recent macro headlines
    News,
    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json_logs)?;

    let mut config = load_config(&cli.config)?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await?;
        }
        Commands::Regime => {
            show_regime(config).await?;
        }
        Commands::News => {
            show_news(config).await?;
        }
        Commands::Config => {
            print!("{}", render_toml(&config)?);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, json: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow!("failed to initialize logging: {}", e))
}

fn build_service(config: &DashboardConfig) -> Result<MacroDataService> {
    let client = http_client(config.data.http_timeout_secs)?;

    let aggregator = MacroAggregator::new(
        Arc::new(FredClient::new(client.clone())),
        Arc::new(YahooClient::new(client.clone())),
        config.data.lookback_years,
        config.data.trend_window,
    );

    Ok(MacroDataService::new(
        aggregator,
        Arc::new(GoogleNewsClient::new(client)),
        config.news.query(),
        config.data.comparison_offset,
        config.data.cache_ttl(),
        config.news.cache_ttl(),
    ))
}

async fn serve(config: DashboardConfig) -> Result<()> {
    info!("Global Macro & Liquidity Terminal v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Lookback {}y, {}-sample trend, cache {}h",
        config.data.lookback_years, config.data.trend_window, config.data.cache_ttl_hours
    );

    let service = Arc::new(build_service(&config)?);

    // Warm the cache so the first visitor does not wait on six downloads.
    let warm = Arc::clone(&service);
    tokio::spawn(async move {
        if let Err(e) = warm.macro_table().await {
            error!("Initial data load failed: {}", e);
        }
    });

    start_dashboard_server(AppState::new(service), &config.server.bind, config.server.port).await
}

async fn show_regime(config: DashboardConfig) -> Result<()> {
    let service = build_service(&config)?;
    let (table, snapshot) = service.snapshot().await?;

    println!("\n=== Macro Regime ({}) ===", snapshot.as_of);
    println!("{} ({})", snapshot.regime.label, snapshot.regime.description);
    println!(
        "Dollar {} its {}-day trend, credit spread {} its {}-day trend",
        if snapshot.regime.dollar_below_trend { "below" } else { "above" },
        service.trend_window(),
        if snapshot.regime.spread_below_trend { "below" } else { "above" },
        service.trend_window(),
    );

    println!("\n=== Core Liquidity Metrics ===");
    for metric in &snapshot.metrics {
        println!(
            "{:<28} {:>16} | {}",
            metric.title,
            metric.current_display(),
            metric.change_display()
        );
    }

    if let (Some(first), Some(last)) = (table.first(), table.latest()) {
        println!("\n{} rows, {} to {}", table.len(), first.date, last.date);
    }

    Ok(())
}

async fn show_news(config: DashboardConfig) -> Result<()> {
    let service = build_service(&config)?;
    let items = service.headlines().await;

    println!("\n=== Macro Headlines (last {}h) ===", config.news.lookback_hours);
    if items.is_empty() {
        println!("No recent headlines.");
    }
    for item in items.iter() {
        println!("\n{}", item.title);
        println!("  {} | {}", item.source, item.published);
        println!("  {}", item.link);
    }

    Ok(())
}
