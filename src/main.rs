use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::watch;

use stock_monitor::config::Config;
use stock_monitor::monitor::{Monitor, MonitorSettings};
use stock_monitor::provider::yahoo::YahooChartClient;
use stock_monitor::ui::PanelRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Check config/default.toml and the STOCK_MONITOR_SYMBOL variable");
            std::process::exit(1);
        }
    };

    // Log to a file so records don't interleave with the console panel
    let log_file = std::fs::File::create(&config.logging.file)
        .with_context(|| format!("failed to create log file {}", config.logging.file))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(config.logging.level.as_str())
            }),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .json()
        .init();

    tracing::info!(
        symbol = %config.provider.symbol,
        base_url = %config.provider.base_url,
        lookback_days = config.provider.lookback_days,
        "Starting stock-monitor"
    );

    let client = YahooChartClient::new(
        &config.provider.base_url,
        Duration::from_secs(config.provider.timeout_secs),
    )?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl+C received");
            let _ = shutdown_tx.send(true);
        }
    });

    let mut monitor = Monitor::new(
        client,
        io::stdout(),
        MonitorSettings::from_config(&config),
        PanelRenderer::new(&config.provider.display_name, config.ui.color),
    );
    monitor.run(shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
