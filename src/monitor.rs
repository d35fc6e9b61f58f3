use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use tokio::sync::watch;

use crate::config::Config;
use crate::error::TickError;
use crate::model::report::{AnalysisParams, Report};
use crate::provider::PriceSource;
use crate::ui::panel::{self, PanelRenderer};

#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub symbol: String,
    pub lookback_days: u32,
    pub params: AnalysisParams,
    pub refresh_interval: Duration,
    pub clear_screen: bool,
}

impl MonitorSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            symbol: config.provider.symbol.trim().to_ascii_uppercase(),
            lookback_days: config.provider.lookback_days,
            params: config.analysis.params(),
            refresh_interval: config.monitor.refresh_interval(),
            clear_screen: config.ui.clear_screen,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Rendered(Report),
    Waiting,
    Failed(String),
}

/// Fetch, analyse and render loop for a single symbol.
pub struct Monitor<S, W> {
    source: S,
    out: W,
    settings: MonitorSettings,
    renderer: PanelRenderer,
}

impl<S: PriceSource, W: Write> Monitor<S, W> {
    pub fn new(source: S, out: W, settings: MonitorSettings, renderer: PanelRenderer) -> Self {
        Self {
            source,
            out,
            settings,
            renderer,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_output(self) -> W {
        self.out
    }

    async fn evaluate(&self) -> Result<Report, TickError> {
        let series = self
            .source
            .daily_closes(&self.settings.symbol, self.settings.lookback_days)
            .await?;
        Report::compute(&series, &self.settings.params)
    }

    /// Runs one iteration. Only console write failures are returned as errors.
    pub async fn tick(&mut self) -> Result<TickOutcome> {
        let outcome = match self.evaluate().await {
            Ok(report) => {
                tracing::info!(
                    symbol = %report.symbol,
                    current = report.current,
                    sma_fast = report.sma_fast,
                    sma_slow = report.sma_slow,
                    predicted = report.predicted,
                    trend = %report.trend,
                    "Report computed"
                );
                self.render(&report)?;
                TickOutcome::Rendered(report)
            }
            Err(e) if e.is_insufficient_data() => {
                tracing::warn!(symbol = %self.settings.symbol, reason = %e, "Skipping tick");
                writeln!(self.out, "{}", panel::waiting_line(&Local::now()))?;
                TickOutcome::Waiting
            }
            Err(e) => {
                let message = e.to_string();
                tracing::error!(symbol = %self.settings.symbol, error = %message, "Tick failed");
                writeln!(self.out, "{}", panel::error_line(&Local::now(), &message))?;
                TickOutcome::Failed(message)
            }
        };
        self.out.flush().context("failed to flush console")?;
        Ok(outcome)
    }

    fn render(&mut self, report: &Report) -> Result<()> {
        if self.settings.clear_screen {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        write!(self.out, "{}", self.renderer.header())?;
        write!(self.out, "{}", self.renderer.report(report, &Local::now()))?;
        writeln!(
            self.out,
            "{}",
            panel::info_line(self.settings.refresh_interval.as_secs())
        )?;
        Ok(())
    }

    /// Loops until `shutdown` turns true, then prints the goodbye line.
    ///
    /// Returns the number of ticks that ran to completion.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<u64> {
        write!(self.out, "{}", self.renderer.header())?;
        writeln!(self.out, "\n{}", panel::status_line("Initializing monitoring system..."))?;
        writeln!(self.out, "{}", panel::status_line("Fetching market data..."))?;
        self.out.flush()?;

        tracing::info!(
            symbol = %self.settings.symbol,
            refresh_secs = self.settings.refresh_interval.as_secs(),
            "Monitor started"
        );

        let mut ticks = 0u64;
        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                biased;
                outcome = self.tick() => {
                    outcome?;
                    ticks += 1;
                }
                _ = wait_for_shutdown(&mut shutdown) => break,
            }

            tokio::select! {
                _ = tokio::time::sleep(self.settings.refresh_interval) => {}
                _ = wait_for_shutdown(&mut shutdown) => break,
            }
        }

        tracing::info!(ticks, "Monitor stopped");
        writeln!(self.out, "{}", panel::goodbye_line())?;
        self.out.flush()?;
        Ok(ticks)
    }
}

/// Resolves once the flag reads true; never resolves if the sender is gone.
async fn wait_for_shutdown(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
