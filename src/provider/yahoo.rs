use std::time::Duration;

use anyhow::{Context, Result};
use chrono::DateTime;
use reqwest::StatusCode;
use serde::Deserialize;

use super::PriceSource;
use crate::error::AppError;
use crate::model::price_series::{PricePoint, PriceSeries};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) stock-monitor";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    #[serde(default)]
    result: Option<Vec<ChartData>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
    #[serde(default)]
    adjclose: Vec<AdjCloseData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Client for the Yahoo Finance v8 chart endpoint.
pub struct YahooChartClient {
    http: reqwest::Client,
    base_url: String,
}

impl YahooChartClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("failed to build Yahoo HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn compact_error_body(body: &str) -> String {
        let normalized = body.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.char_indices().nth(180) {
            Some((idx, _)) => format!("{}...", &normalized[..idx]),
            None => normalized,
        }
    }

    pub async fn get_daily_closes(&self, symbol: &str, lookback_days: u32) -> Result<PriceSeries> {
        let symbol = symbol.trim().to_ascii_uppercase();
        let endpoint = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let range = format!("{}d", lookback_days.max(1));

        let response = self
            .http
            .get(&endpoint)
            .query(&[("range", range.as_str()), ("interval", "1d")])
            .send()
            .await
            .context("yahoo chart HTTP failed")?;
        let status = response.status();
        let body = response
            .text()
            .await
            .context("yahoo chart body read failed")?;

        let series = parse_chart_body(&symbol, status, &body)?;
        tracing::debug!(symbol = %symbol, points = series.len(), "Fetched daily closes");
        Ok(series)
    }
}

impl PriceSource for YahooChartClient {
    async fn daily_closes(&self, symbol: &str, lookback_days: u32) -> Result<PriceSeries> {
        self.get_daily_closes(symbol, lookback_days).await
    }
}

/// Yahoo reports unknown symbols as a 404 carrying a `chart.error` payload, so the
/// body is decoded before the status is judged.
fn parse_chart_body(symbol: &str, status: StatusCode, body: &str) -> Result<PriceSeries> {
    match serde_json::from_str::<ChartResponse>(body) {
        Ok(parsed) if parsed.chart.error.is_some() || status.is_success() => {
            parse_chart(symbol, parsed)
        }
        Err(e) if status.is_success() => {
            Err(AppError::Json(e)).context("yahoo chart JSON parse failed")
        }
        _ => anyhow::bail!(
            "yahoo chart returned {}: {}",
            status,
            YahooChartClient::compact_error_body(body)
        ),
    }
}

/// Prefers adjusted closes; bars with a null close are skipped.
fn parse_chart(symbol: &str, response: ChartResponse) -> Result<PriceSeries> {
    if let Some(err) = response.chart.error {
        return Err(AppError::Provider {
            code: err.code,
            description: err.description,
        }
        .into());
    }

    let Some(data) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(PriceSeries::empty(symbol));
    };

    let closes = data
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|a| a.adjclose)
        .filter(|a| !a.is_empty())
        .or_else(|| data.indicators.quote.into_iter().next().map(|q| q.close))
        .unwrap_or_default();

    let mut points = Vec::with_capacity(data.timestamp.len());
    for (ts, close) in data.timestamp.iter().zip(closes) {
        let Some(close) = close else {
            continue;
        };
        let local = DateTime::from_timestamp(ts.saturating_add(data.meta.gmtoffset), 0)
            .with_context(|| format!("invalid bar timestamp {}", ts))?;
        points.push(PricePoint {
            date: local.date_naive(),
            close,
        });
    }
    Ok(PriceSeries::new(symbol, points))
}
