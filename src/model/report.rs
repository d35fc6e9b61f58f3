use std::fmt;

use crate::error::TickError;
use crate::indicator::pct_change::mean_recent_change;
use crate::indicator::sma::tail_mean;
use crate::model::price_series::PriceSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Bullish,
    Bearish,
}

impl Trend {
    /// Ties resolve to `Bearish`.
    pub fn from_averages(sma_fast: f64, sma_slow: f64) -> Self {
        if sma_fast > sma_slow {
            Self::Bullish
        } else {
            Self::Bearish
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Bullish => "BULLISH",
            Self::Bearish => "BEARISH",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Bullish => "📈",
            Self::Bearish => "📉",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Window sizes for one analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisParams {
    pub fast_period: usize,
    pub slow_period: usize,
    /// Number of pairwise changes averaged for the projection (reads one extra close).
    pub change_window: usize,
    /// A series must be strictly longer than this to be analysed.
    pub min_history: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            fast_period: 5,
            slow_period: 10,
            change_window: 5,
            min_history: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub symbol: String,
    pub current: f64,
    pub sma_fast: f64,
    pub sma_slow: f64,
    pub predicted: f64,
    pub change: f64,
    pub change_pct: f64,
    pub trend: Trend,
}

impl Report {
    pub fn new(
        symbol: impl Into<String>,
        current: f64,
        sma_fast: f64,
        sma_slow: f64,
        predicted: f64,
    ) -> Self {
        let change = predicted - current;
        Self {
            symbol: symbol.into(),
            current,
            sma_fast,
            sma_slow,
            predicted,
            change,
            change_pct: change / current * 100.0,
            trend: Trend::from_averages(sma_fast, sma_slow),
        }
    }

    pub fn compute(series: &PriceSeries, params: &AnalysisParams) -> Result<Self, TickError> {
        if params.fast_period == 0 || params.slow_period == 0 || params.change_window == 0 {
            return Err(TickError::Compute(format!(
                "analysis windows must be > 0 (fast {}, slow {}, change {})",
                params.fast_period, params.slow_period, params.change_window
            )));
        }
        if series.len() <= params.min_history {
            return Err(TickError::InsufficientData {
                have: series.len(),
                need: params.min_history,
            });
        }

        let closes = series.closes();
        let needed = params
            .slow_period
            .max(params.fast_period)
            .max(params.change_window + 1);
        let window = &closes[closes.len().saturating_sub(needed)..];
        if let Some(bad) = window.iter().find(|c| !c.is_finite() || **c <= 0.0) {
            return Err(TickError::Compute(format!(
                "invalid close price {} for {}",
                bad,
                series.symbol()
            )));
        }

        let short = |what: &str| {
            TickError::Compute(format!(
                "not enough closes for {} ({} available)",
                what,
                closes.len()
            ))
        };
        let current = series
            .latest()
            .map(|p| p.close)
            .ok_or_else(|| short("current price"))?;
        let sma_fast = tail_mean(&closes, params.fast_period).ok_or_else(|| short("fast SMA"))?;
        let sma_slow = tail_mean(&closes, params.slow_period).ok_or_else(|| short("slow SMA"))?;
        let avg_change = mean_recent_change(&closes, params.change_window)
            .ok_or_else(|| short("recent changes"))?;

        Ok(Self::new(
            series.symbol(),
            current,
            sma_fast,
            sma_slow,
            current * (1.0 + avg_change),
        ))
    }

    pub fn is_gain(&self) -> bool {
        self.change >= 0.0
    }
}
