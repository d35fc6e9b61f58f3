pub mod yahoo;

use std::future::Future;

use anyhow::Result;

use crate::model::price_series::PriceSeries;

/// Source of daily closing prices for a symbol.
pub trait PriceSource {
    /// Closes for the trailing `lookback_days` calendar days, oldest first.
    fn daily_closes(
        &self,
        symbol: &str,
        lookback_days: u32,
    ) -> impl Future<Output = Result<PriceSeries>> + Send;
}
