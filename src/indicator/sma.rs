use super::pct_change::mean;

/// Simple moving average of the last `period` closes.
///
/// Returns `None` for a zero period or when fewer than `period` closes exist.
pub fn tail_mean(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 {
        return None;
    }
    let start = closes.len().checked_sub(period)?;
    mean(&closes[start..])
}
