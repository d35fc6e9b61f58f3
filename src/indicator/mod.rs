pub mod pct_change;
pub mod sma;
