use chrono::{Days, NaiveDate};
use stock_monitor::error::TickError;
use stock_monitor::model::price_series::{PricePoint, PriceSeries};
use stock_monitor::model::report::{AnalysisParams, Report, Trend};

fn series(closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            date: start + Days::new(i as u64),
            close,
        })
        .collect();
    PriceSeries::new("TSLA", points)
}

fn naive_mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[test]
fn short_series_yield_no_report() {
    let params = AnalysisParams::default();
    for len in 0..=10 {
        let closes: Vec<f64> = (0..len).map(|i| 100.0 + i as f64).collect();
        let err = Report::compute(&series(&closes), &params).unwrap_err();
        assert!(
            matches!(err, TickError::InsufficientData { have, need: 10 } if have == len),
            "len {len}: {err:?}"
        );
    }
}

#[test]
fn moving_averages_use_trailing_windows() {
    let closes = [
        250.0, 248.1, 251.3, 247.9, 252.4, 255.0, 253.2, 249.8, 251.1, 256.7, 258.3, 260.9, 257.4,
    ];
    let report = Report::compute(&series(&closes), &AnalysisParams::default()).unwrap();

    assert_eq!(report.current, 257.4);
    assert_eq!(report.sma_fast, naive_mean(&closes[closes.len() - 5..]));
    assert_eq!(report.sma_slow, naive_mean(&closes[closes.len() - 10..]));
}

#[test]
fn prediction_averages_five_changes_from_six_closes() {
    // The first close would dominate the average if it were included.
    let mut closes = vec![1.0; 6];
    closes.extend([100.0, 110.0, 99.0, 108.9, 98.01, 107.811]);
    let report = Report::compute(&series(&closes), &AnalysisParams::default()).unwrap();

    let window = &closes[closes.len() - 6..];
    let changes: Vec<f64> = window.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect();
    assert_eq!(changes.len(), 5);
    let expected = 107.811 * (1.0 + naive_mean(&changes));

    assert!((report.predicted - expected).abs() < 1e-9);
    assert!((report.change - (expected - 107.811)).abs() < 1e-9);
}

#[test]
fn steady_growth_projects_next_step() {
    let closes: Vec<f64> = (0..12).map(|i| 100.0 * 1.05f64.powi(i)).collect();
    let report = Report::compute(&series(&closes), &AnalysisParams::default()).unwrap();
    assert!((report.change_pct - 5.0).abs() < 1e-9);
    assert_eq!(report.trend, Trend::Bullish);
    assert!(report.is_gain());
}

#[test]
fn flat_series_is_bearish_tie() {
    let report = Report::compute(&series(&[42.0; 15]), &AnalysisParams::default()).unwrap();
    assert_eq!(report.sma_fast, report.sma_slow);
    assert_eq!(report.trend, Trend::Bearish);
    assert_eq!(report.change, 0.0);
    assert!(report.is_gain());
}

#[test]
fn falling_prices_are_bearish() {
    let closes: Vec<f64> = (0..11).map(|i| 200.0 - i as f64).collect();
    let report = Report::compute(&series(&closes), &AnalysisParams::default()).unwrap();
    assert_eq!(report.trend, Trend::Bearish);
    assert!(report.change < 0.0);
}

#[test]
fn zero_close_is_a_compute_error() {
    let mut closes = vec![10.0; 11];
    closes[8] = 0.0;
    let err = Report::compute(&series(&closes), &AnalysisParams::default()).unwrap_err();
    assert!(matches!(err, TickError::Compute(_)), "{err:?}");
    assert!(!err.is_insufficient_data());
}

#[test]
fn given_prediction_yields_five_percent() {
    let report = Report::new("TSLA", 100.0, 99.0, 98.0, 105.0);
    assert_eq!(format!("{:.2}", report.change), "5.00");
    assert_eq!(format!("{:.2}", report.change_pct), "5.00");
    assert!(report.is_gain());
}

#[test]
fn zero_window_is_a_compute_error() {
    let params = AnalysisParams {
        fast_period: 0,
        ..AnalysisParams::default()
    };
    let err = Report::compute(&series(&[10.0; 15]), &params).unwrap_err();
    assert!(matches!(err, TickError::Compute(_)), "{err:?}");
}

#[test]
fn current_is_latest_dated_close() {
    let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    // Provider order is irrelevant; the newest date supplies the current price.
    let mut points: Vec<PricePoint> = (0..12)
        .map(|i| PricePoint {
            date: start + Days::new(i),
            close: 50.0 + i as f64,
        })
        .collect();
    points.reverse();
    let report = Report::compute(&PriceSeries::new("TSLA", points), &AnalysisParams::default())
        .unwrap();
    assert_eq!(report.current, 61.0);
}
