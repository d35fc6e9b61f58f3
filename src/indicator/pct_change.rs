/// Fractional change between each consecutive pair: `(next - prev) / prev`.
///
/// `n` values yield `n - 1` changes; fewer than two values yield none.
pub fn pct_changes(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .collect()
}

/// Mean of the last `count` pairwise changes, drawn from the last `count + 1` closes.
pub fn mean_recent_change(closes: &[f64], count: usize) -> Option<f64> {
    if count == 0 {
        return None;
    }
    let start = closes.len().checked_sub(count + 1)?;
    mean(&pct_changes(&closes[start..]))
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairwise_changes() {
        let changes = pct_changes(&[100.0, 110.0, 99.0]);
        assert_eq!(changes.len(), 2);
        assert!((changes[0] - 0.10).abs() < 1e-12);
        assert!((changes[1] + 0.10).abs() < 1e-12);
        assert!(pct_changes(&[5.0]).is_empty());
    }

    #[test]
    fn recent_change_reads_one_extra_close() {
        // The 1.0 -> 100.0 jump sits outside a 2-change window.
        let closes = [1.0, 100.0, 110.0, 121.0];
        let avg = mean_recent_change(&closes, 2).unwrap();
        assert!((avg - 0.10).abs() < 1e-12);
        assert_eq!(mean_recent_change(&closes, 4), None);
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert!((mean(&[1.0, 2.0, 6.0]).unwrap() - 3.0).abs() < f64::EPSILON);
    }
}
