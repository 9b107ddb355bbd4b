//! Static sample bars shown before any feed data arrives.

use super::{Ohlc, PricePoint};

/// `(timestamp, open, high, low, close)` for each sample bar.
const SAMPLE_BARS: [(&str, f64, f64, f64, f64); 5] = [
    ("2023-01-05T10:45:00Z", 20.24, 20.30, 20.22, 20.29),
    ("2023-01-05T10:46:00Z", 20.29, 20.50, 20.28, 20.42),
    ("2023-01-05T10:47:00Z", 20.42, 20.63, 20.10, 20.18),
    ("2023-01-05T10:48:00Z", 20.18, 20.20, 20.18, 20.20),
    ("2023-01-05T10:49:00Z", 20.20, 20.20, 20.16, 20.16),
];

pub fn sample_points() -> Vec<PricePoint> {
    SAMPLE_BARS
        .iter()
        .map(|&(timestamp, open, high, low, close)| {
            PricePoint::new(timestamp, Ohlc::new(open, high, low, close))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_points_are_chronological_and_valid() {
        let points = sample_points();
        assert_eq!(points.len(), 5);
        let labels: Vec<_> = points.iter().map(PricePoint::label).collect();
        assert_eq!(labels, ["10:45", "10:46", "10:47", "10:48", "10:49"]);
        assert!(points.iter().all(|p| p.ohlc().validate().is_ok()));
    }
}
