//! Conversions from wire types to domain types for candles.

use super::wire::WireBar;
use super::{Ohlc, PricePoint};
use chrono::{DateTime, NaiveDateTime};

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse a feed timestamp into its wall-clock time.
///
/// An explicit offset (including `Z`) is accepted but not applied: the feed
/// stamps bars with exchange wall-clock time.
pub(crate) fn parse_wall_clock(timestamp: &str) -> Option<NaiveDateTime> {
    let timestamp = timestamp.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.naive_local());
    }
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(timestamp, fmt).ok())
    {
        return Some(dt.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(timestamp, fmt).ok())
}

impl From<&WireBar> for Ohlc {
    fn from(bar: &WireBar) -> Self {
        Self {
            open: bar.open_price,
            high: bar.max_price,
            low: bar.min_price,
            close: bar.close_price,
        }
    }
}

impl From<WireBar> for PricePoint {
    fn from(bar: WireBar) -> Self {
        let ohlc = Ohlc::from(&bar);
        PricePoint::new(bar.updated_at, ohlc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_rfc3339_keeps_wall_clock() {
        let t = parse_wall_clock("2023-01-05T10:45:00Z").unwrap();
        assert_eq!((t.hour(), t.minute()), (10, 45));

        let t = parse_wall_clock("2023-01-05T10:45:00-03:00").unwrap();
        assert_eq!((t.hour(), t.minute()), (10, 45));
    }

    #[test]
    fn test_parse_offset_formats_keep_wall_clock() {
        for ts in [
            "2023-01-05T10:45:30+0000",
            "2023-01-05T10:45:30.250-0300",
            "2023-01-05T10:45Z",
            "2023-01-05T10:45+01:00",
        ] {
            let t = parse_wall_clock(ts).unwrap_or_else(|| panic!("{ts} should parse"));
            assert_eq!((t.hour(), t.minute()), (10, 45), "{ts}");
        }
    }

    #[test]
    fn test_parse_naive_formats() {
        assert!(parse_wall_clock("2023-01-05T10:45:12.345").is_some());
        assert!(parse_wall_clock("2023-01-05 10:45:12").is_some());
        assert!(parse_wall_clock("2023-01-05T10:45").is_some());
        assert!(parse_wall_clock("10:45").is_none());
    }

    #[test]
    fn test_wire_bar_to_price_point() {
        let bar = WireBar {
            updated_at: "2023-01-05T10:46:00Z".into(),
            max_price: 20.50,
            min_price: 20.28,
            open_price: 20.29,
            close_price: 20.42,
        };
        let point = PricePoint::from(bar);
        assert_eq!(point.timestamp, "2023-01-05T10:46:00Z");
        assert_eq!(point.high, 20.50);
        assert_eq!(point.low, 20.28);
        assert_eq!(point.open, 20.29);
        assert_eq!(point.close, 20.42);
    }
}
