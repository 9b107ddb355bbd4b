//! Custom serde helpers for feed wire formats.

/// Default for a price field the feed left out.
pub fn nan() -> f64 {
    f64::NAN
}

/// Deserializes a price that may be a number, a numeric string, or `null`.
///
/// Anything that is not a usable number becomes `NaN`, which the geometry
/// layer clamps to a collapsed bar instead of failing the whole message.
pub mod price_or_nan {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawPrice>::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawPrice::Number(n)) => n,
            Some(RawPrice::Text(s)) => s.trim().parse().unwrap_or(f64::NAN),
            Some(RawPrice::Other(_)) | None => f64::NAN,
        })
    }
}
