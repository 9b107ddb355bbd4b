//! Wire types for feed messages.

use crate::shared::serde_util::{self, price_or_nan};
use serde::{Deserialize, Serialize};

/// A single bar as the feed sends it.
///
/// History records spell the timestamp `UpdateAt`, ticks spell it `UpdatedAt`;
/// both are accepted everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireBar {
    #[serde(rename = "UpdatedAt", alias = "UpdateAt")]
    pub updated_at: String,
    #[serde(
        rename = "MaxPrice",
        default = "serde_util::nan",
        deserialize_with = "price_or_nan::deserialize"
    )]
    pub max_price: f64,
    #[serde(
        rename = "MinPrice",
        default = "serde_util::nan",
        deserialize_with = "price_or_nan::deserialize"
    )]
    pub min_price: f64,
    #[serde(
        rename = "OpenPrice",
        default = "serde_util::nan",
        deserialize_with = "price_or_nan::deserialize"
    )]
    pub open_price: f64,
    #[serde(
        rename = "ClosePrice",
        default = "serde_util::nan",
        deserialize_with = "price_or_nan::deserialize"
    )]
    pub close_price: f64,
}

/// Feed snapshot: the full history to display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "History")]
    pub history: Vec<WireBar>,
}

/// A message pushed by the feed.
///
/// Snapshots are recognised by their `History` list; anything else carrying a
/// timestamp is a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeedMessage {
    Snapshot(Snapshot),
    Tick(WireBar),
}

impl FeedMessage {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn snapshot(history: Vec<WireBar>) -> Self {
        Self::Snapshot(Snapshot { history })
    }

    pub fn tick(bar: WireBar) -> Self {
        Self::Tick(bar)
    }
}
