//! Feed layer — the subscription collaborator the chart pulls data from.
//!
//! A feed delivers [`FeedEvent`]s for one symbol through a [`Subscription`]
//! handle. The handle is the only way to keep a subscription alive: dropping
//! it deregisters it from the feed.
//!
//! [`ChannelFeed`] is an in-process implementation, useful for static data,
//! tests, and bridging any transport the application owns.

pub mod channel;
pub mod subscription;

use crate::domain::candle::wire::FeedMessage;
use crate::error::FeedError;
use crate::shared::Symbol;

pub use channel::ChannelFeed;
pub use subscription::Subscription;

/// Events delivered on a subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// A decoded feed message.
    Message(FeedMessage),
    /// The feed sent something it could not decode.
    Error(FeedError),
    /// The feed stopped publishing this symbol.
    Closed,
}

/// The subscription collaborator.
#[allow(async_fn_in_trait)]
pub trait PriceFeed {
    /// Start receiving events for `symbol`.
    async fn subscribe(&self, symbol: &Symbol) -> Result<Subscription, FeedError>;
}
