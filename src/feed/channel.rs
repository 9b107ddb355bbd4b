//! In-process feed backed by per-subscriber channels.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use super::{FeedEvent, PriceFeed, Subscription};
use crate::domain::candle::wire::FeedMessage;
use crate::error::FeedError;
use crate::shared::Symbol;

struct Subscriber {
    symbol: Symbol,
    tx: mpsc::UnboundedSender<FeedEvent>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    shut_down: bool,
    subscribers: HashMap<u64, Subscriber>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Cloneable in-process feed. Clones share the same subscribers.
#[derive(Clone, Default)]
pub struct ChannelFeed {
    registry: Arc<Mutex<Registry>>,
}

impl ChannelFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a message to every subscriber of `symbol`.
    ///
    /// Returns how many subscribers received it.
    pub fn publish(&self, symbol: &Symbol, message: FeedMessage) -> usize {
        self.broadcast(symbol, FeedEvent::Message(message))
    }

    /// Decode raw JSON text and deliver it.
    ///
    /// Text that does not decode is delivered as [`FeedEvent::Error`].
    pub fn publish_json(&self, symbol: &Symbol, text: &str) -> usize {
        match FeedMessage::from_json(text) {
            Ok(message) => self.publish(symbol, message),
            Err(e) => {
                tracing::warn!("Feed decode error for {}: {} — raw: {}", symbol, e, text);
                self.broadcast(symbol, FeedEvent::Error(FeedError::Decode(e.to_string())))
            }
        }
    }

    /// Stop publishing `symbol`: subscribers get [`FeedEvent::Closed`] and are
    /// dropped from the registry.
    pub fn close(&self, symbol: &Symbol) {
        let mut registry = lock(&self.registry);
        registry.subscribers.retain(|_, sub| {
            if &sub.symbol != symbol {
                return true;
            }
            let _ = sub.tx.send(FeedEvent::Closed);
            false
        });
        tracing::debug!("Closed feed for {}", symbol);
    }

    /// Close every symbol and refuse further subscriptions.
    pub fn shutdown(&self) {
        let mut registry = lock(&self.registry);
        registry.shut_down = true;
        for (_, sub) in registry.subscribers.drain() {
            let _ = sub.tx.send(FeedEvent::Closed);
        }
        tracing::info!("Channel feed shut down");
    }

    pub fn subscriber_count(&self, symbol: &Symbol) -> usize {
        lock(&self.registry)
            .subscribers
            .values()
            .filter(|sub| &sub.symbol == symbol)
            .count()
    }

    fn broadcast(&self, symbol: &Symbol, event: FeedEvent) -> usize {
        lock(&self.registry)
            .subscribers
            .values()
            .filter(|sub| &sub.symbol == symbol)
            .filter(|sub| sub.tx.send(event.clone()).is_ok())
            .count()
    }
}

impl PriceFeed for ChannelFeed {
    async fn subscribe(&self, symbol: &Symbol) -> Result<Subscription, FeedError> {
        if symbol.is_empty() {
            return Err(FeedError::Rejected("symbol must not be empty".into()));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let id = {
            let mut registry = lock(&self.registry);
            if registry.shut_down {
                return Err(FeedError::Closed);
            }
            let id = registry.next_id;
            registry.next_id += 1;
            registry.subscribers.insert(
                id,
                Subscriber {
                    symbol: symbol.clone(),
                    tx,
                },
            );
            id
        };
        tracing::debug!("Registered subscription {} for {}", id, symbol);

        let registry = Arc::downgrade(&self.registry);
        Ok(Subscription::new(symbol.clone(), rx, move || {
            if let Some(registry) = registry.upgrade() {
                lock(&registry).subscribers.remove(&id);
            }
        }))
    }
}

impl std::fmt::Debug for ChannelFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = lock(&self.registry);
        f.debug_struct("ChannelFeed")
            .field("subscribers", &registry.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candle::wire::WireBar;

    fn tick() -> FeedMessage {
        FeedMessage::tick(WireBar {
            updated_at: "2023-01-05T10:50:00Z".into(),
            max_price: 20.3,
            min_price: 20.1,
            open_price: 20.2,
            close_price: 20.25,
        })
    }

    #[tokio::test]
    async fn test_publish_reaches_matching_symbol_only() {
        let feed = ChannelFeed::new();
        let petr = Symbol::from("PETR4");
        let vale = Symbol::from("VALE3");
        let mut sub_petr = feed.subscribe(&petr).await.unwrap();
        let mut sub_vale = feed.subscribe(&vale).await.unwrap();

        assert_eq!(feed.publish(&petr, tick()), 1);
        assert_eq!(sub_petr.recv().await, Some(FeedEvent::Message(tick())));
        assert!(sub_vale.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_drop_deregisters_subscription() {
        let feed = ChannelFeed::new();
        let symbol = Symbol::from("PETR4");
        let sub = feed.subscribe(&symbol).await.unwrap();
        assert_eq!(feed.subscriber_count(&symbol), 1);

        drop(sub);
        assert_eq!(feed.subscriber_count(&symbol), 0);
        assert_eq!(feed.publish(&symbol, tick()), 0);
    }

    #[tokio::test]
    async fn test_empty_symbol_is_rejected() {
        let feed = ChannelFeed::new();
        let err = feed.subscribe(&Symbol::from("")).await.unwrap_err();
        assert!(matches!(err, FeedError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_publish_json_decode_error_is_delivered() {
        let feed = ChannelFeed::new();
        let symbol = Symbol::from("PETR4");
        let mut sub = feed.subscribe(&symbol).await.unwrap();

        assert_eq!(feed.publish_json(&symbol, "{not json"), 1);
        assert!(matches!(sub.recv().await, Some(FeedEvent::Error(FeedError::Decode(_)))));
    }

    #[tokio::test]
    async fn test_close_sends_closed_and_ends_stream() {
        let feed = ChannelFeed::new();
        let symbol = Symbol::from("PETR4");
        let mut sub = feed.subscribe(&symbol).await.unwrap();

        feed.close(&symbol);
        assert_eq!(sub.recv().await, Some(FeedEvent::Closed));
        assert_eq!(sub.recv().await, None);
        assert_eq!(feed.subscriber_count(&symbol), 0);
    }

    #[tokio::test]
    async fn test_shutdown_refuses_new_subscriptions() {
        let feed = ChannelFeed::new();
        let symbol = Symbol::from("PETR4");
        let mut sub = feed.subscribe(&symbol).await.unwrap();

        feed.shutdown();
        assert_eq!(sub.recv().await, Some(FeedEvent::Closed));
        assert_eq!(feed.subscribe(&symbol).await.unwrap_err(), FeedError::Closed);
    }

    #[tokio::test]
    async fn test_subscription_outliving_feed_drops_cleanly() {
        let feed = ChannelFeed::new();
        let sub = feed.subscribe(&Symbol::from("PETR4")).await.unwrap();
        drop(feed);
        drop(sub);
    }
}
