//! Scoped subscription handle.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::stream::Stream;
use tokio::sync::mpsc;

use super::FeedEvent;
use crate::shared::Symbol;

type CancelFn = Box<dyn FnOnce() + Send>;

/// A live feed subscription.
///
/// Events arrive on an unbounded channel. The feed is told to stop delivering
/// exactly once: on [`Subscription::cancel`] or when the handle is dropped.
pub struct Subscription {
    symbol: Symbol,
    events: mpsc::UnboundedReceiver<FeedEvent>,
    cancel: Option<CancelFn>,
}

impl Subscription {
    /// Wrap a receiver with the hook that deregisters it from its feed.
    pub fn new(
        symbol: Symbol,
        events: mpsc::UnboundedReceiver<FeedEvent>,
        on_cancel: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            symbol,
            events,
            cancel: Some(Box::new(on_cancel)),
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Wait for the next event. `None` once the feed has gone away and every
    /// buffered event has been read.
    pub async fn recv(&mut self) -> Option<FeedEvent> {
        self.events.recv().await
    }

    /// Next buffered event, without waiting.
    pub fn try_recv(&mut self) -> Option<FeedEvent> {
        self.events.try_recv().ok()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_none()
    }

    /// Stop the subscription now instead of at drop.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            self.events.close();
            cancel();
            tracing::debug!("Released subscription for {}", self.symbol);
        }
    }
}

impl Stream for Subscription {
    type Item = FeedEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<FeedEvent>> {
        self.events.poll_recv(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("symbol", &self.symbol)
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
