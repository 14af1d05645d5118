//! # Navigation Event Loop
//!
//! The host pushes [`NavigationEvent`]s into a channel (its `hashchange` and
//! `load` listeners); [`HashRouter`] consumes them one at a time and hands
//! each to the [`Dispatcher`]. Navigation triggered by a handler lands in the
//! same channel and is therefore resolved after the current event.
//!
//! Events are never coalesced or cancelled. Deferred work a handler starts for
//! an earlier event may still complete after a later event rendered; handlers
//! that care check [`Generation::is_current`](hashroute_core::Generation::is_current).

use crate::dispatcher::Dispatcher;
use futures::{
    FutureExt, Stream, StreamExt,
    channel::mpsc::{self, UnboundedReceiver, UnboundedSender},
};
use hashroute_core::NavigationEvent;
use std::{
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

/// Creates a connected sender / event stream pair.
pub fn navigation_channel() -> (NavigationSender, NavigationEvents) {
    let (tx, rx) = mpsc::unbounded();
    (NavigationSender { tx }, NavigationEvents { rx })
}

/// Sending half of a navigation channel, held by the host.
#[derive(Debug, Clone)]
pub struct NavigationSender {
    tx: UnboundedSender<NavigationEvent>,
}

impl NavigationSender {
    /// Queues an event. Returns false if the channel is closed.
    pub fn send(&self, event: NavigationEvent) -> bool {
        self.tx.unbounded_send(event).is_ok()
    }

    /// Closes the channel for every sender. Queued events are still delivered.
    pub fn close(&self) {
        self.tx.close_channel();
    }

    /// Returns true if the receiving side is gone or the channel was closed.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half of a navigation channel.
#[derive(Debug)]
pub struct NavigationEvents {
    rx: UnboundedReceiver<NavigationEvent>,
}

impl NavigationEvents {
    /// Returns the next event if one is ready, without waiting.
    pub fn next_ready(&mut self) -> Option<NavigationEvent> {
        self.rx.next().now_or_never().flatten()
    }
}

impl Stream for NavigationEvents {
    type Item = NavigationEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_next_unpin(cx)
    }
}

/// Drives a [`Dispatcher`] from a navigation channel.
pub struct HashRouter {
    dispatcher: Arc<Dispatcher>,
    events: NavigationEvents,
}

impl HashRouter {
    /// Creates a router consuming `events`.
    pub fn new(dispatcher: Dispatcher, events: NavigationEvents) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            events,
        }
    }

    /// The dispatcher, shareable with code outside the loop.
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Dispatches events until the channel closes. Returns how many were
    /// processed.
    pub async fn run(mut self) -> usize {
        let mut processed = 0;
        while let Some(event) = self.events.next().await {
            let resolution = self.dispatcher.dispatch(event);
            tracing::trace!(?resolution, "navigation resolved");
            processed += 1;
        }
        tracing::debug!(processed, "navigation channel closed");
        processed
    }

    /// Dispatches every event that is ready, including events queued by the
    /// handlers it runs, and returns how many were processed.
    pub fn run_until_stalled(&mut self) -> usize {
        let mut processed = 0;
        while let Some(event) = self.events.next_ready() {
            let resolution = self.dispatcher.dispatch(event);
            tracing::trace!(?resolution, "navigation resolved");
            processed += 1;
        }
        processed
    }
}

impl std::fmt::Debug for HashRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashRouter")
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::RouterConfig,
        memory::{MemoryLocation, MemoryMount},
        testing::CountingHandler,
    };
    use hashroute_core::{Location, RouteTable};

    #[test]
    fn test_next_ready_without_events() {
        let (sender, mut events) = navigation_channel();
        assert!(events.next_ready().is_none());

        assert!(sender.send(NavigationEvent::hash_change("/a")));
        assert_eq!(
            events.next_ready(),
            Some(NavigationEvent::hash_change("/a"))
        );

        sender.close();
        assert!(sender.is_closed());
        assert!(!sender.send(NavigationEvent::hash_change("/b")));
        assert!(events.next_ready().is_none());
    }

    #[tokio::test]
    async fn test_run_until_closed() {
        let (location, events) = MemoryLocation::new("");
        let mount = Arc::new(MemoryMount::new("app"));
        let list = CountingHandler::new();
        let table = RouteTable::new().route("/items", list.clone()).unwrap();
        let dispatcher = Dispatcher::new(table, location.clone(), mount)
            .with_config(RouterConfig::new().default_path("/items"));
        let router = HashRouter::new(dispatcher, events);

        location.load();
        location.assign("/items?page=2");
        location.close();

        assert_eq!(router.run().await, 2);
        assert_eq!(list.count(), 2);
    }
}
