use tokio::sync::mpsc;

use crate::models::FeedEvent;

/// Publisher half of the realtime channel, held by the transport.
#[derive(Clone)]
pub struct EventBus {
    tx: mpsc::UnboundedSender<FeedEvent>,
}

/// Subscriber half, owned by exactly one feed session for its lifetime.
/// Dropping it closes the channel, so teardown is guaranteed on every exit
/// path without an explicit unsubscribe call.
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<FeedEvent>,
}

/// Open a feed event channel.
pub fn channel() -> (EventBus, Subscription) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventBus { tx }, Subscription { rx })
}

impl EventBus {
    /// Deliver an event. Returns false once the subscriber is gone.
    pub fn publish(&self, event: FeedEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

impl Subscription {
    /// Take everything currently queued, in arrival order. Non-blocking;
    /// the merge layer calls this from its own loop.
    pub fn drain(&mut self) -> Vec<FeedEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}
