//! State broadcasting with replay-of-one and conflation.

use tokio::sync::watch;

/// Holds the current state and fans it out to subscribers.
///
/// The dispatch loop is the only writer. Subscribers are independent; a slow
/// subscriber skips intermediate states and observes the newest (conflation).
pub(crate) struct StateBroadcaster<S> {
    tx: watch::Sender<S>,
}

impl<S> StateBroadcaster<S>
where
    S: Clone + PartialEq + Send + Sync + 'static,
{
    pub(crate) fn new(initial: S) -> Self {
        Self {
            tx: watch::Sender::new(initial),
        }
    }

    /// Publish a successor state. A state equal to the current one produces
    /// no notification. Returns whether subscribers were notified.
    pub(crate) fn publish(&self, next: S) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        })
    }

    /// Non-blocking snapshot of the current state.
    pub(crate) fn snapshot(&self) -> S {
        self.tx.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> StateSubscription<S> {
        StateSubscription {
            rx: self.tx.subscribe(),
            replayed: false,
        }
    }
}

/// A state subscription with replay-of-one semantics.
///
/// The first call to [`next`](StateSubscription::next) yields the current
/// state immediately; every later call waits for a distinct successor. If
/// states are produced faster than they are read, intermediate values are
/// skipped in favor of the newest.
pub struct StateSubscription<S> {
    rx: watch::Receiver<S>,
    replayed: bool,
}

impl<S: Clone> StateSubscription<S> {
    /// The next state to observe, or `None` once the store is gone.
    pub async fn next(&mut self) -> Option<S> {
        if !self.replayed {
            self.replayed = true;
            return Some(self.rx.borrow_and_update().clone());
        }
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Non-blocking snapshot of the current state.
    pub fn current(&self) -> S {
        self.rx.borrow().clone()
    }
}
