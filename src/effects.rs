//! At-most-once effect delivery to currently attached subscribers.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

// Effects are transient UI signals; a subscriber this far behind has no use
// for the backlog anyway.
const EFFECT_CHANNEL_CAPACITY: usize = 64;

/// Fans effects out to whoever is attached at emission time.
///
/// No replay and no buffering guarantee: an effect emitted with zero
/// subscribers is dropped, and subscribers attaching later never see it.
pub(crate) struct EffectBus<E> {
    tx: broadcast::Sender<E>,
}

impl<E: Clone + Send + 'static> EffectBus<E> {
    pub(crate) fn new() -> Self {
        let (tx, _) = broadcast::channel(EFFECT_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Offer one effect to every currently attached subscriber.
    pub(crate) fn emit(&self, effect: E) {
        // send errs only when nobody is attached; fire-and-forget.
        let _ = self.tx.send(effect);
    }

    pub(crate) fn subscribe(&self) -> EffectSubscription<E> {
        EffectSubscription {
            rx: self.tx.subscribe(),
        }
    }
}

/// An effect subscription.
///
/// Yields effects emitted after the subscription attached, in emission
/// order. Nothing emitted earlier is replayed.
pub struct EffectSubscription<E> {
    rx: broadcast::Receiver<E>,
}

impl<E: Clone + Send> EffectSubscription<E> {
    /// The next effect, or `None` once the store is gone.
    ///
    /// A subscriber that falls too far behind skips the effects it missed
    /// and resumes at the newest.
    pub async fn next(&mut self) -> Option<E> {
        loop {
            match self.rx.recv().await {
                Ok(effect) => return Some(effect),
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "effect subscriber lagged; skipping");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
