//! Multi-producer intent queue feeding the dispatch loop.

use crate::Intent;

/// Producer handle for a store's intent queue.
///
/// Cheap to clone and safe to use from any thread or task. Intents are
/// delivered to the single dispatch loop in FIFO arrival order.
///
/// Once the store has shut down, [`dispatch`](IntentSender::dispatch) becomes
/// a silent no-op: late-arriving results from abandoned async work are
/// dropped instead of resurrecting a dead store.
pub struct IntentSender<A, C> {
    tx: flume::Sender<Intent<A, C>>,
}

impl<A, C> Clone for IntentSender<A, C> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<A: Send, C: Send> IntentSender<A, C> {
    pub(crate) fn new(tx: flume::Sender<Intent<A, C>>) -> Self {
        Self { tx }
    }

    /// Enqueue an intent. Non-blocking; a no-op once the store is gone.
    pub fn dispatch(&self, intent: Intent<A, C>) {
        if self.tx.send(intent).is_err() {
            tracing::debug!("intent dropped: store has shut down");
        }
    }

    /// Enqueue an action intent.
    pub fn dispatch_action(&self, action: A) {
        self.dispatch(Intent::action(action));
    }

    /// Enqueue a command intent.
    pub fn dispatch_command(&self, command: C) {
        self.dispatch(Intent::command(command));
    }

    /// Whether the consuming dispatch loop is still alive.
    pub fn is_connected(&self) -> bool {
        !self.tx.is_disconnected()
    }
}

/// Create the queue: one clonable producer handle and the single consumer end
/// owned by the dispatch loop.
pub(crate) fn intent_queue<A, C>() -> (IntentSender<A, C>, flume::Receiver<Intent<A, C>>)
where
    A: Send,
    C: Send,
{
    let (tx, rx) = flume::unbounded();
    (IntentSender::new(tx), rx)
}
