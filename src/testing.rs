//! Test utilities for observing stores in tests.
//!
//! Only available with the `testing` feature or during tests.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::broadcast::StateSubscription;
use crate::command::CommandHandler;
use crate::effects::EffectSubscription;
use crate::Intent;

/// Command type for stores that never issue commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoCommand {}

/// Command handler for action-only stores.
///
/// Useful when testing reducers in isolation: the store still needs a
/// handler, but [`NoCommand`] is uninhabited so `run` is unreachable.
pub struct NoCommands<A> {
    _actions: PhantomData<fn() -> A>,
}

impl<A> NoCommands<A> {
    pub fn new() -> Self {
        Self {
            _actions: PhantomData,
        }
    }
}

impl<A> Default for NoCommands<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<A: Send + 'static> CommandHandler for NoCommands<A> {
    type Action = A;
    type Command = NoCommand;

    async fn run(&self, command: NoCommand) -> Intent<A, NoCommand> {
        match command {}
    }
}

/// Captures every state a subscription yields, for assertions.
///
/// Spawns a pump task on the current tokio runtime; the pump stops when the
/// recorder is dropped or the store goes away. Because state delivery is
/// conflated, a recorder is only guaranteed to observe the newest state;
/// use [`wait_for_count`](StateRecorder::wait_for_count) with values you
/// know will be seen.
pub struct StateRecorder<S> {
    seen: Arc<Mutex<Vec<S>>>,
    pump: tokio::task::JoinHandle<()>,
}

impl<S: Clone + Send + Sync + 'static> StateRecorder<S> {
    /// Attach to a subscription and start recording.
    pub fn attach(mut subscription: StateSubscription<S>) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let pump = tokio::spawn(async move {
            while let Some(state) = subscription.next().await {
                sink.lock().unwrap().push(state);
            }
        });
        Self { seen, pump }
    }

    /// Number of states captured so far.
    pub fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    /// Access the captured states with a closure.
    pub fn with_captured<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&[S]) -> T,
    {
        let seen = self.seen.lock().unwrap();
        f(&seen)
    }

    /// Wait until at least `expected` states have been captured. Pair with
    /// `tokio::time::timeout` to bound the wait.
    pub async fn wait_for_count(&self, expected: usize) {
        while self.count() < expected {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

impl<S> Drop for StateRecorder<S> {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

/// Captures every effect a subscription yields, for assertions.
///
/// Attachment time is when the subscription was created, not when the
/// recorder starts pumping, so effects emitted in between are still seen.
pub struct EffectRecorder<E> {
    seen: Arc<Mutex<Vec<E>>>,
    pump: tokio::task::JoinHandle<()>,
}

impl<E: Clone + Send + 'static> EffectRecorder<E> {
    /// Attach to a subscription and start recording.
    pub fn attach(mut subscription: EffectSubscription<E>) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let pump = tokio::spawn(async move {
            while let Some(effect) = subscription.next().await {
                sink.lock().unwrap().push(effect);
            }
        });
        Self { seen, pump }
    }

    /// Number of effects captured so far.
    pub fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    /// Access the captured effects with a closure.
    pub fn with_captured<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&[E]) -> T,
    {
        let seen = self.seen.lock().unwrap();
        f(&seen)
    }

    /// Wait until at least `expected` effects have been captured. Pair with
    /// `tokio::time::timeout` to bound the wait.
    pub async fn wait_for_count(&self, expected: usize) {
        while self.count() < expected {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

impl<E> Drop for EffectRecorder<E> {
    fn drop(&mut self) {
        self.pump.abort();
    }
}
