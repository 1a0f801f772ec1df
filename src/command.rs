//! Asynchronous command execution off the dispatch loop.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::queue::IntentSender;
use crate::Intent;

/// Executes command intents against external collaborators.
///
/// `run` is called off the dispatch loop; any number of commands may be in
/// flight at once, concurrently with each other and with reduction. Each
/// completed command yields exactly one follow-up intent, which re-enters
/// the store through the queue and waits its turn like any other intent.
///
/// Handlers receive only the command value. They never touch state or the
/// effect bus; a command can only influence the store through the intent it
/// returns.
#[async_trait]
pub trait CommandHandler: Send + Sync + 'static {
    /// Action type shared with the store's reducer.
    type Action: Send + 'static;

    /// The command intents this handler executes.
    type Command: Send + 'static;

    /// Execute one command, translating its outcome into a follow-up intent.
    ///
    /// Collaborator failures must be caught here and encoded into the
    /// returned intent; they must never escape as panics.
    async fn run(&self, command: Self::Command) -> Intent<Self::Action, Self::Command>;
}

/// Worker-pool policy for command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandConcurrency {
    /// One task per command, no cap.
    #[default]
    Unbounded,
    /// At most this many commands in flight; excess commands wait for a
    /// permit before their handler runs. A limit of zero is treated as a
    /// limit of one, so commands always make progress.
    Bounded(usize),
}

/// Spawns command handlers and routes their results back into the queue.
///
/// Holds only narrow capabilities: a producer handle and the store's
/// cancellation token. Never a reference into the loop's internals.
pub(crate) struct CommandRunner<H: CommandHandler> {
    handler: Arc<H>,
    intents: IntentSender<H::Action, H::Command>,
    cancel: CancellationToken,
    permits: Option<Arc<Semaphore>>,
}

impl<H: CommandHandler> CommandRunner<H> {
    pub(crate) fn new(
        handler: H,
        intents: IntentSender<H::Action, H::Command>,
        cancel: CancellationToken,
        concurrency: CommandConcurrency,
    ) -> Self {
        let permits = match concurrency {
            CommandConcurrency::Unbounded => None,
            CommandConcurrency::Bounded(limit) => Some(Arc::new(Semaphore::new(limit.max(1)))),
        };
        Self {
            handler: Arc::new(handler),
            intents,
            cancel,
            permits,
        }
    }

    /// Run one command on its own task. Its result intent re-enters through
    /// the queue; a cancelled store abandons the task at its next await
    /// point, and anything that still completes hits a closed queue.
    pub(crate) fn spawn(&self, command: H::Command) {
        let handler = Arc::clone(&self.handler);
        let intents = self.intents.clone();
        let cancel = self.cancel.clone();
        let permits = self.permits.clone();
        tokio::spawn(async move {
            let _permit = match &permits {
                Some(semaphore) => tokio::select! {
                    _ = cancel.cancelled() => return,
                    permit = semaphore.acquire() => match permit {
                        Ok(permit) => Some(permit),
                        Err(_) => return,
                    },
                },
                None => None,
            };
            tokio::select! {
                _ = cancel.cancelled() => {}
                follow_up = handler.run(command) => {
                    if !cancel.is_cancelled() {
                        intents.dispatch(follow_up);
                    }
                }
            }
        });
    }
}
