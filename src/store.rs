//! The store: dispatch loop, state publication, effect emission, teardown.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::broadcast::{StateBroadcaster, StateSubscription};
use crate::command::{CommandConcurrency, CommandHandler, CommandRunner};
use crate::effects::{EffectBus, EffectSubscription};
use crate::queue::{intent_queue, IntentSender};
use crate::{Failure, Intent, Reducer};

/// Construction options for [`Store::spawn_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreOptions {
    /// Worker-pool policy for command execution.
    pub command_concurrency: CommandConcurrency,
}

/// Handle to a running store.
///
/// One store per logical session: construct it where the session starts,
/// hand out [`sender`](Store::sender) clones and subscriptions to whoever
/// needs them, and call [`shutdown`](Store::shutdown) (or drop the handle)
/// when the session ends. There is no process-wide instance.
///
/// The dispatch loop owns all reducer invocations and all state writes, so
/// no two reductions ever execute concurrently and every subscriber observes
/// a strict prefix of the reduction order. Follow-up intents, whether from
/// effect handlers or completed commands, always re-enter through the queue;
/// nothing calls back into the reducer from within a reduction.
pub struct Store<R, H>
where
    R: Reducer,
    H: CommandHandler<Action = R::Action>,
{
    intents: IntentSender<R::Action, H::Command>,
    states: Arc<StateBroadcaster<R::State>>,
    effects: Arc<EffectBus<R::Effect>>,
    cancel: CancellationToken,
    loop_task: JoinHandle<()>,
}

impl<R, H> Store<R, H>
where
    R: Reducer,
    H: CommandHandler<Action = R::Action>,
{
    /// Spawn a store with default options on the current tokio runtime.
    pub fn spawn(initial: R::State, reducer: R, handler: H) -> Self {
        Self::spawn_with(initial, reducer, handler, StoreOptions::default())
    }

    /// Spawn a store with explicit options on the current tokio runtime.
    pub fn spawn_with(initial: R::State, reducer: R, handler: H, options: StoreOptions) -> Self {
        let (intents, receiver) = intent_queue();
        let states = Arc::new(StateBroadcaster::new(initial));
        let effects = Arc::new(EffectBus::new());
        let cancel = CancellationToken::new();
        let runner = CommandRunner::new(
            handler,
            intents.clone(),
            cancel.clone(),
            options.command_concurrency,
        );

        let loop_states = Arc::clone(&states);
        let loop_effects = Arc::clone(&effects);
        let loop_cancel = cancel.clone();
        let loop_task = tokio::spawn(dispatch_loop(
            receiver,
            reducer,
            runner,
            loop_states,
            loop_effects,
            loop_cancel,
        ));

        Self {
            intents,
            states,
            effects,
            cancel,
            loop_task,
        }
    }

    /// Enqueue an intent from any context. A no-op after shutdown.
    pub fn dispatch(&self, intent: Intent<R::Action, H::Command>) {
        self.intents.dispatch(intent);
    }

    /// Enqueue an action intent.
    pub fn dispatch_action(&self, action: R::Action) {
        self.intents.dispatch_action(action);
    }

    /// Enqueue a command intent.
    pub fn dispatch_command(&self, command: H::Command) {
        self.intents.dispatch_command(command);
    }

    /// Clonable producer handle, for components that only dispatch.
    pub fn sender(&self) -> IntentSender<R::Action, H::Command> {
        self.intents.clone()
    }

    /// Non-blocking snapshot of the current state.
    pub fn state(&self) -> R::State {
        self.states.snapshot()
    }

    /// Subscribe to state: the current value immediately, then every
    /// subsequent distinct state, conflated to the newest for slow readers.
    pub fn subscribe_state(&self) -> StateSubscription<R::State> {
        self.states.subscribe()
    }

    /// Subscribe to effects emitted from now on. Nothing emitted before the
    /// subscription attached is replayed.
    pub fn subscribe_effects(&self) -> EffectSubscription<R::Effect> {
        self.effects.subscribe()
    }

    /// Stop the dispatch loop and abandon in-flight commands.
    ///
    /// Fast-cancel policy: intents already queued are dropped, not drained.
    /// Once the loop has exited, `dispatch` becomes a silent no-op and no
    /// further state or effect is emitted.
    pub fn shutdown(&self) {
        if !self.cancel.is_cancelled() {
            tracing::debug!("store shutting down");
            self.cancel.cancel();
        }
    }

    /// Whether the dispatch loop has fully stopped.
    pub fn is_terminated(&self) -> bool {
        self.loop_task.is_finished()
    }
}

impl<R, H> Drop for Store<R, H>
where
    R: Reducer,
    H: CommandHandler<Action = R::Action>,
{
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// The single active consumer tying queue, reducer, broadcaster, effect bus
/// and command runner together.
async fn dispatch_loop<R, H>(
    receiver: flume::Receiver<Intent<R::Action, H::Command>>,
    reducer: R,
    runner: CommandRunner<H>,
    states: Arc<StateBroadcaster<R::State>>,
    effects: Arc<EffectBus<R::Effect>>,
    cancel: CancellationToken,
) where
    R: Reducer,
    H: CommandHandler<Action = R::Action>,
{
    // The loop owns the authoritative state; the broadcaster mirrors it.
    let mut state = states.snapshot();
    loop {
        let intent = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            intent = receiver.recv_async() => match intent {
                Ok(intent) => intent,
                // Every sender is gone; nothing can arrive anymore.
                Err(_) => break,
            },
        };
        match intent {
            Intent::Action(action) => {
                // A reducer is total by contract; a panic is a defect. Contain
                // it, keep the previous state, and keep draining.
                match catch_unwind(AssertUnwindSafe(|| reducer.reduce(action, &state))) {
                    Ok((next, emitted)) => {
                        state = next.clone();
                        let changed = states.publish(next);
                        tracing::debug!(changed, effects = emitted.len(), "action reduced");
                        for effect in emitted {
                            effects.emit(effect);
                        }
                    }
                    Err(_) => {
                        let defect = Failure::Defect("reducer panicked".to_string());
                        tracing::error!(%defect, "state left unchanged");
                    }
                }
            }
            // Never block the loop on collaborator I/O.
            Intent::Command(command) => runner.spawn(command),
        }
    }
    tracing::debug!("dispatch loop stopped");
}
