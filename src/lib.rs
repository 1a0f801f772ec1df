//! A Model-View-Intent (MVI) store runtime for Rust on tokio.
//!
//! Implements unidirectional data flow with a hard serialization guarantee:
//! every state transition happens on one dispatch loop, in intent arrival
//! order, with asynchronous command results re-entering through the same
//! queue as every other input.
//!
//! ```text
//!                     dispatch()
//!  producers ─────────────────────────▶ IntentQueue
//!                                           │ one at a time
//!                                           ▼
//!                            ┌──────  Dispatch Loop  ──────┐
//!                    Action  │                             │ Command
//!                            ▼                             ▼
//!                         Reducer                   CommandRunner ──▶ collaborators
//!                     (State, Effects)                     │
//!                            │                             │ follow-up intent
//!              ┌─────────────┴──────────┐                  ▼
//!              ▼                        ▼              IntentQueue
//!       StateBroadcaster            EffectBus
//!       (replay-of-one,          (at-most-once,
//!        conflation)              no replay)
//! ```
//!
//! - **State**: immutable snapshot, replaced on every reduction. One writer.
//! - **Intent**: [`Intent::Action`] is resolved by the pure [`Reducer`];
//!   [`Intent::Command`] is executed off-loop by a [`CommandHandler`] and
//!   can only influence state through the follow-up intent it enqueues.
//! - **Effect**: one-shot notification (toast, navigation), delivered
//!   at-most-once to subscribers attached at emission time, never replayed.
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use mvi_store::{CommandHandler, Intent, Reducer, Store};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum CounterAction {
//!     Incremented,
//!     Failed(String),
//! }
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum CounterCommand {
//!     IncrementRemotely,
//! }
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum CounterEffect {
//!     ShowToast(String),
//! }
//!
//! #[derive(Debug, Clone, PartialEq, Default)]
//! struct CounterState {
//!     count: i32,
//!     error: Option<String>,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Effect = CounterEffect;
//!
//!     fn reduce(
//!         &self,
//!         action: CounterAction,
//!         state: &CounterState,
//!     ) -> (CounterState, Vec<CounterEffect>) {
//!         match action {
//!             CounterAction::Incremented => (
//!                 CounterState {
//!                     count: state.count + 1,
//!                     error: None,
//!                 },
//!                 Vec::new(),
//!             ),
//!             CounterAction::Failed(message) => (
//!                 CounterState {
//!                     error: Some(message.clone()),
//!                     ..state.clone()
//!                 },
//!                 vec![CounterEffect::ShowToast(message)],
//!             ),
//!         }
//!     }
//! }
//!
//! struct CounterCommands;
//!
//! #[async_trait]
//! impl CommandHandler for CounterCommands {
//!     type Action = CounterAction;
//!     type Command = CounterCommand;
//!
//!     async fn run(&self, command: CounterCommand) -> Intent<CounterAction, CounterCommand> {
//!         match command {
//!             // Call collaborators here; translate the outcome into an action.
//!             CounterCommand::IncrementRemotely => Intent::Action(CounterAction::Incremented),
//!         }
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = Store::spawn(CounterState::default(), CounterReducer, CounterCommands);
//!
//! let mut states = store.subscribe_state();
//! assert_eq!(states.next().await.unwrap().count, 0); // replay-of-one
//!
//! store.dispatch_command(CounterCommand::IncrementRemotely);
//! assert_eq!(states.next().await.unwrap().count, 1);
//!
//! store.shutdown();
//! # }
//! ```
//!
//! ## Teardown
//!
//! [`Store::shutdown`] (and dropping the handle) follows a fast-cancel
//! policy: intents still queued are dropped rather than drained, in-flight
//! commands are abandoned at their next await point, and late results meet a
//! closed queue. Dispatching into a dead store is a silent no-op.

// Module declarations
mod broadcast;
mod collaborator;
mod command;
mod effects;
mod failure;
mod intent;
mod queue;
mod reducer;
mod store;

// Public re-exports
pub use broadcast::StateSubscription;
pub use collaborator::{Repository, UseCase};
pub use command::{CommandConcurrency, CommandHandler};
pub use effects::EffectSubscription;
pub use failure::Failure;
pub use intent::Intent;
pub use queue::IntentSender;
pub use reducer::Reducer;
pub use store::{Store, StoreOptions};

// Test utilities (only available with the 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
mod testing;
#[cfg(any(test, feature = "testing"))]
pub use testing::{EffectRecorder, NoCommand, NoCommands, StateRecorder};
