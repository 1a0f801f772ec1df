//! The closed set of inputs driving a store.

/// An input to the store.
///
/// Intents arrive from any number of producer contexts and are processed one
/// at a time by the dispatch loop:
///
/// - An [`Action`](Intent::Action) is fully resolvable by the
///   [`Reducer`](crate::Reducer) using only the current state.
/// - A [`Command`](Intent::Command) requires collaborator I/O. It is handed
///   to the [`CommandHandler`](crate::CommandHandler) and never reaches the
///   reducer; the only way it can influence state is through the single
///   follow-up intent its completion enqueues.
///
/// The partition is enforced at the type level, so routing a command into a
/// reducer is unrepresentable rather than a runtime error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent<A, C> {
    /// Resolvable by the reducer from current state alone.
    Action(A),
    /// Requires an external collaborator call.
    Command(C),
}

impl<A, C> Intent<A, C> {
    /// Wrap an action.
    pub fn action(action: A) -> Self {
        Intent::Action(action)
    }

    /// Wrap a command.
    pub fn command(command: C) -> Self {
        Intent::Command(command)
    }

    /// Whether this intent is an action.
    pub fn is_action(&self) -> bool {
        matches!(self, Intent::Action(_))
    }

    /// Whether this intent is a command.
    pub fn is_command(&self) -> bool {
        matches!(self, Intent::Command(_))
    }
}
