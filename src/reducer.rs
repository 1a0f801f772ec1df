//! Reducer trait: the only place state transitions happen.

/// Pure state-transition function over the closed action set.
///
/// `reduce` must be total and synchronous: no I/O, no awaiting, no failure
/// paths. The dispatch loop is its sole caller, so no two invocations ever
/// overlap and every transition observes the state produced by the previous
/// one.
///
/// Work that needs a collaborator belongs in a
/// [`CommandHandler`](crate::CommandHandler); by construction commands never
/// reach the reducer.
pub trait Reducer: Send + 'static {
    /// Immutable state snapshot. Replaced wholesale on every reduction,
    /// never mutated in place.
    type State: Clone + PartialEq + Send + Sync + 'static;

    /// The action intents this reducer resolves.
    type Action: Send + 'static;

    /// One-shot notifications the reducer may emit alongside a transition.
    type Effect: Clone + Send + 'static;

    /// Resolve one action against the current state, returning the successor
    /// state and the effects to emit, in order.
    fn reduce(
        &self,
        action: Self::Action,
        state: &Self::State,
    ) -> (Self::State, Vec<Self::Effect>);
}
