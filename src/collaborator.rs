//! Capability traits for external collaborators.
//!
//! The store consumes these but never implements them. Command handlers hold
//! them as narrow interfaces; the engine itself never sees a repository.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::Failure;

/// Entity storage capability.
///
/// Implementations may consult a local cache before a remote source; on a
/// remote success the entity must be persisted locally before returning.
/// Failures cross this boundary as [`Failure`] values, never as panics.
#[async_trait]
pub trait Repository<T: Send>: Send + Sync {
    /// Fetch one entity by id.
    async fn fetch(&self, id: &str) -> Result<T, Failure>;

    /// Persist an entity, returning the stored value.
    async fn save(&self, entity: T) -> Result<T, Failure>;

    /// Lazily enumerate all entities. Each call starts the sequence anew.
    fn list(&self) -> BoxStream<'static, Result<T, Failure>>;
}

/// A business operation composing one or more repository calls into a single
/// result.
///
/// Steps short-circuit on the first failure, which is returned as-is. No
/// rollback of earlier steps is attempted; partially applied work is a known
/// limitation the caller must tolerate.
#[async_trait]
pub trait UseCase: Send + Sync {
    /// Input to the operation.
    type Input: Send + 'static;
    /// Result of a fully successful run.
    type Output: Send + 'static;

    /// Run the operation to completion or first failure.
    async fn execute(&self, input: Self::Input) -> Result<Self::Output, Failure>;
}
