//! Shared error types for the services crate.

use thiserror::Error;

use memcard_core::model::CatalogError;
use storage::repository::StorageError;

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogServiceError {
    #[error("card list is unavailable: {0}")]
    CatalogUnavailable(StorageError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `SequenceService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SequenceError {
    #[error("stored sequence is not valid JSON: {0}")]
    Decode(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `MediaQueueBuilder`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QueueError {
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by challenge services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChallengeError {
    #[error("no cards available for the challenge")]
    EmptyQueue,
    #[error("challenge already finalized")]
    Finalized,
    #[error("every card in the challenge has been answered")]
    Exhausted,
    #[error(transparent)]
    Queue(#[from] QueueError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `DisplayService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DisplayError {
    #[error("no cards available to display")]
    EmptyQueue,
    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Errors emitted by `ResultService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResultError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
