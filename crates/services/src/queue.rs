use std::fmt;
use std::sync::Arc;

use memcard_core::model::CardId;
use storage::repository::{RuntimeStore, SessionStore, StorageError};
use tracing::warn;

use crate::error::QueueError;
use crate::keys;

/// Flattens the per-category working sequences into one ordered study queue.
///
/// Categories contribute in category-index order, so the queue walks
/// categories alphabetically while each category's cards keep whatever order
/// its working sequence currently holds.
#[derive(Clone)]
pub struct MediaQueueBuilder {
    session: Arc<dyn SessionStore>,
    runtime: Arc<dyn RuntimeStore>,
}

impl MediaQueueBuilder {
    #[must_use]
    pub fn new(session: Arc<dyn SessionStore>, runtime: Arc<dyn RuntimeStore>) -> Self {
        Self { session, runtime }
    }

    /// Build a queue snapshot from the working sequences.
    ///
    /// Categories without a working sequence are skipped with a warning, and
    /// a missing category index yields an empty queue. Later sequence changes
    /// do not affect a snapshot already handed out.
    ///
    /// # Errors
    ///
    /// Returns `QueueError` if the session store cannot be accessed or a
    /// stored sequence fails to decode.
    pub async fn build(&self) -> Result<Vec<CardId>, QueueError> {
        let categories = match self.runtime.read_category_index().await {
            Ok(categories) => categories,
            Err(StorageError::NotFound) => {
                warn!("Category index is missing, queue is empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut queue = Vec::new();
        for category in categories {
            match keys::read_sequence(self.session.as_ref(), &category).await? {
                Some(card_ids) => queue.extend(card_ids),
                None => {
                    warn!(
                        "Working sequence for category {} is missing, skipping",
                        category
                    );
                }
            }
        }
        Ok(queue)
    }
}

impl fmt::Debug for MediaQueueBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaQueueBuilder").finish_non_exhaustive()
    }
}
