use rand::Rng;
use rand::rng;
use rand::seq::SliceRandom;
use std::fmt;
use std::sync::Arc;

use memcard_core::model::{CardId, Category};
use storage::repository::{RuntimeStore, SessionStore, StorageError};
use tracing::warn;

use crate::error::SequenceError;
use crate::keys;

//
// ─── SEQUENCE SERVICE ──────────────────────────────────────────────────────────
//

/// Manages the per-category working sequences used to drive study modes.
///
/// Each indexed category owns one working sequence in the session store.
/// Sequences start as copies of the generated default orders and can be
/// shuffled or restored independently of the files they were seeded from.
#[derive(Clone)]
pub struct SequenceService {
    session: Arc<dyn SessionStore>,
    runtime: Arc<dyn RuntimeStore>,
}

impl SequenceService {
    #[must_use]
    pub fn new(session: Arc<dyn SessionStore>, runtime: Arc<dyn RuntimeStore>) -> Self {
        Self { session, runtime }
    }

    /// Seed a working sequence for every indexed category from its default
    /// order.
    ///
    /// Categories whose default order is missing, unreadable, or empty are
    /// skipped with a warning and end up with no working sequence.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError` if the category index or the session store
    /// cannot be accessed.
    pub async fn initialize(&self) -> Result<(), SequenceError> {
        for category in self.known_categories().await? {
            match self.runtime.read_default_sequence(&category).await {
                Ok(card_ids) if card_ids.is_empty() => {
                    warn!("Default order for category {} is empty, skipping", category);
                }
                Ok(card_ids) => {
                    keys::write_sequence(self.session.as_ref(), &category, &card_ids).await?;
                }
                Err(e) => {
                    warn!(
                        "Default order for category {} is unavailable, skipping: {}",
                        category, e
                    );
                }
            }
        }
        Ok(())
    }

    /// Restore every working sequence to its category's default order.
    ///
    /// A category whose default order cannot be read falls back to an empty
    /// working sequence with a warning.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError` if the category index or the session store
    /// cannot be accessed.
    pub async fn reload_default_all(&self) -> Result<(), SequenceError> {
        for category in self.known_categories().await? {
            let card_ids = match self.runtime.read_default_sequence(&category).await {
                Ok(card_ids) => card_ids,
                Err(e) => {
                    warn!(
                        "Default order for category {} is unavailable, clearing: {}",
                        category, e
                    );
                    Vec::new()
                }
            };
            keys::write_sequence(self.session.as_ref(), &category, &card_ids).await?;
        }
        Ok(())
    }

    /// Shuffle every working sequence in place, each category independently.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError` if sequences cannot be read or written back.
    pub async fn shuffle_all(&self) -> Result<(), SequenceError> {
        let mut sequences = self.load_current_sequences().await?;
        {
            let mut rng = rng();
            shuffle_sequences(&mut sequences, &mut rng);
        }
        self.store_current_sequences(&sequences).await
    }

    /// Shuffle every working sequence using a caller-provided source of
    /// randomness.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError` if sequences cannot be read or written back.
    pub async fn shuffle_all_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(), SequenceError> {
        let mut sequences = self.load_current_sequences().await?;
        shuffle_sequences(&mut sequences, rng);
        self.store_current_sequences(&sequences).await
    }

    /// Read one category's working sequence, if any has been stored.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError` if the session store cannot be accessed or the
    /// stored value fails to decode.
    pub async fn current_sequence(
        &self,
        category: &Category,
    ) -> Result<Option<Vec<CardId>>, SequenceError> {
        keys::read_sequence(self.session.as_ref(), category).await
    }

    async fn known_categories(&self) -> Result<Vec<Category>, SequenceError> {
        match self.runtime.read_category_index().await {
            Ok(categories) => Ok(categories),
            Err(StorageError::NotFound) => {
                warn!("Category index is missing, no sequences to manage");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn load_current_sequences(
        &self,
    ) -> Result<Vec<(Category, Vec<CardId>)>, SequenceError> {
        let mut sequences = Vec::new();
        for category in self.known_categories().await? {
            match keys::read_sequence(self.session.as_ref(), &category).await? {
                Some(card_ids) if !card_ids.is_empty() => sequences.push((category, card_ids)),
                Some(_) => {}
                None => {
                    warn!("Working sequence for category {} is missing", category);
                }
            }
        }
        Ok(sequences)
    }

    async fn store_current_sequences(
        &self,
        sequences: &[(Category, Vec<CardId>)],
    ) -> Result<(), SequenceError> {
        for (category, card_ids) in sequences {
            keys::write_sequence(self.session.as_ref(), category, card_ids).await?;
        }
        Ok(())
    }
}

fn shuffle_sequences<R: Rng + ?Sized>(sequences: &mut [(Category, Vec<CardId>)], rng: &mut R) {
    for (_, sequence) in sequences.iter_mut() {
        sequence.as_mut_slice().shuffle(rng);
    }
}

impl fmt::Debug for SequenceService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceService").finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
