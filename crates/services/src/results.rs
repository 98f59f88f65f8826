use std::fmt;
use std::sync::Arc;

use memcard_core::model::ChallengeReport;
use storage::repository::{SessionStore, StorageError};

use crate::error::ResultError;
use crate::keys;

/// Builds accuracy reports from the persisted challenge record.
#[derive(Clone)]
pub struct ResultService {
    session: Arc<dyn SessionStore>,
}

impl ResultService {
    #[must_use]
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }

    /// Build a report from whatever record is currently persisted.
    ///
    /// A missing record reports zero answered cards rather than failing, so
    /// the results view can always render.
    ///
    /// # Errors
    ///
    /// Returns `ResultError::Storage` if the session store cannot be
    /// accessed.
    pub async fn report(&self) -> Result<ChallengeReport, ResultError> {
        let text = match self.session.get(keys::CURRENT_CHALLENGE_KEY).await {
            Ok(text) => text,
            Err(StorageError::NotFound) => String::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(ChallengeReport::from_record_text(&text))
    }
}

impl fmt::Debug for ResultService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultService").finish_non_exhaustive()
    }
}
