use std::fmt;
use std::sync::Arc;

use memcard_core::Clock;
use memcard_core::model::CardId;
use storage::repository::SessionStore;
use tracing::info;

use super::run::ChallengeRun;
use crate::error::ChallengeError;
use crate::keys;
use crate::queue::MediaQueueBuilder;

/// Result of answering a single card in a challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeAnswer {
    pub card_id: CardId,
    pub is_exhausted: bool,
}

/// Orchestrates challenge start and persisted answering.
///
/// The persisted record under the `CurrentChallenge` key is rewritten in full
/// after every answer, so the session store always holds a complete snapshot
/// of the run so far.
#[derive(Clone)]
pub struct ChallengeService {
    clock: Clock,
    session: Arc<dyn SessionStore>,
    queue: MediaQueueBuilder,
}

impl ChallengeService {
    #[must_use]
    pub fn new(clock: Clock, session: Arc<dyn SessionStore>, queue: MediaQueueBuilder) -> Self {
        Self {
            clock,
            session,
            queue,
        }
    }

    /// Start a new challenge over a fresh queue snapshot.
    ///
    /// The persisted record is reset to empty before the first answer.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError::EmptyQueue` if no cards are available, and
    /// propagates queue or session store failures.
    pub async fn start(&self) -> Result<ChallengeRun, ChallengeError> {
        let queue = self.queue.build().await?;
        let run = ChallengeRun::new(queue, self.clock.now())?;
        self.session.set(keys::CURRENT_CHALLENGE_KEY, "").await?;
        info!("Challenge started with {} cards", run.total_cards());
        Ok(run)
    }

    /// Answer the current card, persist the updated record, and advance.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError::Finalized` or `ChallengeError::Exhausted` for
    /// invalid answers and `ChallengeError::Storage` if persistence fails.
    pub async fn answer(
        &self,
        run: &mut ChallengeRun,
        remembered: bool,
    ) -> Result<ChallengeAnswer, ChallengeError> {
        let card_id = run.record_answer(remembered)?;
        self.session
            .set(keys::CURRENT_CHALLENGE_KEY, &run.record().to_text())
            .await?;
        Ok(ChallengeAnswer {
            card_id,
            is_exhausted: run.is_exhausted(),
        })
    }

    /// Mark the challenge finished, freezing its record.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError::Finalized` if called twice.
    pub fn finalize(&self, run: &mut ChallengeRun) -> Result<(), ChallengeError> {
        run.finalize(self.clock.now())?;
        info!(
            "Challenge finalized with {}/{} cards answered",
            run.record().len(),
            run.total_cards()
        );
        Ok(())
    }
}

impl fmt::Debug for ChallengeService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChallengeService")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
