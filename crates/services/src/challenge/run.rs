use chrono::{DateTime, Utc};
use std::fmt;

use memcard_core::model::{CardId, ChallengeRecord};

use super::progress::ChallengeProgress;
use crate::error::ChallengeError;

//
// ─── CHALLENGE RUN ─────────────────────────────────────────────────────────────
//

/// In-memory state for one answer-mode pass over the study queue.
///
/// Steps through the queue snapshot one card at a time, collecting answers in
/// a [`ChallengeRecord`]. Moving back and re-answering a card overwrites its
/// earlier answer without changing its place in the record.
pub struct ChallengeRun {
    queue: Vec<CardId>,
    cursor: usize,
    record: ChallengeRecord,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl ChallengeRun {
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    pub(crate) fn new(queue: Vec<CardId>, started_at: DateTime<Utc>) -> Result<Self, ChallengeError> {
        if queue.is_empty() {
            return Err(ChallengeError::EmptyQueue);
        }
        Ok(Self {
            queue,
            cursor: 0,
            record: ChallengeRecord::new(),
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn queue(&self) -> &[CardId] {
        &self.queue
    }

    #[must_use]
    pub fn record(&self) -> &ChallengeRecord {
        &self.record
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Total number of cards in this challenge.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.queue.len()
    }

    /// The card waiting for an answer, or `None` past the end of the queue.
    #[must_use]
    pub fn current(&self) -> Option<&CardId> {
        self.queue.get(self.cursor)
    }

    /// True once the cursor has stepped past the last card.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.queue.len()
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Returns a summary of the current challenge progress.
    #[must_use]
    pub fn progress(&self) -> ChallengeProgress {
        ChallengeProgress {
            total: self.queue.len(),
            answered: self.record.len(),
            position: self.cursor,
            is_exhausted: self.is_exhausted(),
        }
    }

    /// Step forward one card, stopping at the exhausted position past the end.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError::Finalized` if the challenge is already
    /// finished.
    pub fn advance(&mut self) -> Result<(), ChallengeError> {
        if self.is_finalized() {
            return Err(ChallengeError::Finalized);
        }
        if self.cursor < self.queue.len() {
            self.cursor += 1;
        }
        Ok(())
    }

    /// Step back one card, stopping at the first.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError::Finalized` if the challenge is already
    /// finished.
    pub fn retreat(&mut self) -> Result<(), ChallengeError> {
        if self.is_finalized() {
            return Err(ChallengeError::Finalized);
        }
        self.cursor = self.cursor.saturating_sub(1);
        Ok(())
    }

    /// Record an answer for the current card and advance past it.
    pub(crate) fn record_answer(&mut self, remembered: bool) -> Result<CardId, ChallengeError> {
        if self.is_finalized() {
            return Err(ChallengeError::Finalized);
        }
        let Some(card_id) = self.current().cloned() else {
            return Err(ChallengeError::Exhausted);
        };
        self.record.record(card_id.clone(), remembered);
        self.cursor += 1;
        Ok(card_id)
    }

    pub(crate) fn finalize(&mut self, completed_at: DateTime<Utc>) -> Result<(), ChallengeError> {
        if self.is_finalized() {
            return Err(ChallengeError::Finalized);
        }
        self.completed_at = Some(completed_at);
        Ok(())
    }
}

impl fmt::Debug for ChallengeRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChallengeRun")
            .field("queue_len", &self.queue.len())
            .field("cursor", &self.cursor)
            .field("answered", &self.record.len())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use memcard_core::time::fixed_now;

    fn card_ids(raws: &[&str]) -> Vec<CardId> {
        raws.iter().map(|raw| CardId::new(*raw).unwrap()).collect()
    }

    fn build_run(raws: &[&str]) -> ChallengeRun {
        ChallengeRun::new(card_ids(raws), fixed_now()).unwrap()
    }

    #[test]
    fn empty_queue_refuses_to_start() {
        let err = ChallengeRun::new(Vec::new(), fixed_now()).unwrap_err();
        assert!(matches!(err, ChallengeError::EmptyQueue));
    }

    #[test]
    fn answers_advance_through_the_queue() {
        let mut run = build_run(&["colors-01", "colors-02"]);

        assert_eq!(run.current().unwrap().as_str(), "colors-01");
        let answered = run.record_answer(true).unwrap();
        assert_eq!(answered.as_str(), "colors-01");

        assert_eq!(run.current().unwrap().as_str(), "colors-02");
        run.record_answer(false).unwrap();

        assert!(run.is_exhausted());
        assert!(run.current().is_none());
        assert!(matches!(
            run.record_answer(true),
            Err(ChallengeError::Exhausted)
        ));
    }

    #[test]
    fn retreat_allows_changing_an_earlier_answer() {
        let mut run = build_run(&["colors-01", "colors-02"]);
        run.record_answer(false).unwrap();
        run.record_answer(false).unwrap();

        run.retreat().unwrap();
        run.retreat().unwrap();
        assert_eq!(run.current().unwrap().as_str(), "colors-01");

        run.record_answer(true).unwrap();

        // The corrected answer keeps its original place in the record.
        let entries = run.record().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0.as_str(), "colors-01");
        assert!(entries[0].1);
        assert!(!entries[1].1);
    }

    #[test]
    fn retreat_stops_at_the_first_card() {
        let mut run = build_run(&["colors-01"]);
        run.retreat().unwrap();
        assert_eq!(run.current().unwrap().as_str(), "colors-01");
    }

    #[test]
    fn advance_stops_at_the_exhausted_position() {
        let mut run = build_run(&["colors-01"]);
        run.advance().unwrap();
        run.advance().unwrap();
        assert!(run.is_exhausted());

        // Skipped cards are simply absent from the record.
        assert!(run.record().is_empty());
    }

    #[test]
    fn finalize_freezes_the_run() {
        let mut run = build_run(&["colors-01"]);
        run.record_answer(true).unwrap();
        run.finalize(fixed_now()).unwrap();

        assert!(run.is_finalized());
        assert_eq!(run.completed_at(), Some(fixed_now()));
        assert!(matches!(
            run.record_answer(true),
            Err(ChallengeError::Finalized)
        ));
        assert!(matches!(run.advance(), Err(ChallengeError::Finalized)));
        assert!(matches!(run.retreat(), Err(ChallengeError::Finalized)));
        assert!(matches!(
            run.finalize(fixed_now()),
            Err(ChallengeError::Finalized)
        ));
    }

    #[test]
    fn progress_reflects_position_and_answers() {
        let mut run = build_run(&["colors-01", "colors-02", "colors-03"]);
        run.record_answer(true).unwrap();

        let progress = run.progress();
        assert_eq!(
            progress,
            ChallengeProgress {
                total: 3,
                answered: 1,
                position: 1,
                is_exhausted: false,
            }
        );
    }
}
