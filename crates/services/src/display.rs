use std::fmt;
use std::time::Duration;

use memcard_core::StudyConfig;
use memcard_core::model::CardId;
use tracing::info;

use crate::error::DisplayError;
use crate::queue::MediaQueueBuilder;

//
// ─── DISPLAY RUN ───────────────────────────────────────────────────────────────
//

/// Cursor over the study queue for browse and auto-cycle modes.
///
/// The queue is never empty and the cursor always points at a card, so there
/// is no exhausted position; cycling wraps back to the first card instead.
pub struct DisplayRun {
    queue: Vec<CardId>,
    cursor: usize,
    auto_cycle_interval: Duration,
}

impl DisplayRun {
    /// The card currently shown.
    #[must_use]
    pub fn current(&self) -> &CardId {
        // cursor stays below queue.len() through every movement.
        &self.queue[self.cursor]
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.cursor + 1 == self.queue.len()
    }

    /// Pause between cards when auto-cycling.
    #[must_use]
    pub fn auto_cycle_interval(&self) -> Duration {
        self.auto_cycle_interval
    }

    /// Step forward one card. Returns `false` at the last card without
    /// moving.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Step back one card. Returns `false` at the first card without moving.
    pub fn prev(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one card, wrapping to the first after the last.
    pub fn advance_cycling(&mut self) {
        self.cursor = (self.cursor + 1) % self.queue.len();
    }
}

impl fmt::Debug for DisplayRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayRun")
            .field("queue_len", &self.queue.len())
            .field("cursor", &self.cursor)
            .field("auto_cycle_interval", &self.auto_cycle_interval)
            .finish_non_exhaustive()
    }
}

//
// ─── DISPLAY SERVICE ───────────────────────────────────────────────────────────
//

/// Starts display-mode passes over the study queue.
#[derive(Clone)]
pub struct DisplayService {
    queue: MediaQueueBuilder,
}

impl DisplayService {
    #[must_use]
    pub fn new(queue: MediaQueueBuilder) -> Self {
        Self { queue }
    }

    /// Start a display pass over a fresh queue snapshot.
    ///
    /// # Errors
    ///
    /// Returns `DisplayError::EmptyQueue` if no cards are available and
    /// propagates queue failures.
    pub async fn start(&self, config: &StudyConfig) -> Result<DisplayRun, DisplayError> {
        let queue = self.queue.build().await?;
        if queue.is_empty() {
            return Err(DisplayError::EmptyQueue);
        }
        info!("Display started with {} cards", queue.len());
        Ok(DisplayRun {
            queue,
            cursor: 0,
            auto_cycle_interval: config.auto_cycle_interval(),
        })
    }
}

impl fmt::Debug for DisplayService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayService").finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use memcard_core::model::Category;
    use std::sync::Arc;
    use storage::repository::{
        InMemoryRuntimeStore, InMemorySessionStore, RuntimeStore, SessionStore,
    };

    async fn seeded_display() -> DisplayService {
        let session = Arc::new(InMemorySessionStore::new());
        let runtime = Arc::new(InMemoryRuntimeStore::new());
        let colors = Category::new("colors").unwrap();
        runtime
            .write_category_index(std::slice::from_ref(&colors))
            .await
            .unwrap();
        session
            .set(
                "currentSequence-category-colors",
                r#"["colors-01","colors-02","colors-03"]"#,
            )
            .await
            .unwrap();
        DisplayService::new(MediaQueueBuilder::new(session, runtime))
    }

    #[tokio::test]
    async fn display_refuses_an_empty_queue() {
        let service = DisplayService::new(MediaQueueBuilder::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(InMemoryRuntimeStore::new()),
        ));

        let err = service.start(&StudyConfig::default()).await.unwrap_err();
        assert!(matches!(err, DisplayError::EmptyQueue));
    }

    #[tokio::test]
    async fn next_and_prev_stop_at_the_ends() {
        let service = seeded_display().await;
        let mut run = service.start(&StudyConfig::default()).await.unwrap();

        assert!(run.is_first());
        assert!(!run.prev());
        assert_eq!(run.current().as_str(), "colors-01");

        assert!(run.next());
        assert!(run.next());
        assert!(run.is_last());
        assert!(!run.next());
        assert_eq!(run.current().as_str(), "colors-03");

        assert!(run.prev());
        assert_eq!(run.current().as_str(), "colors-02");
    }

    #[tokio::test]
    async fn cycling_wraps_past_the_last_card() {
        let service = seeded_display().await;
        let mut run = service.start(&StudyConfig::default()).await.unwrap();

        run.advance_cycling();
        run.advance_cycling();
        assert!(run.is_last());
        run.advance_cycling();
        assert!(run.is_first());
        assert_eq!(run.current().as_str(), "colors-01");
    }

    #[tokio::test]
    async fn interval_comes_from_the_study_config() {
        let service = seeded_display().await;
        let config = StudyConfig::parse("DisplayMode_AutoCycle_interval=2\n");
        let run = service.start(&config).await.unwrap();
        assert_eq!(run.auto_cycle_interval(), Duration::from_secs(2));
    }
}
