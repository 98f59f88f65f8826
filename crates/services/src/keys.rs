//! Session-store key grammar shared by the study services.
//!
//! Working sequences are stored as JSON arrays of card-id strings under
//! `currentSequence-category-<category>`. The in-progress challenge record
//! lives under `CurrentChallenge`.

use memcard_core::model::{CardId, Category};
use storage::repository::{SessionStore, StorageError};

use crate::error::SequenceError;

pub(crate) const CURRENT_CHALLENGE_KEY: &str = "CurrentChallenge";

pub(crate) fn sequence_key(category: &Category) -> String {
    format!("currentSequence-category-{category}")
}

/// Read one category's working sequence, if any has been stored.
pub(crate) async fn read_sequence(
    session: &dyn SessionStore,
    category: &Category,
) -> Result<Option<Vec<CardId>>, SequenceError> {
    match session.get(&sequence_key(category)).await {
        Ok(text) => {
            let card_ids: Vec<CardId> =
                serde_json::from_str(&text).map_err(|e| SequenceError::Decode(e.to_string()))?;
            Ok(Some(card_ids))
        }
        Err(StorageError::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Store one category's working sequence, replacing any previous value.
pub(crate) async fn write_sequence(
    session: &dyn SessionStore,
    category: &Category,
    card_ids: &[CardId],
) -> Result<(), SequenceError> {
    let text =
        serde_json::to_string(card_ids).map_err(|e| SequenceError::Decode(e.to_string()))?;
    session.set(&sequence_key(category), &text).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemorySessionStore;

    fn category(raw: &str) -> Category {
        Category::new(raw).unwrap()
    }

    fn card_id(raw: &str) -> CardId {
        CardId::new(raw).unwrap()
    }

    #[test]
    fn sequence_key_embeds_the_category_name() {
        assert_eq!(
            sequence_key(&category("colors")),
            "currentSequence-category-colors"
        );
    }

    #[tokio::test]
    async fn sequences_round_trip_as_json_arrays() {
        let session = InMemorySessionStore::new();
        let colors = category("colors");
        let cards = vec![card_id("colors-01"), card_id("colors-02-red")];

        write_sequence(&session, &colors, &cards).await.unwrap();

        let raw = session.get("currentSequence-category-colors").await.unwrap();
        assert_eq!(raw, r#"["colors-01","colors-02-red"]"#);

        let read_back = read_sequence(&session, &colors).await.unwrap();
        assert_eq!(read_back, Some(cards));
    }

    #[tokio::test]
    async fn missing_sequence_reads_as_none() {
        let session = InMemorySessionStore::new();
        let read_back = read_sequence(&session, &category("colors")).await.unwrap();
        assert_eq!(read_back, None);
    }

    #[tokio::test]
    async fn corrupt_sequence_reports_decode_error() {
        let session = InMemorySessionStore::new();
        session
            .set("currentSequence-category-colors", "not json")
            .await
            .unwrap();

        let err = read_sequence(&session, &category("colors"))
            .await
            .unwrap_err();
        assert!(matches!(err, SequenceError::Decode(_)));
    }
}
