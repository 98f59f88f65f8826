use memcard_core::StudyConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{CatalogService, DisplayService, MediaQueueBuilder, SequenceService};
use storage::repository::Storage;

const CARD_LIST: &str = "\
animals-01
animals-02
animals-03
colors-01
colors-02
";

async fn initialized_storage() -> Storage {
    let storage = Storage::in_memory_with_catalog(CARD_LIST);
    CatalogService::new(storage.catalog.clone(), storage.runtime.clone())
        .initialize()
        .await
        .unwrap();
    SequenceService::new(storage.session.clone(), storage.runtime.clone())
        .initialize()
        .await
        .unwrap();
    storage
}

#[tokio::test]
async fn shuffling_rearranges_but_reload_restores() {
    let storage = initialized_storage().await;
    let sequence_svc = SequenceService::new(storage.session.clone(), storage.runtime.clone());
    let queue = MediaQueueBuilder::new(storage.session.clone(), storage.runtime.clone());

    let default_order: Vec<String> = queue
        .build()
        .await
        .unwrap()
        .iter()
        .map(|id| id.as_str().to_string())
        .collect();
    assert_eq!(
        default_order,
        vec!["animals-01", "animals-02", "animals-03", "colors-01", "colors-02"]
    );

    let mut rng = StdRng::seed_from_u64(3);
    sequence_svc.shuffle_all_with(&mut rng).await.unwrap();

    let shuffled = queue.build().await.unwrap();
    assert_eq!(shuffled.len(), 5);

    // Shuffling never moves a card across its category boundary.
    assert!(
        shuffled[..3]
            .iter()
            .all(|id| id.as_str().starts_with("animals-"))
    );
    assert!(
        shuffled[3..]
            .iter()
            .all(|id| id.as_str().starts_with("colors-"))
    );

    sequence_svc.reload_default_all().await.unwrap();
    let restored: Vec<String> = queue
        .build()
        .await
        .unwrap()
        .iter()
        .map(|id| id.as_str().to_string())
        .collect();
    assert_eq!(restored, default_order);
}

#[tokio::test]
async fn display_mode_walks_the_queue_snapshot() {
    let storage = initialized_storage().await;
    let display_svc = DisplayService::new(MediaQueueBuilder::new(
        storage.session.clone(),
        storage.runtime.clone(),
    ));

    let config = StudyConfig::parse("DisplayMode_AutoCycle_interval=1\n");
    let mut run = display_svc.start(&config).await.unwrap();
    assert_eq!(run.total_cards(), 5);
    assert_eq!(run.auto_cycle_interval().as_secs(), 1);

    let mut seen = vec![run.current().as_str().to_string()];
    while run.next() {
        seen.push(run.current().as_str().to_string());
    }
    assert_eq!(
        seen,
        vec!["animals-01", "animals-02", "animals-03", "colors-01", "colors-02"]
    );

    // Auto-cycle wraps from the end back to the start.
    run.advance_cycling();
    assert_eq!(run.current().as_str(), "animals-01");
}
