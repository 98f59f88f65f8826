use memcard_core::time::fixed_clock;
use services::{
    CatalogService, ChallengeService, MediaQueueBuilder, ResultService, SequenceService,
};
use storage::repository::Storage;

const CARD_LIST: &str = "\
colors-01
colors-02-red
animals-01
animals-02
";

#[tokio::test]
async fn full_study_flow_produces_a_report() {
    let storage = Storage::in_memory_with_catalog(CARD_LIST);

    let catalog_svc = CatalogService::new(storage.catalog.clone(), storage.runtime.clone());
    let catalog = catalog_svc.initialize().await.unwrap();
    assert_eq!(catalog.len(), 4);

    let sequence_svc = SequenceService::new(storage.session.clone(), storage.runtime.clone());
    sequence_svc.initialize().await.unwrap();

    let queue = MediaQueueBuilder::new(storage.session.clone(), storage.runtime.clone());
    let challenge_svc =
        ChallengeService::new(fixed_clock(), storage.session.clone(), queue.clone());

    // Categories come out alphabetically, cards in list order within each.
    let snapshot = queue.build().await.unwrap();
    let ids: Vec<&str> = snapshot.iter().map(|id| id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["animals-01", "animals-02", "colors-01", "colors-02-red"]
    );

    let mut run = challenge_svc.start().await.unwrap();
    let mut remembered = [true, false, true, true].into_iter();
    while !run.is_exhausted() {
        let answer = remembered.next().expect("enough answers");
        challenge_svc.answer(&mut run, answer).await.unwrap();
    }
    challenge_svc.finalize(&mut run).unwrap();

    let report = ResultService::new(storage.session.clone())
        .report()
        .await
        .unwrap();
    assert_eq!(report.total_cards(), 4);
    assert_eq!(report.correct_count(), 3);
    assert!((report.accuracy() - 75.0).abs() < 1e-9);

    let first = &report.rows()[0];
    assert_eq!(first.card_id.as_str(), "animals-01");
    assert!(first.is_correct);
}

#[tokio::test]
async fn revisiting_a_card_updates_the_final_report() {
    let storage = Storage::in_memory_with_catalog("colors-01\ncolors-02\n");

    CatalogService::new(storage.catalog.clone(), storage.runtime.clone())
        .initialize()
        .await
        .unwrap();
    SequenceService::new(storage.session.clone(), storage.runtime.clone())
        .initialize()
        .await
        .unwrap();

    let queue = MediaQueueBuilder::new(storage.session.clone(), storage.runtime.clone());
    let challenge_svc = ChallengeService::new(fixed_clock(), storage.session.clone(), queue);

    let mut run = challenge_svc.start().await.unwrap();
    challenge_svc.answer(&mut run, false).await.unwrap();
    challenge_svc.answer(&mut run, false).await.unwrap();

    // Step back to the first card and correct the answer.
    run.retreat().unwrap();
    run.retreat().unwrap();
    challenge_svc.answer(&mut run, true).await.unwrap();

    let report = ResultService::new(storage.session.clone())
        .report()
        .await
        .unwrap();
    assert_eq!(report.total_cards(), 2);
    assert_eq!(report.correct_count(), 1);
    assert!((report.accuracy() - 50.0).abs() < 1e-9);
    assert_eq!(report.rows()[0].card_id.as_str(), "colors-01");
    assert!(report.rows()[0].is_correct);
}
