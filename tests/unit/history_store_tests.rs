/*!
 * Tests for the reactive history store
 */

use crate::common::{draft, in_memory_store};
use traduki::database::models::TranslationDraft;
use traduki::history::store::RECENT_LIMIT;

#[tokio::test]
async fn test_init_calledTwice_shouldPerformExactlyOneRead() {
    let store = in_memory_store();

    store.init().await.unwrap();
    assert!(store.is_ready());

    // A write that bypasses the store is only visible after an explicit
    // refresh; a second init must not re-read.
    store
        .repository()
        .add_record(draft("behind the back").stamped(123))
        .await
        .unwrap();

    store.init().await.unwrap();
    assert!(
        store.items().is_empty(),
        "init after ready must be a no-op"
    );

    store.refresh().await.unwrap();
    assert_eq!(store.items().len(), 1);
}

#[tokio::test]
async fn test_push_shouldSatisfyReadYourWrites() {
    let store = in_memory_store();
    store.init().await.unwrap();

    let id = store
        .push(TranslationDraft::new("guten Tag", "добрий день", "de", "ukr"))
        .await
        .unwrap();

    let items = store.items();
    let record = items
        .iter()
        .find(|r| r.id == id)
        .expect("pushed record must be in items");

    assert_eq!(record.source_text, "guten Tag");
    assert_eq!(record.translated_text, "добрий день");
    assert_eq!(record.from_lang, "de");
    assert_eq!(record.to_lang, "ukr");
    assert!(record.model.is_none());
    assert!(record.prompt.is_none());
    assert!(record.created_at > 0);

    // It sits before every record with an earlier timestamp
    let position = items.iter().position(|r| r.id == id).unwrap();
    for earlier in &items[position + 1..] {
        assert!(earlier.created_at <= record.created_at);
    }
}

#[tokio::test]
async fn test_items_shouldAlwaysBeOrderedByCreatedAtDescending() {
    let store = in_memory_store();
    store.init().await.unwrap();

    for i in 0..25 {
        store.push(draft(&format!("item {}", i))).await.unwrap();
    }

    let items = store.items();
    for pair in items.windows(2) {
        assert!(
            pair[0].created_at >= pair[1].created_at,
            "items must be most recent first"
        );
    }
}

#[tokio::test]
async fn test_pushMany_shouldStampTheWholeBatchWithOneTimestamp() {
    let store = in_memory_store();
    store.init().await.unwrap();

    let ids = store
        .push_many(vec![draft("r1"), draft("r2"), draft("r3")])
        .await
        .unwrap();
    assert_eq!(ids.len(), 3);

    let items = store.items();
    let batch: Vec<_> = items.iter().filter(|r| ids.contains(&r.id)).collect();
    assert_eq!(batch.len(), 3);

    let stamp = batch[0].created_at;
    assert!(
        batch.iter().all(|r| r.created_at == stamp),
        "bulk records must share one timestamp"
    );
}

#[tokio::test]
async fn test_cache_shouldTruncateToTheRetrievalLimit() {
    let store = in_memory_store();
    store.init().await.unwrap();

    for i in 0..250 {
        store.push(draft(&format!("record {}", i))).await.unwrap();
        assert!(store.items().len() <= RECENT_LIMIT);
    }

    let items = store.items();
    assert_eq!(items.len(), RECENT_LIMIT);

    // The 200 cached records are the 200 most recent inserts; ids are
    // monotone, so the oldest 50 must be gone from the view
    let min_cached_id = items.iter().map(|r| r.id).min().unwrap();
    let max_cached_id = items.iter().map(|r| r.id).max().unwrap();
    assert_eq!(max_cached_id - min_cached_id + 1, RECENT_LIMIT as i64);

    // Everything is still durably stored
    assert_eq!(store.repository().count().await.unwrap(), 250);
}

#[tokio::test]
async fn test_remove_shouldDeleteAndStayIdempotent() {
    let store = in_memory_store();
    store.init().await.unwrap();

    let keep = store.push(draft("keep")).await.unwrap();
    let gone = store.push(draft("gone")).await.unwrap();

    store.remove(gone).await.unwrap();
    assert!(store.items().iter().all(|r| r.id != gone));
    assert!(store.items().iter().any(|r| r.id == keep));

    // Deleting the same id again succeeds and changes nothing
    store.remove(gone).await.unwrap();
    assert_eq!(store.items().len(), 1);
}

#[tokio::test]
async fn test_reset_shouldEmptyCacheAndPersistentStore() {
    let store = in_memory_store();
    store.init().await.unwrap();

    store
        .push_many(vec![draft("a"), draft("b"), draft("c")])
        .await
        .unwrap();
    store.reset().await.unwrap();

    assert!(store.items().is_empty());
    assert!(
        store
            .repository()
            .get_recent(RECENT_LIMIT)
            .await
            .unwrap()
            .is_empty(),
        "a direct read after reset must also be empty"
    );
}

#[tokio::test]
async fn test_push_shouldAssignFreshIdsAfterDeletion() {
    let store = in_memory_store();
    store.init().await.unwrap();

    let first = store.push(draft("first")).await.unwrap();
    store.remove(first).await.unwrap();
    let second = store.push(draft("second")).await.unwrap();

    assert!(second > first, "ids must never be reused");
}
