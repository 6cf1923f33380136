/*!
 * Tests for the history repository over a real database file
 */

use crate::common::{create_temp_dir, draft};
use traduki::database::repository::HistoryRepository;
use tokio_test::assert_ok;

#[tokio::test]
async fn test_open_shouldCreateDatabaseFileAndParentDirs() {
    let dir = create_temp_dir().unwrap();
    let db_path = dir.path().join("nested").join("history.db");

    let repo = HistoryRepository::open(&db_path).unwrap();
    assert_ok!(repo.add_record(draft("hello").stamped(1)).await);

    assert!(db_path.exists());
}

#[tokio::test]
async fn test_records_shouldSurviveReopen() {
    let dir = create_temp_dir().unwrap();
    let db_path = dir.path().join("history.db");

    {
        let repo = HistoryRepository::open(&db_path).unwrap();
        repo.add_record(draft("persisted").stamped(42)).await.unwrap();
    }

    let reopened = HistoryRepository::open(&db_path).unwrap();
    let records = reopened.get_recent(10).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source_text, "persisted");
    assert_eq!(records[0].created_at, 42);
}

#[tokio::test]
async fn test_idAssignment_shouldStayMonotoneAcrossReopen() {
    let dir = create_temp_dir().unwrap();
    let db_path = dir.path().join("history.db");

    let first_id = {
        let repo = HistoryRepository::open(&db_path).unwrap();
        let id = repo.add_record(draft("one").stamped(1)).await.unwrap();
        repo.delete_record(id).await.unwrap();
        id
    };

    let reopened = HistoryRepository::open(&db_path).unwrap();
    let second_id = reopened.add_record(draft("two").stamped(2)).await.unwrap();

    assert!(second_id > first_id, "deleted ids must not come back");
}

#[tokio::test]
async fn test_addRecordsBulk_shouldCommitAllRowsTogether() {
    let dir = create_temp_dir().unwrap();
    let db_path = dir.path().join("history.db");
    let repo = HistoryRepository::open(&db_path).unwrap();

    let batch = vec![
        draft("a").stamped(7),
        draft("b").stamped(7),
        draft("c").stamped(7),
    ];
    let ids = repo.add_records_bulk(batch).await.unwrap();

    assert_eq!(ids.len(), 3);
    assert_eq!(repo.count().await.unwrap(), 3);

    let records = repo.get_recent(10).await.unwrap();
    assert!(records.iter().all(|r| r.created_at == 7));
}

#[tokio::test]
async fn test_twoHandles_shouldSeeEachOthersWrites() {
    let dir = create_temp_dir().unwrap();
    let db_path = dir.path().join("history.db");

    let writer = HistoryRepository::open(&db_path).unwrap();
    let reader = HistoryRepository::open(&db_path).unwrap();

    writer.add_record(draft("shared").stamped(5)).await.unwrap();

    let records = reader.get_recent(10).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source_text, "shared");
}

#[tokio::test]
async fn test_optionalMetadata_shouldRoundTrip() {
    let dir = create_temp_dir().unwrap();
    let db_path = dir.path().join("history.db");
    let repo = HistoryRepository::open(&db_path).unwrap();

    let with_metadata = traduki::database::models::TranslationDraft::new(
        "hello", "hallo", "en", "de",
    )
    .with_model("gemini-2.5-flash")
    .with_prompt("Translate this text from English to German")
    .stamped(9);

    repo.add_record(with_metadata).await.unwrap();
    repo.add_record(draft("plain").stamped(10)).await.unwrap();

    let records = repo.get_recent(10).await.unwrap();
    assert_eq!(records[0].source_text, "plain");
    assert!(records[0].model.is_none());
    assert_eq!(records[1].model.as_deref(), Some("gemini-2.5-flash"));
    assert!(records[1].prompt.as_deref().unwrap().starts_with("Translate"));
}
