/*!
 * End-to-end flow tests: batch queues from files, failure isolation, and
 * article vocabulary extraction.
 */

use std::sync::Arc;

use crate::common::{create_temp_dir, create_test_file, in_memory_store};
use traduki::article::article_keywords;
use traduki::providers::MockProvider;
use traduki::translation::batch::{BatchItemStatus, BatchTranslator, collect_queue};
use traduki::translation::service::TranslationService;

fn translator() -> BatchTranslator {
    BatchTranslator::new(TranslationService::new(Arc::new(MockProvider::working())))
}

#[tokio::test]
async fn test_batchFlow_withRejectedItem_shouldRecordTheRestAndFlagTheFailure() {
    let store = in_memory_store();
    store.init().await.unwrap();

    let queue = vec!["hello".to_string(), "".to_string(), "world".to_string()];
    let report = translator()
        .translate_all(&store, &queue, "en", "ukr", |_, _| {})
        .await
        .unwrap();

    // The two valid items are translated and recorded
    assert_eq!(report.translated_count(), 2);
    assert_eq!(report.record_ids.len(), 2);

    // The empty entry is flagged, not fatal
    let failed: Vec<_> = report
        .outcomes
        .iter()
        .filter(|o| matches!(o.status, BatchItemStatus::Failed { .. }))
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].source_text, "");

    let sources: Vec<String> = store
        .items()
        .iter()
        .map(|r| r.source_text.clone())
        .collect();
    assert!(sources.contains(&"hello".to_string()));
    assert!(sources.contains(&"world".to_string()));
    assert_eq!(sources.len(), 2);
}

#[tokio::test]
async fn test_batchFlow_fromQueueFiles_shouldLoadTxtAndCsv() {
    let dir = create_temp_dir().unwrap();
    let dir_path = dir.path().to_path_buf();
    create_test_file(&dir_path, "words.txt", "apple\nbanana\n\ncherry\n").unwrap();
    create_test_file(
        &dir_path,
        "phrases.csv",
        "text,comment\ngood morning,greeting\nsee you;farewell\n",
    )
    .unwrap();
    // Non-queue files in the directory are ignored
    create_test_file(&dir_path, "notes.md", "ignored").unwrap();

    let queue = collect_queue(&[dir_path]).unwrap();

    assert_eq!(
        queue,
        vec!["good morning", "see you", "apple", "banana", "cherry"]
    );

    let store = in_memory_store();
    store.init().await.unwrap();

    let report = translator()
        .translate_all(&store, &queue, "en", "de", |_, _| {})
        .await
        .unwrap();

    assert_eq!(report.translated_count(), 5);
    assert_eq!(store.items().len(), 5);

    // One bulk write: the whole file queue shares a single timestamp
    let items = store.items();
    let stamp = items[0].created_at;
    assert!(items.iter().all(|r| r.created_at == stamp));
}

#[tokio::test]
async fn test_batchFlow_withIntermittentProvider_shouldKeepGoing() {
    let store = in_memory_store();
    store.init().await.unwrap();

    let service = TranslationService::new(Arc::new(MockProvider::intermittent(3)));
    // Sequential so the nth-request failure pattern is deterministic
    let translator = BatchTranslator::new(service).with_concurrency(1);

    let queue: Vec<String> = (1..=6).map(|i| format!("item {}", i)).collect();
    let report = translator
        .translate_all(&store, &queue, "en", "de", |_, _| {})
        .await
        .unwrap();

    // Requests 3 and 6 fail, the other four succeed
    assert_eq!(report.translated_count(), 4);
    assert_eq!(report.failed_count(), 2);
    assert_eq!(store.items().len(), 4);
}

#[test]
fn test_vocabFlow_keywordExtraction_shouldRankArticleWords() {
    let article = "\
        The borrow checker is the heart of Rust. The borrow checker enforces \
        ownership. Ownership and borrowing make Rust memory safe without a \
        garbage collector. Borrowing rules are checked at compile time.";

    let keywords = article_keywords(article, "en");

    let words: Vec<&str> = keywords.iter().map(|k| k.word.as_str()).collect();
    assert!(words.contains(&"borrow"));
    assert!(words.contains(&"ownership"));
    assert!(words.contains(&"rust"));
    // Stopwords never make the list
    assert!(!words.contains(&"the"));
    assert!(!words.contains(&"and"));

    // Sorted by frequency
    for pair in keywords.windows(2) {
        assert!(pair[0].count >= pair[1].count);
    }
}

#[tokio::test]
async fn test_vocabFlow_selectedWords_shouldLandInHistoryOncePerWord() {
    let article = "compiler compiler compiler ownership ownership lifetime";
    let keywords = article_keywords(article, "en");
    let top_words: Vec<String> = keywords.iter().take(2).map(|k| k.word.clone()).collect();
    assert_eq!(top_words, vec!["compiler", "ownership"]);

    let store = in_memory_store();
    store.init().await.unwrap();

    let report = translator()
        .translate_all(&store, &top_words, "en", "ukr", |_, _| {})
        .await
        .unwrap();

    assert_eq!(report.translated_count(), 2);
    let items = store.items();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|r| r.to_lang == "ukr"));
    assert!(items.iter().all(|r| r.translated_text.starts_with("[en->ukr]")));
}
