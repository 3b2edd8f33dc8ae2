#![allow(dead_code)]

use std::path::Path;
use tempfile::TempDir;
use thesaurus::config::StoreConfig;
use thesaurus::models::word::WordRecord;
use thesaurus::services::word_service::WordStore;

pub fn sqlite_url(path: &Path) -> String {
    format!("sqlite://{}?mode=rwc", path.display())
}

/// 临时目录里的 SQLite 库，TempDir 需要活到测试结束
pub async fn temp_store() -> (TempDir, WordStore) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let url = sqlite_url(&dir.path().join("words.db"));
    let store = WordStore::new(StoreConfig::new(url));
    store.ensure_schema().await.expect("create schema");
    (dir, store)
}

pub async fn seeded_store(records: &[WordRecord]) -> (TempDir, WordStore) {
    let (dir, store) = temp_store().await;
    for record in records {
        store.insert(record).await.expect("seed record");
    }
    (dir, store)
}

pub fn record(word: &str, meaning: &str, synonyms: &str, antonyms: &str) -> WordRecord {
    WordRecord::new(word, meaning, synonyms, antonyms)
}
