mod common;

use common::{record, seeded_store, temp_store};
use sqlx::Connection;
use thesaurus::config::StoreConfig;
use thesaurus::error::{ActionError, StoreError, ValidationError};
use thesaurus::handlers::word_handler::{
    DeleteOutcome, EditorMode, SaveOutcome, SearchOutcome, WordBook, WordType,
};
use thesaurus::models::word::WordForm;
use thesaurus::services::word_service::WordStore;

fn form(word: &str, meaning: &str, synonyms: &str, antonyms: &str) -> WordForm {
    WordForm {
        word: word.to_string(),
        meaning: meaning.to_string(),
        synonyms: synonyms.to_string(),
        antonyms: antonyms.to_string(),
    }
}

async fn seeded_book() -> (tempfile::TempDir, WordBook) {
    let (dir, store) = seeded_store(&[
        record("cat", "a small feline", "kitty", ""),
        record("dog", "a loyal canine", "", "cat"),
        record("run", "to move quickly", "sprint", "walk"),
    ])
    .await;
    let mut book = WordBook::new(store);
    book.refresh(None).await.unwrap();
    (dir, book)
}

#[tokio::test]
async fn test_refresh_loads_words_and_stats() {
    let (_dir, book) = seeded_book().await;
    assert_eq!(book.words().len(), 3);
    let stats = book.stats();
    assert_eq!((stats.total, stats.with_synonyms, stats.with_antonyms), (3, 2, 2));
    assert_eq!(book.selected_index(), None);
}

#[tokio::test]
async fn test_select_out_of_range_is_ignored() {
    let (_dir, mut book) = seeded_book().await;

    assert_eq!(book.select(1).map(|r| r.word.as_str()), Some("dog"));
    book.select(99);
    assert_eq!(book.selected_index(), Some(1));

    book.refresh(None).await.unwrap();
    assert_eq!(book.selected_index(), None);
}

#[tokio::test]
async fn test_search_exact_and_not_found() {
    let (_dir, mut book) = seeded_book().await;

    assert_eq!(book.search("cat").await.unwrap(), SearchOutcome::Found(1));
    assert_eq!(book.words()[0].word, "cat");
    assert_eq!(book.filter(), Some("cat"));

    assert_eq!(
        book.search(" ca ").await.unwrap(),
        SearchOutcome::NotFound("ca".to_string())
    );
    assert!(book.words().is_empty());

    // 空白搜索词等同于不筛选
    assert_eq!(book.search("   ").await.unwrap(), SearchOutcome::Found(3));
    assert_eq!(book.filter(), None);
}

#[tokio::test]
async fn test_word_type_is_decorative_and_clears_filter() {
    let (_dir, mut book) = seeded_book().await;
    book.search("cat").await.unwrap();

    book.set_word_type(WordType::Verb).await.unwrap();
    assert_eq!(book.word_type(), WordType::Verb);
    assert_eq!(book.filter(), None);
    assert_eq!(book.words().len(), 3);
}

#[tokio::test]
async fn test_add_validates_before_touching_store() {
    let (_dir, mut book) = seeded_book().await;

    let err = book
        .save(&EditorMode::Add, &form("", "something", "", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, ActionError::Validation(ValidationError::MissingWord)));

    let err = book
        .save(&EditorMode::Add, &form("owl", "   ", "", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, ActionError::Validation(ValidationError::MissingMeaning)));
    assert_eq!(err.to_string(), "Word and Meaning are required!");

    assert_eq!(book.stats().total, 3);
}

#[tokio::test]
async fn test_add_refreshes_view() {
    let (_dir, mut book) = seeded_book().await;
    book.select(0);

    let applied = book
        .save(&EditorMode::Add, &form(" owl ", "a night bird", "", ""))
        .await
        .unwrap();
    assert_eq!(applied.outcome, SaveOutcome::Added("owl".to_string()));
    assert!(applied.refresh.is_ok());

    assert_eq!(book.stats().total, 4);
    assert_eq!(book.selected_index(), None);
    let owl = book.words().iter().find(|r| r.word == "owl").unwrap();
    assert_eq!(owl.synonyms, "none");
}

#[tokio::test]
async fn test_edit_keeps_word_immutable() {
    let (_dir, mut book) = seeded_book().await;

    assert!(matches!(book.editor_for(false), Err(ActionError::NoSelection)));

    book.select(0);
    let (mode, mut edit) = book.editor_for(false).unwrap();
    assert_eq!(
        mode,
        EditorMode::Edit {
            original_word: "cat".to_string()
        }
    );
    assert_eq!(edit, form("cat", "a small feline", "kitty", ""));

    edit.word = "kitten".to_string();
    edit.meaning = "feline".to_string();
    let applied = book.save(&mode, &edit).await.unwrap();
    assert_eq!(applied.outcome, SaveOutcome::Updated("cat".to_string()));

    book.search("cat").await.unwrap();
    assert_eq!(book.words()[0].meaning, "feline");
    assert_eq!(book.search("kitten").await.unwrap(), SearchOutcome::NotFound("kitten".into()));
}

#[tokio::test]
async fn test_edit_of_vanished_word_reports_not_found() {
    let (_dir, store) = temp_store().await;
    let mut book = WordBook::new(store);
    let mode = EditorMode::Edit {
        original_word: "ghost".to_string(),
    };
    let applied = book
        .save(&mode, &form("ghost", "a spirit", "", ""))
        .await
        .unwrap();
    assert_eq!(applied.outcome, SaveOutcome::NotFound("ghost".to_string()));
}

#[tokio::test]
async fn test_delete_selected() {
    let (_dir, mut book) = seeded_book().await;

    assert!(matches!(
        book.delete_selected().await,
        Err(ActionError::NoSelection)
    ));

    book.select(2);
    let applied = book.delete_selected().await.unwrap();
    assert!(applied.refresh.is_ok());
    assert_eq!(
        applied.outcome,
        DeleteOutcome::Deleted {
            word: "run".to_string(),
            rows: 1
        }
    );
    assert_eq!(book.stats().total, 2);
    assert!(book.words().iter().all(|r| r.word != "run"));
}

#[tokio::test]
async fn test_failed_refresh_leaves_view_unchanged() {
    let (dir, mut book) = seeded_book().await;
    book.select(0);

    let url = common::sqlite_url(&dir.path().join("words.db"));
    let mut conn = sqlx::AnyConnection::connect(&url).await.unwrap();
    sqlx::query("DROP TABLE words").execute(&mut conn).await.unwrap();
    conn.close().await.unwrap();

    assert!(book.refresh(None).await.is_err());
    assert_eq!(book.words().len(), 3);
    assert_eq!(book.selected_index(), Some(0));
    assert_eq!(book.stats().total, 3);
}

#[tokio::test]
async fn test_committed_save_is_reported_when_refresh_fails() {
    let dir = tempfile::tempdir().unwrap();
    let url = common::sqlite_url(&dir.path().join("words.db"));
    let store = WordStore::new(StoreConfig::new(url.clone()));

    // meaning 列不声明类型，触发器把新行的 meaning 改成整数，之后的列表查询无法解码
    let mut conn = sqlx::AnyConnection::connect(&url).await.unwrap();
    for stmt in [
        "CREATE TABLE words (word TEXT NOT NULL, meaning NOT NULL, \
         synonyms TEXT NOT NULL DEFAULT 'none', antonyms TEXT NOT NULL DEFAULT 'none')",
        "CREATE TRIGGER corrupt_meaning AFTER INSERT ON words BEGIN \
         UPDATE words SET meaning = 42 WHERE rowid = NEW.rowid; END",
    ] {
        sqlx::query(stmt).execute(&mut conn).await.unwrap();
    }
    conn.close().await.unwrap();

    let mut book = WordBook::new(store.clone());
    book.refresh(None).await.unwrap();

    let applied = book
        .save(&EditorMode::Add, &form("owl", "a night bird", "", ""))
        .await
        .unwrap();
    assert_eq!(applied.outcome, SaveOutcome::Added("owl".to_string()));
    match applied.refresh {
        Err(StoreError::Statement { operation, .. }) => assert_eq!(operation, "loading words"),
        other => panic!("Expected refresh to fail while loading words, got {other:?}"),
    }

    // 写入只发生一次，界面状态保持刷新前的样子
    assert_eq!(store.count_all().await.unwrap(), 1);
    assert!(book.words().is_empty());
}
