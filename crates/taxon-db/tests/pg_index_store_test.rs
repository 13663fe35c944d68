//! Integration tests for the PostgreSQL index store.
//!
//! Requires a reachable database; run with `cargo test -- --ignored`.

use taxon_db::test_fixtures::TestDatabase;
use taxon_db::{IndexStore, SortKey, TermCount};

fn key(seconds: i64) -> SortKey {
    SortKey::from_unix_seconds(seconds)
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_save_twice_keeps_single_entry() {
    dotenvy::dotenv().ok();
    let test_db = TestDatabase::new().await;
    let index = test_db.index_name().to_string();
    let store = &test_db.db.entries;

    store.save(&index, "/a", "rust", &key(100)).await.unwrap();
    store.save(&index, "/a", "rust", &key(100)).await.unwrap();

    let entries = store.entries_for_location(&index, "/a").await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].sort_key, key(100));

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_entries_for_term_sorted_newest_first() {
    dotenvy::dotenv().ok();
    let test_db = TestDatabase::new().await;
    let index = test_db.index_name().to_string();
    let store = &test_db.db.entries;

    store.save(&index, "/old", "rust", &key(10)).await.unwrap();
    store.save(&index, "/new", "rust", &key(30)).await.unwrap();
    store.save(&index, "/mid", "rust", &key(20)).await.unwrap();

    let locations: Vec<String> = store
        .entries_for_term(&index, "rust")
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.location)
        .collect();
    assert_eq!(locations, vec!["/new", "/mid", "/old"]);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_distinct_values_and_delete_location() {
    dotenvy::dotenv().ok();
    let test_db = TestDatabase::new().await;
    let index = test_db.index_name().to_string();
    let store = &test_db.db.entries;

    store.save(&index, "/a", "rust", &key(10)).await.unwrap();
    store.save(&index, "/b", "rust", &key(50)).await.unwrap();
    store.save(&index, "/a", "go", &key(30)).await.unwrap();

    let terms = store.list_distinct_values(&index).await.unwrap();
    assert_eq!(
        terms,
        vec![
            TermCount {
                term: "rust".to_string(),
                count: 2
            },
            TermCount {
                term: "go".to_string(),
                count: 1
            },
        ]
    );

    assert_eq!(store.delete_location(&index, "/a").await.unwrap(), 2);
    let remaining = store.list_distinct_values(&index).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].term, "rust");

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // Requires DATABASE_URL with migrated database
async fn test_cleanup_removes_fixture_entries() {
    dotenvy::dotenv().ok();
    let test_db = TestDatabase::new().await;
    let index = test_db.index_name().to_string();
    let db = test_db.db.clone();

    db.entries.save(&index, "/a", "rust", &key(1)).await.unwrap();
    test_db.cleanup().await;

    assert!(db.entries.list_distinct_values(&index).await.unwrap().is_empty());
}
