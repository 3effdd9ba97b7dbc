//! Integration tests for the Items domain
//!
//! These run the SQL repository and service against an in-memory SQLite
//! database with the real migrations applied.

use domain_items::*;
use futures::future::join_all;
use sea_orm::ConnectionTrait;
use std::collections::HashSet;
use test_utils::{assertions::*, TestDataBuilder, TestDatabase};

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_item() {
    let db = TestDatabase::new().await;
    let repo = SqlItemRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let input = NewItem::new(builder.name("item", "main"), builder.description("main"));
    let created = repo.create(input.clone()).await.unwrap();

    assert_eq!(created.name, input.name);
    assert_eq!(created.description, input.description);

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "item should exist");

    assert_id_eq(retrieved.id, created.id, "retrieved item id");
    assert_eq!(retrieved, created);
}

#[tokio::test]
async fn test_update_overwrites_both_fields() {
    let db = TestDatabase::new().await;
    let repo = SqlItemRepository::new(db.connection());

    let created = repo.create(NewItem::new("Widget", "Blue")).await.unwrap();
    let updated = repo
        .update(created.id, NewItem::new("Gadget", "Red"))
        .await
        .unwrap();
    let updated = assert_some(updated, "item should be updated");

    assert_id_eq(updated.id, created.id, "id is stable across updates");
    assert_eq!(updated.name, "Gadget");
    assert_eq!(updated.description, "Red");
}

#[tokio::test]
async fn test_update_and_delete_unknown_id() {
    let db = TestDatabase::new().await;
    let repo = SqlItemRepository::new(db.connection());

    assert_eq!(repo.update(404, NewItem::new("a", "b")).await.unwrap(), None);
    assert!(!repo.delete(404).await.unwrap());
}

#[tokio::test]
async fn test_delete_removes_from_list() {
    let db = TestDatabase::new().await;
    let repo = SqlItemRepository::new(db.connection());

    let keep = repo.create(NewItem::new("keep", "k")).await.unwrap();
    let removed = repo.create(NewItem::new("drop", "d")).await.unwrap();

    assert!(repo.delete(removed.id).await.unwrap());

    let items = repo.list().await.unwrap();
    assert_eq!(items, vec![keep]);
    assert_eq!(repo.get_by_id(removed.id).await.unwrap(), None);
}

#[tokio::test]
async fn test_count_tracks_creates_minus_deletes() {
    let db = TestDatabase::new().await;
    let repo = SqlItemRepository::new(db.connection());

    let mut ids = Vec::new();
    for i in 0..5 {
        let item = repo
            .create(NewItem::new(format!("item-{i}"), "d"))
            .await
            .unwrap();
        ids.push(item.id);
    }
    repo.delete(ids[1]).await.unwrap();
    repo.delete(ids[3]).await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 3);
    assert_eq!(repo.list().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_max_length_values_are_stored() {
    let db = TestDatabase::new().await;
    let repo = SqlItemRepository::new(db.connection());

    let name = "n".repeat(100);
    let description = "d".repeat(200);
    let created = repo
        .create(NewItem::new(name.clone(), description.clone()))
        .await
        .unwrap();

    let stored = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.name, name);
    assert_eq!(stored.description, description);
}

// ============================================================================
// Concurrency Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_distinct_ids() {
    const CREATES: usize = 100;

    let db = TestDatabase::file_backed(8).await;
    let service = ItemService::new(SqlItemRepository::new(db.connection()));

    let handles: Vec<_> = (0..CREATES)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create_item(CreateItem {
                        name: Some(format!("concurrent-{i}")),
                        description: Some("d".to_string()),
                    })
                    .await
            })
        })
        .collect();

    let results = join_all(handles).await;
    let ids: HashSet<i32> = results
        .into_iter()
        .map(|joined| joined.unwrap().unwrap().id)
        .collect();

    assert_eq!(ids.len(), CREATES);
    assert_eq!(service.count_items().await.unwrap(), CREATES as u64);
    assert_eq!(service.list_items().await.unwrap().len(), CREATES);
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
async fn test_service_round_trip_through_sql() {
    let db = TestDatabase::new().await;
    let service = ItemService::new(SqlItemRepository::new(db.connection()));

    let created = service
        .create_item(CreateItem {
            name: Some("Widget".to_string()),
            description: Some("Blue".to_string()),
        })
        .await
        .unwrap();

    service
        .update_item(
            created.id,
            UpdateItem {
                name: Some("Widget".to_string()),
                description: Some("Green".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(service.get_item(created.id).await.unwrap().description, "Green");

    service.delete_item(created.id).await.unwrap();
    assert!(matches!(
        service.get_item(created.id).await,
        Err(ItemError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_missing_table_surfaces_as_database_error() {
    let db = TestDatabase::new().await;
    let repo = SqlItemRepository::new(db.connection());

    db.connection
        .execute_unprepared("DROP TABLE items")
        .await
        .unwrap();

    let err = repo.list().await.unwrap_err();
    assert!(matches!(err, ItemError::Database(_)));
}
