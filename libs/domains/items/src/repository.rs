use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ItemResult;
use crate::models::{Item, NewItem};

/// Repository trait for Item persistence
///
/// Implementations only store and fetch; validation and not-found errors
/// belong to [`ItemService`](crate::service::ItemService). Every write is
/// durable when the call returns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items, ascending id
    async fn list(&self) -> ItemResult<Vec<Item>>;

    async fn get_by_id(&self, id: i32) -> ItemResult<Option<Item>>;

    /// Store a new item under a fresh id
    async fn create(&self, input: NewItem) -> ItemResult<Item>;

    /// Overwrite name and description; `None` if the id does not exist
    async fn update(&self, id: i32, input: NewItem) -> ItemResult<Option<Item>>;

    /// `false` if the id does not exist
    async fn delete(&self, id: i32) -> ItemResult<bool>;

    async fn count(&self) -> ItemResult<u64>;
}

#[derive(Debug, Default)]
struct Store {
    items: BTreeMap<i32, Item>,
    last_id: i32,
}

/// In-memory implementation of ItemRepository (for development/testing)
///
/// Ids start at 1 and are never reused, matching an auto-increment key.
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn list(&self) -> ItemResult<Vec<Item>> {
        let store = self.store.read().await;
        Ok(store.items.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> ItemResult<Option<Item>> {
        let store = self.store.read().await;
        Ok(store.items.get(&id).cloned())
    }

    async fn create(&self, input: NewItem) -> ItemResult<Item> {
        let mut store = self.store.write().await;

        store.last_id += 1;
        let item = Item {
            id: store.last_id,
            name: input.name,
            description: input.description,
        };
        store.items.insert(item.id, item.clone());

        tracing::debug!(item_id = item.id, "Created item");
        Ok(item)
    }

    async fn update(&self, id: i32, input: NewItem) -> ItemResult<Option<Item>> {
        let mut store = self.store.write().await;

        Ok(store.items.get_mut(&id).map(|item| {
            item.name = input.name;
            item.description = input.description;
            item.clone()
        }))
    }

    async fn delete(&self, id: i32) -> ItemResult<bool> {
        let mut store = self.store.write().await;
        Ok(store.items.remove(&id).is_some())
    }

    async fn count(&self) -> ItemResult<u64> {
        let store = self.store.read().await;
        Ok(store.items.len() as u64)
    }
}
