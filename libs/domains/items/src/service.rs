use std::sync::Arc;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, NewItem, UpdateItem};
use crate::repository::ItemRepository;

/// Service layer for Item business logic
#[derive(Clone)]
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All items, ascending id
    pub async fn list_items(&self) -> ItemResult<Vec<Item>> {
        self.repository.list().await
    }

    pub async fn get_item(&self, id: i32) -> ItemResult<Item> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    /// Validate and persist a new item
    pub async fn create_item(&self, input: CreateItem) -> ItemResult<Item> {
        let new_item = NewItem::try_from(input)?;
        self.repository.create(new_item).await
    }

    /// Replace an item's name and description
    ///
    /// Validation runs before the lookup, so an invalid body for an unknown
    /// id is a validation error rather than a 404.
    pub async fn update_item(&self, id: i32, input: UpdateItem) -> ItemResult<Item> {
        let new_item = NewItem::try_from(input)?;

        self.repository
            .update(id, new_item)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    pub async fn delete_item(&self, id: i32) -> ItemResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(ItemError::NotFound(id));
        }

        Ok(())
    }

    pub async fn count_items(&self) -> ItemResult<u64> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MISSING_FIELDS;
    use crate::repository::MockItemRepository;
    use mockall::predicate::eq;

    fn create(name: &str, description: &str) -> CreateItem {
        CreateItem {
            name: Some(name.to_string()),
            description: Some(description.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_item_persists_validated_input() {
        let mut mock_repo = MockItemRepository::new();

        mock_repo
            .expect_create()
            .with(eq(NewItem::new("Widget", "Blue")))
            .times(1)
            .returning(|input| {
                Ok(Item {
                    id: 1,
                    name: input.name,
                    description: input.description,
                })
            });

        let service = ItemService::new(mock_repo);
        let item = service.create_item(create("Widget", "Blue")).await.unwrap();

        assert_eq!(item.id, 1);
        assert_eq!(item.name, "Widget");
    }

    #[tokio::test]
    async fn test_create_item_rejects_missing_field_without_touching_storage() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo.expect_create().never();

        let service = ItemService::new(mock_repo);
        let err = service
            .create_item(CreateItem {
                name: Some("Widget".to_string()),
                description: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ItemError::Validation(ref msg) if msg == MISSING_FIELDS));
    }

    #[tokio::test]
    async fn test_get_item_not_found() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(42))
            .returning(|_| Ok(None));

        let service = ItemService::new(mock_repo);
        let err = service.get_item(42).await.unwrap_err();

        assert!(matches!(err, ItemError::NotFound(42)));
    }

    #[tokio::test]
    async fn test_update_item_validates_before_lookup() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo.expect_update().never();

        let service = ItemService::new(mock_repo);
        let err = service
            .update_item(999, UpdateItem::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ItemError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_item_missing_id() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_update()
            .withf(|id, _| *id == 7)
            .returning(|_, _| Ok(None));

        let service = ItemService::new(mock_repo);
        let input = UpdateItem {
            name: Some("x".to_string()),
            description: Some("y".to_string()),
        };

        assert!(matches!(
            service.update_item(7, input).await,
            Err(ItemError::NotFound(7))
        ));
    }

    #[tokio::test]
    async fn test_delete_item_not_found() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo.expect_delete().with(eq(3)).returning(|_| Ok(false));

        let service = ItemService::new(mock_repo);

        assert!(matches!(
            service.delete_item(3).await,
            Err(ItemError::NotFound(3))
        ));
    }

    #[tokio::test]
    async fn test_storage_errors_pass_through() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_list()
            .returning(|| Err(ItemError::StorageUnavailable("pool timed out".to_string())));

        let service = ItemService::new(mock_repo);

        assert!(matches!(
            service.list_items().await,
            Err(ItemError::StorageUnavailable(_))
        ));
    }
}
