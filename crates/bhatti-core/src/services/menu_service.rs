//! Menu catalogue management

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::domain::seed::{fallback_menu, SEEDED_RATING, SEED_MENU};
use crate::domain::{MenuFilter, MenuItem, MenuItemPatch, NewMenuItem};
use crate::error::DomainError;
use crate::repositories::MenuRepository;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: Vec<String>,
    pub skipped: Vec<String>,
}

pub struct MenuService {
    repo: Arc<dyn MenuRepository>,
}

impl MenuService {
    pub fn new(repo: Arc<dyn MenuRepository>) -> Self {
        Self { repo }
    }

    /// Public menu. Falls back to the built-in catalogue when the store is
    /// empty or unavailable, so this never fails.
    pub async fn list_public(&self, filter: &MenuFilter) -> Vec<MenuItem> {
        let items = match self.repo.list_all().await {
            Ok(items) if !items.is_empty() => items,
            Ok(_) => fallback_menu(),
            Err(e) => {
                warn!("Falling back to seeded menu items, store unavailable: {}", e);
                fallback_menu()
            }
        };
        items.into_iter().filter(|item| filter.matches(item)).collect()
    }

    pub async fn list_all(&self) -> Result<Vec<MenuItem>, DomainError> {
        self.repo.list_all().await
    }

    pub async fn create(&self, input: NewMenuItem) -> Result<MenuItem, DomainError> {
        input
            .validate()
            .map_err(|_| DomainError::validation("All fields are required"))?;

        let item = MenuItem::from_new(input);
        self.repo.insert(&item).await?;
        info!("Menu item created: {} ({})", item.title, item.id);
        Ok(item)
    }

    pub async fn update(&self, id: Option<&str>, patch: MenuItemPatch) -> Result<MenuItem, DomainError> {
        let id = id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| DomainError::validation("Menu item id is required"))?;
        if patch.is_empty() {
            return Err(DomainError::validation("No valid fields to update"));
        }

        let mut item = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Menu item"))?;
        patch.apply(&mut item);
        self.repo.update(&item).await?;
        Ok(item)
    }

    pub async fn delete(&self, id: Option<&str>) -> Result<(), DomainError> {
        let id = id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| DomainError::validation("Menu item id is required"))?;
        if !self.repo.delete(id).await? {
            return Err(DomainError::not_found("Menu item"));
        }
        info!("Menu item deleted: {}", id);
        Ok(())
    }

    /// Insert the built-in catalogue, skipping titles already stored.
    pub async fn seed_catalogue(&self) -> Result<SeedReport, DomainError> {
        let mut report = SeedReport::default();
        for dish in SEED_MENU {
            if self.repo.find_by_title(dish.title).await?.is_some() {
                info!("Menu item already exists: {}", dish.title);
                report.skipped.push(dish.title.to_string());
                continue;
            }
            let item = dish.to_menu_item(Uuid::new_v4().to_string(), SEEDED_RATING);
            self.repo.insert(&item).await?;
            info!("Menu item created: {}", dish.title);
            report.inserted.push(dish.title.to_string());
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockMenuRepository;

    fn stored(id: &str, title: &str) -> MenuItem {
        MenuItem {
            id: id.into(),
            title: title.into(),
            description: "House special".into(),
            price: 300.0,
            category: "Poleko".into(),
            image_url: "/logo.jpg".into(),
            is_available: true,
            rating: 4.5,
        }
    }

    #[tokio::test]
    async fn test_public_menu_falls_back_when_store_fails() {
        let mut repo = MockMenuRepository::new();
        repo.expect_list_all()
            .returning(|| Err(DomainError::DatabaseError("down".into())));
        let service = MenuService::new(Arc::new(repo));

        let items = service.list_public(&MenuFilter::default()).await;
        assert_eq!(items.len(), SEED_MENU.len());
        assert!(items[0].id.starts_with("fallback-"));
    }

    #[tokio::test]
    async fn test_public_menu_filters_stored_items() {
        let mut repo = MockMenuRepository::new();
        repo.expect_list_all()
            .returning(|| Ok(vec![stored("1", "Chicken Sekuwa"), stored("2", "Pork Sekuwa")]));
        let service = MenuService::new(Arc::new(repo));

        let filter = MenuFilter { q: Some("pork".into()), category: None };
        let items = service.list_public(&filter).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "2");
    }

    #[tokio::test]
    async fn test_create_requires_all_fields() {
        let repo = MockMenuRepository::new();
        let service = MenuService::new(Arc::new(repo));
        let err = service
            .create(NewMenuItem { title: "Sekuwa".into(), ..Default::default() })
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::validation("All fields are required"));
    }

    #[tokio::test]
    async fn test_update_rejects_empty_patch_and_unknown_id() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        let service = MenuService::new(Arc::new(repo));

        let err = service.update(Some("x"), MenuItemPatch::default()).await.unwrap_err();
        assert_eq!(err, DomainError::validation("No valid fields to update"));

        let patch = MenuItemPatch { price: Some(1.0), ..Default::default() };
        let err = service.update(Some("x"), patch).await.unwrap_err();
        assert_eq!(err, DomainError::not_found("Menu item"));

        let err = service.update(None, MenuItemPatch::default()).await.unwrap_err();
        assert_eq!(err, DomainError::validation("Menu item id is required"));
    }

    #[tokio::test]
    async fn test_seed_skips_existing_titles() {
        let mut repo = MockMenuRepository::new();
        repo.expect_find_by_title().returning(|title| {
            Ok((title == "Veg Steam MoMo").then(|| stored("1", "Veg Steam MoMo")))
        });
        repo.expect_insert().times(SEED_MENU.len() - 1).returning(|_| Ok(()));
        let service = MenuService::new(Arc::new(repo));

        let report = service.seed_catalogue().await.unwrap();
        assert_eq!(report.skipped, vec!["Veg Steam MoMo".to_string()]);
        assert_eq!(report.inserted.len(), SEED_MENU.len() - 1);
    }
}
