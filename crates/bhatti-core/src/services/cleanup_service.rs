//! Bulk maintenance of stored collections

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, warn};

use crate::error::DomainError;
use crate::repositories::{
    MenuRepository, MetricsRepository, OfferRepository, OrderRepository, ProfileRepository,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Orders,
    MenuItems,
    Offers,
    Metrics,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Orders,
        Collection::MenuItems,
        Collection::Offers,
        Collection::Metrics,
        Collection::Users,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Orders => "orders",
            Collection::MenuItems => "menuItems",
            Collection::Offers => "offers",
            Collection::Metrics => "metrics",
            Collection::Users => "users",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == raw)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurgeReport {
    pub message: String,
    pub deleted: u64,
    pub collection: String,
}

pub struct CleanupService {
    orders: Arc<dyn OrderRepository>,
    menu: Arc<dyn MenuRepository>,
    offers: Arc<dyn OfferRepository>,
    counters: Arc<dyn MetricsRepository>,
    profiles: Arc<dyn ProfileRepository>,
    admin_uids: HashSet<String>,
}

impl CleanupService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        menu: Arc<dyn MenuRepository>,
        offers: Arc<dyn OfferRepository>,
        counters: Arc<dyn MetricsRepository>,
        profiles: Arc<dyn ProfileRepository>,
        admin_uids: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            orders,
            menu,
            offers,
            counters,
            profiles,
            admin_uids: admin_uids.into_iter().collect(),
        }
    }

    async fn count_users(&self, stats: &mut BTreeMap<String, i64>) {
        match self.profiles.list_uids().await {
            Ok(uids) => {
                let admins = uids.iter().filter(|u| self.admin_uids.contains(*u)).count() as i64;
                let total = uids.len() as i64;
                stats.insert("users".into(), total);
                stats.insert("users_admin".into(), admins);
                stats.insert("users_regular".into(), total - admins);
            }
            Err(e) => {
                error!("Failed to count users: {}", e);
                stats.insert("users".into(), -1);
            }
        }
    }

    /// Document counts per collection. A collection that cannot be counted
    /// reports -1.
    pub async fn stats(&self) -> BTreeMap<String, i64> {
        let mut stats = BTreeMap::new();
        for collection in Collection::ALL {
            let count = match collection {
                Collection::Users => {
                    self.count_users(&mut stats).await;
                    continue;
                }
                Collection::Orders => self.orders.count().await,
                Collection::MenuItems => self.menu.count().await,
                Collection::Offers => self.offers.count().await,
                Collection::Metrics => self.counters.count().await,
            };
            let name = collection.as_str();
            let value = count.map(|c| c as i64).unwrap_or_else(|e| {
                error!("Failed to count {}: {}", name, e);
                -1
            });
            stats.insert(name.to_string(), value);
        }
        stats
    }

    /// Delete every document in a collection. Requires `confirm=true`;
    /// user profiles are never deleted.
    pub async fn purge(&self, collection: Option<&str>, confirm: Option<&str>) -> Result<PurgeReport, DomainError> {
        if confirm != Some("true") {
            return Err(DomainError::validation(
                "Confirmation required. Add ?confirm=true to proceed.",
            ));
        }
        let raw = collection
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                DomainError::validation("Collection parameter required. Use ?collection=<collectionName>")
            })?;
        let collection = Collection::parse(raw).ok_or_else(|| {
            let allowed: Vec<&str> = Collection::ALL.iter().map(Collection::as_str).collect();
            DomainError::validation(format!("Invalid collection. Allowed: {}", allowed.join(", ")))
        })?;

        let deleted = match collection {
            Collection::Users => {
                return Err(DomainError::Forbidden(
                    "Users collection is protected. All user accounts (admin and regular) are preserved and cannot be deleted."
                        .into(),
                ))
            }
            Collection::Orders => self.orders.purge().await?,
            Collection::MenuItems => self.menu.purge().await?,
            Collection::Offers => self.offers.purge().await?,
            Collection::Metrics => self.counters.purge().await?,
        };

        let name = collection.as_str();
        let message = if deleted == 0 {
            format!("Collection '{}' is already empty.", name)
        } else {
            warn!("Purged {} document(s) from {}", deleted, name);
            format!("Successfully deleted {} document(s) from '{}' collection.", deleted, name)
        };
        Ok(PurgeReport {
            message,
            deleted,
            collection: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{
        MockMenuRepository, MockMetricsRepository, MockOfferRepository, MockOrderRepository,
        MockProfileRepository,
    };

    fn service(orders: MockOrderRepository, profiles: MockProfileRepository) -> CleanupService {
        let mut menu = MockMenuRepository::new();
        menu.expect_count().returning(|| Ok(34));
        let mut offers = MockOfferRepository::new();
        offers.expect_count().returning(|| Err(DomainError::DatabaseError("boom".into())));
        let mut counters = MockMetricsRepository::new();
        counters.expect_count().returning(|| Ok(1));
        CleanupService::new(
            Arc::new(orders),
            Arc::new(menu),
            Arc::new(offers),
            Arc::new(counters),
            Arc::new(profiles),
            vec!["admin-1".to_string()],
        )
    }

    #[tokio::test]
    async fn test_stats_split_users() {
        let mut orders = MockOrderRepository::new();
        orders.expect_count().returning(|| Ok(12));
        let mut profiles = MockProfileRepository::new();
        profiles
            .expect_list_uids()
            .returning(|| Ok(vec!["admin-1".into(), "u1".into(), "u2".into()]));

        let stats = service(orders, profiles).stats().await;
        assert_eq!(stats["orders"], 12);
        assert_eq!(stats["menuItems"], 34);
        assert_eq!(stats["offers"], -1);
        assert_eq!(stats["users"], 3);
        assert_eq!(stats["users_admin"], 1);
        assert_eq!(stats["users_regular"], 2);
    }

    #[tokio::test]
    async fn test_purge_guards() {
        let mut orders = MockOrderRepository::new();
        orders.expect_purge().times(1).returning(|| Ok(5));
        let svc = service(orders, MockProfileRepository::new());

        let err = svc.purge(Some("orders"), None).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(m) if m.starts_with("Confirmation required")));

        let err = svc.purge(None, Some("true")).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(m) if m.starts_with("Collection parameter")));

        let err = svc.purge(Some("carts"), Some("true")).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("Invalid collection. Allowed: orders, menuItems, offers, metrics, users")
        );

        let err = svc.purge(Some("users"), Some("true")).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        let report = svc.purge(Some("orders"), Some("true")).await.unwrap();
        assert_eq!(report.deleted, 5);
        assert_eq!(report.collection, "orders");
    }
}
