//! In-process store backing every repository port.
//!
//! Used for local runs without PostgreSQL and by the HTTP integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use bhatti_core::domain::{MenuItem, Offer, Order, OrderStatus, UserProfile};
use bhatti_core::error::DomainError;
use bhatti_core::repositories::{
    MenuRepository, MetricsRepository, OfferRepository, OrderRepository, ProfileRepository,
};

const VISITS: &str = "visits";

#[derive(Default)]
pub struct MemoryStore {
    menu: DashMap<String, MenuItem>,
    orders: DashMap<String, Order>,
    offers: DashMap<String, Offer>,
    profiles: DashMap<String, UserProfile>,
    metrics: DashMap<String, u64>,
    order_counter: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders
}

#[async_trait]
impl MenuRepository for MemoryStore {
    async fn list_all(&self) -> Result<Vec<MenuItem>, DomainError> {
        let mut items: Vec<MenuItem> = self.menu.iter().map(|e| e.value().clone()).collect();
        items.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(items)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<MenuItem>, DomainError> {
        Ok(self.menu.get(id).map(|e| e.value().clone()))
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<MenuItem>, DomainError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.menu.get(id).map(|e| e.value().clone()))
            .collect())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<MenuItem>, DomainError> {
        Ok(self
            .menu
            .iter()
            .find(|e| e.value().title == title)
            .map(|e| e.value().clone()))
    }

    async fn insert(&self, item: &MenuItem) -> Result<(), DomainError> {
        self.menu.insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn update(&self, item: &MenuItem) -> Result<(), DomainError> {
        if let Some(mut entry) = self.menu.get_mut(&item.id) {
            *entry = item.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.menu.remove(id).is_some())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.menu.len() as u64)
    }

    async fn purge(&self) -> Result<u64, DomainError> {
        let removed = self.menu.len() as u64;
        self.menu.clear();
        Ok(removed)
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn next_order_number(&self) -> Result<u64, DomainError> {
        Ok(self.order_counter.fetch_add(1, Ordering::SeqCst))
    }

    async fn insert(&self, order: &Order) -> Result<(), DomainError> {
        self.orders.insert(order.id.clone(), order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, DomainError> {
        Ok(self.orders.get(id).map(|e| e.value().clone()))
    }

    async fn list_recent(&self, limit: Option<usize>) -> Result<Vec<Order>, DomainError> {
        let mut orders = newest_first(self.orders.iter().map(|e| e.value().clone()).collect());
        if let Some(limit) = limit {
            orders.truncate(limit);
        }
        Ok(orders)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Order>, DomainError> {
        Ok(newest_first(
            self.orders
                .iter()
                .filter(|e| e.value().user_id == user_id)
                .map(|e| e.value().clone())
                .collect(),
        ))
    }

    async fn update_status(&self, id: &str, status: OrderStatus) -> Result<Option<Order>, DomainError> {
        Ok(self.orders.get_mut(id).map(|mut entry| {
            entry.status = status;
            entry.value().clone()
        }))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.orders.len() as u64)
    }

    async fn purge(&self) -> Result<u64, DomainError> {
        let removed = self.orders.len() as u64;
        self.orders.clear();
        Ok(removed)
    }
}

#[async_trait]
impl OfferRepository for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Offer>, DomainError> {
        let mut offers: Vec<Offer> = self.offers.iter().map(|e| e.value().clone()).collect();
        offers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(offers)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Offer>, DomainError> {
        Ok(self.offers.get(id).map(|e| e.value().clone()))
    }

    async fn insert(&self, offer: &Offer) -> Result<(), DomainError> {
        self.offers.insert(offer.id.clone(), offer.clone());
        Ok(())
    }

    async fn update(&self, offer: &Offer) -> Result<(), DomainError> {
        if let Some(mut entry) = self.offers.get_mut(&offer.id) {
            *entry = offer.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.offers.remove(id).is_some())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.offers.len() as u64)
    }

    async fn purge(&self) -> Result<u64, DomainError> {
        let removed = self.offers.len() as u64;
        self.offers.clear();
        Ok(removed)
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find(&self, uid: &str) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.profiles.get(uid).map(|e| e.value().clone()))
    }

    async fn save(&self, profile: &UserProfile) -> Result<(), DomainError> {
        self.profiles.insert(profile.uid.clone(), profile.clone());
        Ok(())
    }

    async fn list_uids(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.profiles.iter().map(|e| e.key().clone()).collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.profiles.len() as u64)
    }
}

#[async_trait]
impl MetricsRepository for MemoryStore {
    async fn increment_visits(&self) -> Result<u64, DomainError> {
        let mut entry = self.metrics.entry(VISITS.to_string()).or_insert(0);
        *entry += 1;
        Ok(*entry)
    }

    async fn visits(&self) -> Result<u64, DomainError> {
        Ok(self.metrics.get(VISITS).map(|v| *v).unwrap_or(0))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.metrics.len() as u64)
    }

    async fn purge(&self) -> Result<u64, DomainError> {
        let removed = self.metrics.len() as u64;
        self.metrics.clear();
        Ok(removed)
    }
}
