//! Order placement and status management

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use bhatti_shared::constants::{GUEST_NAME, MAX_ADMIN_ORDER_LIMIT};

use crate::domain::{
    format_order_number, MenuSnapshot, Order, OrderLine, OrderStatus, PlaceOrder, Principal,
};
use crate::error::DomainError;
use crate::events::{EventBus, OrderEvent};
use crate::repositories::{MenuRepository, OrderRepository, ProfileRepository};

const ADMIN_ORDERS_HINT: &str = "Admins should use admin orders endpoint";

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    menu: Arc<dyn MenuRepository>,
    profiles: Arc<dyn ProfileRepository>,
    events: Arc<EventBus>,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        menu: Arc<dyn MenuRepository>,
        profiles: Arc<dyn ProfileRepository>,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            orders,
            menu,
            profiles,
            events,
        }
    }

    /// Place an order for a customer. Prices and titles are read from the
    /// stored menu; unknown item ids are skipped.
    pub async fn place_order(&self, principal: &Principal, request: PlaceOrder) -> Result<Order, DomainError> {
        if principal.is_admin() {
            return Err(DomainError::Forbidden(ADMIN_ORDERS_HINT.into()));
        }
        if request.items.is_empty() {
            return Err(DomainError::validation("At least one item is required"));
        }
        let address = request.address.trim().to_string();
        let phone = request.phone.trim().to_string();
        if address.is_empty() || phone.is_empty() {
            return Err(DomainError::validation("Address and phone are required"));
        }
        if request.items.iter().any(|item| item.qty <= 0) {
            return Err(DomainError::validation("Quantity must be at least 1"));
        }

        let ids: Vec<String> = request.items.iter().map(|i| i.menu_item_id.clone()).collect();
        let catalogue: HashMap<String, MenuSnapshot> = self
            .menu
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|m| (m.id, MenuSnapshot { title: m.title, price: m.price }))
            .collect();

        let mut lines = Vec::with_capacity(request.items.len());
        let mut invalid = Vec::new();
        for item in request.items {
            let Some(snapshot) = catalogue.get(&item.menu_item_id) else {
                invalid.push(item.menu_item_id);
                continue;
            };
            lines.push(OrderLine {
                menu_item_id: item.menu_item_id,
                menu_item: snapshot.clone(),
                qty: u32::try_from(item.qty).unwrap_or(u32::MAX),
                price: snapshot.price,
                note: item.note.filter(|n| !n.trim().is_empty()),
            });
        }

        if lines.is_empty() {
            warn!("Order rejected, no valid menu items: {:?}", invalid);
            return Err(DomainError::NoValidMenuItems(invalid));
        }
        if !invalid.is_empty() {
            warn!("Skipping invalid cart items: {:?}", invalid);
        }

        let profile_name = self
            .profiles
            .find(&principal.uid)
            .await?
            .map(|p| p.name)
            .filter(|n| !n.is_empty());
        let user_name = profile_name
            .or_else(|| principal.email.clone())
            .unwrap_or_else(|| GUEST_NAME.to_string());

        let number = self.orders.next_order_number().await?;
        let order = Order {
            id: Uuid::new_v4().to_string(),
            order_number: format_order_number(number),
            order_number_value: number,
            user_id: principal.uid.clone(),
            user_email: principal.email.clone(),
            user_name,
            total: Order::compute_total(&lines),
            items: lines,
            status: OrderStatus::Pending,
            address,
            phone,
            location: request.location,
            created_at: Utc::now(),
        };

        self.orders.insert(&order).await?;
        info!("Order {} placed by {} (total {})", order.order_number, order.user_id, order.total);
        self.events.publish(OrderEvent::OrderCreated(order.clone()));

        Ok(order)
    }

    /// A customer's own orders, newest first.
    pub async fn list_for_customer(&self, principal: &Principal) -> Result<Vec<Order>, DomainError> {
        if principal.is_admin() {
            return Err(DomainError::Forbidden(ADMIN_ORDERS_HINT.into()));
        }
        self.orders.list_by_user(&principal.uid).await
    }

    /// All orders newest first. Positive limits are honoured up to the cap.
    pub async fn list_for_admin(&self, limit: Option<i64>) -> Result<Vec<Order>, DomainError> {
        let limit = limit
            .filter(|l| *l > 0)
            .map(|l| usize::try_from(l).unwrap_or(MAX_ADMIN_ORDER_LIMIT).min(MAX_ADMIN_ORDER_LIMIT));
        self.orders.list_recent(limit).await
    }

    pub async fn update_status(&self, id: Option<&str>, status: Option<&str>) -> Result<Order, DomainError> {
        let (Some(id), Some(status)) = (
            id.filter(|v| !v.is_empty()),
            status.filter(|v| !v.is_empty()),
        ) else {
            return Err(DomainError::validation("Order id and status are required"));
        };

        let previous = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Order"))?
            .status;
        let next = OrderStatus::normalize(Some(status));

        let order = self
            .orders
            .update_status(id, next)
            .await?
            .ok_or_else(|| DomainError::not_found("Order"))?;

        info!("Order {} status {} -> {}", order.order_number, previous, next);
        self.events.publish(OrderEvent::OrderStatusChanged {
            order: order.clone(),
            previous,
        });
        Ok(order)
    }
}
