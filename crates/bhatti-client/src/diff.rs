//! Snapshot diffing behind the order watchers.
//!
//! Both diffs are heuristics over successive list responses: a new order
//! is "the newest id changed", and a status change is "a known id now
//! reports a different status". Neither can tell a new order from a
//! reordered result set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use bhatti_core::domain::OrderStatus;

/// The fields the watchers read from either order listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WatchEvent {
    NewOrder {
        order_id: String,
        order_number: Option<String>,
    },
    StatusChanged {
        order_id: String,
        order_number: Option<String>,
        previous: OrderStatus,
        current: OrderStatus,
    },
}

/// Tracks the newest order id seen by the admin poller.
#[derive(Debug, Default)]
pub struct AdminOrderDiff {
    initialized: bool,
    latest_id: Option<String>,
}

impl AdminOrderDiff {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first snapshot only primes the diff.
    pub fn observe(&mut self, orders: &[OrderSummary]) -> Option<WatchEvent> {
        let newest = orders.first();
        let newest_id = newest.and_then(|o| o.id.clone()).filter(|id| !id.is_empty());

        if !self.initialized {
            self.initialized = true;
            self.latest_id = newest_id;
            return None;
        }

        let id = newest_id?;
        if self.latest_id.as_deref() == Some(id.as_str()) {
            return None;
        }
        self.latest_id = Some(id.clone());
        Some(WatchEvent::NewOrder {
            order_id: id,
            order_number: newest.and_then(|o| o.order_number.clone()),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Tracks the last known status of each of the customer's orders.
#[derive(Debug, Default)]
pub struct CustomerOrderDiff {
    initialized: bool,
    statuses: HashMap<String, OrderStatus>,
}

impl CustomerOrderDiff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unseen orders are recorded silently.
    pub fn observe(&mut self, orders: &[OrderSummary]) -> Vec<WatchEvent> {
        let mut events = Vec::new();
        for order in orders {
            let Some(id) = order.id.as_deref().filter(|id| !id.is_empty()) else {
                continue;
            };
            let previous = self.statuses.insert(id.to_string(), order.status);
            if !self.initialized {
                continue;
            }
            if let Some(previous) = previous.filter(|p| *p != order.status) {
                events.push(WatchEvent::StatusChanged {
                    order_id: id.to_string(),
                    order_number: order.order_number.clone(),
                    previous,
                    current: order.status,
                });
            }
        }
        self.initialized = true;
        events
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
