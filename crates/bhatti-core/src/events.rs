//! In-process broadcast of order lifecycle events

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::{Order, OrderStatus};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload")]
#[serde(rename_all = "snake_case")]
pub enum OrderEvent {
    OrderCreated(Order),
    OrderStatusChanged { order: Order, previous: OrderStatus },
}

impl OrderEvent {
    pub fn order(&self) -> &Order {
        match self {
            OrderEvent::OrderCreated(order) => order,
            OrderEvent::OrderStatusChanged { order, .. } => order,
        }
    }
}

pub struct EventBus {
    tx: broadcast::Sender<OrderEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, event: OrderEvent) {
        if let Err(e) = self.tx.send(event) {
            debug!("Order event dropped, no subscribers: {}", e.0.order().order_number);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
