//! Background task fanning order events out to the notifiers

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use bhatti_core::events::{EventBus, OrderEvent};
use bhatti_core::notifier::{NotifyError, OrderNotifier};

/// Subscribe to the bus and run every notifier for each new order.
/// Each notifier runs in its own task; failures are logged only.
pub fn spawn_dispatcher(bus: &EventBus, notifiers: Vec<Arc<dyn OrderNotifier>>) -> JoinHandle<()> {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        info!("Order notification dispatcher started ({} channels)", notifiers.len());
        loop {
            match rx.recv().await {
                Ok(OrderEvent::OrderCreated(order)) => {
                    let order = Arc::new(order);
                    for notifier in &notifiers {
                        let notifier = Arc::clone(notifier);
                        let order = Arc::clone(&order);
                        tokio::spawn(async move {
                            match notifier.order_created(&order).await {
                                Ok(()) => {}
                                Err(NotifyError::Disabled(what)) => {
                                    debug!("{} skipped for {}: {} disabled", notifier.name(), order.order_number, what)
                                }
                                Err(e) => warn!(
                                    "{} failed for order {}: {}",
                                    notifier.name(),
                                    order.order_number,
                                    e
                                ),
                            }
                        });
                    }
                }
                Ok(OrderEvent::OrderStatusChanged { order, previous }) => {
                    debug!("Order {} moved {} -> {}", order.order_number, previous, order.status);
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Notification dispatcher lagged, {} events skipped", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
        info!("Order notification dispatcher stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bhatti_core::domain::{format_order_number, Order, OrderStatus};
    use chrono::Utc;
    use tokio::sync::mpsc;

    struct Recording {
        tx: mpsc::UnboundedSender<String>,
        fail: bool,
    }

    #[async_trait]
    impl OrderNotifier for Recording {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn order_created(&self, order: &Order) -> Result<(), NotifyError> {
            let _ = self.tx.send(order.order_number.clone());
            if self.fail {
                return Err(NotifyError::Transport("boom".into()));
            }
            Ok(())
        }
    }

    fn order(n: u64) -> Order {
        Order {
            id: format!("ord-{}", n),
            order_number: format_order_number(n),
            order_number_value: n,
            user_id: "u1".into(),
            user_email: None,
            user_name: "Guest".into(),
            items: vec![],
            total: 0.0,
            status: OrderStatus::Pending,
            address: "Lakeside".into(),
            phone: "9800000000".into(),
            location: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_created_events_reach_every_notifier() {
        let bus = EventBus::new(16);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let notifiers: Vec<Arc<dyn OrderNotifier>> = vec![
            Arc::new(Recording { tx: tx.clone(), fail: true }),
            Arc::new(Recording { tx, fail: false }),
        ];
        let handle = spawn_dispatcher(&bus, notifiers);

        bus.publish(OrderEvent::OrderStatusChanged { order: order(1), previous: OrderStatus::Pending });
        bus.publish(OrderEvent::OrderCreated(order(2)));

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first, "#002");
        assert_eq!(second, "#002");

        drop(bus);
        handle.await.unwrap();
    }
}
