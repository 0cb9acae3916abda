//! Timer-driven polling loops publishing `WatchEvent`s

use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, info};

use bhatti_shared::config::PollingSettings;
use bhatti_shared::constants::{ADMIN_POLL_LIMIT, POLL_INTERVAL_SECS};

use crate::api_client::{admin_orders_path, ApiClient};
use crate::diff::{AdminOrderDiff, CustomerOrderDiff, OrderSummary, WatchEvent};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy)]
pub struct WatchConfig {
    pub interval: Duration,
    pub initial_delay: Duration,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(POLL_INTERVAL_SECS),
            initial_delay: Duration::from_secs(2),
        }
    }
}

impl WatchConfig {
    pub fn from_settings(settings: &PollingSettings) -> Self {
        Self {
            interval: Duration::from_secs(settings.interval_secs.max(1)),
            initial_delay: Duration::from_secs(settings.initial_delay_secs),
        }
    }

    /// The admin poller starts immediately.
    pub fn without_delay(mut self) -> Self {
        self.initial_delay = Duration::ZERO;
        self
    }
}

/// A running watcher. Dropping the handle also stops the loop.
pub struct WatcherHandle {
    events: broadcast::Sender<WatchEvent>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl WatcherHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<WatchEvent> {
        self.events.subscribe()
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

enum Poll {
    Admin(AdminOrderDiff),
    Customer(CustomerOrderDiff),
}

impl Poll {
    fn path(&self) -> String {
        match self {
            Poll::Admin(_) => admin_orders_path(Some(ADMIN_POLL_LIMIT)),
            Poll::Customer(_) => "/api/orders".to_string(),
        }
    }

    fn observe(&mut self, orders: &[OrderSummary]) -> Vec<WatchEvent> {
        match self {
            Poll::Admin(diff) => diff.observe(orders).into_iter().collect(),
            Poll::Customer(diff) => diff.observe(orders),
        }
    }
}

/// Poll the admin listing and emit `NewOrder` when the newest id changes.
pub fn spawn_admin_watcher(client: ApiClient, config: WatchConfig) -> WatcherHandle {
    spawn(client, config, Poll::Admin(AdminOrderDiff::new()), "admin")
}

/// Poll the customer's own orders and emit `StatusChanged` per order.
pub fn spawn_customer_watcher(client: ApiClient, config: WatchConfig) -> WatcherHandle {
    spawn(client, config, Poll::Customer(CustomerOrderDiff::new()), "customer")
}

fn spawn(client: ApiClient, config: WatchConfig, mut poll: Poll, name: &'static str) -> WatcherHandle {
    let (events, _) = broadcast::channel(EVENT_CAPACITY);
    let (shutdown, mut stop) = watch::channel(false);
    let tx = events.clone();

    let task = tokio::spawn(async move {
        info!("{} order watcher started", name);
        let path = poll.path();

        tokio::select! {
            biased;
            _ = stop.changed() => return,
            _ = sleep(config.initial_delay) => {}
        }

        let mut ticker = interval(config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = stop.changed() => break,
                _ = ticker.tick() => {}
            }

            let result = tokio::select! {
                biased;
                _ = stop.changed() => break,
                result = client.get::<Vec<OrderSummary>>(&path) => result,
            };

            match result {
                Ok(orders) => {
                    for event in poll.observe(&orders) {
                        debug!("{} watcher event: {:?}", name, event);
                        let _ = tx.send(event);
                    }
                }
                // Retried on the next tick.
                Err(e) => debug!("{} watcher poll failed: {}", name, e),
            }
        }
        info!("{} order watcher stopped", name);
    });

    WatcherHandle { events, shutdown, task }
}
