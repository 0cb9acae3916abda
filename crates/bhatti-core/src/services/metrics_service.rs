//! Visit counter and analytics

use std::sync::Arc;

use chrono::Utc;

use bhatti_shared::constants::USER_METRICS_ORDER_WINDOW;

use crate::domain::metrics::{dashboard, user_insights};
use crate::domain::{DashboardMetrics, UserInsights};
use crate::error::DomainError;
use crate::repositories::{MetricsRepository, OrderRepository};

pub struct MetricsService {
    orders: Arc<dyn OrderRepository>,
    counters: Arc<dyn MetricsRepository>,
}

impl MetricsService {
    pub fn new(orders: Arc<dyn OrderRepository>, counters: Arc<dyn MetricsRepository>) -> Self {
        Self { orders, counters }
    }

    pub async fn record_visit(&self) -> Result<u64, DomainError> {
        self.counters.increment_visits().await
    }

    pub async fn dashboard(&self) -> Result<DashboardMetrics, DomainError> {
        let orders = self.orders.list_recent(None).await?;
        Ok(dashboard(&orders, Utc::now()))
    }

    pub async fn user_insights(&self) -> Result<UserInsights, DomainError> {
        let (orders, visits) = tokio::try_join!(
            self.orders.list_recent(Some(USER_METRICS_ORDER_WINDOW)),
            self.counters.visits(),
        )?;
        Ok(user_insights(&orders, visits, Utc::now()))
    }
}
