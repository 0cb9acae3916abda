//! Port for best-effort side channels fired when an order is placed

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Order;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("{0} is not configured")]
    Disabled(&'static str),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Rejected by remote: {0}")]
    Rejected(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn order_created(&self, order: &Order) -> Result<(), NotifyError>;
}
