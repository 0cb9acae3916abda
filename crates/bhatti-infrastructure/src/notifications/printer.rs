//! ESC/POS receipt printer reached over a raw TCP socket

use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info};

use bhatti_core::domain::Order;
use bhatti_core::notifier::{NotifyError, OrderNotifier};
use bhatti_shared::config::PrinterSettings;

const ESC: u8 = 0x1b;
const GS: u8 = 0x1d;

const INIT: [u8; 2] = [ESC, b'@'];
const FONT_A: [u8; 3] = [ESC, b'M', 0];
const ALIGN_CENTER: [u8; 3] = [ESC, b'a', 1];
const ALIGN_LEFT: [u8; 3] = [ESC, b'a', 0];
const DOUBLE_SIZE: [u8; 3] = [ESC, b'!', 17];
const EMPHASIS: [u8; 3] = [ESC, b'!', 9];
const RESET_MODE: [u8; 3] = [ESC, b'!', 0];
const FULL_CUT: [u8; 4] = [GS, b'V', 65, 0];

pub struct ReceiptPrinter {
    host: Option<String>,
    port: u16,
    timeout: Duration,
}

impl ReceiptPrinter {
    pub fn new(host: Option<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.filter(|h| !h.trim().is_empty()),
            port,
            timeout,
        }
    }

    pub fn from_settings(settings: &PrinterSettings) -> Self {
        Self::new(
            settings.host.clone(),
            settings.port,
            Duration::from_millis(settings.timeout_ms),
        )
    }

    pub fn is_enabled(&self) -> bool {
        self.host.is_some()
    }

    /// Build the byte stream for one ticket.
    pub fn format_receipt(order: &Order) -> Vec<u8> {
        let placed = order.created_at.with_timezone(&Local).format("%I:%M:%S %p");
        let segments: Vec<Vec<u8>> = vec![
            [&INIT[..], &FONT_A, &ALIGN_CENTER, &DOUBLE_SIZE].concat(),
            b"Online order".to_vec(),
            [&ALIGN_LEFT[..], &EMPHASIS].concat(),
            format!("order number: {}", order.order_number).into_bytes(),
            format!("customer name: {}", order.user_name).into_bytes(),
            format!("order time: {}", placed).into_bytes(),
            [&RESET_MODE[..], &FULL_CUT].concat(),
        ];
        segments.join(&b'\n')
    }

    async fn send(&self, host: &str, payload: &[u8]) -> Result<(), NotifyError> {
        let addr = format!("{}:{}", host, self.port);
        let write = async {
            let mut stream = TcpStream::connect(&addr).await?;
            stream.write_all(payload).await?;
            stream.flush().await?;
            stream.shutdown().await
        };
        match timeout(self.timeout, write).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(NotifyError::Transport(format!("{}: {}", addr, e))),
            Err(_) => Err(NotifyError::Transport(format!("{}: timed out", addr))),
        }
    }
}

#[async_trait]
impl OrderNotifier for ReceiptPrinter {
    fn name(&self) -> &'static str {
        "receipt-printer"
    }

    async fn order_created(&self, order: &Order) -> Result<(), NotifyError> {
        let Some(host) = self.host.as_deref() else {
            debug!("Printer host not set, skipping receipt for {}", order.order_number);
            return Err(NotifyError::Disabled("Receipt printer"));
        };
        let payload = Self::format_receipt(order);
        self.send(host, &payload).await?;
        info!("Printed receipt for order {}", order.order_number);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhatti_core::domain::{format_order_number, OrderStatus};
    use chrono::Utc;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    fn order() -> Order {
        Order {
            id: "ord-1".into(),
            order_number: format_order_number(12),
            order_number_value: 12,
            user_id: "u1".into(),
            user_email: None,
            user_name: "Hari".into(),
            items: vec![],
            total: 0.0,
            status: OrderStatus::Pending,
            address: "Lakeside".into(),
            phone: "9800000000".into(),
            location: None,
            created_at: Utc::now(),
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_receipt_layout() {
        let bytes = ReceiptPrinter::format_receipt(&order());
        assert!(bytes.starts_with(&[ESC, b'@', ESC, b'M', 0, ESC, b'a', 1, ESC, b'!', 17, b'\n']));
        assert!(bytes.ends_with(&[ESC, b'!', 0, GS, b'V', 65, 0]));
        assert!(contains(&bytes, b"Online order"));
        assert!(contains(&bytes, b"order number: #012"));
        assert!(contains(&bytes, b"customer name: Hari"));
        assert!(contains(&bytes, b"order time: "));
    }

    #[tokio::test]
    async fn test_disabled_without_host() {
        let printer = ReceiptPrinter::new(Some("  ".into()), 9100, Duration::from_secs(1));
        assert!(!printer.is_enabled());
        let err = printer.order_created(&order()).await.unwrap_err();
        assert!(matches!(err, NotifyError::Disabled(_)));
    }

    #[tokio::test]
    async fn test_writes_receipt_to_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let reader = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            socket.read_to_end(&mut buf).await.unwrap();
            buf
        });

        let order = order();
        let printer = ReceiptPrinter::new(Some("127.0.0.1".into()), port, Duration::from_secs(2));
        printer.order_created(&order).await.unwrap();

        let received = reader.await.unwrap();
        assert_eq!(received, ReceiptPrinter::format_receipt(&order));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let printer = ReceiptPrinter::new(Some("127.0.0.1".into()), port, Duration::from_secs(1));
        let err = printer.order_created(&order()).await.unwrap_err();
        assert!(matches!(err, NotifyError::Transport(_)));
    }
}
