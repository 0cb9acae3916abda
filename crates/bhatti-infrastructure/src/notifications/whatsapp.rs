//! Order alert sent as a text message through the WhatsApp Cloud API

use std::fmt::Write;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use bhatti_core::domain::Order;
use bhatti_core::notifier::{NotifyError, OrderNotifier};
use bhatti_shared::config::WhatsappSettings;
use bhatti_shared::constants::RESTAURANT_NAME;
use bhatti_shared::utils::{format_rupees, normalize_phone_number};

#[derive(Debug, Serialize)]
struct TextBody<'a> {
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextBody<'a>,
}

pub struct WhatsappNotifier {
    client: Client,
    base_url: String,
    access_token: Option<String>,
    phone_number_id: Option<String>,
    to_number: String,
}

impl WhatsappNotifier {
    pub fn new(
        base_url: impl Into<String>,
        access_token: Option<String>,
        phone_number_id: Option<String>,
        to_number: &str,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.filter(|t| !t.is_empty()),
            phone_number_id: phone_number_id.filter(|p| !p.is_empty()),
            to_number: normalize_phone_number(to_number),
        }
    }

    pub fn from_settings(settings: &WhatsappSettings) -> Self {
        Self::new(
            settings.base_url.clone(),
            settings.access_token.clone(),
            settings.phone_number_id.clone(),
            &settings.to_number,
        )
    }

    pub fn is_enabled(&self) -> bool {
        self.access_token.is_some() && self.phone_number_id.is_some()
    }

    pub fn format_message(order: &Order) -> String {
        let mut msg = String::new();
        let placed = order.created_at.with_timezone(&Local).format("%d %b %Y, %I:%M %p");

        let _ = writeln!(msg, "*{} — New Order*", RESTAURANT_NAME);
        let _ = writeln!(msg, "Order ID: {} ({})", order.order_number, order.id);
        let _ = writeln!(msg, "Status: {}", order.status);
        let _ = writeln!(msg, "Placed: {}", placed);
        msg.push('\n');
        let _ = writeln!(msg, "Customer: {}", order.user_name);
        if let Some(email) = order.user_email.as_deref().filter(|e| !e.is_empty()) {
            let _ = writeln!(msg, "Email: {}", email);
        }
        let _ = writeln!(msg, "Phone: {}", order.phone);
        let _ = writeln!(msg, "Address: {}", order.address);
        msg.push('\n');
        msg.push_str("*Items*\n");
        for (i, line) in order.items.iter().enumerate() {
            let _ = writeln!(
                msg,
                "{}. {} × {} — {}",
                i + 1,
                line.menu_item.title,
                line.qty,
                format_rupees(line.line_total())
            );
        }
        msg.push('\n');
        let _ = writeln!(msg, "Total: {}", format_rupees(order.total));
        msg.push('\n');
        msg.push_str("Please review the order in the admin dashboard.");
        msg
    }
}

#[async_trait]
impl OrderNotifier for WhatsappNotifier {
    fn name(&self) -> &'static str {
        "whatsapp"
    }

    async fn order_created(&self, order: &Order) -> Result<(), NotifyError> {
        let (Some(token), Some(phone_id)) = (self.access_token.as_deref(), self.phone_number_id.as_deref())
        else {
            debug!("WhatsApp credentials missing, skipping alert for {}", order.order_number);
            return Err(NotifyError::Disabled("WhatsApp notifier"));
        };

        let body = Self::format_message(order);
        let request = MessageRequest {
            messaging_product: "whatsapp",
            to: &self.to_number,
            kind: "text",
            text: TextBody { body: &body },
        };

        let url = format!("{}/{}/messages", self.base_url, phone_id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected(format!("{}: {}", status, text)));
        }

        info!("WhatsApp alert sent for order {}", order.order_number);
        Ok(())
    }
}
