//! Order entity, status normalisation and the views handed to callers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The four fixed stages an order passes through.
///
/// Transitions are a plain overwrite; any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    InKitchen,
    InTransit,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::InKitchen,
        OrderStatus::InTransit,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::InKitchen => "In Kitchen",
            OrderStatus::InTransit => "In Transit",
            OrderStatus::Delivered => "Delivered",
        }
    }

    /// Map free-form input (legacy spellings included) onto a status.
    /// Anything unrecognised collapses to `Pending`.
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return OrderStatus::Pending;
        };
        match raw.trim().to_lowercase().as_str() {
            "pending" => OrderStatus::Pending,
            "preparing" | "in kitchen" | "kitchen" => OrderStatus::InKitchen,
            "in transit" | "out for delivery" | "out-for-delivery" | "out_for_delivery" => {
                OrderStatus::InTransit
            }
            "delivered" => OrderStatus::Delivered,
            _ => OrderStatus::Pending,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(OrderStatus::normalize(raw.as_deref()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Title and price copied from the menu at the moment the order is placed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSnapshot {
    pub title: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub menu_item_id: String,
    pub menu_item: MenuSnapshot,
    pub qty: u32,
    pub price: f64,
    pub note: Option<String>,
}

impl OrderLine {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.qty)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub order_number: String,
    pub order_number_value: u64,
    pub user_id: String,
    pub user_email: Option<String>,
    pub user_name: String,
    pub items: Vec<OrderLine>,
    pub total: f64,
    pub status: OrderStatus,
    pub address: String,
    pub phone: String,
    pub location: Option<GeoPoint>,
    pub created_at: DateTime<Utc>,
}

pub fn format_order_number(value: u64) -> String {
    format!("#{:03}", value)
}

impl Order {
    pub fn compute_total(items: &[OrderLine]) -> f64 {
        items.iter().map(OrderLine::line_total).sum()
    }

    /// Total quantity across lines
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.qty).sum()
    }

    pub fn customer_view(&self) -> CustomerOrderView {
        CustomerOrderView {
            id: self.id.clone(),
            order_number: self.order_number.clone(),
            total: self.total,
            status: self.status,
            created_at: self.created_at,
            user: self.user_email.as_ref().map(|email| OrderUserView {
                name: Some(self.user_name.clone()),
                email: email.clone(),
            }),
            items: self
                .items
                .iter()
                .map(|line| OrderLineView {
                    menu_item: Some(MenuTitleView {
                        title: line.menu_item.title.clone(),
                    }),
                    qty: line.qty,
                    price: line.price,
                    note: line.note.clone().filter(|n| !n.is_empty()),
                })
                .collect(),
        }
    }

    pub fn admin_view(&self) -> AdminOrderView {
        AdminOrderView {
            order: self.customer_view(),
            phone: Some(self.phone.clone()),
            address: Some(self.address.clone()),
            location: self.location,
        }
    }
}

/// One requested line at checkout; prices are never taken from the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub menu_item_id: String,
    pub qty: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderUserView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuTitleView {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_item: Option<MenuTitleView>,
    pub qty: u32,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOrderView {
    #[serde(rename = "_id")]
    pub id: String,
    pub order_number: String,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<OrderUserView>,
    pub items: Vec<OrderLineView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminOrderView {
    #[serde(flatten)]
    pub order: CustomerOrderView,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub location: Option<GeoPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        let items = vec![
            OrderLine {
                menu_item_id: "a".into(),
                menu_item: MenuSnapshot { title: "Chicken Chilly".into(), price: 355.0 },
                qty: 2,
                price: 355.0,
                note: Some("extra spicy".into()),
            },
            OrderLine {
                menu_item_id: "b".into(),
                menu_item: MenuSnapshot { title: "French Fries".into(), price: 195.0 },
                qty: 1,
                price: 195.0,
                note: Some(String::new()),
            },
        ];
        Order {
            id: "ord-1".into(),
            order_number: format_order_number(7),
            order_number_value: 7,
            user_id: "u1".into(),
            user_email: Some("sita@example.com".into()),
            user_name: "Sita".into(),
            total: Order::compute_total(&items),
            items,
            status: OrderStatus::Pending,
            address: "Lakeside, Pokhara".into(),
            phone: "9800000000".into(),
            location: Some(GeoPoint { lat: 28.2, lng: 83.9 }),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_normalize_status_aliases() {
        assert_eq!(OrderStatus::normalize(Some("preparing")), OrderStatus::InKitchen);
        assert_eq!(OrderStatus::normalize(Some(" Kitchen ")), OrderStatus::InKitchen);
        assert_eq!(OrderStatus::normalize(Some("OUT_FOR_DELIVERY")), OrderStatus::InTransit);
        assert_eq!(OrderStatus::normalize(Some("out for delivery")), OrderStatus::InTransit);
        assert_eq!(OrderStatus::normalize(Some("Delivered")), OrderStatus::Delivered);
        assert_eq!(OrderStatus::normalize(Some("cancelled")), OrderStatus::Pending);
        assert_eq!(OrderStatus::normalize(None), OrderStatus::Pending);
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&OrderStatus::InKitchen).unwrap();
        assert_eq!(json, "\"In Kitchen\"");
        let parsed: OrderStatus = serde_json::from_str("\"out-for-delivery\"").unwrap();
        assert_eq!(parsed, OrderStatus::InTransit);
        let parsed: OrderStatus = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, OrderStatus::Pending);
    }

    #[test]
    fn test_order_number_format() {
        assert_eq!(format_order_number(0), "#000");
        assert_eq!(format_order_number(42), "#042");
        assert_eq!(format_order_number(1234), "#1234");
    }

    #[test]
    fn test_totals_and_counts() {
        let order = sample_order();
        assert_eq!(order.total, 905.0);
        assert_eq!(order.item_count(), 3);
    }

    #[test]
    fn test_customer_view_hides_contact_details() {
        let order = sample_order();
        let json = serde_json::to_value(order.customer_view()).unwrap();
        assert_eq!(json["_id"], "ord-1");
        assert_eq!(json["orderNumber"], "#007");
        assert_eq!(json["user"]["name"], "Sita");
        assert_eq!(json["items"][0]["menuItem"]["title"], "Chicken Chilly");
        assert_eq!(json["items"][0]["note"], "extra spicy");
        assert!(json["items"][1].get("note").is_none());
        assert!(json.get("phone").is_none());

        let admin = serde_json::to_value(order.admin_view()).unwrap();
        assert_eq!(admin["_id"], "ord-1");
        assert_eq!(admin["phone"], "9800000000");
        assert_eq!(admin["location"]["lat"], 28.2);
    }
}
