//! Client-side shopping cart

use serde::{Deserialize, Serialize};

use super::menu_item::MenuItem;
use super::order::{GeoPoint, OrderItemRequest, PlaceOrder};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub menu_item_id: String,
    pub title: String,
    pub price: f64,
    pub qty: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CartLine {
    pub fn from_menu_item(item: &MenuItem, qty: u32) -> Self {
        Self {
            menu_item_id: item.id.clone(),
            title: item.title.clone(),
            price: item.price,
            qty,
            image_url: Some(item.image_url.clone()).filter(|u| !u.is_empty()),
            note: None,
        }
    }
}

/// Lines keyed by menu item id, in the order they were first added.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adding an id already in the cart sums the quantities.
    pub fn add(&mut self, line: CartLine) {
        if line.qty == 0 {
            return;
        }
        match self.items.iter_mut().find(|l| l.menu_item_id == line.menu_item_id) {
            Some(existing) => existing.qty += line.qty,
            None => self.items.push(line),
        }
    }

    /// A quantity of zero or less drops the line.
    pub fn update_quantity(&mut self, menu_item_id: &str, qty: i64) {
        if qty <= 0 {
            self.remove(menu_item_id);
            return;
        }
        if let Some(line) = self.items.iter_mut().find(|l| l.menu_item_id == menu_item_id) {
            line.qty = u32::try_from(qty).unwrap_or(u32::MAX);
        }
    }

    pub fn set_note(&mut self, menu_item_id: &str, note: &str) {
        if let Some(line) = self.items.iter_mut().find(|l| l.menu_item_id == menu_item_id) {
            line.note = Some(note.to_string()).filter(|n| !n.trim().is_empty());
        }
    }

    pub fn remove(&mut self, menu_item_id: &str) {
        self.items.retain(|l| l.menu_item_id != menu_item_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|l| l.qty).sum()
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(|l| l.price * f64::from(l.qty)).sum()
    }

    /// Checkout payload. Prices stay behind; the server re-reads them.
    pub fn to_order_request(
        &self,
        address: impl Into<String>,
        phone: impl Into<String>,
        location: Option<GeoPoint>,
    ) -> PlaceOrder {
        PlaceOrder {
            items: self
                .items
                .iter()
                .map(|l| OrderItemRequest {
                    menu_item_id: l.menu_item_id.clone(),
                    qty: i64::from(l.qty),
                    note: l.note.clone(),
                })
                .collect(),
            address: address.into(),
            phone: phone.into(),
            location,
        }
    }
}
