//! Menu item entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use bhatti_shared::constants::DEFAULT_MENU_RATING;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image_url: String,
    pub is_available: bool,
    pub rating: f64,
}

/// Fields an admin supplies when creating a dish. All are required;
/// absent fields deserialize empty so validation reports them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct NewMenuItem {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(range(exclusive_min = 0.0, message = "Price must be positive"))]
    pub price: f64,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "Image is required"))]
    pub image_url: String,
}

impl MenuItem {
    pub fn from_new(input: NewMenuItem) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            description: input.description,
            price: input.price,
            category: input.category,
            image_url: input.image_url,
            is_available: true,
            rating: DEFAULT_MENU_RATING,
        }
    }
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
    pub rating: Option<f64>,
}

impl MenuItemPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.image_url.is_none()
            && self.is_available.is_none()
            && self.rating.is_none()
    }

    pub fn apply(self, item: &mut MenuItem) {
        if let Some(title) = self.title {
            item.title = title;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(image_url) = self.image_url {
            item.image_url = image_url;
        }
        if let Some(is_available) = self.is_available {
            item.is_available = is_available;
        }
        if let Some(rating) = self.rating {
            item.rating = rating;
        }
    }
}

/// Search-bar filtering of the public menu
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuFilter {
    pub q: Option<String>,
    pub category: Option<String>,
}

impl MenuFilter {
    pub fn matches(&self, item: &MenuItem) -> bool {
        let category_ok = match self.category.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() && !c.eq_ignore_ascii_case("all") => {
                item.category.eq_ignore_ascii_case(c)
            }
            _ => true,
        };

        let query_ok = match self.q.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => {
                let needle = q.to_lowercase();
                item.title.to_lowercase().contains(&needle)
                    || item.description.to_lowercase().contains(&needle)
                    || item.category.to_lowercase().contains(&needle)
            }
            _ => true,
        };

        category_ok && query_ok
    }
}
