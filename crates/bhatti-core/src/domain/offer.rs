//! Promotional offers

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub highlight: String,
    pub image_url: String,
    /// Window bounds are stored as entered by the admin form.
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Parse a window bound. Accepts RFC 3339, `datetime-local` input
/// (`YYYY-MM-DDTHH:MM`) and bare dates at midnight UTC.
pub fn parse_offer_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Offer {
    /// Active and inside its validity window. A bound that cannot be parsed
    /// never matches.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        if !self.is_active {
            return false;
        }
        let from_ok = match self.valid_from.as_deref().filter(|v| !v.is_empty()) {
            None => true,
            Some(raw) => parse_offer_instant(raw).is_some_and(|from| from <= now),
        };
        let to_ok = match self.valid_to.as_deref().filter(|v| !v.is_empty()) {
            None => true,
            Some(raw) => parse_offer_instant(raw).is_some_and(|to| to >= now),
        };
        from_ok && to_ok
    }

    pub fn from_new(input: NewOffer, now: DateTime<Utc>) -> Self {
        let trim = |v: Option<String>| v.map(|s| s.trim().to_string()).unwrap_or_default();
        Self {
            id: Uuid::new_v4().to_string(),
            title: input.title.unwrap_or_default().trim().to_string(),
            description: trim(input.description),
            highlight: trim(input.highlight),
            image_url: trim(input.image_url),
            valid_from: blank_to_none(input.valid_from),
            valid_to: blank_to_none(input.valid_to),
            is_active: input.is_active.unwrap_or(true),
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOffer {
    pub title: Option<String>,
    pub description: Option<String>,
    pub highlight: Option<String>,
    pub image_url: Option<String>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub is_active: Option<bool>,
}

impl NewOffer {
    pub fn has_title(&self) -> bool {
        self.title.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub highlight: Option<String>,
    pub image_url: Option<String>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub is_active: Option<bool>,
}

impl OfferPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.highlight.is_none()
            && self.image_url.is_none()
            && self.valid_from.is_none()
            && self.valid_to.is_none()
            && self.is_active.is_none()
    }

    pub fn apply(self, offer: &mut Offer) {
        if let Some(title) = self.title {
            offer.title = title;
        }
        if let Some(description) = self.description {
            offer.description = description;
        }
        if let Some(highlight) = self.highlight {
            offer.highlight = highlight;
        }
        if let Some(image_url) = self.image_url {
            offer.image_url = image_url;
        }
        // An empty string clears the bound.
        if let Some(valid_from) = self.valid_from {
            offer.valid_from = blank_to_none(Some(valid_from));
        }
        if let Some(valid_to) = self.valid_to {
            offer.valid_to = blank_to_none(Some(valid_to));
        }
        if let Some(is_active) = self.is_active {
            offer.is_active = is_active;
        }
    }
}
