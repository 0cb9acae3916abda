//! Customer profile and saved address book

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use bhatti_shared::constants::DEFAULT_ADDRESS_LABEL;

use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedAddress {
    pub id: String,
    pub label: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Text of the default address, kept in step with `addresses`.
    pub address: String,
    pub addresses: Vec<SavedAddress>,
    pub default_address_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub addresses: Vec<SavedAddress>,
    pub default_address_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressBookView {
    pub addresses: Vec<SavedAddress>,
    pub default_address_id: Option<String>,
}

// Distinguishes an explicit `null` from an absent field.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub default_address_id: Option<Option<String>>,
}

impl ProfileUpdate {
    fn present(value: &Option<String>) -> bool {
        value.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// Email supplied without name or phone (the admin settings form).
    pub fn is_email_only(&self) -> bool {
        Self::present(&self.email) && !Self::present(&self.name) && !Self::present(&self.phone)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    pub label: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPatch {
    pub id: Option<String>,
    pub label: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub make_default: bool,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl UserProfile {
    pub fn new(uid: impl Into<String>, email: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Stored default, else the first saved address.
    pub fn effective_default_id(&self) -> Option<String> {
        self.default_address_id
            .clone()
            .or_else(|| self.addresses.first().map(|a| a.id.clone()))
    }

    fn mirror_default(&mut self) {
        self.address = match &self.default_address_id {
            Some(id) if !self.addresses.is_empty() => self
                .addresses
                .iter()
                .find(|a| &a.id == id)
                .map(|a| a.address.clone())
                .unwrap_or_default(),
            _ => self
                .addresses
                .first()
                .map(|a| a.address.clone())
                .unwrap_or_default(),
        };
    }

    pub fn add_address(
        &mut self,
        label: Option<&str>,
        address: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<String, DomainError> {
        let address = non_blank(address).ok_or_else(|| DomainError::validation("Address is required"))?;
        let entry = SavedAddress {
            id: Uuid::new_v4().to_string(),
            label: non_blank(label).unwrap_or(DEFAULT_ADDRESS_LABEL).to_string(),
            address: address.to_string(),
            created_at: Some(now),
        };
        let id = entry.id.clone();
        self.addresses.push(entry);
        if self.default_address_id.is_none() {
            self.default_address_id = Some(id.clone());
        }
        self.mirror_default();
        Ok(id)
    }

    pub fn update_address(&mut self, patch: &AddressPatch) -> Result<(), DomainError> {
        let id = patch
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| DomainError::validation("Address id is required"))?;
        let entry = self
            .addresses
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| DomainError::not_found("Address"))?;

        if let Some(label) = non_blank(patch.label.as_deref()) {
            entry.label = label.to_string();
        }
        if let Some(address) = non_blank(patch.address.as_deref()) {
            entry.address = address.to_string();
        }

        if patch.make_default {
            self.default_address_id = Some(id.to_string());
        } else if let Some(current) = &self.default_address_id {
            if !self.addresses.iter().any(|a| &a.id == current) {
                self.default_address_id = self.addresses.first().map(|a| a.id.clone());
            }
        }
        self.mirror_default();
        Ok(())
    }

    pub fn remove_address(&mut self, id: Option<&str>) -> Result<(), DomainError> {
        let id = id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| DomainError::validation("Address id is required"))?;
        self.addresses.retain(|a| a.id != id);
        if self.default_address_id.as_deref() == Some(id) {
            self.default_address_id = self.addresses.first().map(|a| a.id.clone());
        }
        self.mirror_default();
        Ok(())
    }

    /// Apply a profile form submission. `fallback_email` is the identity's
    /// email, used when a new profile is created without one.
    pub fn apply_update(
        &mut self,
        update: ProfileUpdate,
        fallback_email: Option<&str>,
        is_new: bool,
    ) -> Result<(), DomainError> {
        if update.is_email_only() {
            self.email = update.email.unwrap_or_default();
            return Ok(());
        }

        let (Some(name), Some(phone)) = (
            update.name.filter(|n| !n.is_empty()),
            update.phone.filter(|p| !p.is_empty()),
        ) else {
            return Err(DomainError::validation("Name and phone are required"));
        };

        self.name = name;
        self.phone = phone;
        match update.email.filter(|e| !e.is_empty()) {
            Some(email) => self.email = email,
            None if is_new => self.email = fallback_email.unwrap_or_default().to_string(),
            None => {}
        }
        if let Some(default_id) = update.default_address_id {
            self.default_address_id = default_id;
        }
        Ok(())
    }

    pub fn view(&self) -> ProfileView {
        ProfileView {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            addresses: self.addresses.clone(),
            default_address_id: self.effective_default_id(),
            created_at: self.created_at,
        }
    }

    pub fn address_book(&self) -> AddressBookView {
        AddressBookView {
            addresses: self.addresses.clone(),
            default_address_id: self.default_address_id.clone(),
        }
    }
}
