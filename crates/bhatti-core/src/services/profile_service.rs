//! Customer profile and address book

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    AddressBookView, AddressPatch, NewAddress, Principal, ProfileUpdate, ProfileView, UserProfile,
};
use crate::error::DomainError;
use crate::repositories::ProfileRepository;

pub struct ProfileService {
    repo: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self { repo }
    }

    async fn load_or_new(&self, principal: &Principal) -> Result<(UserProfile, bool), DomainError> {
        Ok(match self.repo.find(&principal.uid).await? {
            Some(profile) => (profile, false),
            None => {
                let mut profile = UserProfile::new(principal.uid.clone(), principal.email.clone());
                profile.created_at = Some(Utc::now());
                (profile, true)
            }
        })
    }

    fn with_identity_email(mut profile: UserProfile, principal: &Principal) -> UserProfile {
        if profile.email.is_empty() {
            if let Some(email) = &principal.email {
                profile.email = email.clone();
            }
        }
        profile
    }

    pub async fn get(&self, principal: &Principal) -> Result<ProfileView, DomainError> {
        let profile = self
            .repo
            .find(&principal.uid)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;
        Ok(Self::with_identity_email(profile, principal).view())
    }

    pub async fn update(&self, principal: &Principal, update: ProfileUpdate) -> Result<ProfileView, DomainError> {
        let (mut profile, is_new) = self.load_or_new(principal).await?;
        profile.apply_update(update, principal.email.as_deref(), is_new)?;
        self.repo.save(&profile).await?;
        Ok(Self::with_identity_email(profile, principal).view())
    }

    pub async fn add_address(&self, principal: &Principal, input: NewAddress) -> Result<AddressBookView, DomainError> {
        let (profile, _) = self.load_or_new(principal).await?;
        let mut profile = Self::with_identity_email(profile, principal);
        profile.add_address(input.label.as_deref(), input.address.as_deref(), Utc::now())?;
        self.repo.save(&profile).await?;
        Ok(profile.address_book())
    }

    pub async fn update_address(&self, principal: &Principal, patch: AddressPatch) -> Result<AddressBookView, DomainError> {
        let (mut profile, _) = self.load_or_new(principal).await?;
        profile.update_address(&patch)?;
        self.repo.save(&profile).await?;
        Ok(profile.address_book())
    }

    pub async fn remove_address(&self, principal: &Principal, id: Option<&str>) -> Result<AddressBookView, DomainError> {
        let (mut profile, _) = self.load_or_new(principal).await?;
        profile.remove_address(id)?;
        self.repo.save(&profile).await?;
        Ok(profile.address_book())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::repositories::MockProfileRepository;

    fn customer() -> Principal {
        Principal::new("u9", Some("maya@example.com".into()), Role::Guest)
    }

    #[tokio::test]
    async fn test_get_missing_profile() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find().returning(|_| Ok(None));
        let service = ProfileService::new(Arc::new(repo));
        let err = service.get(&customer()).await.unwrap_err();
        assert_eq!(err.to_string(), "User not found");
    }

    #[tokio::test]
    async fn test_add_address_creates_profile() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find().returning(|_| Ok(None));
        repo.expect_save()
            .withf(|p| p.uid == "u9" && p.email == "maya@example.com" && p.address == "Bagar")
            .times(1)
            .returning(|_| Ok(()));
        let service = ProfileService::new(Arc::new(repo));

        let book = service
            .add_address(&customer(), NewAddress { label: None, address: Some("Bagar".into()) })
            .await
            .unwrap();
        assert_eq!(book.addresses.len(), 1);
        assert_eq!(book.default_address_id, Some(book.addresses[0].id.clone()));
    }

    #[tokio::test]
    async fn test_update_requires_name_and_phone() {
        let mut repo = MockProfileRepository::new();
        repo.expect_find().returning(|_| Ok(None));
        let service = ProfileService::new(Arc::new(repo));
        let err = service
            .update(&customer(), ProfileUpdate { name: Some("Maya".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::validation("Name and phone are required"));
    }
}
