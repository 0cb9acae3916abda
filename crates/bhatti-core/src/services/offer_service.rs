//! Promotional offers

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::{NewOffer, Offer, OfferPatch};
use crate::error::DomainError;
use crate::repositories::OfferRepository;

pub struct OfferService {
    repo: Arc<dyn OfferRepository>,
}

impl OfferService {
    pub fn new(repo: Arc<dyn OfferRepository>) -> Self {
        Self { repo }
    }

    /// Offers a customer can see at `now`, newest first.
    pub async fn list_live(&self, now: DateTime<Utc>) -> Result<Vec<Offer>, DomainError> {
        let offers = self.repo.list_all().await?;
        Ok(offers.into_iter().filter(|o| o.is_live(now)).collect())
    }

    pub async fn list_all(&self) -> Result<Vec<Offer>, DomainError> {
        self.repo.list_all().await
    }

    pub async fn create(&self, input: NewOffer) -> Result<Offer, DomainError> {
        if !input.has_title() {
            return Err(DomainError::validation("Title is required"));
        }
        let offer = Offer::from_new(input, Utc::now());
        self.repo.insert(&offer).await?;
        info!("Offer created: {} ({})", offer.title, offer.id);
        Ok(offer)
    }

    pub async fn update(&self, id: Option<&str>, patch: OfferPatch) -> Result<Offer, DomainError> {
        let id = id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| DomainError::validation("Offer id is required"))?;
        if patch.is_empty() {
            return Err(DomainError::validation("No valid fields to update"));
        }
        let mut offer = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Offer"))?;
        patch.apply(&mut offer);
        self.repo.update(&offer).await?;
        Ok(offer)
    }

    pub async fn delete(&self, id: Option<&str>) -> Result<(), DomainError> {
        let id = id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| DomainError::validation("Offer id is required"))?;
        if !self.repo.delete(id).await? {
            return Err(DomainError::not_found("Offer"));
        }
        info!("Offer deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockOfferRepository;
    use chrono::TimeZone;

    fn offer(id: &str, active: bool, valid_to: Option<&str>) -> Offer {
        Offer {
            id: id.into(),
            title: format!("Offer {}", id),
            description: String::new(),
            highlight: String::new(),
            image_url: String::new(),
            valid_from: None,
            valid_to: valid_to.map(Into::into),
            is_active: active,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_live_filters_inactive_and_expired() {
        let mut repo = MockOfferRepository::new();
        repo.expect_list_all().returning(|| {
            Ok(vec![
                offer("1", true, None),
                offer("2", false, None),
                offer("3", true, Some("2026-10-01")),
            ])
        });
        let service = OfferService::new(Arc::new(repo));

        let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        let live = service.list_live(now).await.unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id, "1");
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let service = OfferService::new(Arc::new(MockOfferRepository::new()));
        let err = service
            .create(NewOffer { title: Some("   ".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::validation("Title is required"));
    }

    #[tokio::test]
    async fn test_delete_unknown_offer() {
        let mut repo = MockOfferRepository::new();
        repo.expect_delete().returning(|_| Ok(false));
        let service = OfferService::new(Arc::new(repo));
        let err = service.delete(Some("missing")).await.unwrap_err();
        assert_eq!(err, DomainError::not_found("Offer"));
        assert_eq!(err.to_string(), "Offer not found");
    }
}
