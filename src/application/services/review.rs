//! Hotel reviews, one per client and hotel

use std::sync::Arc;

use tracing::info;

use crate::application::access::AccessPolicy;
use crate::application::validation::{FieldViolation, ValidationService};
use crate::domain::review::RATING_RANGE;
use crate::domain::{
    Actor, DomainError, DomainResult, NewReview, RepositoryProvider, Review, ReviewDraft,
};
use crate::shared::i18n::SharedMessages;

pub struct ReviewService {
    repos: Arc<dyn RepositoryProvider>,
    access: Arc<AccessPolicy>,
    validation: Arc<ValidationService>,
    messages: SharedMessages,
}

impl ReviewService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        access: Arc<AccessPolicy>,
        validation: Arc<ValidationService>,
        messages: SharedMessages,
    ) -> Self {
        Self {
            repos,
            access,
            validation,
            messages,
        }
    }

    pub async fn get(&self, id: i32) -> DomainResult<Option<Review>> {
        self.repos.reviews().find_by_id(id).await
    }

    pub async fn load(&self, id: i32) -> DomainResult<Review> {
        self.get(id)
            .await?
            .ok_or_else(|| DomainError::Review(self.messages.message("review.not-found")))
    }

    /// Newest first
    pub async fn find_by_hotel(&self, hotel_id: i32) -> DomainResult<Vec<Review>> {
        self.require_hotel(hotel_id).await?;
        self.repos.reviews().find_by_hotel(hotel_id).await
    }

    pub async fn create(
        &self,
        actor: &Actor,
        hotel_id: i32,
        draft: ReviewDraft,
    ) -> DomainResult<Review> {
        self.require_client(actor).await?;
        self.require_hotel(hotel_id).await?;
        self.check_rating(&draft)?;

        let reviews = self.repos.reviews();
        if reviews
            .find_by_client_and_hotel(actor.client_id, hotel_id)
            .await?
            .is_some()
        {
            return Err(self.duplicate());
        }

        let review = reviews
            .insert(NewReview::new(actor.client_id, hotel_id, draft))
            .await?
            .ok_or_else(|| self.duplicate())?;

        info!(review_id = review.id, hotel_id, rating = review.rating, "Review posted");
        Ok(review)
    }

    pub async fn update(&self, actor: &Actor, id: i32, draft: ReviewDraft) -> DomainResult<Review> {
        let mut review = self.load(id).await?;
        self.check_owner(actor, &review).await?;
        self.check_rating(&draft)?;

        review.apply(draft);
        let review = self.repos.reviews().update(review).await?;
        info!(review_id = review.id, "Review updated");
        Ok(review)
    }

    pub async fn delete(&self, actor: &Actor, id: i32) -> DomainResult<()> {
        let review = self.load(id).await?;
        self.check_owner(actor, &review).await?;

        self.repos.reviews().delete(review.id).await?;
        info!(review_id = review.id, "Review deleted");
        Ok(())
    }

    async fn require_hotel(&self, hotel_id: i32) -> DomainResult<()> {
        match self.repos.hotels().find_by_id(hotel_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::HotelNotFound(
                self.messages.message("hotel.not-found"),
            )),
        }
    }

    /// Owner or admin. Only an admin may touch a review whose owner is gone.
    async fn check_owner(&self, actor: &Actor, review: &Review) -> DomainResult<()> {
        match self.repos.clients().find_by_id(review.client_id).await? {
            Some(owner) => self.access.check_possibility_action(actor, &owner.login),
            None => self.access.require_admin(actor),
        }
    }

    async fn require_client(&self, actor: &Actor) -> DomainResult<()> {
        match self.repos.clients().find_by_id(actor.client_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::ClientNotFound(
                self.messages.message("client.not-found"),
            )),
        }
    }

    fn check_rating(&self, draft: &ReviewDraft) -> DomainResult<()> {
        let mut violations = Vec::new();
        if !RATING_RANGE.contains(&draft.rating) {
            violations.push(
                FieldViolation::new("rating", "range")
                    .with_param("min", RATING_RANGE.start())
                    .with_param("max", RATING_RANGE.end()),
            );
        }
        self.validation.fail_if_any(violations)
    }

    fn duplicate(&self) -> DomainError {
        DomainError::Review(self.messages.message("review.duplicate"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::fixtures::{admin, Fixture};

    fn draft(rating: i32) -> ReviewDraft {
        ReviewDraft {
            rating,
            text: "Quiet rooms, friendly staff".into(),
        }
    }

    #[tokio::test]
    async fn second_review_of_same_hotel_is_rejected() {
        let fx = Fixture::new();
        let (hotel, _) = fx.hotel_with_room(101).await;
        let anna = fx.register("anna").await;

        fx.services.reviews.create(&anna, hotel.id, draft(5)).await.unwrap();
        let err = fx
            .services
            .reviews
            .create(&anna, hotel.id, draft(4))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Review(_)));
    }

    #[tokio::test]
    async fn rating_outside_scale_is_invalid() {
        let fx = Fixture::new();
        let (hotel, _) = fx.hotel_with_room(101).await;
        let anna = fx.register("anna").await;
        let err = fx
            .services
            .reviews
            .create(&anna, hotel.id, draft(6))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "rating: must be between 1 and 5");
    }

    #[tokio::test]
    async fn only_author_or_admin_may_edit() {
        let fx = Fixture::new();
        let (hotel, _) = fx.hotel_with_room(101).await;
        let anna = fx.register("anna").await;
        let boris = fx.register("boris").await;
        let review = fx.services.reviews.create(&anna, hotel.id, draft(3)).await.unwrap();

        let err = fx
            .services
            .reviews
            .update(&boris, review.id, draft(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InsufficientAccess(_)));

        let edited = fx
            .services
            .reviews
            .update(&admin(), review.id, draft(4))
            .await
            .unwrap();
        assert_eq!(edited.rating, 4);
        assert_eq!(edited.client_id, anna.client_id);
    }

    #[tokio::test]
    async fn reviews_of_missing_hotel_are_not_found() {
        let fx = Fixture::new();
        let err = fx.services.reviews.find_by_hotel(12).await.unwrap_err();
        assert!(matches!(err, DomainError::HotelNotFound(_)));
    }

    #[tokio::test]
    async fn deleted_client_cannot_review() {
        let fx = Fixture::new();
        let (hotel, _) = fx.hotel_with_room(101).await;
        let ghost = fx.register("ghost").await;
        fx.services.clients.delete(&ghost, ghost.client_id).await.unwrap();

        let err = fx
            .services
            .reviews
            .create(&ghost, hotel.id, draft(2))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ClientNotFound(_)));
        assert!(fx.services.reviews.find_by_hotel(hotel.id).await.unwrap().is_empty());
    }
}
