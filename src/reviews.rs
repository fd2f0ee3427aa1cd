//! Customer reviews and the per-service rating aggregate.

use crate::domain::{Rating, Review, ReviewCreate};
use crate::error::StoreError;
use crate::store::PrimaryStore;
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Clone)]
pub struct ReviewDesk {
    store: Arc<dyn PrimaryStore>,
}

impl ReviewDesk {
    pub fn new(store: Arc<dyn PrimaryStore>) -> Self {
        Self { store }
    }

    /// Stores the review and refreshes the service's rating.
    ///
    /// Once the review is stored the call succeeds; a failed rating refresh
    /// is logged and picked up by the next review for the service.
    #[instrument(skip(self, params), fields(service_id = %params.service_id))]
    pub async fn submit_review(&self, params: ReviewCreate) -> Result<Review, StoreError> {
        let service_id = params.service_id.clone();
        if self.store.find_service(&service_id).await?.is_none() {
            return Err(StoreError::NotFound(service_id));
        }

        let review = self.store.create_review(params).await?;

        match self.refresh_rating(&service_id).await {
            Ok(rating) => {
                info!(review_id = %review.id, average = rating.average, count = rating.count, "Review recorded")
            }
            Err(e) => warn!(review_id = %review.id, error = %e, "Review recorded but rating refresh failed"),
        }
        Ok(review)
    }

    async fn refresh_rating(&self, service_id: &str) -> Result<Rating, StoreError> {
        let reviews = self.store.find_reviews(service_id).await?;
        let rating = aggregate(&reviews);
        self.store
            .record_rating(service_id, rating.average, rating.count)
            .await?;
        Ok(rating)
    }

    /// Newest first.
    #[instrument(skip(self))]
    pub async fn list_reviews(&self, service_id: &str) -> Result<Vec<Review>, StoreError> {
        self.store.find_reviews(service_id).await
    }
}

/// Average rounded to one decimal place.
pub fn aggregate(reviews: &[Review]) -> Rating {
    if reviews.is_empty() {
        return Rating {
            average: 0.0,
            count: 0,
        };
    }
    let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let average = f64::from(sum) / reviews.len() as f64;
    Rating {
        average: (average * 10.0).round() / 10.0,
        count: reviews.len() as u32,
    }
}
