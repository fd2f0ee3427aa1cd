use crate::actor_framework::ResourceClient;
use crate::domain::{Review, ReviewCreate};
use crate::error::StoreError;
use tracing::{debug, instrument};

/// Client for interacting with the Review actor.
#[derive(Clone)]
pub struct ReviewClient {
    inner: ResourceClient<Review>,
}

impl_actor_client!(ReviewClient, Review);

impl ReviewClient {
    #[instrument(skip(self, params), fields(service_id = %params.service_id, rating = params.rating))]
    pub async fn create_review(&self, params: ReviewCreate) -> Result<Review, StoreError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }
}
