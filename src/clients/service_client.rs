use crate::actor_framework::ResourceClient;
use crate::domain::{Service, ServiceCreate, ServicePatch};
use crate::error::StoreError;
use crate::service_actor::ServiceAction;
use tracing::{debug, instrument};

/// Client for interacting with the Service actor.
#[derive(Clone)]
pub struct ServiceClient {
    inner: ResourceClient<Service>,
}

impl_actor_client!(ServiceClient, Service);

impl ServiceClient {
    #[instrument(skip(self, params), fields(service_name = %params.name))]
    pub async fn create_service(&self, params: ServiceCreate) -> Result<Service, StoreError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_service(&self, id: String, patch: ServicePatch) -> Result<Service, StoreError> {
        debug!("Sending request");
        Ok(self.inner.update(id, patch).await?)
    }

    #[instrument(skip(self))]
    pub async fn record_rating(&self, id: String, average: f64, count: u32) -> Result<Service, StoreError> {
        debug!("Sending request");
        Ok(self
            .inner
            .perform_action(id, ServiceAction::RecordRating { average, count })
            .await?)
    }
}
