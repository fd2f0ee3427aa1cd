//! Typed clients over the generic resource actors.
//!
//! Framework failures are translated into [`StoreError`] here so that callers
//! only ever see store-level errors.

#[macro_use]
mod macros;
mod order_client;
mod review_client;
mod service_client;

pub use order_client::OrderClient;
pub use review_client::ReviewClient;
pub use service_client::ServiceClient;

use crate::actor_framework::{Entity, FrameworkError, ResourceClient};
use crate::error::StoreError;
use async_trait::async_trait;
use tracing::debug;

impl From<FrameworkError> for StoreError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                StoreError::Unavailable(e.to_string())
            }
            FrameworkError::NotFound(id) => StoreError::NotFound(id),
            FrameworkError::Rejected(msg) => StoreError::Validation(msg),
            FrameworkError::Conflict(id) => StoreError::Duplicate(id),
        }
    }
}

/// Read and delete operations shared by every resource client.
#[async_trait]
pub trait ActorClient<T: Entity<Id = String>>: Send + Sync {
    fn inner(&self) -> &ResourceClient<T>;

    async fn get(&self, id: String) -> Result<Option<T>, StoreError> {
        debug!(%id, "Sending get request");
        Ok(self.inner().get(id).await?)
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        debug!("Sending list request");
        Ok(self.inner().list().await?)
    }

    async fn delete(&self, id: String) -> Result<(), StoreError> {
        debug!(%id, "Sending delete request");
        Ok(self.inner().delete(id).await?)
    }
}
