use crate::actor_framework::ResourceActor;
use crate::admin::AdminDesk;
use crate::catalog::{seed_if_empty, CatalogReader};
use crate::clients::{OrderClient, ReviewClient, ServiceClient};
use crate::config::AppConfig;
use crate::domain::{Order, OrderOrigin, Review, Service};
use crate::error::StartupError;
use crate::http::AppState;
use crate::intake::OrderIntake;
use crate::notify::{LogNotifier, Notifier, WebhookNotifier};
use crate::reviews::ReviewDesk;
use crate::store::{ActorStore, ConnectionState, FallbackLocation, JsonFileStore, PrimaryStore};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

const MAILBOX_SIZE: usize = 32;

fn prefixed_id(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    move || format!("{}{}", prefix, Uuid::new_v4().simple())
}

/// Starts the entity actors and wires every component the HTTP layer needs.
pub struct BookingSystem {
    pub state: AppState,
    pub connection: ConnectionState,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl BookingSystem {
    pub async fn start(config: &AppConfig) -> Result<Self, StartupError> {
        let (service_actor, service_resource) = ResourceActor::<Service>::new(MAILBOX_SIZE, prefixed_id("svc_"));
        let (order_actor, order_resource) =
            ResourceActor::<Order>::new(MAILBOX_SIZE, || OrderOrigin::Primary.issue_id());
        let (review_actor, review_resource) = ResourceActor::<Review>::new(MAILBOX_SIZE, prefixed_id("rev_"));

        let handles = vec![
            tokio::spawn(service_actor.run()),
            tokio::spawn(order_actor.run()),
            tokio::spawn(review_actor.run()),
        ];

        let connection = ConnectionState::new(config.store_online);
        let store: Arc<dyn PrimaryStore> = Arc::new(ActorStore::new(
            ServiceClient::new(service_resource),
            OrderClient::new(order_resource),
            ReviewClient::new(review_resource),
            connection.clone(),
        ));

        if !connection.is_connected() {
            warn!("Primary store offline, orders will go to the fallback file");
        } else if config.seed_catalog {
            if let Err(e) = seed_if_empty(store.as_ref()).await {
                warn!(error = %e, "Catalog seeding failed");
            }
        }

        let location = FallbackLocation::resolve(config.fallback_dir.clone(), config.serverless);
        if location.is_ephemeral() {
            warn!(dir = %location.dir().display(), "Fallback storage is ephemeral and may not survive restarts");
        }
        let fallback = Arc::new(JsonFileStore::new(location));

        let notifier: Arc<dyn Notifier> = match &config.notify_webhook_url {
            Some(url) => Arc::new(WebhookNotifier::new(url.clone())?),
            None => Arc::new(LogNotifier),
        };

        let state = AppState {
            store: store.clone(),
            catalog: CatalogReader::new(store.clone()),
            intake: OrderIntake::new(store.clone(), fallback.clone(), notifier, config.operator_email.clone()),
            reviews: ReviewDesk::new(store.clone()),
            admin: AdminDesk::new(store),
            admin_token: config.admin_token.as_deref().map(Arc::from),
            fallback_ephemeral: fallback.location().is_ephemeral(),
        };
        if state.admin_token.is_none() {
            warn!("ADMIN_TOKEN not set, admin endpoints are disabled");
        }

        info!(store_connected = connection.is_connected(), fallback = %fallback.path().display(), "Booking system started");
        Ok(Self {
            state,
            connection,
            handles,
        })
    }

    /// Drops the last store handles so the actors drain and stop.
    ///
    /// Every clone of the state (the router included) must be gone first.
    pub async fn shutdown(self) -> Result<(), StartupError> {
        info!(store_connected = self.connection.is_connected(), "Shutting down system...");
        drop(self.state);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(StartupError::ActorTask(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
