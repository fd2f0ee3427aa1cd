//! Service catalog reads, with a fixed substitute catalog for offline mode.

use crate::domain::{Service, ServiceCreate};
use crate::error::StoreError;
use crate::store::PrimaryStore;
use std::sync::Arc;
use tracing::{info, instrument, warn};

const SUBSTITUTE_ID_PREFIX: &str = "mock";

/// Representative services: (name, description, price).
const CATALOG_ENTRIES: [(&str, &str, f64); 6] = [
    ("Full home cleaning", "Deep cleaning of every room, kitchen and bathroom", 500.0),
    ("Electrical maintenance", "Safe repair of all electrical faults and fittings", 200.0),
    ("Plumbing repair", "Leak detection, drain unblocking and fixture installation", 150.0),
    ("Pest control", "Safe and effective treatment against insects and rodents", 300.0),
    ("Water tank cleaning", "Washing and disinfection of rooftop and ground tanks", 400.0),
    ("AC maintenance", "Cleaning, refrigerant recharge and full service for AC units", 250.0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogListing {
    pub items: Vec<Service>,
    pub is_substitute: bool,
}

/// Hardcoded catalog shown when the primary store cannot be queried.
pub fn substitute_catalog() -> Vec<Service> {
    CATALOG_ENTRIES
        .iter()
        .enumerate()
        .map(|(i, (name, description, price))| {
            Service::new(format!("{}{}", SUBSTITUTE_ID_PREFIX, i + 1), *name, *description, *price)
        })
        .collect()
}

/// Price of a substitute-catalog service, by its `mockN` id.
pub fn substitute_price(id: &str) -> Option<f64> {
    let index: usize = id.strip_prefix(SUBSTITUTE_ID_PREFIX)?.parse().ok()?;
    CATALOG_ENTRIES.get(index.checked_sub(1)?).map(|(_, _, price)| *price)
}

/// Same catalog as creation payloads, for seeding an empty primary store.
pub fn seed_catalog() -> Vec<ServiceCreate> {
    CATALOG_ENTRIES
        .iter()
        .map(|(name, description, price)| ServiceCreate {
            name: name.to_string(),
            description: description.to_string(),
            price: *price,
            department_id: None,
        })
        .collect()
}

/// Seeds the store when it holds no services. Returns how many were created.
#[instrument(skip(store))]
pub async fn seed_if_empty(store: &dyn PrimaryStore) -> Result<usize, StoreError> {
    if !store.find_services().await?.is_empty() {
        return Ok(0);
    }
    let mut created = 0;
    for params in seed_catalog() {
        store.create_service(params).await?;
        created += 1;
    }
    info!(created, "Seeded service catalog");
    Ok(created)
}

/// Lists services; never fails outward.
#[derive(Clone)]
pub struct CatalogReader {
    store: Arc<dyn PrimaryStore>,
}

impl CatalogReader {
    pub fn new(store: Arc<dyn PrimaryStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn list_services(&self) -> CatalogListing {
        match self.store.find_services().await {
            Ok(items) => {
                info!(service_count = items.len(), "Listed services");
                CatalogListing {
                    items,
                    is_substitute: false,
                }
            }
            Err(e) => {
                warn!(error = %e, "Service listing failed, serving substitute catalog");
                CatalogListing {
                    items: substitute_catalog(),
                    is_substitute: true,
                }
            }
        }
    }
}
