use crate::domain::{Order, OrderDraft, OrderOrigin};
use crate::error::FallbackError;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

const FALLBACK_FILE_NAME: &str = "orders.json";
const EPHEMERAL_DIR_NAME: &str = "home-services-data";
const PERSISTENT_DIR: &str = "data";

/// Where the fallback file lives for this deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackLocation {
    /// Temp directory of a restricted/serverless runtime; may vanish between
    /// invocations.
    Ephemeral(PathBuf),
    Persistent(PathBuf),
}

impl FallbackLocation {
    /// An explicit directory always wins; otherwise serverless deployments
    /// fall back to the temp directory and everything else to `./data`.
    pub fn resolve(explicit_dir: Option<PathBuf>, serverless: bool) -> Self {
        match (explicit_dir, serverless) {
            (Some(dir), true) => FallbackLocation::Ephemeral(dir),
            (Some(dir), false) => FallbackLocation::Persistent(dir),
            (None, true) => FallbackLocation::Ephemeral(std::env::temp_dir().join(EPHEMERAL_DIR_NAME)),
            (None, false) => FallbackLocation::Persistent(PathBuf::from(PERSISTENT_DIR)),
        }
    }

    pub fn dir(&self) -> &Path {
        match self {
            FallbackLocation::Ephemeral(dir) | FallbackLocation::Persistent(dir) => dir,
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        matches!(self, FallbackLocation::Ephemeral(_))
    }
}

/// One element of the fallback file's JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackRecord {
    #[serde(flatten)]
    pub order: Order,
    pub is_local: bool,
}

/// Order persistence used only while the primary store is unreachable.
#[async_trait]
pub trait FallbackStore: Send + Sync {
    /// Stores a locally identified record and returns it.
    async fn append(&self, draft: OrderDraft) -> Result<Order, FallbackError>;

    /// Newest first. Unreadable storage yields an empty list.
    async fn list_all(&self) -> Vec<Order>;
}

/// The whole fallback list is one JSON array, rewritten on every append.
///
/// There is no locking: two appends racing during an outage can each write
/// back a snapshot missing the other's record.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    location: FallbackLocation,
    file: PathBuf,
}

impl JsonFileStore {
    pub fn new(location: FallbackLocation) -> Self {
        let file = location.dir().join(FALLBACK_FILE_NAME);
        Self { location, file }
    }

    pub fn location(&self) -> &FallbackLocation {
        &self.location
    }

    pub fn path(&self) -> &Path {
        &self.file
    }

    fn io_error(&self, source: std::io::Error) -> FallbackError {
        FallbackError::Io {
            path: self.file.display().to_string(),
            source,
        }
    }

    /// Raw array entries. Entries that are not order records are kept so a
    /// rewrite never drops them.
    async fn read_entries(&self) -> Vec<Value> {
        let bytes = match tokio::fs::read(&self.file).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.file.display(), "Fallback file not created yet");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.file.display(), error = %e, "Fallback file unreadable, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.file.display(), error = %e, "Fallback file is not a JSON array");
                self.quarantine().await;
                Vec::new()
            }
        }
    }

    /// Moves an unparseable file aside so the next append cannot overwrite it.
    async fn quarantine(&self) {
        let target = self
            .file
            .with_extension(format!("json.corrupt-{}", Utc::now().timestamp_millis()));
        match tokio::fs::rename(&self.file, &target).await {
            Ok(()) => warn!(moved_to = %target.display(), "Corrupt fallback file set aside"),
            Err(e) => warn!(error = %e, "Could not set corrupt fallback file aside"),
        }
    }
}

#[async_trait]
impl FallbackStore for JsonFileStore {
    #[instrument(skip(self, draft), fields(path = %self.file.display()))]
    async fn append(&self, draft: OrderDraft) -> Result<Order, FallbackError> {
        tokio::fs::create_dir_all(self.location.dir())
            .await
            .map_err(|e| self.io_error(e))?;

        let mut entries = self.read_entries().await;
        let origin = OrderOrigin::Local;
        let order = Order::from_draft(origin.issue_id(), draft, origin);
        let record = FallbackRecord {
            order: order.clone(),
            is_local: true,
        };
        entries.insert(0, serde_json::to_value(&record)?);

        let bytes = serde_json::to_vec_pretty(&entries)?;
        tokio::fs::write(&self.file, bytes)
            .await
            .map_err(|e| self.io_error(e))?;

        info!(order_id = %order.id, record_count = entries.len(), "Order saved to durable fallback");
        Ok(order)
    }

    async fn list_all(&self) -> Vec<Order> {
        let entries = self.read_entries().await;
        let total = entries.len();
        let orders: Vec<Order> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<FallbackRecord>(entry).ok())
            .map(|record| record.order)
            .collect();
        if orders.len() < total {
            warn!(skipped = total - orders.len(), "Fallback file holds entries that are not order records");
        }
        orders
    }
}
