use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer's rating of a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub service_id: String,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for submitting a review.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewCreate {
    #[serde(alias = "service")]
    pub service_id: String,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
}
