use serde::{Deserialize, Serialize};

/// A bookable home service shown in the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

/// Aggregate of all reviews left for a service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub average: f64,
    pub count: u32,
}

/// Payload for creating a new service.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub department_id: Option<String>,
}

/// Partial update applied by the admin screen.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServicePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub department_id: Option<String>,
}

impl Service {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            department_id: None,
            rating: None,
        }
    }
}
