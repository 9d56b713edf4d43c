use serde::{Deserialize, Serialize};
use crate::models::domain::RestaurantResult;

/// Success body of the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub restaurants: Vec<RestaurantResult>,
    #[serde(rename = "totalFound", default)]
    pub total_found: Option<usize>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Error body returned by the backend on non-success statuses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}
