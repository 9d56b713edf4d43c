use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::models::domain::FilterCriteria;

/// Reasons a search is refused before any request is issued
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Location is required")]
    EmptyLocation,
}

/// Body of `POST /api/restaurants/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1))]
    pub location: String,
    pub filters: FilterCriteria,
}

impl SearchRequest {
    /// Build a request from raw user input; the location is trimmed first.
    pub fn new(location: &str, filters: FilterCriteria) -> Result<Self, ValidationError> {
        let request = Self {
            location: location.trim().to_string(),
            filters,
        };

        request
            .validate()
            .map_err(|_| ValidationError::EmptyLocation)?;

        Ok(request)
    }
}
