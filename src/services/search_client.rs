use crate::config::ApiSettings;
use crate::models::{ErrorResponse, RestaurantResult, SearchRequest, SearchResponse};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the search API
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Search API returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl SearchError {
    /// Transport-level failure: timeout, DNS, refused connection
    pub fn is_network(&self) -> bool {
        matches!(self, SearchError::Network(_))
    }

    /// The backend answered, but not with a usable success
    pub fn is_server(&self) -> bool {
        matches!(self, SearchError::Server { .. } | SearchError::InvalidResponse(_))
    }
}

/// Anything that can answer a restaurant search.
///
/// One call is one round trip. Implementations must not retry or cache.
#[async_trait]
pub trait SearchApi: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RestaurantResult>, SearchError>;
}

/// HTTP client for the restaurant search backend
///
/// Handles:
/// - `POST /api/restaurants/search`
/// - `GET /api/restaurants/{id}`
#[derive(Debug, Clone)]
pub struct SearchClient {
    base_url: String,
    client: Client,
}

impl SearchClient {
    /// Create a new client against `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SearchError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<Self, SearchError> {
        Self::new(
            settings.base_url.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search restaurants near a location with the given filters
    pub async fn search_restaurants(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<RestaurantResult>, SearchError> {
        let url = format!("{}/api/restaurants/search", self.base_url);

        tracing::debug!("Searching restaurants via {} for {:?}", url, request.location);

        let response = self.client.post(&url).json(request).send().await?;
        let body: SearchResponse = read_json(response).await?;

        tracing::debug!(
            "Search for {:?} returned {} restaurants (total: {:?})",
            request.location,
            body.restaurants.len(),
            body.total_found
        );

        Ok(body.restaurants)
    }

    /// Fetch a single restaurant by identifier
    pub async fn restaurant_details(&self, id: &str) -> Result<RestaurantResult, SearchError> {
        let url = format!(
            "{}/api/restaurants/{}",
            self.base_url,
            urlencoding::encode(id)
        );

        tracing::debug!("Fetching restaurant details from: {}", url);

        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }
}

#[async_trait]
impl SearchApi for SearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RestaurantResult>, SearchError> {
        self.search_restaurants(request).await
    }
}

/// Check the status and decode the body.
///
/// Reading the body is transport; decoding it is the backend's fault.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, SearchError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.detail)
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());

        tracing::error!("Search API error {}: {}", status, message);

        return Err(SearchError::Server {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body)
        .map_err(|e| SearchError::InvalidResponse(format!("Failed to parse response: {}", e)))
}
