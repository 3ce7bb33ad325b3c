//! DigitalOcean API client
//!
//! This module wraps the three upstream calls the inventory needs: region
//! listing, droplet listing, and droplet-by-id. Credentials ride along as
//! query parameters on every request, and every response body carries a
//! `status` field; anything other than `"OK"` is a hard failure for that
//! call, surfaced with the raw payload attached.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{Droplet, Region};
use crate::config::Credentials;

/// Base URL for the DigitalOcean API
const DIGITALOCEAN_BASE_URL: &str = "https://api.digitalocean.com";

/// Errors that can occur when calling the DigitalOcean API
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The API answered with a non-OK status field
    #[error("API returned status {status:?}: {payload}")]
    BadStatus {
        /// The value of the response's `status` field
        status: String,
        /// The raw response body
        payload: String,
    },
}

/// Client for the DigitalOcean droplet and region endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl ApiClient {
    /// Create a new ApiClient talking to the production API
    pub fn new(credentials: Credentials) -> Self {
        Self {
            client: Client::new(),
            base_url: DIGITALOCEAN_BASE_URL.to_string(),
            credentials,
        }
    }

    /// Create a new ApiClient with a custom base URL
    ///
    /// Useful for testing against a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch all regions visible to the credentials
    pub async fn list_regions(&self) -> Result<Vec<Region>, ApiError> {
        let value = self.get_json("regions").await?;
        let body: RegionsResponse = serde_json::from_value(value)?;
        Ok(body.regions)
    }

    /// Fetch all droplets visible to the credentials
    pub async fn list_droplets(&self) -> Result<Vec<Droplet>, ApiError> {
        let value = self.get_json("droplets").await?;
        let body: DropletsResponse = serde_json::from_value(value)?;
        Ok(body.droplets)
    }

    /// Fetch the full record for a single droplet by id
    ///
    /// # Arguments
    /// * `id` - The droplet identifier from the address index
    ///
    /// # Returns
    /// * `Ok(Droplet)` - The complete droplet record
    /// * `Err(ApiError)` - If the request fails or the API reports an error
    pub async fn get_droplet(&self, id: u64) -> Result<Droplet, ApiError> {
        let value = self.get_json(&format!("droplets/{id}")).await?;
        let body: DropletResponse = serde_json::from_value(value)?;
        Ok(body.droplet)
    }

    /// Perform an authenticated GET and check the response's status envelope
    async fn get_json(&self, path: &str) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("client_id", self.credentials.client_id.as_str()),
                ("api_key", self.credentials.api_key.as_str()),
            ])
            .send()
            .await?;
        let text = response.text().await?;
        let value: serde_json::Value = serde_json::from_str(&text)?;

        let status = value
            .get("status")
            .and_then(|status| status.as_str())
            .unwrap_or_default();
        if status != "OK" {
            return Err(ApiError::BadStatus {
                status: status.to_string(),
                payload: text,
            });
        }

        Ok(value)
    }
}

/// Region-listing response structure
#[derive(Debug, Deserialize)]
struct RegionsResponse {
    regions: Vec<Region>,
}

/// Droplet-listing response structure
#[derive(Debug, Deserialize)]
struct DropletsResponse {
    droplets: Vec<Droplet>,
}

/// Droplet-by-id response structure
#[derive(Debug, Deserialize)]
struct DropletResponse {
    droplet: Droplet,
}
