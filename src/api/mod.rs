//! Data models and client for the DigitalOcean API
//!
//! This module contains the droplet and region models shared across the
//! application, plus the HTTP client that talks to the droplet-listing,
//! region-listing, and droplet-by-id endpoints.

pub mod client;

pub use client::{ApiClient, ApiError};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A droplet as returned by the listing and get-by-id calls
///
/// Only the fields the inventory cares about are typed; everything else in
/// the payload is preserved through `extra`, so single-host mode can emit
/// the complete record exactly as the API returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Droplet {
    /// Unique droplet identifier
    pub id: u64,
    /// Droplet name, not guaranteed unique
    pub name: String,
    /// Identifier of the region the droplet runs in
    pub region_id: u64,
    /// Public address; may be absent or empty
    #[serde(default)]
    pub ip_address: Option<String>,
    /// Remaining droplet attributes, passed through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Droplet {
    /// Returns the public address, treating absent and empty the same.
    ///
    /// Droplets without an address cannot be reached by the orchestration
    /// tool and are excluded from the inventory and index.
    pub fn address(&self) -> Option<&str> {
        self.ip_address.as_deref().filter(|addr| !addr.is_empty())
    }
}

/// A region as returned by the region-listing call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Unique region identifier
    pub id: u64,
    /// Short region name, e.g. "nyc1"; may be absent
    #[serde(default)]
    pub slug: Option<String>,
}

impl Region {
    /// The group label for this region: the slug when set and non-empty,
    /// otherwise the numeric id rendered as a string.
    pub fn label(&self) -> String {
        match self.slug.as_deref() {
            Some(slug) if !slug.is_empty() => slug.to_string(),
            _ => self.id.to_string(),
        }
    }
}
