//! Ties the API client, cache store, and inventory builder together
//!
//! One invocation either serves the persisted snapshots back or performs a
//! full refresh: fetch regions and droplets, rebuild both structures from
//! scratch, persist them, and answer from the fresh values. The structures
//! are threaded through as return values rather than accumulated on the
//! struct, so there is no hidden ordering between the operations.

use thiserror::Error;
use tracing::{debug, info};

use crate::api::{ApiClient, ApiError};
use crate::cache::{CacheError, CacheStore};
use crate::inventory::{build_inventory, HostLookup, Inventory, InventoryIndex, RegionMap};

/// Errors surfaced by a single inventory run
#[derive(Debug, Error)]
pub enum AppError {
    /// An upstream API call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Reading or writing the cache artifacts failed
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Serializing the output failed
    #[error("failed to serialize inventory: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Orchestrates cache checks, refreshes, and lookups for one invocation
pub struct App {
    client: ApiClient,
    cache: CacheStore,
    cache_max_age: u64,
}

impl App {
    /// Creates an App over the given client, store, and configured max age
    pub fn new(client: ApiClient, cache: CacheStore, cache_max_age: u64) -> Self {
        Self {
            client,
            cache,
            cache_max_age,
        }
    }

    /// Fetches regions and droplets, rebuilds both structures, and persists
    /// them, returning the fresh values.
    pub async fn refresh(&self) -> Result<(Inventory, InventoryIndex), AppError> {
        info!("refreshing droplet inventory from the API");
        let regions = self.client.list_regions().await?;
        let region_map: RegionMap = regions
            .iter()
            .map(|region| (region.id, region.label()))
            .collect();
        let droplets = self.client.list_droplets().await?;

        let (inventory, index) = build_inventory(&droplets, &region_map);
        self.cache.write(&inventory, &index)?;
        debug!(
            droplets = droplets.len(),
            groups = inventory.len(),
            "cache artifacts updated"
        );
        Ok((inventory, index))
    }

    /// Emits the full inventory as pretty-printed JSON.
    ///
    /// A fresh cache is read back verbatim; otherwise a refresh runs first
    /// and the newly built inventory is serialized directly.
    pub async fn list(&self, force_refresh: bool) -> Result<String, AppError> {
        if !force_refresh && self.cache.is_valid(self.cache_max_age) {
            debug!("serving inventory from cache");
            return Ok(self.cache.read_inventory_text()?);
        }

        let (inventory, _) = self.refresh().await?;
        Ok(serde_json::to_string_pretty(&inventory)?)
    }

    /// Resolves one address to its full droplet record.
    ///
    /// The index comes from the cache when fresh, from a refresh otherwise.
    /// An address missing from a cache-loaded index gets one refresh and a
    /// recheck before the lookup is declared a miss; a miss on an index that
    /// just came from a refresh is final. A miss is an ordinary outcome, not
    /// an error. The droplet record itself always comes straight from the
    /// API, bypassing the cache.
    pub async fn host_info(
        &self,
        address: &str,
        force_refresh: bool,
    ) -> Result<HostLookup, AppError> {
        let (index, from_refresh) = if !force_refresh && self.cache.is_valid(self.cache_max_age) {
            (self.cache.read_index()?, false)
        } else {
            (self.refresh().await?.1, true)
        };

        let index = if !index.contains_key(address) && !from_refresh {
            debug!(address, "address not in cached index, refreshing once");
            self.refresh().await?.1
        } else {
            index
        };

        match index.get(address) {
            Some(&(_region_id, droplet_id)) => {
                Ok(HostLookup::Found(self.client.get_droplet(droplet_id).await?))
            }
            None => Ok(HostLookup::NotFound),
        }
    }
}
