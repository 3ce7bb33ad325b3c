//! Inventory grouping and reverse host index
//!
//! The inventory groups droplet addresses three ways: one group per droplet
//! id, one per region name, one per droplet name. The index maps an address
//! back to the (region id, droplet id) pair that owns it, so a single-host
//! query never needs a full listing re-fetch.

mod builder;

pub use builder::build_inventory;

use std::collections::{BTreeMap, HashMap};

use crate::api::Droplet;

/// Group label used when a droplet's region id is missing from the region map
pub const UNKNOWN_REGION: &str = "Unknown Region";

/// Mapping from region id to region label
pub type RegionMap = HashMap<u64, String>;

/// Grouping of addresses keyed by droplet id, region name, or droplet name.
///
/// Keys live in a sorted map so serialized snapshots of unchanged data are
/// byte-identical across runs. Group membership lists keep listing order.
pub type Inventory = BTreeMap<String, Vec<String>>;

/// Reverse lookup from address to (region id, droplet id)
pub type InventoryIndex = BTreeMap<String, (u64, u64)>;

/// Outcome of a single-host query
///
/// A host that stays absent from the index even after a refresh is a normal,
/// representable outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum HostLookup {
    /// The address resolved to a full droplet record
    Found(Droplet),
    /// The address is not in the index, even after a refresh
    NotFound,
}
