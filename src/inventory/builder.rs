//! Builds the grouped inventory and address index from a droplet listing

use tracing::debug;

use super::{Inventory, InventoryIndex, RegionMap, UNKNOWN_REGION};
use crate::api::Droplet;

/// Projects a droplet listing into the grouped inventory and the address
/// index.
///
/// Droplets are processed in listing order and group membership preserves
/// that order. A droplet without a public address is skipped entirely and
/// appears in neither structure. (When a droplet would legitimately lack an
/// address on DigitalOcean is unclear, but the API allows it.)
///
/// # Arguments
/// * `droplets` - The droplet records in upstream listing order
/// * `regions` - Mapping from region id to region label
///
/// # Returns
/// The inventory and index built from scratch; prior contents are never
/// carried over.
pub fn build_inventory(droplets: &[Droplet], regions: &RegionMap) -> (Inventory, InventoryIndex) {
    let mut inventory = Inventory::new();
    let mut index = InventoryIndex::new();

    for droplet in droplets {
        let Some(address) = droplet.address() else {
            debug!(droplet_id = droplet.id, "skipping droplet without an address");
            continue;
        };

        let region_name = regions
            .get(&droplet.region_id)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_REGION.to_string());

        // Last write wins if two droplets ever report the same address.
        index.insert(address.to_string(), (droplet.region_id, droplet.id));

        // Group by droplet id (a group of one unless an id repeats),
        // by region, and by name.
        push(&mut inventory, droplet.id.to_string(), address);
        push(&mut inventory, region_name, address);
        push(&mut inventory, droplet.name.clone(), address);
    }

    (inventory, index)
}

/// Appends an address to a group, creating the group on first use
fn push(inventory: &mut Inventory, key: String, address: &str) {
    inventory.entry(key).or_default().push(address.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn droplet(id: u64, name: &str, region_id: u64, ip: &str) -> Droplet {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "region_id": region_id,
            "ip_address": ip,
        }))
        .expect("Failed to build droplet")
    }

    fn regions(pairs: &[(u64, &str)]) -> RegionMap {
        pairs
            .iter()
            .map(|(id, label)| (*id, label.to_string()))
            .collect()
    }

    #[test]
    fn test_addressed_droplet_appears_in_all_three_groups() {
        let droplets = vec![
            droplet(1, "web1", 5, "1.2.3.4"),
            droplet(2, "web2", 5, ""),
        ];
        let regions = regions(&[(5, "nyc1")]);

        let (inventory, index) = build_inventory(&droplets, &regions);

        assert_eq!(inventory.get("1"), Some(&vec!["1.2.3.4".to_string()]));
        assert_eq!(inventory.get("nyc1"), Some(&vec!["1.2.3.4".to_string()]));
        assert_eq!(inventory.get("web1"), Some(&vec!["1.2.3.4".to_string()]));
        assert_eq!(index.get("1.2.3.4"), Some(&(5, 1)));
    }

    #[test]
    fn test_unaddressed_droplet_contributes_nothing() {
        let droplets = vec![droplet(2, "web2", 5, "")];
        let regions = regions(&[(5, "nyc1")]);

        let (inventory, index) = build_inventory(&droplets, &regions);

        assert!(inventory.is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn test_unknown_region_gets_sentinel_group() {
        let droplets = vec![droplet(3, "db1", 9, "10.0.0.1")];
        let regions = regions(&[(5, "nyc1")]);

        let (inventory, _) = build_inventory(&droplets, &regions);

        assert_eq!(
            inventory.get(UNKNOWN_REGION),
            Some(&vec!["10.0.0.1".to_string()])
        );
    }

    #[test]
    fn test_region_group_preserves_listing_order() {
        let droplets = vec![
            droplet(10, "b", 5, "10.0.0.2"),
            droplet(11, "a", 5, "10.0.0.1"),
            droplet(12, "c", 5, "10.0.0.3"),
        ];
        let regions = regions(&[(5, "nyc1")]);

        let (inventory, _) = build_inventory(&droplets, &regions);

        assert_eq!(
            inventory.get("nyc1"),
            Some(&vec![
                "10.0.0.2".to_string(),
                "10.0.0.1".to_string(),
                "10.0.0.3".to_string(),
            ])
        );
    }

    #[test]
    fn test_shared_name_accumulates_addresses() {
        let droplets = vec![
            droplet(20, "worker", 5, "10.1.0.1"),
            droplet(21, "worker", 5, "10.1.0.2"),
        ];
        let regions = regions(&[(5, "nyc1")]);

        let (inventory, _) = build_inventory(&droplets, &regions);

        assert_eq!(
            inventory.get("worker"),
            Some(&vec!["10.1.0.1".to_string(), "10.1.0.2".to_string()])
        );
    }

    #[test]
    fn test_shared_address_last_write_wins_in_index() {
        let droplets = vec![
            droplet(30, "old", 5, "10.2.0.1"),
            droplet(31, "new", 6, "10.2.0.1"),
        ];
        let regions = regions(&[(5, "nyc1"), (6, "ams1")]);

        let (_, index) = build_inventory(&droplets, &regions);

        assert_eq!(index.get("10.2.0.1"), Some(&(6, 31)));
    }

    #[test]
    fn test_rebuild_starts_from_scratch() {
        let regions = regions(&[(5, "nyc1")]);

        let (first, _) = build_inventory(&[droplet(1, "web1", 5, "1.2.3.4")], &regions);
        let (second, index) = build_inventory(&[], &regions);

        assert!(!first.is_empty());
        assert!(second.is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn test_index_roundtrips_through_json() {
        let droplets = vec![droplet(1, "web1", 5, "1.2.3.4")];
        let regions = regions(&[(5, "nyc1")]);

        let (inventory, index) = build_inventory(&droplets, &regions);

        let inventory_json =
            serde_json::to_string_pretty(&inventory).expect("Failed to serialize inventory");
        let index_json = serde_json::to_string_pretty(&index).expect("Failed to serialize index");

        let inventory_back: Inventory =
            serde_json::from_str(&inventory_json).expect("Failed to deserialize inventory");
        let index_back: InventoryIndex =
            serde_json::from_str(&index_json).expect("Failed to deserialize index");

        assert_eq!(inventory_back, inventory);
        assert_eq!(index_back, index);

        // Index entries serialize as [region_id, droplet_id] pairs.
        assert!(index_json.contains("\"1.2.3.4\""));
        let raw: serde_json::Value =
            serde_json::from_str(&index_json).expect("Failed to parse index JSON");
        assert_eq!(raw["1.2.3.4"], serde_json::json!([5, 1]));
    }
}
