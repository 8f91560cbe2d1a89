use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::repository::InventoryRepository;

/// A bin that currently holds stock of the requested product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableBin {
    pub warehouse_id: String,
    pub bin_code: String,
    pub quantity: i64,
    /// `capacity - occupied`; negative for over-filled bins.
    pub available_space: f64,
    /// Whether this bin alone can satisfy the requested quantity.
    pub covers_request: bool,
}

/// Find bins holding `sku`, largest stock first.
///
/// Bins without stock are dropped; unknown SKUs give an empty list. Equal
/// quantities are ordered by warehouse, then bin code.
pub fn find_available_bins(
    inventory: &dyn InventoryRepository,
    sku: &str,
    requested_quantity: i64,
) -> Result<Vec<AvailableBin>> {
    let mut bins: Vec<AvailableBin> = inventory
        .product_bins(sku)?
        .into_iter()
        .filter(|bin| bin.quantity > 0)
        .map(|bin| AvailableBin {
            available_space: bin.capacity - bin.occupied,
            covers_request: bin.quantity >= requested_quantity,
            quantity: bin.quantity,
            warehouse_id: bin.warehouse_id,
            bin_code: bin.bin_code,
        })
        .collect();

    bins.sort_by(|a, b| match b.quantity.cmp(&a.quantity) {
        Ordering::Equal => (&a.warehouse_id, &a.bin_code).cmp(&(&b.warehouse_id, &b.bin_code)),
        other => other,
    });

    debug!(sku = %sku, requested_quantity, bins = bins.len(), "availability lookup");
    Ok(bins)
}
