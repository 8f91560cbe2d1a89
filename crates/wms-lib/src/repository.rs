//! Data-source seams for warehouse layouts and stock.
//!
//! Routing never talks to a database directly: it receives a
//! [`WarehouseRepository`] / [`InventoryRepository`] and works on the data
//! they return. [`InMemoryRepository`] covers tests and JSON fixtures;
//! [`crate::db::SqliteRepository`] reads a SQLite store.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::hierarchy::{Bin, WarehouseHierarchy, WarehouseSummary};

/// Source of warehouse containment hierarchies.
pub trait WarehouseRepository: Send + Sync {
    /// List every known warehouse.
    fn warehouses(&self) -> Result<Vec<WarehouseSummary>>;

    /// Fetch the full hierarchy, or [`Error::WarehouseNotFound`].
    fn hierarchy(&self, warehouse_id: &str) -> Result<WarehouseHierarchy>;
}

/// Source of per-bin stock for a product.
pub trait InventoryRepository: Send + Sync {
    /// Every bin holding `sku`. Unknown SKUs yield an empty list.
    fn product_bins(&self, sku: &str) -> Result<Vec<ProductBin>>;
}

/// Stock of one product in one bin, joined with the bin's capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductBin {
    pub warehouse_id: String,
    pub bin_code: String,
    pub quantity: i64,
    pub capacity: f64,
    pub occupied: f64,
}

/// Product record with its storage locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub name: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub locations: Vec<StockLocation>,
}

impl Product {
    pub fn total_quantity(&self) -> i64 {
        self.locations.iter().map(|location| location.quantity).sum()
    }
}

fn default_unit() -> String {
    "UN".to_string()
}

/// Quantity of a product held in a bin.
///
/// Bin codes repeat across warehouses, so a location names both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLocation {
    pub warehouse_id: String,
    pub bin_code: String,
    pub quantity: i64,
}

/// Repository holding everything in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryRepository {
    #[serde(default)]
    warehouses: Vec<WarehouseHierarchy>,
    #[serde(default)]
    products: Vec<Product>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a warehouse hierarchy.
    pub fn with_warehouse(mut self, hierarchy: WarehouseHierarchy) -> Self {
        self.insert_warehouse(hierarchy);
        self
    }

    /// Add or replace a product (matched by SKU).
    pub fn with_product(mut self, product: Product) -> Self {
        self.insert_product(product);
        self
    }

    pub fn insert_warehouse(&mut self, hierarchy: WarehouseHierarchy) {
        self.warehouses
            .retain(|existing| existing.warehouse.id != hierarchy.warehouse.id);
        self.warehouses.push(hierarchy);
    }

    pub fn insert_product(&mut self, product: Product) {
        self.products.retain(|existing| existing.sku != product.sku);
        self.products.push(product);
    }

    pub fn hierarchies(&self) -> &[WarehouseHierarchy] {
        &self.warehouses
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Load a repository previously written with [`InMemoryRepository::save_json`].
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    fn bins_by_location(&self) -> HashMap<(&str, &str), &Bin> {
        self.warehouses
            .iter()
            .flat_map(|hierarchy| {
                let warehouse_id = hierarchy.warehouse.id.as_str();
                hierarchy.bins().map(move |bin| ((warehouse_id, bin.code.as_str()), bin))
            })
            .collect()
    }
}

impl WarehouseRepository for InMemoryRepository {
    fn warehouses(&self) -> Result<Vec<WarehouseSummary>> {
        Ok(self
            .warehouses
            .iter()
            .map(|hierarchy| hierarchy.warehouse.clone())
            .collect())
    }

    fn hierarchy(&self, warehouse_id: &str) -> Result<WarehouseHierarchy> {
        self.warehouses
            .iter()
            .find(|hierarchy| hierarchy.warehouse.id == warehouse_id)
            .cloned()
            .ok_or_else(|| Error::WarehouseNotFound {
                warehouse_id: warehouse_id.to_string(),
            })
    }
}

impl InventoryRepository for InMemoryRepository {
    fn product_bins(&self, sku: &str) -> Result<Vec<ProductBin>> {
        let Some(product) = self.products.iter().find(|product| product.sku == sku) else {
            return Ok(Vec::new());
        };

        let bins = self.bins_by_location();
        let mut result = Vec::with_capacity(product.locations.len());
        for location in &product.locations {
            let key = (location.warehouse_id.as_str(), location.bin_code.as_str());
            match bins.get(&key) {
                Some(bin) => result.push(ProductBin {
                    warehouse_id: location.warehouse_id.clone(),
                    bin_code: bin.code.clone(),
                    quantity: location.quantity,
                    capacity: bin.capacity,
                    occupied: bin.occupied,
                }),
                None => warn!(
                    sku = %sku,
                    warehouse_id = %location.warehouse_id,
                    bin_code = %location.bin_code,
                    "stock references an unknown bin"
                ),
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;

    #[test]
    fn unknown_warehouse_is_reported() {
        let repository = InMemoryRepository::new();
        let err = repository.hierarchy("missing").unwrap_err();
        assert!(matches!(err, Error::WarehouseNotFound { warehouse_id } if warehouse_id == "missing"));
    }

    #[test]
    fn inserting_a_warehouse_twice_replaces_it() {
        let hierarchy = demo::demo_warehouse();
        let mut renamed = hierarchy.clone();
        renamed.warehouse.name = "Renamed".to_string();

        let repository = InMemoryRepository::new()
            .with_warehouse(hierarchy)
            .with_warehouse(renamed);
        let listed = repository.warehouses().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Renamed");
    }

    #[test]
    fn product_bins_join_stock_with_capacity() {
        let repository = demo::demo_repository();
        let bins = repository.product_bins("PROD-001").unwrap();
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].quantity, 50);
        assert_eq!(bins[0].capacity, 100.0);
        assert!(repository.product_bins("NOPE").unwrap().is_empty());
    }

    #[test]
    fn stock_in_unknown_bins_is_skipped() {
        let repository = InMemoryRepository::new().with_product(Product {
            sku: "SKU-1".to_string(),
            name: "Orphan".to_string(),
            unit: "UN".to_string(),
            locations: vec![StockLocation {
                warehouse_id: demo::DEMO_WAREHOUSE_ID.to_string(),
                bin_code: "Q-01-01-A".to_string(),
                quantity: 3,
            }],
        });
        assert!(repository.product_bins("SKU-1").unwrap().is_empty());
    }

    #[test]
    fn stock_resolves_bins_in_its_own_warehouse() {
        let mut copy = demo::demo_warehouse();
        copy.warehouse.id = "wh-rj-02".to_string();
        for zone in &mut copy.zones {
            for aisle in &mut zone.aisles {
                for shelf in &mut aisle.shelves {
                    for bin in &mut shelf.bins {
                        bin.occupied = 0.0;
                    }
                }
            }
        }

        let repository = demo::demo_repository().with_warehouse(copy);
        let bins = repository.product_bins("PROD-001").unwrap();
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].warehouse_id, demo::DEMO_WAREHOUSE_ID);
        assert_eq!(bins[0].occupied, 50.0);
    }

    #[test]
    fn total_quantity_sums_every_location() {
        let product = Product {
            sku: "SKU-2".to_string(),
            name: "Split".to_string(),
            unit: "UN".to_string(),
            locations: vec![
                StockLocation {
                    warehouse_id: "wh-a".to_string(),
                    bin_code: "A-01-01-A".to_string(),
                    quantity: 4,
                },
                StockLocation {
                    warehouse_id: "wh-b".to_string(),
                    bin_code: "A-01-01-A".to_string(),
                    quantity: 6,
                },
            ],
        };
        assert_eq!(product.total_quantity(), 10);
    }

    #[test]
    fn json_file_round_trip_preserves_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repo.json");
        let repository = demo::demo_repository();
        repository.save_json(&path).unwrap();

        let loaded = InMemoryRepository::from_json_file(&path).unwrap();
        let hierarchy = loaded.hierarchy(demo::DEMO_WAREHOUSE_ID).unwrap();
        assert_eq!(hierarchy.bin_count(), 120);
        assert_eq!(loaded.products().len(), repository.products().len());
    }
}
