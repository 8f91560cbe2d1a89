//! Demo warehouse used by `wms-cli init --seed`, the service fixtures and the
//! benchmarks.
//!
//! Layout: four zones, of which only storage holds racks. Storage has aisles
//! A-C, five shelves per aisle, four levels per shelf and two positions per
//! level, for 120 bins of capacity 100. Each demo product is stocked in one
//! of the first bins, and that bin's `occupied` mirrors the stocked quantity.

use crate::hierarchy::{Aisle, Bin, Shelf, WarehouseHierarchy, WarehouseSummary, Zone, ZoneType};
use crate::repository::{InMemoryRepository, Product, StockLocation};

pub const DEMO_WAREHOUSE_ID: &str = "wh-sp-01";

const AISLES: [&str; 3] = ["A", "B", "C"];
const SHELVES_PER_AISLE: u32 = 5;
const LEVELS_PER_SHELF: u32 = 4;
const POSITIONS: [&str; 2] = ["A", "B"];
const BIN_CAPACITY: f64 = 100.0;

const ZONES: [(&str, &str, ZoneType); 4] = [
    ("zone-receiving", "Recebimento", ZoneType::Receiving),
    ("zone-storage-a", "Armazenagem A", ZoneType::Storage),
    ("zone-picking", "Separação", ZoneType::Picking),
    ("zone-shipping", "Expedição", ZoneType::Shipping),
];

const PRODUCTS: [(&str, &str, i64); 5] = [
    ("PROD-001", "Notebook Dell", 50),
    ("PROD-002", "Mouse Logitech", 200),
    ("PROD-003", "Teclado Mecânico", 100),
    ("PROD-004", "Monitor 24\"", 75),
    ("PROD-005", "Webcam HD", 150),
];

/// Demo hierarchy with stock levels already applied to the first bins.
pub fn demo_warehouse() -> WarehouseHierarchy {
    let mut hierarchy = empty_layout();

    let stocked: Vec<(String, i64)> = hierarchy
        .bins()
        .zip(PRODUCTS.iter())
        .map(|(bin, (_, _, quantity))| (bin.code.clone(), *quantity))
        .collect();
    for zone in &mut hierarchy.zones {
        for aisle in &mut zone.aisles {
            for shelf in &mut aisle.shelves {
                for bin in &mut shelf.bins {
                    if let Some((_, quantity)) = stocked.iter().find(|(code, _)| *code == bin.code) {
                        bin.occupied = *quantity as f64;
                    }
                }
            }
        }
    }

    hierarchy
}

/// Demo products, each stocked in one of the first bins of the demo layout.
pub fn demo_products() -> Vec<Product> {
    let layout = empty_layout();
    layout
        .bins()
        .zip(PRODUCTS.iter())
        .map(|(bin, (sku, name, quantity))| Product {
            sku: (*sku).to_string(),
            name: (*name).to_string(),
            unit: "UN".to_string(),
            locations: vec![StockLocation {
                warehouse_id: DEMO_WAREHOUSE_ID.to_string(),
                bin_code: bin.code.clone(),
                quantity: *quantity,
            }],
        })
        .collect()
}

/// In-memory repository holding the demo warehouse and its products.
pub fn demo_repository() -> InMemoryRepository {
    demo_products()
        .into_iter()
        .fold(InMemoryRepository::new().with_warehouse(demo_warehouse()), |repo, product| {
            repo.with_product(product)
        })
}

fn empty_layout() -> WarehouseHierarchy {
    let zones = ZONES
        .iter()
        .map(|(id, name, zone_type)| Zone {
            id: (*id).to_string(),
            name: (*name).to_string(),
            zone_type: Some(*zone_type),
            aisles: if *zone_type == ZoneType::Storage {
                AISLES.iter().map(|code| storage_aisle(code)).collect()
            } else {
                Vec::new()
            },
        })
        .collect();

    WarehouseHierarchy {
        warehouse: WarehouseSummary {
            id: DEMO_WAREHOUSE_ID.to_string(),
            name: "Centro de distribuição SP".to_string(),
            address: Some("Av. Industrial, 1000 - São Paulo, SP".to_string()),
            total_capacity: 10_000.0,
        },
        zones,
    }
}

fn storage_aisle(aisle_code: &str) -> Aisle {
    let shelves = (1..=SHELVES_PER_AISLE)
        .map(|number| {
            let shelf_code = format!("{number:02}");
            let bins = (1..=LEVELS_PER_SHELF)
                .flat_map(|level| {
                    let shelf_code = shelf_code.clone();
                    POSITIONS.iter().map(move |position| {
                        let code = format!("{aisle_code}-{shelf_code}-{level:02}-{position}");
                        Bin::new(format!("bin-{code}"), code, BIN_CAPACITY, 0.0)
                    })
                })
                .collect();
            Shelf {
                id: format!("shelf-{aisle_code}-{shelf_code}"),
                code: shelf_code,
                levels: LEVELS_PER_SHELF,
                bins,
            }
        })
        .collect();

    Aisle {
        id: format!("aisle-{aisle_code}"),
        code: aisle_code.to_string(),
        shelves,
    }
}
