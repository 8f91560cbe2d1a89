//! Shared fixtures for the integration tests.

use std::path::PathBuf;

use tempfile::TempDir;
use wms_lib::{demo, write_database, Bin, InMemoryRepository, WarehouseGraph, WarehouseHierarchy};

/// Graph over loose bins, one per code, all with capacity 100.
#[allow(dead_code)]
pub fn graph_of(codes: &[&str]) -> WarehouseGraph {
    let bins: Vec<Bin> = codes
        .iter()
        .enumerate()
        .map(|(i, code)| Bin::new(format!("bin-{i}"), *code, 100.0, 0.0))
        .collect();
    WarehouseGraph::from_bins("test-wh", &bins)
}

/// Graph over the full demo warehouse.
#[allow(dead_code)]
pub fn demo_graph() -> WarehouseGraph {
    WarehouseGraph::from_hierarchy(&demo::demo_warehouse())
}

/// Temporary SQLite database seeded with the demo warehouse.
///
/// The directory is removed when the returned guard is dropped.
#[allow(dead_code)]
pub struct SeededDatabase {
    _dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
pub fn seeded_database() -> SeededDatabase {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("wms.db");
    write_database(&path, &demo::demo_repository()).expect("seed database");
    SeededDatabase { _dir: dir, path }
}

/// Second warehouse with the demo layout: same bin codes, fresh ids, all bins empty.
#[allow(dead_code)]
pub fn empty_demo_copy(warehouse_id: &str) -> WarehouseHierarchy {
    let mut copy = demo::demo_warehouse();
    copy.warehouse.id = warehouse_id.to_string();
    copy.warehouse.name = format!("Copy {warehouse_id}");
    for zone in &mut copy.zones {
        zone.id = format!("{warehouse_id}/{}", zone.id);
        for aisle in &mut zone.aisles {
            aisle.id = format!("{warehouse_id}/{}", aisle.id);
            for shelf in &mut aisle.shelves {
                shelf.id = format!("{warehouse_id}/{}", shelf.id);
                for bin in &mut shelf.bins {
                    bin.id = format!("{warehouse_id}/{}", bin.id);
                    bin.occupied = 0.0;
                }
            }
        }
    }
    copy
}

/// Demo repository plus an empty copy of its layout under `warehouse_id`.
#[allow(dead_code)]
pub fn two_warehouse_repository(warehouse_id: &str) -> InMemoryRepository {
    demo::demo_repository().with_warehouse(empty_demo_copy(warehouse_id))
}
