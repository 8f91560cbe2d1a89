mod common;

use wms_lib::{
    demo, find_available_bins, optimal_route, InventoryRepository, SqliteRepository,
    WarehouseGraph, WarehouseRepository,
};

use common::seeded_database;

#[test]
fn seeded_database_round_trips_the_demo_hierarchy() {
    let db = seeded_database();
    let repository = SqliteRepository::open(&db.path).expect("open seeded database");

    let warehouses = repository.warehouses().unwrap();
    assert_eq!(warehouses.len(), 1);
    assert_eq!(warehouses[0].name, "Centro de distribuição SP");

    let hierarchy = repository.hierarchy(demo::DEMO_WAREHOUSE_ID).unwrap();
    assert_eq!(hierarchy, demo::demo_warehouse());
}

#[test]
fn stock_is_joined_with_bin_capacity() {
    let db = seeded_database();
    let repository = SqliteRepository::open(&db.path).unwrap();

    let bins = repository.product_bins("PROD-002").unwrap();
    assert_eq!(bins.len(), 1);
    assert_eq!(bins[0].bin_code, "A-01-01-B");
    assert_eq!(bins[0].quantity, 200);
    assert_eq!(bins[0].occupied, 200.0);

    let available = find_available_bins(&repository, "PROD-002", 250).unwrap();
    assert_eq!(available[0].available_space, -100.0);
    assert!(!available[0].covers_request);

    assert!(find_available_bins(&repository, "UNKNOWN-SKU", 5)
        .unwrap()
        .is_empty());
}

#[test]
fn routes_match_the_in_memory_repository() {
    let db = seeded_database();
    let sqlite = SqliteRepository::open(&db.path).unwrap();
    let memory = demo::demo_repository();

    let request = ["C-02-03-A", "A-01-01-A", "B-05-04-B", "A-03-02-B"];
    let from_db = WarehouseGraph::from_hierarchy(&sqlite.hierarchy(demo::DEMO_WAREHOUSE_ID).unwrap());
    let from_memory =
        WarehouseGraph::from_hierarchy(&memory.hierarchy(demo::DEMO_WAREHOUSE_ID).unwrap());

    assert_eq!(
        optimal_route(&from_db, &request).unwrap(),
        optimal_route(&from_memory, &request).unwrap()
    );
}

#[test]
fn unknown_warehouse_in_database() {
    let db = seeded_database();
    let repository = SqliteRepository::open(&db.path).unwrap();
    assert!(repository.hierarchy("wh-rj-02").is_err());
}
