mod common;

use wms_lib::{
    build_graph, demo, find_available_bins, optimal_route, write_database, CacheStatus, GraphCache,
    InMemoryRepository, InventoryRepository, Product, SqliteRepository, StockLocation,
    WarehouseRepository,
};

use common::{empty_demo_copy, two_warehouse_repository};

const COPY_ID: &str = "wh-rj-02";

fn sqlite_copy_of(repository: &InMemoryRepository) -> (tempfile::TempDir, SqliteRepository) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("wms.db");
    write_database(&path, repository).expect("write database");
    let sqlite = SqliteRepository::open(&path).expect("open database");
    (dir, sqlite)
}

fn location(warehouse_id: &str, bin_code: &str, quantity: i64) -> StockLocation {
    StockLocation {
        warehouse_id: warehouse_id.to_string(),
        bin_code: bin_code.to_string(),
        quantity,
    }
}

#[test]
fn shared_bin_codes_resolve_stock_in_the_right_warehouse() {
    let memory = two_warehouse_repository(COPY_ID);
    let (_dir, sqlite) = sqlite_copy_of(&memory);

    let repositories: [(&str, &dyn InventoryRepository); 2] =
        [("memory", &memory), ("sqlite", &sqlite)];
    for (name, repository) in repositories {
        let bins = repository.product_bins("PROD-001").unwrap();
        assert_eq!(bins.len(), 1, "{name}");
        assert_eq!(bins[0].warehouse_id, demo::DEMO_WAREHOUSE_ID, "{name}");
        assert_eq!(bins[0].bin_code, "A-01-01-A", "{name}");

        let available = find_available_bins(repository, "PROD-001", 10).unwrap();
        assert_eq!(available.len(), 1, "{name}");
        assert_eq!(available[0].available_space, 50.0, "{name}");
    }
}

#[test]
fn same_code_stocked_in_both_warehouses_is_listed_per_warehouse() {
    let memory = two_warehouse_repository(COPY_ID).with_product(Product {
        sku: "SKU-SHARED".to_string(),
        name: "Shared".to_string(),
        unit: "UN".to_string(),
        locations: vec![
            location(demo::DEMO_WAREHOUSE_ID, "A-01-01-A", 20),
            location(COPY_ID, "A-01-01-A", 20),
        ],
    });
    let (_dir, sqlite) = sqlite_copy_of(&memory);

    let repositories: [(&str, &dyn InventoryRepository); 2] =
        [("memory", &memory), ("sqlite", &sqlite)];
    for (name, repository) in repositories {
        let available = find_available_bins(repository, "SKU-SHARED", 20).unwrap();
        let seen: Vec<_> = available
            .iter()
            .map(|bin| (bin.warehouse_id.as_str(), bin.available_space))
            .collect();
        assert_eq!(
            seen,
            vec![(COPY_ID, 100.0), (demo::DEMO_WAREHOUSE_ID, 50.0)],
            "{name}"
        );
        assert!(available.iter().all(|bin| bin.covers_request), "{name}");
    }
}

#[test]
fn graphs_are_built_per_warehouse() {
    let memory = two_warehouse_repository(COPY_ID);
    let (_dir, sqlite) = sqlite_copy_of(&memory);
    assert_eq!(sqlite.hierarchy(COPY_ID).unwrap(), empty_demo_copy(COPY_ID));

    let demo_graph = build_graph(&sqlite, demo::DEMO_WAREHOUSE_ID).unwrap();
    let copy_graph = build_graph(&sqlite, COPY_ID).unwrap();
    assert_eq!(demo_graph.warehouse_id(), demo::DEMO_WAREHOUSE_ID);
    assert_eq!(copy_graph.warehouse_id(), COPY_ID);
    assert_eq!(demo_graph.node_count(), 120);
    assert_eq!(copy_graph.node_count(), 120);

    let demo_node = demo_graph.node(demo_graph.node_id("A-01-01-A").unwrap()).unwrap();
    let copy_node = copy_graph.node(copy_graph.node_id("A-01-01-A").unwrap()).unwrap();
    assert_eq!(demo_node.occupied, 50.0);
    assert_eq!(copy_node.occupied, 0.0);

    let request = ["C-02-03-A", "A-01-01-A", "B-05-04-B"];
    assert_eq!(
        optimal_route(&demo_graph, &request).unwrap(),
        optimal_route(&copy_graph, &request).unwrap()
    );
}

#[test]
fn graph_cache_keeps_warehouses_apart() {
    let repository = two_warehouse_repository(COPY_ID);
    let cache = GraphCache::new();

    let (demo_graph, status) = cache.graph_for(&repository, demo::DEMO_WAREHOUSE_ID).unwrap();
    assert_eq!(status, CacheStatus::Miss);
    let (copy_graph, status) = cache.graph_for(&repository, COPY_ID).unwrap();
    assert_eq!(status, CacheStatus::Miss);
    assert_eq!(cache.len(), 2);
    assert_eq!(demo_graph.warehouse_id(), demo::DEMO_WAREHOUSE_ID);
    assert_eq!(copy_graph.warehouse_id(), COPY_ID);

    let (again, status) = cache.graph_for(&repository, demo::DEMO_WAREHOUSE_ID).unwrap();
    assert_eq!(status, CacheStatus::Hit);
    assert_eq!(again.warehouse_id(), demo::DEMO_WAREHOUSE_ID);

    assert!(cache.invalidate(COPY_ID));
    assert_eq!(cache.len(), 1);
    let (_, status) = cache.graph_for(&repository, demo::DEMO_WAREHOUSE_ID).unwrap();
    assert_eq!(status, CacheStatus::Hit);
    let (_, status) = cache.graph_for(&repository, COPY_ID).unwrap();
    assert_eq!(status, CacheStatus::Miss);
}
