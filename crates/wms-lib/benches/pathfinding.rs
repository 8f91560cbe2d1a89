use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use std::hint::black_box;
use wms_lib::{demo, optimal_route, shortest_path, WarehouseGraph, WarehouseHierarchy};

static HIERARCHY: Lazy<WarehouseHierarchy> = Lazy::new(demo::demo_warehouse);
static GRAPH: Lazy<WarehouseGraph> = Lazy::new(|| WarehouseGraph::from_hierarchy(&HIERARCHY));

const PICK_LIST: [&str; 8] = [
    "C-05-04-B",
    "A-01-01-A",
    "B-03-02-A",
    "A-04-03-B",
    "C-01-01-A",
    "B-05-04-B",
    "A-02-02-A",
    "C-03-03-B",
];

fn benchmark_pathfinding(c: &mut Criterion) {
    c.bench_function("graph_build_demo_warehouse", |b| {
        let hierarchy = &*HIERARCHY;
        b.iter(|| black_box(WarehouseGraph::from_hierarchy(hierarchy).edge_count()));
    });

    c.bench_function("shortest_path_a0101a_c0504b", |b| {
        let graph = &*GRAPH;
        b.iter(|| {
            let path = shortest_path(graph, "A-01-01-A", "C-05-04-B").expect("path exists");
            black_box(path.distance)
        });
    });

    c.bench_function("optimal_route_eight_bins", |b| {
        let graph = &*GRAPH;
        b.iter(|| {
            let route = optimal_route(graph, &PICK_LIST).expect("route exists");
            black_box(route.total_distance)
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
