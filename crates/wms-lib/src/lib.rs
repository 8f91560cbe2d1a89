//! Warehouse location graph and picking-route library.
//!
//! This crate turns a warehouse containment hierarchy into a weighted bin
//! graph, finds shortest paths between bins, orders multi-bin picking routes,
//! and answers stock availability lookups. Higher-level consumers (the CLI and
//! the HTTP service) should only depend on the functions exported here instead
//! of reimplementing behavior.
//!

#![deny(warnings)]

pub mod availability;
pub mod cache;
pub mod db;
pub mod demo;
pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod location;
pub mod path;
pub mod proximity;
pub mod repository;
pub mod routing;

pub use availability::{find_available_bins, AvailableBin};
pub use cache::{CacheStatus, GraphCache};
pub use db::{create_schema, write_database, write_hierarchy, write_product, SqliteRepository};
pub use error::{Error, Result};
pub use graph::{build_graph, BinNode, Edge, NodeId, WarehouseGraph};
pub use hierarchy::{
    Aisle, Bin, Fingerprint, Shelf, WarehouseHierarchy, WarehouseSummary, Zone, ZoneType,
};
pub use location::LocationCode;
pub use path::{distances_from, shortest_path, PathResult, ShortestPaths};
pub use repository::{
    InMemoryRepository, InventoryRepository, Product, ProductBin, StockLocation,
    WarehouseRepository,
};
pub use routing::{optimal_route, RouteResult, RouteStep, START_MARKER};
