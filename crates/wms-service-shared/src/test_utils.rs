//! Test utilities for microservice handler testing.
//!
//! This module provides state backed by the in-memory demo warehouse, so
//! handler tests need neither a database file nor network access.

use wms_lib::demo;

use crate::state::AppState;

/// Identifier of the demo warehouse served by [`test_state`].
pub const DEMO_WAREHOUSE: &str = demo::DEMO_WAREHOUSE_ID;

/// Known bins in the demo warehouse for use in tests.
pub mod fixture_bins {
    /// First bin of aisle A; stocks PROD-001.
    pub const A_01_01_A: &str = "A-01-01-A";

    /// One level above [`A_01_01_A`] on the same shelf.
    pub const A_01_02_A: &str = "A-01-02-A";

    /// First level of the next shelf in aisle A.
    pub const A_02_01_A: &str = "A-02-01-A";

    /// Far corner of the storage zone.
    pub const C_05_04_B: &str = "C-05-04-B";
}

/// Fresh state over the demo warehouse with the graph cache enabled.
///
/// Each call builds its own state, so tests never share cache contents.
pub fn test_state() -> AppState {
    AppState::from_repository(demo::demo_repository(), true)
}
