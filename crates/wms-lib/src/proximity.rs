//! Structural distance between two bin locations.
//!
//! The metric is a cheap heuristic over location codes, not a physical
//! measurement: moving between levels of one shelf is cheapest, walking along
//! an aisle costs more, and changing aisles dominates everything else.

use crate::location::LocationCode;

/// Cost per level difference within a single shelf.
pub const LEVEL_WEIGHT: f64 = 0.5;
/// Cost per shelf difference within a single aisle.
pub const SHELF_WEIGHT: f64 = 2.0;
/// Cost per aisle difference.
pub const AISLE_WEIGHT: f64 = 10.0;

/// Compute the structural distance between two parsed codes.
///
/// Symmetric for all inputs. A result of `0.0` between distinct codes (same
/// shelf and level, different position) means the pair is not connected.
pub fn distance(a: &LocationCode, b: &LocationCode) -> f64 {
    if a.same_shelf(b) {
        f64::from(a.level().abs_diff(b.level())) * LEVEL_WEIGHT
    } else if a.aisle() == b.aisle() {
        f64::from(a.shelf_number().abs_diff(b.shelf_number())) * SHELF_WEIGHT
    } else {
        a.aisle_ordinal().abs_diff(b.aisle_ordinal()) as f64 * AISLE_WEIGHT
    }
}
