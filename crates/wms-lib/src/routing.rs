//! Picking-route ordering.
//!
//! [`optimal_route`] orders a set of requested bins with a greedy
//! nearest-neighbour pass over shortest-path distances on the full warehouse
//! graph. It is an approximation of the travelling-salesman tour, not an exact
//! solver: k requested bins cost k Dijkstra runs.
//!
//! # Example
//!
//! ```
//! use wms_lib::{optimal_route, Bin, WarehouseGraph};
//!
//! let bins = vec![
//!     Bin::new("1", "A-01-01-A", 100.0, 0.0),
//!     Bin::new("2", "A-01-02-A", 100.0, 0.0),
//!     Bin::new("3", "A-02-01-A", 100.0, 0.0),
//! ];
//! let graph = WarehouseGraph::from_bins("wh", &bins);
//! let route = optimal_route(&graph, &["A-01-01-A", "A-02-01-A", "A-01-02-A"]).unwrap();
//! assert_eq!(route.route, vec!["A-01-01-A", "A-01-02-A", "A-02-01-A"]);
//! assert_eq!(route.total_distance, 2.5);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{NodeId, WarehouseGraph};
use crate::path::{distances_from, resolve};

/// `from` label of the single step reported for a one-bin route.
pub const START_MARKER: &str = "start";

/// One leg of a picking route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    pub from: String,
    pub to: String,
    pub distance: f64,
}

/// Ordered visit plan for a set of bins.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RouteResult {
    /// Each requested bin exactly once, in visiting order.
    pub route: Vec<String>,
    pub steps: Vec<RouteStep>,
    /// Sum of the step distances.
    pub total_distance: f64,
}

impl RouteResult {
    pub fn bins_count(&self) -> usize {
        self.route.len()
    }

    /// Number of real moves between bins.
    pub fn hop_count(&self) -> usize {
        self.route.len().saturating_sub(1)
    }
}

/// Order `bin_codes` into a near-optimal picking route.
///
/// Starts at the first code and repeatedly moves to the closest unvisited
/// requested bin; ties go to the bin listed first. Repeated codes are visited
/// once. Fails with [`Error::UnknownLocation`] for codes missing from the
/// graph and with [`Error::NoPathFound`] when some requested bin cannot be
/// reached from the rest of the route.
pub fn optimal_route<S: AsRef<str>>(graph: &WarehouseGraph, bin_codes: &[S]) -> Result<RouteResult> {
    let stops = resolve_stops(graph, bin_codes)?;

    let Some((&first, rest)) = stops.split_first() else {
        return Ok(RouteResult::default());
    };

    let first_code = graph.code(first).to_string();
    if rest.is_empty() {
        return Ok(RouteResult {
            route: vec![first_code.clone()],
            steps: vec![RouteStep {
                from: START_MARKER.to_string(),
                to: first_code,
                distance: 0.0,
            }],
            total_distance: 0.0,
        });
    }

    let mut route = vec![first_code];
    let mut steps = Vec::with_capacity(rest.len());
    let mut total_distance = 0.0;
    let mut current = first;
    let mut remaining: Vec<NodeId> = rest.to_vec();

    while !remaining.is_empty() {
        let table = distances_from(graph, current);

        let mut nearest: Option<(usize, f64)> = None;
        for (slot, &candidate) in remaining.iter().enumerate() {
            let Some(distance) = table.distance_to(candidate) else {
                continue;
            };
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((slot, distance));
            }
        }

        let Some((slot, distance)) = nearest else {
            return Err(Error::NoPathFound {
                start: graph.code(current).to_string(),
                goal: graph.code(remaining[0]).to_string(),
            });
        };

        let next = remaining.remove(slot);
        let to = graph.code(next).to_string();
        steps.push(RouteStep {
            from: graph.code(current).to_string(),
            to: to.clone(),
            distance,
        });
        route.push(to);
        total_distance += distance;
        current = next;
    }

    debug!(
        warehouse_id = %graph.warehouse_id(),
        stops = route.len(),
        total_distance,
        "picking route ordered"
    );

    Ok(RouteResult {
        route,
        steps,
        total_distance,
    })
}

fn resolve_stops<S: AsRef<str>>(graph: &WarehouseGraph, bin_codes: &[S]) -> Result<Vec<NodeId>> {
    let mut seen = HashSet::new();
    let mut stops = Vec::with_capacity(bin_codes.len());
    for code in bin_codes {
        let node = resolve(graph, code.as_ref())?;
        if seen.insert(node) {
            stops.push(node);
        }
    }
    Ok(stops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::Bin;

    fn graph(codes: &[&str]) -> WarehouseGraph {
        let bins: Vec<Bin> = codes
            .iter()
            .map(|code| Bin::new(*code, *code, 100.0, 0.0))
            .collect();
        WarehouseGraph::from_bins("wh", &bins)
    }

    #[test]
    fn empty_request_yields_empty_route() {
        let graph = graph(&["A-01-01-A"]);
        let result = optimal_route::<&str>(&graph, &[]).unwrap();
        assert!(result.route.is_empty());
        assert!(result.steps.is_empty());
        assert_eq!(result.total_distance, 0.0);
        assert_eq!(result.bins_count(), 0);
    }

    #[test]
    fn single_bin_has_symbolic_start_step() {
        let graph = graph(&["A-01-01-A", "B-01-01-A"]);
        let result = optimal_route(&graph, &["B-01-01-A"]).unwrap();
        assert_eq!(result.route, vec!["B-01-01-A"]);
        assert_eq!(result.total_distance, 0.0);
        assert_eq!(
            result.steps,
            vec![RouteStep {
                from: START_MARKER.to_string(),
                to: "B-01-01-A".to_string(),
                distance: 0.0,
            }]
        );
        assert_eq!(result.hop_count(), 0);
    }

    #[test]
    fn ties_go_to_the_earlier_requested_bin() {
        // Both candidates sit 2.0 away from the start.
        let graph = graph(&["A-02-01-A", "A-03-01-A", "A-01-01-A"]);
        let result = optimal_route(&graph, &["A-02-01-A", "A-03-01-A", "A-01-01-A"]).unwrap();
        assert_eq!(result.route, vec!["A-02-01-A", "A-03-01-A", "A-01-01-A"]);
        assert_eq!(result.total_distance, 6.0);
    }

    #[test]
    fn duplicates_are_visited_once() {
        let graph = graph(&["A-01-01-A", "A-01-02-A"]);
        let result = optimal_route(&graph, &["A-01-01-A", "A-01-02-A", "A-01-01-A"]).unwrap();
        assert_eq!(result.route, vec!["A-01-01-A", "A-01-02-A"]);
        assert_eq!(result.steps.len(), 1);
    }

    #[test]
    fn unknown_bin_is_rejected() {
        let graph = graph(&["A-01-01-A"]);
        let err = optimal_route(&graph, &["A-01-01-A", "Z-09-09-Z"]).unwrap_err();
        assert!(matches!(err, Error::UnknownLocation { code } if code == "Z-09-09-Z"));
    }

    #[test]
    fn unreachable_bin_fails_instead_of_being_dropped() {
        let graph = graph(&["A-01-01-A", "A-01-02-A", "LOOSE-BIN"]);
        let err = optimal_route(&graph, &["A-01-01-A", "LOOSE-BIN", "A-01-02-A"]).unwrap_err();
        match err {
            Error::NoPathFound { start, goal } => {
                assert_eq!(start, "A-01-02-A");
                assert_eq!(goal, "LOOSE-BIN");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn step_distances_sum_to_total() {
        let graph = graph(&["A-01-01-A", "A-03-02-B", "B-01-01-A", "C-05-04-B", "A-01-04-A"]);
        let result = optimal_route(
            &graph,
            &["C-05-04-B", "A-01-01-A", "B-01-01-A", "A-03-02-B", "A-01-04-A"],
        )
        .unwrap();
        let sum: f64 = result.steps.iter().map(|step| step.distance).sum();
        assert_eq!(sum, result.total_distance);
        for pair in result.steps.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
    }
}
