use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{NodeId, WarehouseGraph};

/// Point-to-point shortest path between two bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Bin codes from start to end, inclusive.
    pub path: Vec<String>,
    pub distance: f64,
}

impl PathResult {
    /// Number of hops in the path.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Single-source distance table produced by Dijkstra's algorithm.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: NodeId,
    distances: Vec<f64>,
    parents: Vec<Option<NodeId>>,
    settled: Vec<bool>,
}

impl ShortestPaths {
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Shortest distance to `target`, or `None` when it is unreachable.
    pub fn distance_to(&self, target: NodeId) -> Option<f64> {
        if *self.settled.get(target)? {
            self.distances.get(target).copied()
        } else {
            None
        }
    }

    /// Node sequence from the source to `target`, inclusive.
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        self.distance_to(target)?;

        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            path.push(node);
            if node == self.source {
                break;
            }
            current = self.parents.get(node).copied().flatten();
        }
        path.reverse();
        Some(path)
    }
}

/// Run Dijkstra from `source` over the whole graph.
pub fn distances_from(graph: &WarehouseGraph, source: NodeId) -> ShortestPaths {
    dijkstra(graph, source, None)
}

/// Find the lowest-cost path between two bin codes.
///
/// Fails with [`Error::UnknownLocation`] when either code is not in the graph
/// and with [`Error::NoPathFound`] when they sit in different components.
pub fn shortest_path(graph: &WarehouseGraph, start: &str, end: &str) -> Result<PathResult> {
    let start_id = resolve(graph, start)?;
    let end_id = resolve(graph, end)?;

    if start_id == end_id {
        return Ok(PathResult {
            path: vec![graph.code(start_id).to_string()],
            distance: 0.0,
        });
    }

    let table = dijkstra(graph, start_id, Some(end_id));
    let (Some(distance), Some(nodes)) = (table.distance_to(end_id), table.path_to(end_id)) else {
        return Err(Error::NoPathFound {
            start: graph.code(start_id).to_string(),
            goal: graph.code(end_id).to_string(),
        });
    };

    Ok(PathResult {
        path: nodes
            .into_iter()
            .map(|node| graph.code(node).to_string())
            .collect(),
        distance,
    })
}

pub(crate) fn resolve(graph: &WarehouseGraph, code: &str) -> Result<NodeId> {
    graph.node_id(code).ok_or_else(|| Error::UnknownLocation {
        code: code.trim().to_string(),
    })
}

fn dijkstra(graph: &WarehouseGraph, source: NodeId, goal: Option<NodeId>) -> ShortestPaths {
    let node_count = graph.node_count();
    let mut distances = vec![f64::INFINITY; node_count];
    let mut parents: Vec<Option<NodeId>> = vec![None; node_count];
    let mut settled = vec![false; node_count];
    let mut queue = BinaryHeap::new();

    if source < node_count {
        distances[source] = 0.0;
        queue.push(QueueEntry::new(source, 0.0));
    }

    while let Some(entry) = queue.pop() {
        if settled[entry.node] {
            continue;
        }
        settled[entry.node] = true;

        if Some(entry.node) == goal {
            break;
        }

        let current_distance = distances[entry.node];
        for edge in graph.neighbours(entry.node) {
            let next = edge.target;
            if settled[next] {
                continue;
            }

            let next_cost = current_distance + edge.weight;
            if next_cost < distances[next] {
                distances[next] = next_cost;
                parents[next] = Some(entry.node);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    ShortestPaths {
        source,
        distances,
        parents,
        settled,
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
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
    fn queue_pops_lowest_cost_first() {
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry::new(1, 4.0));
        heap.push(QueueEntry::new(2, 0.5));
        heap.push(QueueEntry::new(3, 2.0));
        assert_eq!(heap.pop().map(|e| e.node), Some(2));
        assert_eq!(heap.pop().map(|e| e.node), Some(3));
        assert_eq!(heap.pop().map(|e| e.node), Some(1));
    }

    #[test]
    fn takes_direct_edge_across_shelves() {
        let graph = graph(&["A-01-01-A", "A-01-04-A", "A-02-04-A"]);
        let result = shortest_path(&graph, "A-01-01-A", "A-02-04-A").unwrap();
        assert_eq!(result.distance, 2.0);
        assert_eq!(result.path, vec!["A-01-01-A", "A-02-04-A"]);
    }

    #[test]
    fn routes_around_missing_direct_edge() {
        // Same-level neighbours have no direct edge; the path climbs a level.
        let graph = graph(&["A-01-01-A", "A-01-01-B", "A-01-02-A"]);
        let result = shortest_path(&graph, "A-01-01-A", "A-01-01-B").unwrap();
        assert_eq!(result.path, vec!["A-01-01-A", "A-01-02-A", "A-01-01-B"]);
        assert_eq!(result.distance, 1.0);
        assert_eq!(result.hop_count(), 2);
    }

    #[test]
    fn distances_from_reports_unreachable_as_none() {
        let graph = graph(&["A-01-01-A", "A-01-02-A", "BROKEN"]);
        let table = distances_from(&graph, 0);
        assert_eq!(table.source(), 0);
        assert_eq!(table.distance_to(0), Some(0.0));
        assert_eq!(table.distance_to(1), Some(0.5));
        assert_eq!(table.distance_to(2), None);
        assert_eq!(table.path_to(2), None);
        assert_eq!(table.distance_to(99), None);
    }
}
