use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::Result;
use crate::hierarchy::{Bin, WarehouseHierarchy};
use crate::location::LocationCode;
use crate::proximity;
use crate::repository::WarehouseRepository;

/// Dense index of a bin within one graph instance.
pub type NodeId = usize;

/// Graph vertex: one bin and its stock attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct BinNode {
    pub id: NodeId,
    pub code: String,
    pub capacity: f64,
    pub occupied: f64,
}

impl BinNode {
    /// Free capacity; negative when the bin is over-filled.
    pub fn available_space(&self) -> f64 {
        self.capacity - self.occupied
    }
}

/// Undirected edge, stored once in each endpoint's adjacency list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    pub weight: f64,
}

/// Bin connectivity graph for a single warehouse.
///
/// Read-only once built. Cloning is cheap: nodes and adjacency are shared.
#[derive(Debug, Clone)]
pub struct WarehouseGraph {
    warehouse_id: String,
    nodes: Arc<Vec<BinNode>>,
    index: Arc<HashMap<String, NodeId>>,
    adjacency: Arc<Vec<Vec<Edge>>>,
    edge_count: usize,
}

impl WarehouseGraph {
    /// Build the graph from an already-fetched hierarchy.
    pub fn from_hierarchy(hierarchy: &WarehouseHierarchy) -> Self {
        Self::from_bins(hierarchy.warehouse.id.clone(), hierarchy.bins())
    }

    /// Build the graph from a flat list of bins.
    ///
    /// Every unordered pair of distinct bins is scanned, so construction is
    /// O(n²) in the bin count. That is fine for a few thousand bins; larger
    /// sites would need bucketing by aisle before the scan.
    ///
    /// Pairs whose codes do not parse, or whose distance is not strictly
    /// positive, get no edge. Codes are matched case-insensitively and
    /// duplicates keep the first bin.
    pub fn from_bins<'a>(
        warehouse_id: impl Into<String>,
        bins: impl IntoIterator<Item = &'a Bin>,
    ) -> Self {
        let warehouse_id = warehouse_id.into();
        let mut nodes: Vec<BinNode> = Vec::new();
        let mut index: HashMap<String, NodeId> = HashMap::new();

        for bin in bins {
            match index.entry(index_key(&bin.code)) {
                Entry::Occupied(existing) => {
                    warn!(
                        warehouse_id = %warehouse_id,
                        code = %bin.code,
                        first = %nodes[*existing.get()].code,
                        bin_id = %bin.id,
                        "duplicate bin code ignored"
                    );
                }
                Entry::Vacant(slot) => {
                    let id = nodes.len();
                    nodes.push(BinNode {
                        id,
                        code: bin.code.trim().to_string(),
                        capacity: bin.capacity,
                        occupied: bin.occupied,
                    });
                    slot.insert(id);
                }
            }
        }

        let parsed: Vec<Option<LocationCode>> = nodes
            .iter()
            .map(|node| match LocationCode::parse(&node.code) {
                Ok(code) => Some(code),
                Err(e) => {
                    warn!(warehouse_id = %warehouse_id, error = %e, "bin left unconnected");
                    None
                }
            })
            .collect();

        let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); nodes.len()];
        let mut edge_count = 0;
        for (a, code_a) in parsed.iter().enumerate() {
            let Some(code_a) = code_a else { continue };
            for (offset, code_b) in parsed[a + 1..].iter().enumerate() {
                let Some(code_b) = code_b else { continue };
                let weight = proximity::distance(code_a, code_b);
                if weight <= 0.0 || !weight.is_finite() {
                    continue;
                }
                let b = a + 1 + offset;
                adjacency[a].push(Edge { target: b, weight });
                adjacency[b].push(Edge { target: a, weight });
                edge_count += 1;
            }
        }

        debug!(
            warehouse_id = %warehouse_id,
            bins = nodes.len(),
            edges = edge_count,
            unparsed = parsed.iter().filter(|code| code.is_none()).count(),
            "warehouse graph built"
        );

        Self {
            warehouse_id,
            nodes: Arc::new(nodes),
            index: Arc::new(index),
            adjacency: Arc::new(adjacency),
            edge_count,
        }
    }

    pub fn warehouse_id(&self) -> &str {
        &self.warehouse_id
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn nodes(&self) -> &[BinNode] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&BinNode> {
        self.nodes.get(id)
    }

    /// Resolve a bin code to its node id, ignoring case and surrounding spaces.
    pub fn node_id(&self, code: &str) -> Option<NodeId> {
        self.index.get(&index_key(code)).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.node_id(code).is_some()
    }

    /// Return the neighbours for a given node.
    pub fn neighbours(&self, node: NodeId) -> &[Edge] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Weight of the direct edge between two nodes, if any.
    pub fn edge_weight(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.neighbours(a)
            .iter()
            .find(|edge| edge.target == b)
            .map(|edge| edge.weight)
    }

    pub(crate) fn code(&self, node: NodeId) -> &str {
        self.nodes
            .get(node)
            .map(|node| node.code.as_str())
            .unwrap_or_default()
    }
}

fn index_key(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Fetch the hierarchy for `warehouse_id` and build its graph.
pub fn build_graph(repository: &dyn WarehouseRepository, warehouse_id: &str) -> Result<WarehouseGraph> {
    let hierarchy = repository.hierarchy(warehouse_id)?;
    Ok(WarehouseGraph::from_hierarchy(&hierarchy))
}
