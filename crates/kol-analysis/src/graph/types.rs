//! SocialGraph — petgraph DiGraph keyed by account id.

use kol_core::types::collections::FxHashMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};

/// Directed follow graph. Node weight = account id; an edge `a → b` means
/// `a` follows `b`. No parallel edges; self-loops allowed.
#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    pub graph: DiGraph<String, ()>,
    node_index: FxHashMap<String, NodeIndex>,
}

impl SocialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account node, returning the existing index if already present.
    pub fn add_account(&mut self, account_id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(account_id) {
            return idx;
        }
        let idx = self.graph.add_node(account_id.to_string());
        self.node_index.insert(account_id.to_string(), idx);
        idx
    }

    /// Add a follow edge. Returns `false` if the edge already existed.
    pub fn add_follow(&mut self, follower: NodeIndex, followee: NodeIndex) -> bool {
        if self.graph.find_edge(follower, followee).is_some() {
            return false;
        }
        self.graph.add_edge(follower, followee, ());
        true
    }

    pub fn get_node(&self, account_id: &str) -> Option<NodeIndex> {
        self.node_index.get(account_id).copied()
    }

    pub fn account_id(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    pub fn contains_follow(&self, follower_id: &str, followee_id: &str) -> bool {
        match (self.get_node(follower_id), self.get_node(followee_id)) {
            (Some(a), Some(b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn followers_of(&self, account_id: &str) -> Vec<&str> {
        self.neighbors(account_id, Direction::Incoming)
    }

    pub fn following_of(&self, account_id: &str) -> Vec<&str> {
        self.neighbors(account_id, Direction::Outgoing)
    }

    fn neighbors(&self, account_id: &str, direction: Direction) -> Vec<&str> {
        let Some(idx) = self.get_node(account_id) else {
            return Vec::new();
        };
        self.graph
            .neighbors_directed(idx, direction)
            .filter_map(|n| self.account_id(n))
            .collect()
    }

    /// Induced sub-network over the given accounts, in the order given.
    /// Unknown ids are skipped.
    pub fn subgraph<'a>(&self, account_ids: impl IntoIterator<Item = &'a str>) -> SocialGraph {
        let mut sub = SocialGraph::new();
        let mut mapping: FxHashMap<NodeIndex, NodeIndex> = FxHashMap::default();
        for id in account_ids {
            if let Some(idx) = self.get_node(id) {
                mapping.insert(idx, sub.add_account(id));
            }
        }
        for edge in self.graph.raw_edges() {
            if let (Some(&a), Some(&b)) = (mapping.get(&edge.source()), mapping.get(&edge.target())) {
                sub.add_follow(a, b);
            }
        }
        sub
    }

    /// Plain node/edge listing for presentation collaborators.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.graph.node_weights().cloned().collect(),
            edges: self
                .graph
                .raw_edges()
                .iter()
                .map(|e| (self.graph[e.source()].clone(), self.graph[e.target()].clone()))
                .collect(),
        }
    }
}

/// Serializable node and edge list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<String>,
    /// (follower, followee) pairs.
    pub edges: Vec<(String, String)>,
}

/// Per-account structural importance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CentralityScores {
    pub degree: f64,
    pub closeness: f64,
    pub betweenness: f64,
}

/// Average shortest-path length, which is not always defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum AveragePathLength {
    Defined(f64),
    /// The undirected view of the graph has more than one component.
    Disconnected,
    /// Weakly connected, but some account cannot reach some other along
    /// follow edges.
    Unreachable,
    /// Fewer than two nodes.
    NotComputed,
}

impl AveragePathLength {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Defined(v) => Some(*v),
            _ => None,
        }
    }
}

/// Graph-level aggregates. Ratios are `None` for graphs with ≤ 1 node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphMetrics {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: Option<f64>,
    pub avg_clustering: Option<f64>,
    pub avg_shortest_path: AveragePathLength,
    /// Weakly connected components.
    pub component_count: usize,
}

impl GraphMetrics {
    /// Counts only; used when the graph is too small for anything else.
    pub fn degenerate(node_count: usize, edge_count: usize) -> Self {
        Self {
            node_count,
            edge_count,
            density: None,
            avg_clustering: None,
            avg_shortest_path: AveragePathLength::NotComputed,
            component_count: node_count,
        }
    }
}
