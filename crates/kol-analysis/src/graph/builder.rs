//! SocialGraphBuilder — account nodes plus admitted follow edges.

use std::time::{Duration, Instant};

use crate::ingest::FollowEdge;
use crate::stats::AccountMap;

use super::types::SocialGraph;

/// Counters from one graph build.
#[derive(Debug, Clone, Default)]
pub struct GraphBuildStats {
    pub total_edges: usize,
    pub admitted_edges: usize,
    /// Edges with a blank endpoint.
    pub malformed_edges: usize,
    /// Edges with an endpoint outside the account set.
    pub dangling_edges: usize,
    /// Repeats of an already admitted edge.
    pub duplicate_edges: usize,
    pub duration: Duration,
}

impl GraphBuildStats {
    pub fn dropped(&self) -> usize {
        self.malformed_edges + self.dangling_edges + self.duplicate_edges
    }
}

/// Builds the graph over every account in the map, not just qualified ones.
#[derive(Debug, Default)]
pub struct SocialGraphBuilder;

impl SocialGraphBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Nodes follow account order; an edge is admitted only when both
    /// endpoints are accounts. Single O(E) pass over `edges`.
    pub fn build(&self, accounts: &AccountMap, edges: &[FollowEdge]) -> (SocialGraph, GraphBuildStats) {
        let start = Instant::now();
        let mut graph = SocialGraph::new();
        for id in accounts.ids() {
            graph.add_account(id);
        }

        let mut stats = GraphBuildStats {
            total_edges: edges.len(),
            ..GraphBuildStats::default()
        };

        for edge in edges {
            let Some((follower_id, followee_id)) = edge.endpoints() else {
                stats.malformed_edges += 1;
                continue;
            };
            let (Some(follower), Some(followee)) = (graph.get_node(follower_id), graph.get_node(followee_id))
            else {
                stats.dangling_edges += 1;
                continue;
            };
            if graph.add_follow(follower, followee) {
                stats.admitted_edges += 1;
            } else {
                stats.duplicate_edges += 1;
            }
        }
        stats.duration = start.elapsed();

        if stats.dropped() > 0 {
            tracing::debug!(
                malformed = stats.malformed_edges,
                dangling = stats.dangling_edges,
                duplicate = stats.duplicate_edges,
                "follow edges not admitted"
            );
        }
        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            elapsed_ms = stats.duration.as_millis() as u64,
            "social graph built"
        );

        (graph, stats)
    }
}
