//! CentralityAnalyzer — degree, closeness, and betweenness per account.
//!
//! Runs as one blocking CPU-bound unit over the whole graph. Graphs with
//! fewer than two nodes are skipped: no scores, counts-only metrics.

use std::time::{Duration, Instant};

use petgraph::Direction;

use crate::stats::AccountMap;

use super::metrics::compute_metrics;
use super::traversal::{bfs_distances, shortest_path_dag};
use super::types::{CentralityScores, GraphMetrics, SocialGraph};

/// Output of one analysis.
#[derive(Debug, Clone)]
pub struct CentralityResult {
    /// Scores in node order. Empty for graphs with ≤ 1 node.
    pub scores: Vec<(String, CentralityScores)>,
    pub metrics: GraphMetrics,
    pub duration: Duration,
}

impl CentralityResult {
    pub fn get(&self, account_id: &str) -> Option<&CentralityScores> {
        self.scores
            .iter()
            .find(|(id, _)| id == account_id)
            .map(|(_, scores)| scores)
    }

    /// Write scores onto the matching accounts. Returns how many were set.
    pub fn apply(&self, accounts: &mut AccountMap) -> usize {
        let mut applied = 0;
        for (id, scores) in &self.scores {
            if let Some(account) = accounts.get_mut(id) {
                account.centrality = Some(*scores);
                applied += 1;
            }
        }
        applied
    }
}

#[derive(Debug, Default)]
pub struct CentralityAnalyzer;

impl CentralityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, graph: &SocialGraph) -> CentralityResult {
        let start = Instant::now();
        let n = graph.node_count();

        if n <= 1 {
            tracing::warn!(nodes = n, "graph too small for centrality, skipping");
            return CentralityResult {
                scores: Vec::new(),
                metrics: GraphMetrics::degenerate(n, graph.edge_count()),
                duration: start.elapsed(),
            };
        }

        let degree = degree_centrality(graph);
        let closeness = closeness_centrality(graph);
        let betweenness = betweenness_centrality(graph);
        let metrics = compute_metrics(graph);

        let scores = graph
            .graph
            .node_indices()
            .map(|idx| {
                let i = idx.index();
                (
                    graph.graph[idx].clone(),
                    CentralityScores {
                        degree: degree[i],
                        closeness: closeness[i],
                        betweenness: betweenness[i],
                    },
                )
            })
            .collect();

        let duration = start.elapsed();
        tracing::info!(
            nodes = n,
            edges = graph.edge_count(),
            components = metrics.component_count,
            elapsed_ms = duration.as_millis() as u64,
            "centrality computed"
        );

        CentralityResult {
            scores,
            metrics,
            duration,
        }
    }
}

/// (in-degree + out-degree) / (N − 1). A self-loop counts once each way.
pub fn degree_centrality(graph: &SocialGraph) -> Vec<f64> {
    let n = graph.node_count();
    if n <= 1 {
        return vec![0.0; n];
    }
    let scale = 1.0 / (n as f64 - 1.0);
    graph
        .graph
        .node_indices()
        .map(|idx| {
            let incoming = graph.graph.edges_directed(idx, Direction::Incoming).count();
            let outgoing = graph.graph.edges_directed(idx, Direction::Outgoing).count();
            (incoming + outgoing) as f64 * scale
        })
        .collect()
}

/// Closeness over incoming distances with the Wasserman–Faust correction.
///
/// `r` = nodes that can reach the node (itself included), `Σd` = sum of their
/// distances to it. Score = `((r−1)/(N−1)) · ((r−1)/Σd)`, 0 when `Σd = 0`.
/// Unreachable nodes are excluded from `Σd`; the first factor discounts
/// nodes that only a small part of the graph can reach.
pub fn closeness_centrality(graph: &SocialGraph) -> Vec<f64> {
    let n = graph.node_count();
    if n <= 1 {
        return vec![0.0; n];
    }
    graph
        .graph
        .node_indices()
        .map(|idx| {
            let distances = bfs_distances(graph, idx, Direction::Incoming);
            let (reachable, total) = distances
                .iter()
                .flatten()
                .fold((0usize, 0u64), |(r, t), &d| (r + 1, t + u64::from(d)));
            if total == 0 {
                return 0.0;
            }
            let others = (reachable - 1) as f64;
            (others / total as f64) * (others / (n as f64 - 1.0))
        })
        .collect()
}

/// Brandes betweenness, endpoints excluded, scaled by 1/((N−1)(N−2)).
pub fn betweenness_centrality(graph: &SocialGraph) -> Vec<f64> {
    let n = graph.node_count();
    let mut betweenness = vec![0.0; n];

    for source in graph.graph.node_indices() {
        let dag = shortest_path_dag(graph, source);
        let mut delta = vec![0.0; n];
        for &w in dag.order.iter().rev() {
            let wi = w.index();
            let coeff = (1.0 + delta[wi]) / dag.sigma[wi];
            for &v in &dag.predecessors[wi] {
                delta[v.index()] += dag.sigma[v.index()] * coeff;
            }
            if w != source {
                betweenness[wi] += delta[wi];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n as f64 - 1.0) * (n as f64 - 2.0));
        for value in &mut betweenness {
            *value *= scale;
        }
    }
    betweenness
}
