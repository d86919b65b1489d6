//! Graph-level aggregates: density, directed clustering, average path length.

use kol_core::types::collections::FxHashSet;
use petgraph::algo::connected_components;
use petgraph::Direction;

use super::traversal::bfs_distances;
use super::types::{AveragePathLength, GraphMetrics, SocialGraph};

/// All graph-level metrics. Ratios are left empty for ≤ 1 node.
pub fn compute_metrics(graph: &SocialGraph) -> GraphMetrics {
    let n = graph.node_count();
    let e = graph.edge_count();
    if n <= 1 {
        return GraphMetrics::degenerate(n, e);
    }

    let component_count = connected_components(&graph.graph);
    let avg_shortest_path = if component_count == 1 {
        match average_path_length(graph) {
            Some(avg) => AveragePathLength::Defined(avg),
            None => AveragePathLength::Unreachable,
        }
    } else {
        AveragePathLength::Disconnected
    };

    GraphMetrics {
        node_count: n,
        edge_count: e,
        density: Some(density(n, e)),
        avg_clustering: Some(average_clustering(graph)),
        avg_shortest_path,
        component_count,
    }
}

/// E / (N(N−1)). Self-loops count toward E.
pub fn density(node_count: usize, edge_count: usize) -> f64 {
    if node_count <= 1 {
        return 0.0;
    }
    edge_count as f64 / (node_count as f64 * (node_count as f64 - 1.0))
}

/// Mean directed clustering coefficient over all nodes (zeros included).
///
/// Per node `i`, with predecessor/successor sets excluding self-loops:
/// `c_i = T_i / (2 · (d_tot(d_tot − 1) − 2·d_bi))` where `T_i` counts the
/// directed triangles through `i`, `d_tot` is in+out degree and `d_bi` the
/// number of reciprocated neighbours.
pub fn average_clustering(graph: &SocialGraph) -> f64 {
    let n = graph.node_count();
    if n == 0 {
        return 0.0;
    }
    let preds = neighbour_sets(graph, Direction::Incoming);
    let succs = neighbour_sets(graph, Direction::Outgoing);

    let total: f64 = (0..n)
        .map(|i| {
            let (ip, is) = (&preds[i], &succs[i]);
            let triangles: usize = ip
                .iter()
                .chain(is.iter())
                .map(|&j| {
                    let (jp, js) = (&preds[j], &succs[j]);
                    overlap(ip, jp) + overlap(ip, js) + overlap(is, jp) + overlap(is, js)
                })
                .sum();
            if triangles == 0 {
                return 0.0;
            }
            let d_tot = (ip.len() + is.len()) as f64;
            let d_bi = overlap(ip, is) as f64;
            triangles as f64 / (2.0 * (d_tot * (d_tot - 1.0) - 2.0 * d_bi))
        })
        .sum();

    total / n as f64
}

/// Mean directed hop distance over all N(N−1) ordered pairs.
///
/// `None` unless every account reaches every other along follow edges.
pub fn average_path_length(graph: &SocialGraph) -> Option<f64> {
    let n = graph.node_count();
    if n <= 1 {
        return None;
    }
    let mut total: u64 = 0;
    for source in graph.graph.node_indices() {
        for distance in bfs_distances(graph, source, Direction::Outgoing) {
            total = total.saturating_add(u64::from(distance?));
        }
    }
    Some(total as f64 / (n as f64 * (n as f64 - 1.0)))
}

fn neighbour_sets(graph: &SocialGraph, direction: Direction) -> Vec<FxHashSet<usize>> {
    graph
        .graph
        .node_indices()
        .map(|idx| {
            graph
                .graph
                .neighbors_directed(idx, direction)
                .filter(|&other| other != idx)
                .map(|other| other.index())
                .collect()
        })
        .collect()
}

fn overlap(a: &FxHashSet<usize>, b: &FxHashSet<usize>) -> usize {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter(|x| large.contains(x)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(ids: &[&str], edges: &[(&str, &str)]) -> SocialGraph {
        let mut g = SocialGraph::new();
        for id in ids {
            g.add_account(id);
        }
        for (a, b) in edges {
            let (a, b) = (g.get_node(a).unwrap(), g.get_node(b).unwrap());
            g.add_follow(a, b);
        }
        g
    }

    #[test]
    fn test_density() {
        assert_eq!(density(3, 2), 2.0 / 6.0);
        assert_eq!(density(1, 0), 0.0);
    }

    #[test]
    fn test_degenerate_graphs() {
        let empty = compute_metrics(&SocialGraph::new());
        assert_eq!(empty.node_count, 0);
        assert!(empty.density.is_none());
        assert_eq!(empty.avg_shortest_path, AveragePathLength::NotComputed);

        let single = compute_metrics(&graph(&["a"], &[]));
        assert_eq!(single.node_count, 1);
        assert!(single.avg_clustering.is_none());
    }

    #[test]
    fn test_chain_metrics() {
        let m = compute_metrics(&graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]));
        assert_eq!(m.edge_count, 2);
        assert_eq!(m.component_count, 1);
        assert_eq!(m.avg_clustering, Some(0.0));
        // Weakly connected, but c reaches nobody.
        assert_eq!(m.avg_shortest_path, AveragePathLength::Unreachable);
        assert!(m.avg_shortest_path.value().is_none());
    }

    #[test]
    fn test_directed_cycle_path_length() {
        let m = compute_metrics(&graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]));
        // Each node reaches the next at 1 and the one after at 2.
        assert_eq!(m.avg_shortest_path, AveragePathLength::Defined(1.5));
    }

    #[test]
    fn test_reciprocal_chain_path_length() {
        let m = compute_metrics(&graph(
            &["a", "b", "c"],
            &[("a", "b"), ("b", "a"), ("b", "c"), ("c", "b")],
        ));
        // a-b 1, b-c 1, a-c 2 in both directions over 6 ordered pairs.
        assert_eq!(m.avg_shortest_path, AveragePathLength::Defined(8.0 / 6.0));
    }

    #[test]
    fn test_disconnected_path_length_not_zero() {
        let m = compute_metrics(&graph(&["a", "b", "c"], &[("a", "b")]));
        assert_eq!(m.avg_shortest_path, AveragePathLength::Disconnected);
        assert_eq!(m.component_count, 2);
        assert!(m.avg_shortest_path.value().is_none());
    }

    #[test]
    fn test_cycle_clustering() {
        // Directed 3-cycle: each node has one directed triangle.
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        // T = 2, d_tot = 2, d_bi = 0 -> 2 / (2 * 2) = 0.5
        assert!((average_clustering(&g) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_complete_digraph_clustering_is_one() {
        let ids = ["a", "b", "c", "d"];
        let mut edges = Vec::new();
        for a in ids {
            for b in ids {
                if a != b {
                    edges.push((a, b));
                }
            }
        }
        let g = graph(&ids, &edges);
        assert!((average_clustering(&g) - 1.0).abs() < 1e-12);
        assert_eq!(compute_metrics(&g).density, Some(1.0));
    }
}
