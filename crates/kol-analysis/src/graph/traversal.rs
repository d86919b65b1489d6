//! BFS primitives over the follow graph (unweighted, so BFS = shortest paths).

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;
use petgraph::Direction;

use super::types::SocialGraph;

/// Hop distances from `start`, indexed by node index. `None` = unreachable.
///
/// `Outgoing` follows edges forward; `Incoming` walks them backwards, which
/// gives the distance from every other node *to* `start`.
pub fn bfs_distances(graph: &SocialGraph, start: NodeIndex, direction: Direction) -> Vec<Option<u32>> {
    bfs_with(graph, start, |node| graph.graph.neighbors_directed(node, direction).collect())
}

fn bfs_with<F>(graph: &SocialGraph, start: NodeIndex, neighbors: F) -> Vec<Option<u32>>
where
    F: Fn(NodeIndex) -> Vec<NodeIndex>,
{
    let mut dist = vec![None; graph.node_count()];
    let mut queue = VecDeque::new();
    dist[start.index()] = Some(0);
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        let next = dist[node.index()].map_or(0, |d| d + 1);
        for neighbor in neighbors(node) {
            if dist[neighbor.index()].is_none() {
                dist[neighbor.index()] = Some(next);
                queue.push_back(neighbor);
            }
        }
    }

    dist
}

/// Single-source shortest-path DAG used by Brandes' algorithm.
#[derive(Debug)]
pub struct ShortestPathDag {
    /// Nodes in non-decreasing distance from the source.
    pub order: Vec<NodeIndex>,
    /// Predecessors of each node on some shortest path.
    pub predecessors: Vec<Vec<NodeIndex>>,
    /// Number of shortest paths from the source to each node.
    pub sigma: Vec<f64>,
}

pub fn shortest_path_dag(graph: &SocialGraph, source: NodeIndex) -> ShortestPathDag {
    let n = graph.node_count();
    let mut order = Vec::with_capacity(n);
    let mut predecessors = vec![Vec::new(); n];
    let mut sigma = vec![0.0; n];
    let mut dist: Vec<Option<u32>> = vec![None; n];
    let mut queue = VecDeque::new();

    sigma[source.index()] = 1.0;
    dist[source.index()] = Some(0);
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        order.push(v);
        let dv = dist[v.index()].unwrap_or(0);
        for w in graph.graph.neighbors_directed(v, Direction::Outgoing) {
            if dist[w.index()].is_none() {
                dist[w.index()] = Some(dv + 1);
                queue.push_back(w);
            }
            if dist[w.index()] == Some(dv + 1) {
                sigma[w.index()] += sigma[v.index()];
                predecessors[w.index()].push(v);
            }
        }
    }

    ShortestPathDag {
        order,
        predecessors,
        sigma,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> SocialGraph {
        // a -> b -> c, d isolated
        let mut g = SocialGraph::new();
        let a = g.add_account("a");
        let b = g.add_account("b");
        let c = g.add_account("c");
        g.add_account("d");
        g.add_follow(a, b);
        g.add_follow(b, c);
        g
    }

    #[test]
    fn test_forward_and_inverse() {
        let g = chain();
        let a = g.get_node("a").unwrap();
        let c = g.get_node("c").unwrap();
        assert_eq!(bfs_distances(&g, a, Direction::Outgoing), vec![Some(0), Some(1), Some(2), None]);
        assert_eq!(bfs_distances(&g, c, Direction::Incoming), vec![Some(2), Some(1), Some(0), None]);
        assert_eq!(bfs_distances(&g, c, Direction::Outgoing), vec![None, None, Some(0), None]);
    }

    #[test]
    fn test_sigma_counts_paths() {
        // s -> x -> t and s -> y -> t: two shortest paths to t.
        let mut g = SocialGraph::new();
        let s = g.add_account("s");
        let x = g.add_account("x");
        let y = g.add_account("y");
        let t = g.add_account("t");
        g.add_follow(s, x);
        g.add_follow(s, y);
        g.add_follow(x, t);
        g.add_follow(y, t);

        let dag = shortest_path_dag(&g, s);
        assert_eq!(dag.sigma[t.index()], 2.0);
        assert_eq!(dag.predecessors[t.index()].len(), 2);
        assert_eq!(dag.order.first(), Some(&s));
        assert_eq!(dag.order.last(), Some(&t));
    }

    #[test]
    fn test_self_loop_ignored() {
        let mut g = SocialGraph::new();
        let a = g.add_account("a");
        g.add_follow(a, a);
        let dag = shortest_path_dag(&g, a);
        assert_eq!(dag.sigma[a.index()], 1.0);
        assert!(dag.predecessors[a.index()].is_empty());
    }
}
