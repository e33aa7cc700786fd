//! Memoized single-source shortest paths over a mixed graph.
//!
//! # Algorithm
//!
//! Dijkstra with a binary-heap frontier. Every edge contributes two directed
//! adjacency entries (u→v and v→u), every arc one (u→v). Parallel weights
//! collapse to their minimum. Equal-distance frontier entries pop in
//! discovery order, and a label only improves on a strictly shorter
//! distance, so the first shortest path found wins.
//!
//! # Complexity
//!
//! O((V + E) log V) per origin; each origin runs at most once per oracle.

use std::cell::OnceCell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::models::Graph;

use super::ShortestPaths;

/// Which kind of link a shortest-path step used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkKind {
    /// Undirected edge.
    Edge,
    /// Directed arc.
    Arc,
}

/// The last step of a shortest path into some vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Predecessor vertex.
    pub from: usize,
    /// Link used from the predecessor.
    pub via: LinkKind,
    /// Weight of that link.
    pub weight: f64,
}

/// Distances and predecessor steps from one origin to every vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathTree {
    origin: usize,
    dist: Vec<f64>,
    pred: Vec<Option<Step>>,
}

impl ShortestPathTree {
    /// Origin vertex of this tree.
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Shortest distance to `to`, or `f64::INFINITY` if unreachable.
    pub fn distance(&self, to: usize) -> f64 {
        self.dist.get(to).copied().unwrap_or(f64::INFINITY)
    }

    /// Distances indexed by vertex.
    pub fn distances(&self) -> &[f64] {
        &self.dist
    }

    /// Last step of the shortest path into `to` (`None` for the origin and
    /// unreachable vertices).
    pub fn predecessor(&self, to: usize) -> Option<Step> {
        self.pred.get(to).copied().flatten()
    }

    /// Vertex sequence from the origin to `to`, both inclusive.
    ///
    /// Returns `None` if `to` is unreachable.
    pub fn path_to(&self, to: usize) -> Option<Vec<usize>> {
        if !self.distance(to).is_finite() {
            return None;
        }
        let mut path = vec![to];
        let mut current = to;
        while let Some(step) = self.predecessor(current) {
            path.push(step.from);
            current = step.from;
        }
        path.reverse();
        Some(path)
    }
}

#[derive(Debug, Clone, Copy)]
struct Outgoing {
    to: usize,
    weight: f64,
    via: LinkKind,
}

#[derive(Debug)]
struct Frontier {
    cost: f64,
    seq: usize,
    node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    // BinaryHeap is a max-heap: smaller cost, then earlier discovery, wins.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Shortest-path oracle bound to one graph instance.
///
/// Trees are computed lazily per origin and cached for the lifetime of the
/// oracle. The oracle borrows the graph, so the graph cannot change while
/// the cache is alive; a new graph needs a new oracle.
///
/// # Examples
///
/// ```
/// use carp_routing::models::Graph;
/// use carp_routing::distance::{DistanceOracle, ShortestPaths};
///
/// let mut g = Graph::new();
/// g.add_edge("1", "2", 5.0).unwrap();
/// g.add_arc("2", "3", 4.0).unwrap();
/// let (v1, v3) = (g.index_of("1").unwrap(), g.index_of("3").unwrap());
///
/// let oracle = DistanceOracle::new(&g);
/// assert_eq!(oracle.distance(v1, v3), 9.0);
/// assert_eq!(oracle.distance(v3, v1), f64::INFINITY);
/// ```
pub struct DistanceOracle<'g> {
    graph: &'g Graph,
    adjacency: Vec<Vec<Outgoing>>,
    trees: Vec<OnceCell<ShortestPathTree>>,
}

impl<'g> DistanceOracle<'g> {
    /// Builds the directed adjacency for `graph`. No search runs yet.
    pub fn new(graph: &'g Graph) -> Self {
        let n = graph.num_vertices();
        let mut adjacency = vec![Vec::new(); n];
        for link in graph.edges() {
            let weight = link.min_weight();
            adjacency[link.from()].push(Outgoing {
                to: link.to(),
                weight,
                via: LinkKind::Edge,
            });
            if link.from() != link.to() {
                adjacency[link.to()].push(Outgoing {
                    to: link.from(),
                    weight,
                    via: LinkKind::Edge,
                });
            }
        }
        for link in graph.arcs() {
            adjacency[link.from()].push(Outgoing {
                to: link.to(),
                weight: link.min_weight(),
                via: LinkKind::Arc,
            });
        }
        Self {
            graph,
            adjacency,
            trees: (0..n).map(|_| OnceCell::new()).collect(),
        }
    }

    /// The graph this oracle answers for.
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Shortest-path tree rooted at `origin`, computed on first request.
    ///
    /// # Panics
    ///
    /// Panics if `origin` is not a vertex index of the graph.
    pub fn shortest_path_tree(&self, origin: usize) -> &ShortestPathTree {
        self.trees[origin].get_or_init(|| {
            trace!(origin, "computing shortest-path tree");
            self.dijkstra(origin)
        })
    }

    /// Number of origins whose tree is cached.
    pub fn cached_origins(&self) -> usize {
        self.trees.iter().filter(|t| t.get().is_some()).count()
    }

    fn dijkstra(&self, origin: usize) -> ShortestPathTree {
        let n = self.adjacency.len();
        let mut dist = vec![f64::INFINITY; n];
        let mut pred: Vec<Option<Step>> = vec![None; n];
        let mut settled = vec![false; n];
        let mut heap = BinaryHeap::new();
        let mut seq = 0;

        dist[origin] = 0.0;
        heap.push(Frontier {
            cost: 0.0,
            seq,
            node: origin,
        });

        while let Some(Frontier { cost, node, .. }) = heap.pop() {
            if settled[node] {
                continue;
            }
            settled[node] = true;

            for out in &self.adjacency[node] {
                if settled[out.to] {
                    continue;
                }
                let candidate = cost + out.weight;
                if candidate < dist[out.to] {
                    dist[out.to] = candidate;
                    pred[out.to] = Some(Step {
                        from: node,
                        via: out.via,
                        weight: out.weight,
                    });
                    seq += 1;
                    heap.push(Frontier {
                        cost: candidate,
                        seq,
                        node: out.to,
                    });
                }
            }
        }

        ShortestPathTree { origin, dist, pred }
    }
}

impl ShortestPaths for DistanceOracle<'_> {
    fn distance(&self, from: usize, to: usize) -> f64 {
        if from >= self.trees.len() {
            return f64::INFINITY;
        }
        self.shortest_path_tree(from).distance(to)
    }
}
