//! Dense all-pairs distance matrix.

use crate::models::Graph;

use super::{DistanceOracle, ShortestPaths};

/// A dense n×n shortest-distance matrix stored in row-major order.
///
/// Unreachable pairs hold `f64::INFINITY`. Use it when the whole matrix is
/// consumed many times; [`DistanceOracle`] answers the same queries lazily.
///
/// # Examples
///
/// ```
/// use carp_routing::models::Graph;
/// use carp_routing::distance::{DistanceMatrix, ShortestPaths};
///
/// let mut g = Graph::new();
/// g.add_edge("1", "2", 5.0).unwrap();
/// g.add_edge("2", "3", 4.0).unwrap();
///
/// let dm = DistanceMatrix::floyd_warshall(&g);
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.distance(2, 0), 9.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix with zero diagonal and every other entry unreachable.
    pub fn new(size: usize) -> Self {
        let mut data = vec![f64::INFINITY; size * size];
        for i in 0..size {
            data[i * size + i] = 0.0;
        }
        Self { data, size }
    }

    /// Fills every row with one single-source run of the oracle.
    pub fn from_oracle(oracle: &DistanceOracle<'_>) -> Self {
        let n = oracle.graph().num_vertices();
        let mut dm = Self::new(n);
        for from in 0..n {
            let tree = oracle.shortest_path_tree(from);
            dm.data[from * n..(from + 1) * n].copy_from_slice(tree.distances());
        }
        dm
    }

    /// Computes all pairs by triple relaxation, O(V³).
    pub fn floyd_warshall(graph: &Graph) -> Self {
        let n = graph.num_vertices();
        let mut dm = Self::new(n);
        for link in graph.edges() {
            let w = link.min_weight();
            dm.relax(link.from(), link.to(), w);
            dm.relax(link.to(), link.from(), w);
        }
        for link in graph.arcs() {
            dm.relax(link.from(), link.to(), link.min_weight());
        }
        for k in 0..n {
            for i in 0..n {
                let d_ik = dm.get(i, k);
                if d_ik.is_infinite() {
                    continue;
                }
                for j in 0..n {
                    dm.relax(i, j, d_ik + dm.get(k, j));
                }
            }
        }
        dm
    }

    /// Returns the distance from vertex `from` to vertex `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from vertex `from` to vertex `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of vertices in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    fn relax(&mut self, from: usize, to: usize, candidate: f64) {
        if candidate < self.get(from, to) {
            self.set(from, to, candidate);
        }
    }
}

impl ShortestPaths for DistanceMatrix {
    fn distance(&self, from: usize, to: usize) -> f64 {
        if from >= self.size || to >= self.size {
            return f64::INFINITY;
        }
        self.get(from, to)
    }
}
