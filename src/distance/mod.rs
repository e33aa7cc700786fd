//! Shortest-path distances over the mixed graph.
//!
//! - [`DistanceOracle`]: lazy, per-origin memoized Dijkstra
//! - [`DistanceMatrix`]: dense all-pairs matrix (from the oracle or Floyd-Warshall)
//!
//! Both answer through [`ShortestPaths`] with identical values.

mod dijkstra;
mod matrix;

pub use dijkstra::{DistanceOracle, LinkKind, ShortestPathTree, Step};
pub use matrix::DistanceMatrix;

/// Shortest-path distance lookup between vertex indices.
///
/// Unreachable pairs (and unknown vertices) yield `f64::INFINITY`; callers
/// treat that as "no feasible traversal".
pub trait ShortestPaths {
    /// Shortest distance from `from` to `to`.
    fn distance(&self, from: usize, to: usize) -> f64;
}
