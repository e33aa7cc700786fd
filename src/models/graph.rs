//! Mixed graph with required vertices, edges, and arcs.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CarpError, Result};

/// Opaque vertex label, unique within a graph.
///
/// Integer and string labels are both accepted and stored as text.
///
/// # Examples
///
/// ```
/// use carp_routing::models::VertexId;
///
/// assert_eq!(VertexId::from(7usize), VertexId::from("7"));
/// assert_eq!(VertexId::from("depot").as_str(), "depot");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(String);

impl VertexId {
    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VertexId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for VertexId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&VertexId> for VertexId {
    fn from(value: &VertexId) -> Self {
        value.clone()
    }
}

impl From<usize> for VertexId {
    fn from(value: usize) -> Self {
        Self(value.to_string())
    }
}

impl From<u32> for VertexId {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

/// A traversable link between two vertices with all its parallel weights.
#[derive(Debug, Clone)]
pub struct Link {
    from: usize,
    to: usize,
    weights: Vec<f64>,
}

impl Link {
    /// Tail vertex index (for edges: the lower index).
    pub fn from(&self) -> usize {
        self.from
    }

    /// Head vertex index (for edges: the higher index).
    pub fn to(&self) -> usize {
        self.to
    }

    /// Parallel weights in insertion order.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Smallest parallel weight.
    pub fn min_weight(&self) -> f64 {
        self.weights.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

/// A required edge or arc: endpoints in input orientation, demand, and an
/// optional explicit service cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Requirement {
    /// Tail vertex index.
    pub tail: usize,
    /// Head vertex index.
    pub head: usize,
    /// Capacity consumed by servicing the element.
    pub demand: i32,
    /// Service cost, when given separately from the traversal weights.
    pub cost: Option<f64>,
}

/// The road network of one CARP instance.
///
/// Vertices are interned on first mention; all queries take dense vertex
/// indices (`0..num_vertices()`). Edges are traversable both ways, arcs only
/// from tail to head. Repeated `add_edge`/`add_arc` calls between the same
/// endpoints append parallel weights. Required elements are kept in
/// insertion order; registering the same requirement twice keeps the first.
/// The graph is append-only.
///
/// # Examples
///
/// ```
/// use carp_routing::models::Graph;
///
/// let mut g = Graph::new();
/// g.add_edge("1", "2", 5.0).expect("valid");
/// g.add_edge("2", "1", 3.0).expect("valid");
/// g.add_arc("2", "3", 4.0).expect("valid");
///
/// let (v1, v2, v3) = (g.index_of("1").unwrap(), g.index_of("2").unwrap(), g.index_of("3").unwrap());
/// assert_eq!(g.weight(v2, v1), Some(3.0));
/// assert!(g.has_arc(v2, v3));
/// assert!(!g.has_arc(v3, v2));
/// assert_eq!(g.weight(v3, v2), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    labels: Vec<VertexId>,
    index: HashMap<VertexId, usize>,
    adjacency: Vec<Vec<usize>>,
    edges: Vec<Link>,
    edge_index: HashMap<(usize, usize), usize>,
    arcs: Vec<Link>,
    arc_index: HashMap<(usize, usize), usize>,
    required_vertices: Vec<usize>,
    required_vertex_set: HashSet<usize>,
    required_edges: Vec<Requirement>,
    required_edge_keys: HashSet<(usize, usize)>,
    required_arcs: Vec<Requirement>,
    required_arc_keys: HashSet<(usize, usize)>,
}

fn edge_key(u: usize, v: usize) -> (usize, usize) {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a vertex, returning its index. Idempotent.
    pub fn add_vertex(&mut self, id: impl Into<VertexId>) -> usize {
        let id = id.into();
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.labels.len();
        self.index.insert(id.clone(), idx);
        self.labels.push(id);
        self.adjacency.push(Vec::new());
        idx
    }

    /// Registers a vertex and flags it as requiring a service visit.
    pub fn add_required_vertex(&mut self, id: impl Into<VertexId>) -> usize {
        let idx = self.add_vertex(id);
        if self.required_vertex_set.insert(idx) {
            self.required_vertices.push(idx);
        }
        idx
    }

    /// Adds an undirected edge weight between `u` and `v`.
    pub fn add_edge(
        &mut self,
        u: impl Into<VertexId>,
        v: impl Into<VertexId>,
        weight: f64,
    ) -> Result<()> {
        let (u, v) = (self.add_vertex(u), self.add_vertex(v));
        self.check_weight(u, v, weight)?;
        let key = edge_key(u, v);
        match self.edge_index.get(&key) {
            Some(&slot) => self.edges[slot].weights.push(weight),
            None => {
                self.edge_index.insert(key, self.edges.len());
                self.edges.push(Link {
                    from: key.0,
                    to: key.1,
                    weights: vec![weight],
                });
            }
        }
        self.link_neighbor(u, v);
        self.link_neighbor(v, u);
        Ok(())
    }

    /// Adds a directed arc weight from `u` to `v`.
    pub fn add_arc(
        &mut self,
        u: impl Into<VertexId>,
        v: impl Into<VertexId>,
        weight: f64,
    ) -> Result<()> {
        let (u, v) = (self.add_vertex(u), self.add_vertex(v));
        self.check_weight(u, v, weight)?;
        match self.arc_index.get(&(u, v)) {
            Some(&slot) => self.arcs[slot].weights.push(weight),
            None => {
                self.arc_index.insert((u, v), self.arcs.len());
                self.arcs.push(Link {
                    from: u,
                    to: v,
                    weights: vec![weight],
                });
            }
        }
        self.link_neighbor(u, v);
        Ok(())
    }

    /// Flags the edge {u, v} as required.
    ///
    /// Registers the endpoints but no traversal weight. Without an explicit
    /// `cost`, the service cost resolves to the smallest edge weight between
    /// the endpoints when the catalog is built.
    pub fn add_required_edge(
        &mut self,
        u: impl Into<VertexId>,
        v: impl Into<VertexId>,
        demand: i32,
        cost: Option<f64>,
    ) -> Result<()> {
        let (u, v) = (self.add_vertex(u), self.add_vertex(v));
        self.check_requirement(u, v, demand, cost)?;
        if self.required_edge_keys.insert(edge_key(u, v)) {
            self.required_edges.push(Requirement {
                tail: u,
                head: v,
                demand,
                cost,
            });
        }
        Ok(())
    }

    /// Flags the arc (u, v) as required. Cost resolution only looks at the
    /// (u, v) direction.
    pub fn add_required_arc(
        &mut self,
        u: impl Into<VertexId>,
        v: impl Into<VertexId>,
        demand: i32,
        cost: Option<f64>,
    ) -> Result<()> {
        let (u, v) = (self.add_vertex(u), self.add_vertex(v));
        self.check_requirement(u, v, demand, cost)?;
        if self.required_arc_keys.insert((u, v)) {
            self.required_arcs.push(Requirement {
                tail: u,
                head: v,
                demand,
                cost,
            });
        }
        Ok(())
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.labels.len()
    }

    /// Index of a vertex label, if registered.
    pub fn index_of(&self, id: impl Into<VertexId>) -> Option<usize> {
        self.index.get(&id.into()).copied()
    }

    /// Label of the vertex at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds.
    pub fn label(&self, idx: usize) -> &VertexId {
        &self.labels[idx]
    }

    /// Distinct vertices reachable in one step (outgoing only for arcs),
    /// in first-link order.
    pub fn neighbors(&self, v: usize) -> &[usize] {
        self.adjacency.get(v).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Traversal weight of the direct step `u → v`.
    ///
    /// Edges win over arcs; parallel weights resolve to their minimum.
    pub fn weight(&self, u: usize, v: usize) -> Option<f64> {
        self.edge_weight(u, v).or_else(|| self.arc_weight(u, v))
    }

    /// Smallest edge weight between `u` and `v`, in either orientation.
    pub fn edge_weight(&self, u: usize, v: usize) -> Option<f64> {
        self.edge_index
            .get(&edge_key(u, v))
            .map(|&slot| self.edges[slot].min_weight())
    }

    /// Smallest arc weight from `u` to `v`.
    pub fn arc_weight(&self, u: usize, v: usize) -> Option<f64> {
        self.arc_index
            .get(&(u, v))
            .map(|&slot| self.arcs[slot].min_weight())
    }

    /// Returns `true` iff `(u, v)` is a registered arc.
    pub fn has_arc(&self, u: usize, v: usize) -> bool {
        self.arc_index.contains_key(&(u, v))
    }

    /// Undirected edges in insertion order.
    pub fn edges(&self) -> &[Link] {
        &self.edges
    }

    /// Directed arcs in insertion order.
    pub fn arcs(&self) -> &[Link] {
        &self.arcs
    }

    /// Required vertices in insertion order.
    pub fn required_vertices(&self) -> &[usize] {
        &self.required_vertices
    }

    /// Required edges in insertion order.
    pub fn required_edges(&self) -> &[Requirement] {
        &self.required_edges
    }

    /// Required arcs in insertion order.
    pub fn required_arcs(&self) -> &[Requirement] {
        &self.required_arcs
    }

    fn link_neighbor(&mut self, from: usize, to: usize) {
        let list = &mut self.adjacency[from];
        if !list.contains(&to) {
            list.push(to);
        }
    }

    fn check_weight(&self, u: usize, v: usize, weight: f64) -> Result<()> {
        if weight.is_finite() && weight >= 0.0 {
            return Ok(());
        }
        Err(CarpError::InvalidWeight {
            from: self.labels[u].clone(),
            to: self.labels[v].clone(),
            weight,
        })
    }

    fn check_requirement(&self, u: usize, v: usize, demand: i32, cost: Option<f64>) -> Result<()> {
        if demand <= 0 {
            return Err(CarpError::InvalidDemand {
                from: self.labels[u].clone(),
                to: self.labels[v].clone(),
                demand,
            });
        }
        match cost {
            Some(c) => self.check_weight(u, v, c),
            None => Ok(()),
        }
    }
}
