//! Service records: the unified view of required vertices, edges, and arcs.

use serde::{Deserialize, Serialize};

/// What kind of graph element a service stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceKind {
    /// A required vertex; visiting it is the service.
    Vertex,
    /// A required undirected edge; may be serviced in either direction.
    Edge,
    /// A required arc; serviced only from tail to head.
    Arc,
}

/// Identity of a service: the `(tail, head, kind)` triple in catalog
/// orientation. Unique within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServiceKey {
    /// Tail vertex index.
    pub tail: usize,
    /// Head vertex index.
    pub head: usize,
    /// Element kind.
    pub kind: ServiceKind,
}

/// A required graph element that must be serviced by exactly one route.
///
/// `id` is the position in the owning catalog. For vertex services
/// `tail == head`.
///
/// # Examples
///
/// ```
/// use carp_routing::models::{Service, ServiceKind};
///
/// let s = Service::new(0, 1, 2, 3, 5.0, ServiceKind::Edge);
/// assert_eq!(s.oriented(true), (2, 1));
/// assert!((s.ratio() - 5.0 / 3.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    id: usize,
    tail: usize,
    head: usize,
    demand: i32,
    cost: f64,
    kind: ServiceKind,
}

impl Service {
    /// Creates a service record.
    pub fn new(id: usize, tail: usize, head: usize, demand: i32, cost: f64, kind: ServiceKind) -> Self {
        Self {
            id,
            tail,
            head,
            demand,
            cost,
            kind,
        }
    }

    /// Creates a vertex service (demand 1, cost 1).
    pub fn vertex(id: usize, vertex: usize) -> Self {
        Self::new(id, vertex, vertex, 1, 1.0, ServiceKind::Vertex)
    }

    /// Catalog position.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Tail vertex in catalog orientation.
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Head vertex in catalog orientation.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Capacity consumed.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Service cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Element kind.
    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    /// Identity triple.
    pub fn key(&self) -> ServiceKey {
        ServiceKey {
            tail: self.tail,
            head: self.head,
            kind: self.kind,
        }
    }

    /// Cost per unit of demand.
    pub fn ratio(&self) -> f64 {
        self.cost / f64::from(self.demand)
    }

    /// Returns `true` if the service may be performed head-to-tail.
    pub fn is_reversible(&self) -> bool {
        self.kind == ServiceKind::Edge
    }

    /// Endpoints `(tail, head)` for the given orientation.
    ///
    /// Reversal only applies to edge services; other kinds ignore it.
    pub fn oriented(&self, reversed: bool) -> (usize, usize) {
        if reversed && self.is_reversible() {
            (self.head, self.tail)
        } else {
            (self.tail, self.head)
        }
    }
}
