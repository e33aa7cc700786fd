//! Catalog construction from a graph's required sets.

use tracing::{debug, warn};

use crate::models::{Graph, Requirement, Service, ServiceKind};

use super::CatalogDiagnostic;

/// Ordered, read-only collection of the services of one instance.
///
/// Order is stable: required vertices, then required edges, then required
/// arcs, each in graph insertion order. Service ids are catalog positions.
/// Constructors use this order as their tie-break.
///
/// # Examples
///
/// ```
/// use carp_routing::models::{Graph, ServiceKind};
/// use carp_routing::catalog::ServiceCatalog;
///
/// let mut g = Graph::new();
/// g.add_edge("1", "2", 5.0).unwrap();
/// g.add_edge("1", "2", 3.0).unwrap();
/// g.add_required_edge("1", "2", 4, None).unwrap();
/// g.add_required_vertex("3");
///
/// let catalog = ServiceCatalog::build(&g);
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.get(0).kind(), ServiceKind::Vertex);
/// assert_eq!(catalog.get(1).cost(), 3.0);
/// assert!(catalog.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    services: Vec<Service>,
    diagnostics: Vec<CatalogDiagnostic>,
}

impl ServiceCatalog {
    /// Builds the catalog, excluding (and recording) services whose cost or
    /// direction cannot be resolved.
    pub fn build(graph: &Graph) -> Self {
        let mut catalog = Self::default();

        for &v in graph.required_vertices() {
            let id = catalog.services.len();
            catalog.services.push(Service::vertex(id, v));
        }

        for req in graph.required_edges() {
            let cost = req
                .cost
                .or_else(|| graph.edge_weight(req.tail, req.head));
            catalog.admit(graph, req, cost, ServiceKind::Edge);
        }

        for req in graph.required_arcs() {
            let cost = req.cost.or_else(|| graph.arc_weight(req.tail, req.head));
            if cost.is_some() && !graph.has_arc(req.tail, req.head) {
                catalog.reject(CatalogDiagnostic::InfeasibleDirection {
                    tail: graph.label(req.tail).clone(),
                    head: graph.label(req.head).clone(),
                });
                continue;
            }
            catalog.admit(graph, req, cost, ServiceKind::Arc);
        }

        debug!(
            services = catalog.services.len(),
            vertices = graph.required_vertices().len(),
            edges = graph.required_edges().len(),
            arcs = graph.required_arcs().len(),
            excluded = catalog.diagnostics.len(),
            "service catalog built"
        );
        catalog
    }

    fn admit(&mut self, graph: &Graph, req: &Requirement, cost: Option<f64>, kind: ServiceKind) {
        match cost {
            Some(cost) => {
                let id = self.services.len();
                self.services
                    .push(Service::new(id, req.tail, req.head, req.demand, cost, kind));
            }
            None => self.reject(CatalogDiagnostic::MissingWeight {
                tail: graph.label(req.tail).clone(),
                head: graph.label(req.head).clone(),
                kind,
            }),
        }
    }

    fn reject(&mut self, diagnostic: CatalogDiagnostic) {
        warn!(%diagnostic, "required element excluded from catalog");
        self.diagnostics.push(diagnostic);
    }

    /// Services in catalog order.
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Service with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds.
    pub fn get(&self, id: usize) -> &Service {
        &self.services[id]
    }

    /// Number of services.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns `true` if there is nothing to service.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Problems recorded for excluded required elements.
    pub fn diagnostics(&self) -> &[CatalogDiagnostic] {
        &self.diagnostics
    }

    /// Returns `true` if every required element made it into the catalog.
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Sum of all service demands, saturating at `i32::MAX`.
    pub fn total_demand(&self) -> i32 {
        self.services
            .iter()
            .fold(0i32, |acc, s| acc.saturating_add(s.demand()))
    }
}
