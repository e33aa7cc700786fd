//! Route evaluator that computes load, cost, and feasibility.

use crate::catalog::ServiceCatalog;
use crate::distance::ShortestPaths;
use crate::models::{
    Graph, Placement, Route, ServiceKind, Solution, Vehicle, Violation, ViolationType, Visit,
};

/// Evaluates routes by computing cumulative load and depot-to-depot cost,
/// and checks capacity, arc direction, reachability, and service coverage.
///
/// Route cost is
/// `d(depot, first.tail) + Σ cost + Σ d(prev.head, next.tail) + d(last.head, depot)`,
/// using each visit's assigned orientation. Any unreachable leg makes the
/// cost `f64::INFINITY`.
///
/// # Examples
///
/// ```
/// use carp_routing::models::{Graph, Placement, Vehicle};
/// use carp_routing::catalog::ServiceCatalog;
/// use carp_routing::distance::DistanceOracle;
/// use carp_routing::evaluation::RouteEvaluator;
///
/// let mut g = Graph::new();
/// g.add_edge("1", "2", 5.0).unwrap();
/// g.add_edge("2", "3", 4.0).unwrap();
/// g.add_required_edge("1", "2", 3, None).unwrap();
/// g.add_required_edge("2", "3", 4, None).unwrap();
///
/// let catalog = ServiceCatalog::build(&g);
/// let oracle = DistanceOracle::new(&g);
/// let vehicle = Vehicle::new(10);
///
/// let evaluator = RouteEvaluator::new(&g, &catalog, &oracle, &vehicle);
/// let (route, violations) = evaluator.build_route(&[Placement::forward(0), Placement::forward(1)]);
/// assert!(violations.is_empty());
/// assert_eq!(route.total_cost(), 18.0);
/// ```
pub struct RouteEvaluator<'a, D: ShortestPaths + ?Sized> {
    graph: &'a Graph,
    catalog: &'a ServiceCatalog,
    distances: &'a D,
    vehicle: &'a Vehicle,
}

impl<'a, D: ShortestPaths + ?Sized> RouteEvaluator<'a, D> {
    /// Creates a new evaluator for the given instance data.
    pub fn new(
        graph: &'a Graph,
        catalog: &'a ServiceCatalog,
        distances: &'a D,
        vehicle: &'a Vehicle,
    ) -> Self {
        Self {
            graph,
            catalog,
            distances,
            vehicle,
        }
    }

    /// Depot-to-depot cost of a placement sequence.
    pub fn route_cost(&self, placements: &[Placement]) -> f64 {
        let depot = self.vehicle.depot();
        let mut total = 0.0;
        let mut position = depot;
        for p in placements {
            let service = self.catalog.get(p.service_id);
            let (tail, head) = service.oriented(p.reversed);
            total += self.distances.distance(position, tail) + service.cost();
            position = head;
        }
        total + self.distances.distance(position, depot)
    }

    /// Builds a route from a placement sequence, computing load and cost.
    ///
    /// Returns the constructed route and any constraint violations found.
    pub fn build_route(&self, placements: &[Placement]) -> (Route, Vec<Violation>) {
        let mut route = Route::new();
        let mut violations = Vec::new();
        let depot = self.vehicle.depot();
        let mut load: i32 = 0;
        let mut position = depot;

        for p in placements {
            let service = self.catalog.get(p.service_id);
            let (tail, head) = service.oriented(p.reversed);

            if self.distances.distance(position, tail).is_infinite() {
                violations.push(Violation::new(ViolationType::UnreachableLeg {
                    route_index: 0,
                    from: position,
                    to: tail,
                }));
            }
            if service.kind() == ServiceKind::Arc && !self.graph.has_arc(tail, head) {
                violations.push(Violation::new(ViolationType::InfeasibleDirection {
                    route_index: 0,
                    service_id: p.service_id,
                }));
            }

            load = load.saturating_add(service.demand());
            route.push_visit(Visit {
                service_id: p.service_id,
                tail,
                head,
                demand: service.demand(),
                cost: service.cost(),
                load_after: load,
                reversed: p.reversed && service.is_reversible(),
            });
            position = head;
        }

        if self.distances.distance(position, depot).is_infinite() {
            violations.push(Violation::new(ViolationType::UnreachableLeg {
                route_index: 0,
                from: position,
                to: depot,
            }));
        }

        if load > self.vehicle.capacity() {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index: 0,
                load,
                capacity: self.vehicle.capacity(),
            }));
        }

        route.set_total_cost(self.route_cost(placements));
        (route, violations)
    }

    /// Evaluates an entire solution, returning total cost and violations.
    ///
    /// Besides per-route checks, verifies that routed plus unassigned
    /// services partition the catalog exactly.
    pub fn evaluate_solution(&self, solution: &Solution) -> (f64, Vec<Violation>) {
        let mut total_cost = 0.0;
        let mut all_violations = Vec::new();
        let mut seen = vec![0usize; self.catalog.len()];

        for (idx, route) in solution.routes().iter().enumerate() {
            let placements = route.placements();
            let (rebuilt, mut violations) = self.build_route(&placements);

            for v in &mut violations {
                match &mut v.kind {
                    ViolationType::CapacityExceeded { route_index, .. }
                    | ViolationType::InfeasibleDirection { route_index, .. }
                    | ViolationType::UnreachableLeg { route_index, .. } => {
                        *route_index = idx;
                    }
                    ViolationType::DuplicateService { .. } | ViolationType::MissingService { .. } => {}
                }
            }

            for p in &placements {
                if let Some(count) = seen.get_mut(p.service_id) {
                    *count += 1;
                }
            }

            total_cost += rebuilt.total_cost();
            all_violations.append(&mut violations);
        }

        for &id in solution.unassigned() {
            if let Some(count) = seen.get_mut(id) {
                *count += 1;
            }
        }

        for (service_id, &count) in seen.iter().enumerate() {
            match count {
                0 => all_violations.push(Violation::new(ViolationType::MissingService { service_id })),
                1 => {}
                _ => all_violations.push(Violation::new(ViolationType::DuplicateService { service_id })),
            }
        }

        (total_cost, all_violations)
    }
}
