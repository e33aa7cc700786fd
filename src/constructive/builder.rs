//! Shared construction driver: feasibility checks, route opening/closing,
//! stall detection, and final route assembly.

use tracing::{debug, warn};

use crate::catalog::ServiceCatalog;
use crate::distance::ShortestPaths;
use crate::error::{CarpError, Result};
use crate::evaluation::RouteEvaluator;
use crate::models::{Graph, Placement, ServiceKind, Solution, Vehicle};

/// Route under construction.
#[derive(Debug, Clone)]
pub(crate) struct OpenRoute {
    pub placements: Vec<Placement>,
    pub load: i32,
    pub position: usize,
}

impl OpenRoute {
    fn at(depot: usize) -> Self {
        Self {
            placements: Vec::new(),
            load: 0,
            position: depot,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// A feasible way to append one service to the open route.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Move {
    pub placement: Placement,
    pub head: usize,
    pub demand: i32,
    pub service_cost: f64,
    /// Deadhead distance from the current position to the service tail.
    pub approach: f64,
    /// Distance from the service head back to the depot.
    pub return_leg: f64,
}

impl Move {
    /// Path-scanning score: approach plus service cost.
    pub fn score(&self) -> f64 {
        self.approach + self.service_cost
    }
}

/// Transient state of one construction run.
pub(crate) struct Construction<'a, D: ShortestPaths + ?Sized> {
    graph: &'a Graph,
    catalog: &'a ServiceCatalog,
    distances: &'a D,
    vehicle: &'a Vehicle,
    assigned: Vec<bool>,
    remaining: usize,
}

impl<'a, D: ShortestPaths + ?Sized> Construction<'a, D> {
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
            assigned: vec![false; catalog.len()],
            remaining: catalog.len(),
        }
    }

    pub fn num_services(&self) -> usize {
        self.catalog.len()
    }

    /// Checks whether service `id` can join `route` and, if so, in which
    /// orientation.
    ///
    /// Rejects assigned services, capacity overflow, arcs without a
    /// registered direction, and any orientation whose approach or return
    /// leg is unreachable. Edge services take the orientation with the
    /// shorter approach (ties keep catalog orientation).
    pub fn candidate(&self, route: &OpenRoute, id: usize) -> Option<Move> {
        if self.assigned[id] {
            return None;
        }
        let service = self.catalog.get(id);
        if !self.vehicle.fits(route.load, service.demand()) {
            return None;
        }
        if service.kind() == ServiceKind::Arc && !self.graph.has_arc(service.tail(), service.head()) {
            return None;
        }

        let orientations: &[bool] = if service.is_reversible() {
            &[false, true]
        } else {
            &[false]
        };

        let mut best: Option<Move> = None;
        for &reversed in orientations {
            let (tail, head) = service.oriented(reversed);
            let approach = self.distances.distance(route.position, tail);
            let return_leg = self.distances.distance(head, self.vehicle.depot());
            if approach.is_infinite() || return_leg.is_infinite() {
                continue;
            }
            if best.is_some_and(|b| b.approach <= approach) {
                continue;
            }
            best = Some(Move {
                placement: Placement {
                    service_id: id,
                    reversed,
                },
                head,
                demand: service.demand(),
                service_cost: service.cost(),
                approach,
                return_leg,
            });
        }
        best
    }

    /// Cost increase of closing the route after `mv` instead of now.
    pub fn marginal_cost(&self, route: &OpenRoute, mv: &Move) -> f64 {
        let closed_now = self.distances.distance(route.position, self.vehicle.depot());
        mv.approach + mv.service_cost + mv.return_leg - closed_now
    }

    /// Appends `mv` to the route and marks its service assigned.
    pub fn commit(&mut self, route: &mut OpenRoute, mv: Move) {
        self.assigned[mv.placement.service_id] = true;
        self.remaining -= 1;
        route.placements.push(mv.placement);
        route.load += mv.demand;
        route.position = mv.head;
    }

    /// Opens routes until every service is placed, letting `fill` extend
    /// each fresh route. A fresh route left empty ends the run with a
    /// [`CarpError::CapacityStall`].
    pub fn run<F>(mut self, strategy: &str, mut fill: F) -> Result<Solution>
    where
        F: FnMut(&mut Self, &mut OpenRoute),
    {
        let mut closed: Vec<Vec<Placement>> = Vec::new();

        while self.remaining > 0 {
            let mut route = OpenRoute::at(self.vehicle.depot());
            fill(&mut self, &mut route);

            if route.is_empty() {
                let mut solution = self.assemble(&closed);
                for (id, &done) in self.assigned.iter().enumerate() {
                    if !done {
                        solution.add_unassigned(id);
                    }
                }
                warn!(
                    strategy,
                    routes = closed.len(),
                    unassigned = solution.num_unassigned(),
                    "construction stalled: no remaining service fits a new route"
                );
                return Err(CarpError::CapacityStall {
                    solution: Box::new(solution),
                    diagnostics: self.catalog.diagnostics().to_vec(),
                });
            }

            debug!(
                strategy,
                route = closed.len() + 1,
                services = route.placements.len(),
                load = route.load,
                remaining = self.remaining,
                "route closed"
            );
            closed.push(route.placements);
        }

        Ok(self.assemble(&closed))
    }

    fn assemble(&self, closed: &[Vec<Placement>]) -> Solution {
        let evaluator = RouteEvaluator::new(self.graph, self.catalog, self.distances, self.vehicle);
        let mut solution = Solution::new();
        for placements in closed {
            let (route, violations) = evaluator.build_route(placements);
            debug_assert!(violations.is_empty(), "constructed route violates {violations:?}");
            solution.add_route(route);
        }
        solution
    }
}
