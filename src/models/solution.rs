//! Solution and violation types.

use serde::{Deserialize, Serialize};

use super::Route;

/// A type of constraint violation in a route or solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Route demand exceeds vehicle capacity.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load that exceeded capacity.
        load: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// An arc service is oriented against a registered arc.
    InfeasibleDirection {
        /// Route index.
        route_index: usize,
        /// Offending service.
        service_id: usize,
    },
    /// Some leg of the route has no path.
    UnreachableLeg {
        /// Route index.
        route_index: usize,
        /// Leg start vertex.
        from: usize,
        /// Leg end vertex.
        to: usize,
    },
    /// A service appears on more than one route or twice on one route.
    DuplicateService {
        /// Offending service.
        service_id: usize,
    },
    /// A catalog service is neither routed nor listed as unassigned.
    MissingService {
        /// Offending service.
        service_id: usize,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Routes produced for one instance, plus any services left unassigned by a
/// capacity stall.
///
/// Totals are derived from the routes on demand.
///
/// # Examples
///
/// ```
/// use carp_routing::models::{Solution, Route};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::new());
/// assert_eq!(sol.num_routes(), 1);
/// assert_eq!(sol.num_unassigned(), 0);
/// assert_eq!(sol.total_cost(), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
    unassigned: Vec<usize>,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Marks a service as unassigned.
    pub fn add_unassigned(&mut self, service_id: usize) {
        self.unassigned.push(service_id);
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Returns the ids of unassigned services.
    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    /// Returns the number of unassigned services.
    pub fn num_unassigned(&self) -> usize {
        self.unassigned.len()
    }

    /// Sum of route costs.
    pub fn total_cost(&self) -> f64 {
        self.routes.iter().map(|r| r.total_cost()).sum()
    }

    /// Sum of route demands.
    pub fn total_demand(&self) -> i32 {
        self.routes
            .iter()
            .fold(0i32, |acc, r| acc.saturating_add(r.total_demand()))
    }

    /// Total number of services routed.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Visit;

    fn route(ids: &[usize], cost: f64) -> Route {
        let mut r = Route::new();
        let mut load = 0;
        for &id in ids {
            load += 2;
            r.push_visit(Visit {
                service_id: id,
                tail: 0,
                head: 0,
                demand: 2,
                cost: 1.0,
                load_after: load,
                reversed: false,
            });
        }
        r.set_total_cost(cost);
        r
    }

    #[test]
    fn test_solution_empty() {
        let sol = Solution::new();
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.num_unassigned(), 0);
        assert_eq!(sol.total_cost(), 0.0);
        assert_eq!(sol.num_served(), 0);
    }

    #[test]
    fn test_solution_totals() {
        let mut sol = Solution::new();
        sol.add_route(route(&[0], 50.0));
        sol.add_route(route(&[1, 2], 80.0));
        sol.add_unassigned(3);

        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.num_served(), 3);
        assert_eq!(sol.num_unassigned(), 1);
        assert_eq!(sol.total_demand(), 6);
        assert!((sol.total_cost() - 130.0).abs() < 1e-10);
    }
}
