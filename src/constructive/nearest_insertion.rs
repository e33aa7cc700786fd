//! Nearest-insertion with a bounded detour.
//!
//! Selects like path-scanning, but a candidate may only extend a non-empty
//! route if the depot-to-depot route cost grows by at most
//! `detour_factor × service cost`. The first service of a route is always
//! accepted. Rejected services stay eligible for later routes.

use crate::catalog::ServiceCatalog;
use crate::distance::ShortestPaths;
use crate::error::Result;
use crate::models::{Graph, Solution, Vehicle};

use super::builder::Construction;
use super::path_scanning::nearest;

/// Detour bound used when none is configured.
pub const DEFAULT_DETOUR_FACTOR: f64 = 2.0;

const EPSILON: f64 = 1e-9;

/// Constructs a CARP solution with bounded-detour nearest insertion.
///
/// # Examples
///
/// ```
/// use carp_routing::models::{Graph, Vehicle};
/// use carp_routing::catalog::ServiceCatalog;
/// use carp_routing::distance::DistanceOracle;
/// use carp_routing::constructive::{nearest_insertion, DEFAULT_DETOUR_FACTOR};
///
/// let mut g = Graph::new();
/// g.add_edge("1", "2", 1.0).unwrap();
/// g.add_edge("1", "5", 50.0).unwrap();
/// g.add_edge("5", "6", 1.0).unwrap();
/// g.add_required_edge("1", "2", 1, None).unwrap();
/// g.add_required_edge("5", "6", 1, None).unwrap();
///
/// let catalog = ServiceCatalog::build(&g);
/// let oracle = DistanceOracle::new(&g);
/// let vehicle = Vehicle::new(10);
/// let solution = nearest_insertion(&g, &catalog, &oracle, &vehicle, DEFAULT_DETOUR_FACTOR).unwrap();
/// // The far edge would add a 100-unit detour, so it gets its own route.
/// assert_eq!(solution.num_routes(), 2);
/// ```
pub fn nearest_insertion<D: ShortestPaths + ?Sized>(
    graph: &Graph,
    catalog: &ServiceCatalog,
    distances: &D,
    vehicle: &Vehicle,
    detour_factor: f64,
) -> Result<Solution> {
    Construction::new(graph, catalog, distances, vehicle).run("nearest-insertion", |c, route| {
        while let Some(mv) = nearest(c, route, |mv| {
            route.is_empty() || c.marginal_cost(route, mv) <= detour_factor * mv.service_cost + EPSILON
        }) {
            c.commit(route, mv);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::path_scanning;
    use crate::distance::DistanceOracle;
    use crate::evaluation::RouteEvaluator;

    fn chain() -> (Graph, ServiceCatalog) {
        let mut g = Graph::new();
        g.add_edge("1", "2", 1.0).expect("valid");
        g.add_edge("2", "3", 1.0).expect("valid");
        g.add_required_edge("1", "2", 1, None).expect("valid");
        g.add_required_edge("2", "3", 1, None).expect("valid");
        let catalog = ServiceCatalog::build(&g);
        (g, catalog)
    }

    fn far_spur() -> (Graph, ServiceCatalog) {
        let mut g = Graph::new();
        g.add_edge("1", "2", 1.0).expect("valid");
        g.add_edge("1", "5", 50.0).expect("valid");
        g.add_edge("5", "6", 1.0).expect("valid");
        g.add_required_edge("1", "2", 1, None).expect("valid");
        g.add_required_edge("5", "6", 1, None).expect("valid");
        let catalog = ServiceCatalog::build(&g);
        (g, catalog)
    }

    #[test]
    fn test_ni_accepts_small_detour() {
        let (g, catalog) = chain();
        let oracle = DistanceOracle::new(&g);
        let vehicle = Vehicle::new(10);
        // Marginal of the second edge: 0 + 1 + d(3, 1) - d(2, 1) = 2 = 2 × 1
        let sol = nearest_insertion(&g, &catalog, &oracle, &vehicle, DEFAULT_DETOUR_FACTOR)
            .expect("feasible");
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.routes()[0].service_ids(), vec![0, 1]);
        assert!((sol.total_cost() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_ni_zero_factor_isolates_services() {
        let (g, catalog) = chain();
        let oracle = DistanceOracle::new(&g);
        let vehicle = Vehicle::new(10);
        let sol = nearest_insertion(&g, &catalog, &oracle, &vehicle, 0.0).expect("feasible");
        assert_eq!(sol.num_routes(), 2);
    }

    #[test]
    fn test_ni_rejects_long_detour() {
        let (g, catalog) = far_spur();
        let oracle = DistanceOracle::new(&g);
        let vehicle = Vehicle::new(10);
        let ni = nearest_insertion(&g, &catalog, &oracle, &vehicle, DEFAULT_DETOUR_FACTOR)
            .expect("feasible");
        assert_eq!(ni.num_routes(), 2);
        assert_eq!(ni.routes()[0].service_ids(), vec![0]);
        assert_eq!(ni.routes()[1].service_ids(), vec![1]);

        let ps = path_scanning(&g, &catalog, &oracle, &vehicle).expect("feasible");
        assert_eq!(ps.num_routes(), 1);
    }

    #[test]
    fn test_ni_marginal_matches_full_route_costs() {
        let (g, catalog) = far_spur();
        let oracle = DistanceOracle::new(&g);
        let vehicle = Vehicle::new(10);
        let eval = RouteEvaluator::new(&g, &catalog, &oracle, &vehicle);
        let ni = nearest_insertion(&g, &catalog, &oracle, &vehicle, DEFAULT_DETOUR_FACTOR)
            .expect("feasible");
        let (cost, violations) = eval.evaluate_solution(&ni);
        assert!(violations.is_empty());
        // 0 + 1 + 1, then 50 + 1 + 51
        assert!((cost - 104.0).abs() < 1e-10);
        assert!((ni.total_cost() - cost).abs() < 1e-10);
    }
}
