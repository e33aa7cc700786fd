//! Path-scanning constructive heuristic.
//!
//! Builds routes greedily from the current position: among unassigned
//! services that fit the remaining capacity, always take the one minimizing
//! `d(position, tail) + cost`, then continue from its head. When nothing
//! fits, the route returns to the depot and a new one starts.
//!
//! # Complexity
//!
//! O(n²) candidate evaluations; each distance query hits the oracle cache
//! after the first search from a position.
//!
//! # Reference
//!
//! Golden, B.L., DeArmon, J.S. & Baker, E.K. (1983). "Computational
//! experiments with algorithms for a class of routing problems",
//! *Computers & Operations Research* 10(1), 47-59.

use crate::catalog::ServiceCatalog;
use crate::distance::ShortestPaths;
use crate::error::Result;
use crate::models::{Graph, Solution, Vehicle};

use super::builder::{Construction, Move, OpenRoute};

/// Constructs a CARP solution with the path-scanning heuristic.
///
/// Ties on the selection score go to the lowest catalog id.
///
/// # Examples
///
/// ```
/// use carp_routing::models::{Graph, Vehicle};
/// use carp_routing::catalog::ServiceCatalog;
/// use carp_routing::distance::DistanceOracle;
/// use carp_routing::constructive::path_scanning;
///
/// let mut g = Graph::new();
/// g.add_edge("1", "2", 1.0).unwrap();
/// g.add_edge("2", "3", 1.0).unwrap();
/// g.add_edge("1", "4", 10.0).unwrap();
/// g.add_required_edge("1", "4", 1, None).unwrap();
/// g.add_required_edge("2", "3", 1, None).unwrap();
///
/// let catalog = ServiceCatalog::build(&g);
/// let oracle = DistanceOracle::new(&g);
/// let solution = path_scanning(&g, &catalog, &oracle, &Vehicle::new(5)).unwrap();
/// assert_eq!(solution.routes()[0].service_ids(), vec![1, 0]);
/// ```
pub fn path_scanning<D: ShortestPaths + ?Sized>(
    graph: &Graph,
    catalog: &ServiceCatalog,
    distances: &D,
    vehicle: &Vehicle,
) -> Result<Solution> {
    Construction::new(graph, catalog, distances, vehicle).run("path-scanning", |c, route| {
        while let Some(mv) = nearest(c, route, |_| true) {
            c.commit(route, mv);
        }
    })
}

/// Best-scoring feasible move that passes `accept`, scanning in catalog
/// order so the first of equal scores wins.
pub(crate) fn nearest<D, F>(c: &Construction<'_, D>, route: &OpenRoute, accept: F) -> Option<Move>
where
    D: ShortestPaths + ?Sized,
    F: Fn(&Move) -> bool,
{
    let mut best: Option<Move> = None;
    for id in 0..c.num_services() {
        let Some(mv) = c.candidate(route, id) else {
            continue;
        };
        if !accept(&mv) {
            continue;
        }
        if best.map_or(true, |b| mv.score() < b.score()) {
            best = Some(mv);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{DistanceMatrix, DistanceOracle};
    use crate::error::CarpError;

    /// Depot 1; 1 -(1)- 2 -(1)- 3 and a long spur 1 -(10)- 4.
    fn spur() -> (Graph, ServiceCatalog) {
        let mut g = Graph::new();
        g.add_edge("1", "2", 1.0).expect("valid");
        g.add_edge("2", "3", 1.0).expect("valid");
        g.add_edge("1", "4", 10.0).expect("valid");
        g.add_required_edge("1", "4", 1, None).expect("valid");
        g.add_required_edge("2", "3", 1, None).expect("valid");
        let catalog = ServiceCatalog::build(&g);
        (g, catalog)
    }

    #[test]
    fn test_ps_nearest_first() {
        let (g, catalog) = spur();
        let oracle = DistanceOracle::new(&g);
        let sol = path_scanning(&g, &catalog, &oracle, &Vehicle::new(5)).expect("feasible");
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.routes()[0].service_ids(), vec![1, 0]);
        // 1 + 1 + d(3, 1) = 2 + 10 + d(4, 1) = 10
        assert!((sol.total_cost() - 24.0).abs() < 1e-10);
    }

    #[test]
    fn test_ps_capacity_split() {
        let (g, catalog) = spur();
        let oracle = DistanceOracle::new(&g);
        let sol = path_scanning(&g, &catalog, &oracle, &Vehicle::new(1)).expect("feasible");
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.routes()[0].service_ids(), vec![1]);
        assert_eq!(sol.routes()[1].service_ids(), vec![0]);
        for route in sol.routes() {
            assert!(route.total_demand() <= 1);
        }
    }

    #[test]
    fn test_ps_tie_prefers_catalog_order() {
        let mut g = Graph::new();
        g.add_edge("1", "2", 3.0).expect("valid");
        g.add_edge("1", "3", 3.0).expect("valid");
        g.add_required_edge("1", "3", 1, None).expect("valid");
        g.add_required_edge("1", "2", 1, None).expect("valid");
        let catalog = ServiceCatalog::build(&g);
        let oracle = DistanceOracle::new(&g);
        let sol = path_scanning(&g, &catalog, &oracle, &Vehicle::new(1)).expect("feasible");
        assert_eq!(sol.routes()[0].service_ids(), vec![0]);
    }

    #[test]
    fn test_ps_unreachable_stalls_after_completed_routes() {
        let mut g = Graph::new();
        g.add_arc("1", "2", 1.0).expect("valid");
        g.add_arc("2", "1", 1.0).expect("valid");
        g.add_arc("3", "4", 1.0).expect("valid");
        g.add_required_arc("1", "2", 1, None).expect("valid");
        g.add_required_arc("3", "4", 1, None).expect("valid");
        let catalog = ServiceCatalog::build(&g);
        let oracle = DistanceOracle::new(&g);
        let err = path_scanning(&g, &catalog, &oracle, &Vehicle::new(5)).unwrap_err();
        let CarpError::CapacityStall { solution, .. } = err else {
            panic!("expected a capacity stall");
        };
        assert_eq!(solution.num_routes(), 1);
        assert_eq!(solution.routes()[0].service_ids(), vec![0]);
        assert_eq!(solution.unassigned(), &[1]);
    }

    #[test]
    fn test_ps_matrix_and_oracle_agree() {
        let (g, catalog) = spur();
        let oracle = DistanceOracle::new(&g);
        let matrix = DistanceMatrix::floyd_warshall(&g);
        let vehicle = Vehicle::new(1);
        let a = path_scanning(&g, &catalog, &oracle, &vehicle).expect("feasible");
        let b = path_scanning(&g, &catalog, &matrix, &vehicle).expect("feasible");
        assert_eq!(a, b);
    }
}
