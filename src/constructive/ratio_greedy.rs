//! Ratio-greedy constructive heuristic.
//!
//! Sorts the catalog once by cost per unit of demand (ascending, stable so
//! ties keep catalog order). Each route sweeps the sorted list and appends
//! every unassigned service that still fits, repeating sweeps until one adds
//! nothing. Deadheading does not influence which service is picked, only
//! the orientation an edge service is performed in.
//!
//! # Complexity
//!
//! O(n log n) for the sort plus O(n) per sweep.

use crate::catalog::ServiceCatalog;
use crate::distance::ShortestPaths;
use crate::error::Result;
use crate::models::{Graph, Solution, Vehicle};

use super::builder::Construction;

/// Constructs a CARP solution with the ratio-greedy heuristic.
///
/// Selection ignores position; an edge service is still oriented toward the
/// current position when appended. Returns
/// [`CarpError::CapacityStall`](crate::error::CarpError::CapacityStall) if
/// some service cannot start a route of its own.
///
/// # Examples
///
/// ```
/// use carp_routing::models::{Graph, Vehicle};
/// use carp_routing::catalog::ServiceCatalog;
/// use carp_routing::distance::DistanceOracle;
/// use carp_routing::constructive::ratio_greedy;
///
/// let mut g = Graph::new();
/// g.add_edge("1", "2", 5.0).unwrap();
/// g.add_edge("2", "3", 4.0).unwrap();
/// g.add_required_edge("1", "2", 3, None).unwrap();
/// g.add_required_edge("2", "3", 4, None).unwrap();
///
/// let catalog = ServiceCatalog::build(&g);
/// let oracle = DistanceOracle::new(&g);
/// let solution = ratio_greedy(&g, &catalog, &oracle, &Vehicle::new(10)).unwrap();
/// assert_eq!(solution.num_routes(), 1);
/// assert_eq!(solution.total_cost(), 18.0);
/// ```
pub fn ratio_greedy<D: ShortestPaths + ?Sized>(
    graph: &Graph,
    catalog: &ServiceCatalog,
    distances: &D,
    vehicle: &Vehicle,
) -> Result<Solution> {
    let mut order: Vec<usize> = (0..catalog.len()).collect();
    order.sort_by(|&a, &b| catalog.get(a).ratio().total_cmp(&catalog.get(b).ratio()));

    Construction::new(graph, catalog, distances, vehicle).run("ratio-greedy", |c, route| loop {
        let mut added = false;
        for &id in &order {
            if let Some(mv) = c.candidate(route, id) {
                c.commit(route, mv);
                added = true;
            }
        }
        if !added {
            break;
        }
    })
}
