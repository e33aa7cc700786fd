//! Constructive heuristics for building CARP solutions.
//!
//! - [`ratio_greedy`]: sweeps services by cost per unit of demand, O(n log n) + O(n) per sweep
//! - [`path_scanning`]: nearest service from the current position (Golden et al., 1983), O(n²)
//! - [`nearest_insertion`]: path-scanning with a bounded detour per insertion, O(n²)
//!
//! All three share one driver: a route opens at the depot, grows while
//! some unassigned service fits, and closes with a return to the depot.
//! A route that cannot take even one service ends the run with
//! [`CarpError::CapacityStall`](crate::error::CarpError::CapacityStall).

mod builder;
mod nearest_insertion;
mod path_scanning;
mod ratio_greedy;

pub use nearest_insertion::{nearest_insertion, DEFAULT_DETOUR_FACTOR};
pub use path_scanning::path_scanning;
pub use ratio_greedy::ratio_greedy;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::ServiceCatalog;
use crate::distance::ShortestPaths;
use crate::error::{CarpError, Result};
use crate::models::{Graph, Solution, Vehicle};

/// Route construction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Strategy A: ascending cost/demand order.
    RatioGreedy,
    /// Strategy B: nearest feasible service.
    #[default]
    PathScanning,
    /// Strategy C: nearest feasible service within the detour bound.
    NearestInsertion,
}

impl Strategy {
    /// All strategies, in declaration order.
    pub const ALL: [Strategy; 3] = [
        Strategy::RatioGreedy,
        Strategy::PathScanning,
        Strategy::NearestInsertion,
    ];

    /// Kebab-case name, as used in configuration files and logs.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::RatioGreedy => "ratio-greedy",
            Strategy::PathScanning => "path-scanning",
            Strategy::NearestInsertion => "nearest-insertion",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = CarpError;

    fn from_str(s: &str) -> Result<Self> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CarpError::Config(format!("unknown strategy '{s}'")))
    }
}

/// Runs the chosen strategy. `detour_factor` only affects
/// [`Strategy::NearestInsertion`].
pub fn construct<D: ShortestPaths + ?Sized>(
    strategy: Strategy,
    graph: &Graph,
    catalog: &ServiceCatalog,
    distances: &D,
    vehicle: &Vehicle,
    detour_factor: f64,
) -> Result<Solution> {
    match strategy {
        Strategy::RatioGreedy => ratio_greedy(graph, catalog, distances, vehicle),
        Strategy::PathScanning => path_scanning(graph, catalog, distances, vehicle),
        Strategy::NearestInsertion => {
            nearest_insertion(graph, catalog, distances, vehicle, detour_factor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceOracle;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("ratio-greedy".parse::<Strategy>().expect("valid"), Strategy::RatioGreedy);
        assert_eq!(" Path-Scanning ".parse::<Strategy>().expect("valid"), Strategy::PathScanning);
        assert!(matches!(
            "random".parse::<Strategy>(),
            Err(CarpError::Config(_))
        ));
    }

    #[test]
    fn test_strategy_display_roundtrips() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>().expect("valid"), strategy);
        }
        assert_eq!(Strategy::default(), Strategy::PathScanning);
    }

    #[test]
    fn test_construct_dispatches_every_strategy() {
        let mut g = Graph::new();
        g.add_edge("1", "2", 5.0).expect("valid");
        g.add_edge("2", "3", 4.0).expect("valid");
        g.add_required_edge("1", "2", 3, None).expect("valid");
        g.add_required_edge("2", "3", 4, None).expect("valid");
        let catalog = ServiceCatalog::build(&g);
        let oracle = DistanceOracle::new(&g);
        let vehicle = Vehicle::new(10);

        for strategy in Strategy::ALL {
            let sol = construct(strategy, &g, &catalog, &oracle, &vehicle, DEFAULT_DETOUR_FACTOR)
                .expect("feasible");
            assert_eq!(sol.num_served(), 2, "{strategy}");
            assert!(sol.unassigned().is_empty());
        }
    }
}
