//! One-call solving of a CARP instance.

use serde::Serialize;
use tracing::info;

use crate::catalog::{CatalogDiagnostic, ServiceCatalog};
use crate::config::ConstructionConfig;
use crate::constructive::{construct, Strategy};
use crate::distance::DistanceOracle;
use crate::error::{CarpError, Result};
use crate::models::{Graph, Solution, Vehicle, VertexId};

/// A named CARP instance: road network, vehicle capacity, and depot.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Instance name, used in reports and logs.
    pub name: String,
    /// Road network with its required elements.
    pub graph: Graph,
    /// Vehicle capacity.
    pub capacity: i32,
    /// Depot vertex label.
    pub depot: VertexId,
}

impl Instance {
    /// Creates an instance.
    pub fn new(
        name: impl Into<String>,
        graph: Graph,
        capacity: i32,
        depot: impl Into<VertexId>,
    ) -> Self {
        Self {
            name: name.into(),
            graph,
            capacity,
            depot: depot.into(),
        }
    }
}

/// Outcome of solving one instance.
#[derive(Debug, Clone, Serialize)]
pub struct InstanceReport {
    /// Instance name.
    pub name: String,
    /// Strategy that produced the solution.
    pub strategy: Strategy,
    /// Capacity used (after overrides).
    pub capacity: i32,
    /// Depot used (after overrides).
    pub depot: VertexId,
    /// Sum of route costs.
    pub total_cost: f64,
    /// Required elements left out of the catalog.
    pub diagnostics: Vec<CatalogDiagnostic>,
    /// Routes over catalog ids.
    pub solution: Solution,
}

/// Builds the catalog and distance oracle for `instance` and runs the
/// configured strategy.
///
/// Fails with [`CarpError::UnknownDepot`] if the depot is not a vertex of
/// the graph, and with [`CarpError::CapacityStall`] if some service cannot
/// be placed even in an empty route. A stall still carries the catalog
/// diagnostics.
///
/// # Examples
///
/// ```
/// use carp_routing::config::ConstructionConfig;
/// use carp_routing::models::Graph;
/// use carp_routing::solver::{solve_instance, Instance};
///
/// let mut g = Graph::new();
/// g.add_edge("1", "2", 5.0).unwrap();
/// g.add_edge("2", "3", 4.0).unwrap();
/// g.add_required_edge("1", "2", 3, None).unwrap();
/// g.add_required_edge("2", "3", 4, None).unwrap();
///
/// let instance = Instance::new("toy", g, 10, "1");
/// let report = solve_instance(&instance, &ConstructionConfig::default()).unwrap();
/// assert_eq!(report.solution.num_routes(), 1);
/// assert_eq!(report.total_cost, 18.0);
/// ```
pub fn solve_instance(instance: &Instance, config: &ConstructionConfig) -> Result<InstanceReport> {
    config.validate()?;

    let capacity = config.capacity.unwrap_or(instance.capacity);
    if capacity <= 0 {
        return Err(CarpError::Config(format!(
            "instance '{}' has non-positive capacity {capacity}",
            instance.name
        )));
    }

    let depot = config.depot.as_ref().unwrap_or(&instance.depot);
    let graph = &instance.graph;
    let depot_idx = graph
        .index_of(depot)
        .ok_or_else(|| CarpError::UnknownDepot(depot.clone()))?;

    let catalog = ServiceCatalog::build(graph);
    let oracle = DistanceOracle::new(graph);
    let vehicle = Vehicle::new(capacity).with_depot(depot_idx);

    let solution = construct(
        config.strategy,
        graph,
        &catalog,
        &oracle,
        &vehicle,
        config.detour_factor,
    )?;

    let total_cost = solution.total_cost();
    info!(
        instance = %instance.name,
        strategy = %config.strategy,
        routes = solution.num_routes(),
        services = solution.num_served(),
        excluded = catalog.diagnostics().len(),
        total_cost,
        "instance solved"
    );

    Ok(InstanceReport {
        name: instance.name.clone(),
        strategy: config.strategy,
        capacity,
        depot: depot.clone(),
        total_cost,
        diagnostics: catalog.diagnostics().to_vec(),
        solution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn toy() -> Instance {
        let mut g = Graph::new();
        g.add_edge("1", "2", 5.0).expect("valid");
        g.add_edge("2", "3", 4.0).expect("valid");
        g.add_required_edge("1", "2", 3, None).expect("valid");
        g.add_required_edge("2", "3", 4, None).expect("valid");
        Instance::new("toy", g, 10, "1")
    }

    #[test]
    #[traced_test]
    fn test_solve_default_strategy() {
        let report = solve_instance(&toy(), &ConstructionConfig::default()).expect("feasible");
        assert_eq!(report.strategy, Strategy::PathScanning);
        assert_eq!(report.capacity, 10);
        assert!((report.total_cost - 18.0).abs() < 1e-10);
        assert!(report.diagnostics.is_empty());
        assert!(logs_contain("instance solved"));
    }

    #[test]
    fn test_capacity_override_splits_routes() {
        let config = ConstructionConfig::default().with_capacity(4);
        let report = solve_instance(&toy(), &config).expect("feasible");
        assert_eq!(report.capacity, 4);
        assert_eq!(report.solution.num_routes(), 2);
    }

    #[test]
    fn test_depot_override() {
        let config = ConstructionConfig::default().with_depot("3");
        let report = solve_instance(&toy(), &config).expect("feasible");
        assert_eq!(report.depot, VertexId::from("3"));
        // From 3: edge {2,3} reversed, then {1,2} reversed, back 1 → 3
        assert!((report.total_cost - 18.0).abs() < 1e-10);
    }

    #[test]
    fn test_unknown_depot() {
        let config = ConstructionConfig::default().with_depot("99");
        let err = solve_instance(&toy(), &config).unwrap_err();
        assert!(matches!(err, CarpError::UnknownDepot(ref d) if d.as_str() == "99"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ConstructionConfig::default().with_detour_factor(-2.0);
        assert!(matches!(
            solve_instance(&toy(), &config),
            Err(CarpError::Config(_))
        ));
    }

    #[test]
    fn test_stall_propagates() {
        let config = ConstructionConfig::default().with_capacity(3);
        let err = solve_instance(&toy(), &config).unwrap_err();
        let CarpError::CapacityStall { solution, .. } = err else {
            panic!("expected a capacity stall");
        };
        assert_eq!(solution.num_routes(), 1);
        assert_eq!(solution.unassigned(), &[1]);
    }

    #[test]
    fn test_stall_keeps_catalog_diagnostics() {
        let mut g = Graph::new();
        g.add_edge("1", "2", 3.0).expect("valid");
        g.add_required_edge("1", "2", 12, None).expect("valid");
        g.add_required_edge("2", "9", 1, None).expect("valid");
        let instance = Instance::new("stalled", g, 10, "1");

        let err = solve_instance(&instance, &ConstructionConfig::default()).unwrap_err();
        let CarpError::CapacityStall {
            solution,
            diagnostics,
        } = err
        else {
            panic!("expected a capacity stall");
        };
        assert_eq!(solution.num_routes(), 0);
        assert_eq!(solution.unassigned(), &[0]);
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            &diagnostics[0],
            CatalogDiagnostic::MissingWeight { head, .. } if head.as_str() == "9"
        ));
    }

    #[test]
    fn test_diagnostics_reported() {
        let mut instance = toy();
        instance
            .graph
            .add_required_edge("3", "4", 1, None)
            .expect("valid");
        let report = solve_instance(&instance, &ConstructionConfig::default()).expect("feasible");
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.solution.num_served(), 2);
    }
}
