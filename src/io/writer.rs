//! Solution output: the plain-text route listing and a JSON report.

use std::io::Write;

use crate::error::Result;
use crate::models::{Graph, Solution, VertexId};
use crate::solver::InstanceReport;

/// Renders a solution in the route-listing format.
///
/// Four header lines (total cost, route count, and two zeroed clock
/// fields), then one line per route:
///
/// ```text
///  0 1 <route> <demand> <cost>  <visits> (D 0,<depot>,1) (S <id>,<from>,<to>) ... (D 0,<depot>,1)
/// ```
///
/// `<id>` is the 1-based catalog id, `<from>`/`<to>` the serviced
/// orientation, and `<visits>` counts services plus both depot visits.
///
/// # Examples
///
/// ```
/// use carp_routing::catalog::ServiceCatalog;
/// use carp_routing::constructive::path_scanning;
/// use carp_routing::distance::DistanceOracle;
/// use carp_routing::io::format_solution;
/// use carp_routing::models::{Graph, Vehicle, VertexId};
///
/// let mut g = Graph::new();
/// g.add_edge("1", "2", 5.0).unwrap();
/// g.add_required_edge("1", "2", 3, None).unwrap();
/// let catalog = ServiceCatalog::build(&g);
/// let oracle = DistanceOracle::new(&g);
/// let sol = path_scanning(&g, &catalog, &oracle, &Vehicle::new(10)).unwrap();
///
/// let text = format_solution(&g, &sol, &VertexId::from("1"));
/// assert_eq!(text, "10\n1\n0\n0\n 0 1 1 3 10  3 (D 0,1,1) (S 1,1,2) (D 0,1,1)\n");
/// ```
pub fn format_solution(graph: &Graph, solution: &Solution, depot: &VertexId) -> String {
    let mut out = format!("{}\n{}\n0\n0\n", solution.total_cost(), solution.num_routes());

    for (idx, route) in solution.routes().iter().enumerate() {
        out.push_str(&format!(
            " 0 1 {} {} {}  {} (D 0,{depot},1)",
            idx + 1,
            route.total_demand(),
            route.total_cost(),
            route.len() + 2
        ));
        for visit in route.visits() {
            out.push_str(&format!(
                " (S {},{},{})",
                visit.service_id + 1,
                graph.label(visit.tail),
                graph.label(visit.head)
            ));
        }
        out.push_str(&format!(" (D 0,{depot},1)\n"));
    }
    out
}

/// Writes [`format_solution`] output to `out`.
pub fn write_solution<W: Write>(
    mut out: W,
    graph: &Graph,
    solution: &Solution,
    depot: &VertexId,
) -> Result<()> {
    out.write_all(format_solution(graph, solution, depot).as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Writes an instance report as pretty-printed JSON.
pub fn write_report_json<W: Write>(out: W, report: &InstanceReport) -> Result<()> {
    serde_json::to_writer_pretty(out, report)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConstructionConfig;
    use crate::solver::{solve_instance, Instance};

    fn toy() -> Instance {
        let mut g = Graph::new();
        g.add_edge("1", "2", 5.0).expect("valid");
        g.add_edge("2", "3", 4.0).expect("valid");
        g.add_required_edge("1", "2", 3, None).expect("valid");
        g.add_required_edge("2", "3", 4, None).expect("valid");
        g.add_required_vertex("3");
        Instance::new("toy", g, 10, "1")
    }

    #[test]
    fn test_format_route_lines() {
        let instance = toy();
        let report = solve_instance(&instance, &ConstructionConfig::default()).expect("feasible");
        let text = format_solution(&instance.graph, &report.solution, &report.depot);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "19");
        assert_eq!(lines[1], "1");
        assert_eq!(lines[2], "0");
        assert_eq!(lines[3], "0");
        assert_eq!(
            lines[4],
            " 0 1 1 8 19  5 (D 0,1,1) (S 2,1,2) (S 3,2,3) (S 1,3,3) (D 0,1,1)"
        );
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_format_reversed_edge() {
        let instance = toy();
        let config = ConstructionConfig::default().with_depot("3");
        let report = solve_instance(&instance, &config).expect("feasible");
        let text = format_solution(&instance.graph, &report.solution, &report.depot);
        assert!(text.contains("(D 0,3,1) (S 1,3,3) (S 3,3,2) (S 2,2,1) (D 0,3,1)"));
    }

    #[test]
    fn test_write_solution_to_buffer() {
        let instance = toy();
        let report = solve_instance(&instance, &ConstructionConfig::default()).expect("feasible");
        let mut buf = Vec::new();
        write_solution(&mut buf, &instance.graph, &report.solution, &report.depot).expect("in memory");
        let text = String::from_utf8(buf).expect("utf-8");
        assert_eq!(text, format_solution(&instance.graph, &report.solution, &report.depot));
    }

    #[test]
    fn test_report_json() {
        let instance = toy();
        let report = solve_instance(&instance, &ConstructionConfig::default()).expect("feasible");
        let mut buf = Vec::new();
        write_report_json(&mut buf, &report).expect("in memory");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("valid json");
        assert_eq!(value["name"], "toy");
        assert_eq!(value["strategy"], "path-scanning");
        assert_eq!(value["depot"], "1");
        assert_eq!(value["total_cost"], 19.0);
        assert_eq!(value["solution"]["routes"].as_array().map(Vec::len), Some(1));
    }
}
