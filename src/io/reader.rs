//! Reader for MCGRP-style `.dat` instances.
//!
//! ```text
//! Name:       toy
//! Capacity:   10
//! Depot Node: 1
//!
//! ReN.  DEMAND  S. COST
//! N4    1       1
//!
//! ReE.  FROM N. TO N.  T. COST  DEMAND  S. COST
//! E1    1       2      5        3       5
//!
//! EDGE  FROM N. TO N.  T. COST
//! NrE1  2       3      4
//!
//! ReA.  FROM N. TO N.  T. COST  DEMAND  S. COST
//! A1    3       4      2        1       2
//!
//! ARC   FROM N. TO N.  T. COST
//! NrA1  4       1      7
//! ```
//!
//! Lines starting with `#` are comments. The leading element name
//! (`E1`, `A1`, `NrE1`, `NrA1`) is optional on element lines; any other
//! first token is a vertex label.

use std::fs;
use std::path::Path;

use crate::error::{CarpError, Result};
use crate::models::Graph;
use crate::solver::Instance;

const DEFAULT_DEPOT: &str = "1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    RequiredNodes,
    RequiredEdges,
    Edges,
    RequiredArcs,
    Arcs,
}

impl Section {
    fn detect(line: &str) -> Option<Self> {
        if line.starts_with("ReN.") {
            Some(Section::RequiredNodes)
        } else if line.starts_with("ReE.") {
            Some(Section::RequiredEdges)
        } else if line.starts_with("ReA.") {
            Some(Section::RequiredArcs)
        } else if line.starts_with("EDGE") {
            Some(Section::Edges)
        } else if line.starts_with("ARC") {
            Some(Section::Arcs)
        } else {
            None
        }
    }
}

/// Reads an instance file. The file stem names the instance unless the
/// file carries a `Name:` header.
pub fn read_instance(path: impl AsRef<Path>) -> Result<Instance> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("instance");
    parse_instance(&text, stem)
}

/// Parses instance text.
///
/// Traversal costs become graph weights; required elements also register
/// a requirement whose explicit cost is the service cost column. A missing
/// demand column means demand 1, a missing service cost means the cost is
/// resolved from the weights. `Depot Node` defaults to `1`.
///
/// # Examples
///
/// ```
/// use carp_routing::io::parse_instance;
///
/// let text = "Capacity: 10\nReE.\nE1 1 2 5 3 5\nEDGE\nNrE1 2 3 4\n";
/// let instance = parse_instance(text, "toy").unwrap();
/// assert_eq!(instance.name, "toy");
/// assert_eq!(instance.capacity, 10);
/// assert_eq!(instance.graph.required_edges().len(), 1);
/// assert_eq!(instance.graph.edges().len(), 2);
/// ```
pub fn parse_instance(text: &str, default_name: &str) -> Result<Instance> {
    let mut graph = Graph::new();
    let mut name = default_name.to_string();
    let mut capacity: Option<i32> = None;
    let mut depot = DEFAULT_DEPOT.to_string();
    let mut section = Section::Header;
    let mut last_line = 0;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.eq_ignore_ascii_case("END") {
            continue;
        }
        if let Some(next) = Section::detect(line) {
            section = next;
            continue;
        }

        match section {
            Section::Header => {
                let Some((key, value)) = line.split_once(':') else {
                    continue;
                };
                let value = value.trim();
                match key.trim().to_ascii_lowercase().as_str() {
                    "name" => name = value.to_string(),
                    "capacity" => capacity = Some(parse_number(value, "capacity", line_no)?),
                    "depot node" | "depot" => depot = value.to_string(),
                    _ => {}
                }
            }
            Section::RequiredNodes => {
                let token = line.split_whitespace().next().unwrap_or_default();
                let label = token.strip_prefix('N').unwrap_or(token);
                graph.add_required_vertex(label);
            }
            Section::Edges | Section::Arcs => {
                let fields = element_fields(line);
                let [u, v, cost, ..] = fields[..] else {
                    return Err(parse_error(line_no, "expected `from to cost`"));
                };
                let weight: f64 = parse_number(cost, "traversal cost", line_no)?;
                let added = if section == Section::Edges {
                    graph.add_edge(u, v, weight)
                } else {
                    graph.add_arc(u, v, weight)
                };
                added.map_err(|e| parse_error(line_no, e.to_string()))?;
            }
            Section::RequiredEdges | Section::RequiredArcs => {
                let fields = element_fields(line);
                let [u, v, cost, ref rest @ ..] = fields[..] else {
                    return Err(parse_error(line_no, "expected `from to cost [demand] [service cost]`"));
                };
                let weight: f64 = parse_number(cost, "traversal cost", line_no)?;
                let demand: i32 = match rest.first() {
                    Some(d) => parse_number(d, "demand", line_no)?,
                    None => 1,
                };
                let service_cost: Option<f64> = match rest.get(1) {
                    Some(s) => Some(parse_number(s, "service cost", line_no)?),
                    None => None,
                };
                let added = if section == Section::RequiredEdges {
                    graph
                        .add_edge(u, v, weight)
                        .and_then(|()| graph.add_required_edge(u, v, demand, service_cost))
                } else {
                    graph
                        .add_arc(u, v, weight)
                        .and_then(|()| graph.add_required_arc(u, v, demand, service_cost))
                };
                added.map_err(|e| parse_error(line_no, e.to_string()))?;
            }
        }
    }

    let capacity = capacity.ok_or_else(|| parse_error(last_line, "missing `Capacity` header"))?;
    Ok(Instance::new(name, graph, capacity, depot))
}

/// Whitespace-split fields with the optional element name dropped.
fn element_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split_whitespace().collect();
    if fields.first().is_some_and(|f| is_element_name(f)) {
        fields.remove(0);
    }
    fields
}

/// `E<k>`, `A<k>`, `NrE<k>` or `NrA<k>` with a numeric `k`.
fn is_element_name(token: &str) -> bool {
    ["NrE", "NrA", "E", "A"].iter().any(|prefix| {
        token
            .strip_prefix(*prefix)
            .is_some_and(|k| !k.is_empty() && k.bytes().all(|b| b.is_ascii_digit()))
    })
}

fn parse_number<T: std::str::FromStr>(token: &str, what: &str, line: usize) -> Result<T> {
    token
        .parse()
        .map_err(|_| parse_error(line, format!("invalid {what} `{token}`")))
}

fn parse_error(line: usize, message: impl Into<String>) -> CarpError {
    CarpError::Parse {
        line,
        message: message.into(),
    }
}
