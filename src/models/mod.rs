//! Domain model types for capacitated arc routing.
//!
//! Provides the core abstractions: the mixed graph with its required
//! elements, service records, the vehicle (capacity + depot), routes as
//! ordered sequences of service visits, and solutions.

mod graph;
mod route;
mod service;
mod solution;
mod vehicle;

pub use graph::{Graph, Link, Requirement, VertexId};
pub use route::{Placement, Route, Visit};
pub use service::{Service, ServiceKey, ServiceKind};
pub use solution::{Solution, Violation, ViolationType};
pub use vehicle::Vehicle;
