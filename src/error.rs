//! Crate-level error type.

use crate::catalog::CatalogDiagnostic;
use crate::models::{Solution, VertexId};

/// Errors raised while building graphs, solving instances, or doing I/O.
///
/// Per-service catalog problems are not errors; they are collected as
/// [`CatalogDiagnostic`](crate::catalog::CatalogDiagnostic)s on the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CarpError {
    /// A traversal weight or service cost is negative or not finite.
    #[error("invalid weight {weight} on ({from}, {to})")]
    InvalidWeight {
        /// Tail endpoint.
        from: VertexId,
        /// Head endpoint.
        to: VertexId,
        /// Rejected value.
        weight: f64,
    },

    /// A required edge or arc was given a non-positive demand.
    #[error("invalid demand {demand} on ({from}, {to}): demand must be positive")]
    InvalidDemand {
        /// Tail endpoint.
        from: VertexId,
        /// Head endpoint.
        to: VertexId,
        /// Rejected value.
        demand: i32,
    },

    /// The depot vertex is not part of the graph.
    #[error("unknown depot vertex `{0}`")]
    UnknownDepot(VertexId),

    /// Construction could not place the remaining services into a new route.
    ///
    /// The boxed solution holds every route completed before the stall and
    /// lists the stranded services in [`Solution::unassigned`].
    #[error("capacity stall: {} service(s) could not be assigned", solution.num_unassigned())]
    CapacityStall {
        /// Partial solution with the unassigned services recorded.
        solution: Box<Solution>,
        /// Required elements already excluded from the catalog.
        diagnostics: Vec<CatalogDiagnostic>,
    },

    /// Malformed instance file.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Invalid construction settings.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CarpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_stall_message() {
        let mut solution = Solution::new();
        solution.add_unassigned(0);
        solution.add_unassigned(3);
        let err = CarpError::CapacityStall {
            solution: Box::new(solution),
            diagnostics: Vec::new(),
        };
        assert_eq!(
            err.to_string(),
            "capacity stall: 2 service(s) could not be assigned"
        );
    }

    #[test]
    fn test_invalid_weight_message() {
        let err = CarpError::InvalidWeight {
            from: "1".into(),
            to: "2".into(),
            weight: -3.0,
        };
        assert_eq!(err.to_string(), "invalid weight -3 on (1, 2)");
    }
}
