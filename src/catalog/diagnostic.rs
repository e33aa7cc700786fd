//! Per-service problems found while building a catalog.

use serde::Serialize;

use crate::models::{ServiceKind, VertexId};

/// Why a required element was left out of the catalog.
///
/// These never abort catalog construction; the affected service is
/// excluded and the instance is known to be only partially coverable.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
pub enum CatalogDiagnostic {
    /// No explicit cost and no recorded weight to fall back on.
    #[error("missing weight for required {kind:?} ({tail}, {head})")]
    MissingWeight {
        /// Tail endpoint.
        tail: VertexId,
        /// Head endpoint.
        head: VertexId,
        /// Element kind.
        kind: ServiceKind,
    },

    /// A required arc whose direction is not a registered arc.
    #[error("infeasible direction for required arc ({tail}, {head})")]
    InfeasibleDirection {
        /// Tail endpoint.
        tail: VertexId,
        /// Head endpoint.
        head: VertexId,
    },
}
