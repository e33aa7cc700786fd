//! Service catalog: required vertices, edges, and arcs flattened into
//! uniform [`Service`](crate::models::Service) records.

mod diagnostic;
mod service_catalog;

pub use diagnostic::CatalogDiagnostic;
pub use service_catalog::ServiceCatalog;
