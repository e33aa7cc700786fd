//! # carp-routing
//!
//! Capacitated Arc Routing on mixed graphs: shortest paths over edges and
//! one-way arcs, a catalog of required services, and constructive
//! heuristics that pack services into depot-to-depot vehicle routes.
//!
//! ## Modules
//!
//! - [`models`]: Domain model types (Graph, Service, Vehicle, Route, Solution)
//! - [`distance`]: Memoized Dijkstra oracle and all-pairs distance matrix
//! - [`catalog`]: Ordered service catalog with exclusion diagnostics
//! - [`constructive`]: Ratio-greedy, path-scanning, and nearest-insertion
//! - [`evaluation`]: Route cost, route assembly, and solution verification
//! - [`config`]: Construction settings
//! - [`solver`]: Single-instance solving
//! - [`batch`]: Parallel solving of many instances
//! - [`io`]: Instance reader and solution writers
//! - [`error`]: Crate error type

pub mod batch;
pub mod catalog;
pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod models;
pub mod solver;
