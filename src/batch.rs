//! Parallel solving of independent instances.
//!
//! Each instance gets its own catalog and distance oracle inside its task,
//! so nothing is shared between workers.

use rayon::prelude::*;

use crate::config::ConstructionConfig;
use crate::error::Result;
use crate::solver::{solve_instance, Instance, InstanceReport};

/// Solves every instance with the same configuration on the rayon pool.
///
/// Results are returned in input order. One instance failing does not
/// affect the others.
pub fn solve_batch(instances: &[Instance], config: &ConstructionConfig) -> Vec<Result<InstanceReport>> {
    instances
        .par_iter()
        .map(|instance| solve_instance(instance, config))
        .collect()
}
