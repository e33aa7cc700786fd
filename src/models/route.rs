//! Route and visit types.

use serde::{Deserialize, Serialize};

/// A service scheduled on a route together with its chosen orientation.
///
/// `reversed` only has an effect on edge services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Catalog id of the service.
    pub service_id: usize,
    /// Service the element head-to-tail.
    pub reversed: bool,
}

impl Placement {
    /// Placement in catalog orientation.
    pub fn forward(service_id: usize) -> Self {
        Self {
            service_id,
            reversed: false,
        }
    }
}

/// One serviced element within a route, in the orientation it was assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    /// Catalog id of the service.
    pub service_id: usize,
    /// Vertex where servicing starts.
    pub tail: usize,
    /// Vertex where servicing ends.
    pub head: usize,
    /// Demand of the service.
    pub demand: i32,
    /// Service cost.
    pub cost: f64,
    /// Cumulative load after this visit.
    pub load_after: i32,
    /// Serviced against catalog orientation.
    pub reversed: bool,
}

/// An ordered sequence of service visits.
///
/// A route starts and ends at the depot (not stored in `visits`).
///
/// # Examples
///
/// ```
/// use carp_routing::models::{Route, Visit};
///
/// let mut route = Route::new();
/// route.push_visit(Visit {
///     service_id: 0,
///     tail: 1,
///     head: 2,
///     demand: 3,
///     cost: 5.0,
///     load_after: 3,
///     reversed: false,
/// });
/// assert_eq!(route.len(), 1);
/// assert_eq!(route.total_demand(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    visits: Vec<Visit>,
    total_cost: f64,
    total_demand: i32,
}

impl Route {
    /// Creates an empty route.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a visit to the end of this route.
    pub fn push_visit(&mut self, visit: Visit) {
        self.total_demand = visit.load_after;
        self.visits.push(visit);
    }

    /// Returns the ordered sequence of visits.
    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Number of services on the route.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    /// Returns `true` if this route services nothing.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Placements in visit order, orientation recovered from the visits.
    pub fn placements(&self) -> Vec<Placement> {
        self.visits
            .iter()
            .map(|v| Placement {
                service_id: v.service_id,
                reversed: v.reversed,
            })
            .collect()
    }

    /// Service ids in visit order.
    pub fn service_ids(&self) -> Vec<usize> {
        self.visits.iter().map(|v| v.service_id).collect()
    }

    /// Depot-to-depot cost, deadheading plus servicing (set by evaluator).
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Sum of service demands.
    pub fn total_demand(&self) -> i32 {
        self.total_demand
    }

    /// Sets the total cost (used by evaluator).
    pub fn set_total_cost(&mut self, cost: f64) {
        self.total_cost = cost;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit(service_id: usize, demand: i32, load_after: i32) -> Visit {
        Visit {
            service_id,
            tail: 0,
            head: 1,
            demand,
            cost: 1.0,
            load_after,
            reversed: false,
        }
    }

    #[test]
    fn test_route_empty() {
        let r = Route::new();
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.total_cost(), 0.0);
        assert_eq!(r.total_demand(), 0);
    }

    #[test]
    fn test_route_push_visit() {
        let mut r = Route::new();
        r.push_visit(visit(5, 4, 4));
        r.push_visit(visit(3, 2, 6));
        assert_eq!(r.len(), 2);
        assert_eq!(r.service_ids(), vec![5, 3]);
        assert_eq!(r.total_demand(), 6);
    }
}
