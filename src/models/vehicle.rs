//! Vehicle type: capacity bound and home depot.

use serde::{Deserialize, Serialize};

/// The (homogeneous, unlimited) vehicle used for every route.
///
/// # Examples
///
/// ```
/// use carp_routing::models::Vehicle;
///
/// let v = Vehicle::new(200).with_depot(3);
/// assert_eq!(v.capacity(), 200);
/// assert_eq!(v.depot(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    capacity: i32,
    depot: usize,
}

impl Vehicle {
    /// Creates a vehicle with the given capacity, based at vertex index 0.
    pub fn new(capacity: i32) -> Self {
        Self { capacity, depot: 0 }
    }

    /// Sets the depot vertex index.
    pub fn with_depot(mut self, depot: usize) -> Self {
        self.depot = depot;
        self
    }

    /// Maximum total demand per route.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Depot vertex index (start and end of every route).
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Returns `true` if `demand` more units fit on top of `load`.
    /// A sum that overflows `i32` never fits.
    pub fn fits(&self, load: i32, demand: i32) -> bool {
        load.checked_add(demand).is_some_and(|total| total <= self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new(10);
        assert_eq!(v.capacity(), 10);
        assert_eq!(v.depot(), 0);
    }

    #[test]
    fn test_fits_boundary() {
        let v = Vehicle::new(10);
        assert!(v.fits(7, 3));
        assert!(!v.fits(7, 4));
        assert!(!v.fits(0, 11));
    }

    #[test]
    fn test_fits_overflowing_demand() {
        let v = Vehicle::new(100);
        assert!(!v.fits(60, i32::MAX));
        assert!(!v.fits(0, i32::MAX));
        assert!(Vehicle::new(i32::MAX).fits(0, i32::MAX));
        assert!(!Vehicle::new(i32::MAX).fits(1, i32::MAX));
    }
}
