use std::sync::RwLock;

use crate::outbound::{Destination, DestinationId};

/// Process-wide set of destinations the engine currently serves.
///
/// Mutated by guild join/leave handlers, read (as a snapshot) by the
/// reconciler and the push router. The lock is never held across an
/// await point; a snapshot taken at the start of a pass may go stale
/// mid-pass, which the next pass corrects.
#[derive(Default)]
pub struct MembershipRegistry {
    destinations: RwLock<Vec<Destination>>,
}

impl MembershipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent append; a destination already present is left as-is.
    pub fn add(&self, destination: Destination) {
        let mut destinations = self
            .destinations
            .write()
            .unwrap_or_else(|e| e.into_inner());
        if !destinations.iter().any(|d| d.id == destination.id) {
            destinations.push(destination);
        }
    }

    /// Idempotent removal; absent destinations are a no-op.
    pub fn remove(&self, id: DestinationId) {
        let mut destinations = self
            .destinations
            .write()
            .unwrap_or_else(|e| e.into_inner());
        destinations.retain(|d| d.id != id);
    }

    /// Owned snapshot for iteration, in insertion order.
    pub fn snapshot(&self) -> Vec<Destination> {
        self.destinations
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.destinations
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dest(id: u64, name: &str) -> Destination {
        Destination {
            id: DestinationId(id),
            name: name.into(),
        }
    }

    #[test]
    fn add_is_idempotent() {
        let registry = MembershipRegistry::new();
        registry.add(dest(1, "one"));
        registry.add(dest(1, "one"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let registry = MembershipRegistry::new();
        registry.add(dest(1, "one"));
        registry.remove(DestinationId(1));
        registry.remove(DestinationId(1));
        assert!(registry.is_empty());
    }

    #[test]
    fn snapshot_preserves_insertion_order() {
        let registry = MembershipRegistry::new();
        registry.add(dest(2, "two"));
        registry.add(dest(1, "one"));
        let names: Vec<_> = registry.snapshot().into_iter().map(|d| d.name).collect();
        assert_eq!(names, ["two", "one"]);
    }

    #[test]
    fn remove_unknown_leaves_others() {
        let registry = MembershipRegistry::new();
        registry.add(dest(1, "one"));
        registry.remove(DestinationId(99));
        assert_eq!(registry.len(), 1);
    }
}
