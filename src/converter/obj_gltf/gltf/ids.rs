//! Unique identifier allocation for glTF document entries.

use std::collections::{HashMap, HashSet};

/// Hands out unique, human-readable string ids within a single document
/// build.
///
/// The first request for a base name returns it unchanged; later requests
/// for the same base get a `_N` suffix with N counting up from 1. State is
/// scoped to one build: a fresh allocator is created per conversion and
/// never shared across documents.
#[derive(Debug, Default)]
pub struct IdAllocator {
    counters: HashMap<String, u32>,
    issued: HashSet<String>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a unique id derived from `base`.
    ///
    /// Candidates that collide with an id already handed out (for example
    /// when `mesh_1` was itself requested as a base name) are skipped, so no
    /// two calls ever return the same string.
    pub fn allocate(&mut self, base: &str) -> String {
        if !self.counters.contains_key(base) && self.issued.insert(base.to_string()) {
            self.counters.insert(base.to_string(), 1);
            return base.to_string();
        }

        let counter = self.counters.entry(base.to_string()).or_insert(1);
        loop {
            let candidate = format!("{base}_{counter}");
            *counter += 1;
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_allocation_is_unmodified() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate("mesh"), "mesh");
    }

    #[test]
    fn test_repeated_allocations_are_distinct() {
        let mut ids = IdAllocator::new();
        let allocated: Vec<String> = (0..5).map(|_| ids.allocate("node")).collect();

        assert_eq!(allocated[0], "node");
        assert_eq!(allocated[1], "node_1");
        assert_eq!(allocated[4], "node_4");

        let unique: std::collections::HashSet<&String> = allocated.iter().collect();
        assert_eq!(unique.len(), allocated.len());
    }

    #[test]
    fn test_generated_id_claimed_as_base_stays_unique() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate("mesh_1"), "mesh_1");
        assert_eq!(ids.allocate("mesh"), "mesh");
        // mesh_1 is taken, so the suffix counter skips past it.
        assert_eq!(ids.allocate("mesh"), "mesh_2");
    }

    #[test]
    fn test_base_that_matches_a_generated_id() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate("mesh"), "mesh");
        assert_eq!(ids.allocate("mesh"), "mesh_1");
        // The literal base mesh_1 was already handed out as a suffix.
        assert_eq!(ids.allocate("mesh_1"), "mesh_1_1");
    }

    #[test]
    fn test_independent_bases_do_not_interfere() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate("accessor"), "accessor");
        assert_eq!(ids.allocate("scene"), "scene");
        assert_eq!(ids.allocate("accessor"), "accessor_1");
        assert_eq!(ids.allocate("scene"), "scene_1");
    }
}
