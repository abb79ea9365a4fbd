//! Match detection
//!
//! A cube matches the neighbors directly above it (toward the anchor), to its
//! left and to its right that carry the same value. Only direct neighbors are
//! considered; spreading further happens across cascade passes.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{CubeValue, Direction, Slot};

/// Neighbors of one origin that share its value.
///
/// The origin itself is never part of the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet {
    origin: Slot,
    value: Option<CubeValue>,
    /// Matching neighbors in ABOVE, LEFT, RIGHT order
    matches: ArrayVec<Slot, 3>,
}

impl MatchSet {
    pub fn origin(&self) -> Slot {
        self.origin
    }

    /// Value at the origin when the set was computed (None if it was empty)
    pub fn value(&self) -> Option<CubeValue> {
        self.value
    }

    pub fn slots(&self) -> &[Slot] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.matches.contains(&slot)
    }
}

/// Find the neighbors of `origin` holding the same value.
///
/// An empty or out-of-bounds origin yields an empty set.
pub fn find_matches(grid: &Grid, origin: Slot) -> MatchSet {
    let value = grid.value(origin);
    let mut matches = ArrayVec::new();

    if let Some(v) = value {
        for direction in Direction::ALL {
            let Some(neighbor) = grid.neighbor(origin, direction) else {
                continue;
            };
            if grid.value(neighbor) == Some(v) {
                matches.push(neighbor);
            }
        }
    }

    MatchSet {
        origin,
        value,
        matches,
    }
}
