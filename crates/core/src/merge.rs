//! Merge resolution - collapses a match set into one cube at its origin.

use crate::error::GridError;
use crate::grid::Grid;
use crate::matcher::MatchSet;
use crate::types::{CubeValue, Slot};

/// Outcome of collecting one match set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    pub origin: Slot,
    /// Matched slots in detection order, then the origin
    pub cleared: Vec<Slot>,
    pub original_value: CubeValue,
    pub merged_value: CubeValue,
}

/// Merged value for an origin of value `value` with `matched` equal neighbors.
///
/// Grows by one per matched neighbor, not multiplicatively.
///
/// ```
/// use cube_drop_core::merge::merged_value;
///
/// assert_eq!(merged_value(2, 3), 5);
/// assert_eq!(merged_value(7, 1), 8);
/// ```
pub fn merged_value(value: CubeValue, matched: usize) -> CubeValue {
    let k = CubeValue::try_from(matched).unwrap_or(CubeValue::MAX);
    value.saturating_add(k)
}

/// Clear the matched cubes and the origin, then place the merged cube at the origin.
///
/// The caller guarantees `matches` is non-empty and was computed against the
/// current grid.
pub fn resolve(grid: &mut Grid, matches: &MatchSet) -> Result<MergeResult, GridError> {
    let origin = matches.origin();
    debug_assert!(!matches.is_empty(), "resolve called with an empty match set");

    let original_value = grid.value(origin).ok_or(GridError::InvalidSlot {
        column: origin.column,
        index: origin.index,
    })?;

    let mut cleared = Vec::with_capacity(matches.len() + 1);
    for &slot in matches.slots() {
        grid.clear(slot)?;
        cleared.push(slot);
    }
    grid.clear(origin)?;
    cleared.push(origin);

    let merged = merged_value(original_value, matches.len());
    grid.place(origin, merged)?;

    Ok(MergeResult {
        origin,
        cleared,
        original_value,
        merged_value: merged,
    })
}
