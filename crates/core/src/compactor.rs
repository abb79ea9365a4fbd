//! Compaction ("bubbling") after a collection
//!
//! Two steps run after every merge:
//!
//! 1. **Adjacent gap**: if the slot directly above the merge origin was
//!    emptied, the merged cube moves one step toward the anchor.
//! 2. **Full scan**: every column is scanned from the anchor edge; once a gap
//!    is found, every cube further out is pulled down into the next free
//!    slot, leaving the column contiguous from the anchor.
//!
//! Every move is recorded in order for the presentation layer.

use log::trace;

use crate::error::GridError;
use crate::grid::Grid;
use crate::types::{CubeMove, Direction, Slot};

/// Moves performed by one compaction, and the slots to re-check afterwards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompactionPlan {
    /// Moves in the order performed
    pub moves: Vec<CubeMove>,
    /// Merged cube's final slot first, then each full-scan destination in move order
    pub recheck: Vec<Slot>,
}

impl CompactionPlan {
    pub fn is_noop(&self) -> bool {
        self.moves.is_empty()
    }

    /// Slots that received a cube
    pub fn destinations(&self) -> impl Iterator<Item = Slot> + '_ {
        self.moves.iter().map(|m| m.to)
    }
}

/// Compact the grid after a merge at `origin`.
pub fn compact(grid: &mut Grid, origin: Slot) -> Result<CompactionPlan, GridError> {
    let mut plan = CompactionPlan::default();

    let mut merged_at = origin;
    if let Some(above) = grid.neighbor(origin, Direction::Above) {
        if grid.is_empty(above) && grid.is_occupied(origin) {
            if let Some(value) = grid.move_cube(origin, above)? {
                trace!("bubble {} -> {} ({})", origin, above, value);
                plan.moves.push(CubeMove {
                    from: origin,
                    to: above,
                    value,
                });
                merged_at = above;
            }
        }
    }
    plan.recheck.push(merged_at);

    for column in 0..grid.width() {
        compact_column(grid, column, &mut plan)?;
    }

    Ok(plan)
}

fn compact_column(grid: &mut Grid, column: u8, plan: &mut CompactionPlan) -> Result<(), GridError> {
    // Next slot to fill, set once the first gap from the anchor is found.
    let mut write: Option<u8> = None;

    for index in 0..grid.height() {
        let from = Slot::new(column, index);
        if grid.is_empty(from) {
            write.get_or_insert(index);
            continue;
        }
        let Some(w) = write else {
            continue;
        };

        let to = Slot::new(column, w);
        if let Some(value) = grid.move_cube(from, to)? {
            trace!("compact {} -> {} ({})", from, to, value);
            plan.moves.push(CubeMove { from, to, value });
            plan.recheck.push(to);
        }
        write = Some(w + 1);
    }

    Ok(())
}
