//! Grid module - owns every slot of the playfield
//!
//! The grid is `width` columns of `height` slots. Storage is a flat vector in
//! column-major order so a whole column is one contiguous run.
//! Coordinates: `Slot { column, index }` where index 0 is the anchor edge and
//! index `height - 1` is the entry edge.

use crate::config::GridConfig;
use crate::error::GridError;
use crate::types::{Cell, CubeValue, Direction, Slot};

/// The playfield. Dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Flat array of cells, column-major (column * height + index)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        Ok(Self {
            width: config.width,
            height: config.height,
            cells: vec![None; config.slot_count()],
        })
    }

    /// Build a grid from columns listed anchor-first.
    ///
    /// Every column must have the same, non-zero length.
    pub fn from_columns(columns: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let width = u8::try_from(columns.len()).unwrap_or(0);
        let height = columns
            .first()
            .and_then(|c| u8::try_from(c.len()).ok())
            .unwrap_or(0);
        let config = GridConfig::new(width, height);
        config.validate()?;
        if columns.iter().any(|c| c.len() != height as usize) {
            return Err(GridError::InvalidGrid { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: columns.into_iter().flatten().collect(),
        })
    }

    /// Calculate flat offset of a slot
    #[inline(always)]
    fn offset(&self, slot: Slot) -> Option<usize> {
        if slot.column >= self.width || slot.index >= self.height {
            return None;
        }
        Some(slot.column as usize * self.height as usize + slot.index as usize)
    }

    fn checked_offset(&self, slot: Slot) -> Result<usize, GridError> {
        self.offset(slot).ok_or(GridError::InvalidSlot {
            column: slot.column,
            index: slot.index,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn config(&self) -> GridConfig {
        GridConfig::new(self.width, self.height)
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.offset(slot).is_some()
    }

    /// Get cell at a slot
    /// Returns None if out of bounds
    pub fn get(&self, slot: Slot) -> Option<Cell> {
        self.offset(slot).map(|i| self.cells[i])
    }

    /// Cube value at a slot, if the slot exists and is occupied
    pub fn value(&self, slot: Slot) -> Option<CubeValue> {
        self.get(slot).flatten()
    }

    /// Check if slot is within bounds and empty
    pub fn is_empty(&self, slot: Slot) -> bool {
        matches!(self.get(slot), Some(None))
    }

    /// Check if slot is within bounds and holds a cube
    pub fn is_occupied(&self, slot: Slot) -> bool {
        matches!(self.get(slot), Some(Some(_)))
    }

    /// Put a cube into a slot, replacing whatever was there
    pub fn place(&mut self, slot: Slot, value: CubeValue) -> Result<(), GridError> {
        let i = self.checked_offset(slot)?;
        self.cells[i] = Some(value);
        Ok(())
    }

    /// Empty a slot, returning the cube it held
    pub fn clear(&mut self, slot: Slot) -> Result<Cell, GridError> {
        let i = self.checked_offset(slot)?;
        Ok(self.cells[i].take())
    }

    /// Move the cube at `from` into `to`.
    ///
    /// Returns the moved value, or None when `from` was empty (nothing changes).
    pub fn move_cube(&mut self, from: Slot, to: Slot) -> Result<Cell, GridError> {
        let src = self.checked_offset(from)?;
        let dst = self.checked_offset(to)?;
        let cube = self.cells[src].take();
        if cube.is_some() {
            self.cells[dst] = cube;
        }
        Ok(cube)
    }

    /// First empty slot of a column, scanning from the anchor edge.
    ///
    /// `Ok(None)` means the column is full.
    pub fn target_slot_for_insertion(&self, column: u8) -> Result<Option<Slot>, GridError> {
        if column >= self.width {
            return Err(GridError::InvalidSlot { column, index: 0 });
        }
        Ok((0..self.height)
            .map(|index| Slot::new(column, index))
            .find(|&slot| self.is_empty(slot)))
    }

    /// Adjacent slot in a direction, or None at the grid boundary
    pub fn neighbor(&self, slot: Slot, direction: Direction) -> Option<Slot> {
        if !self.contains(slot) {
            return None;
        }
        let next = match direction {
            Direction::Above => Slot::new(slot.column, slot.index.checked_sub(1)?),
            Direction::Left => Slot::new(slot.column.checked_sub(1)?, slot.index),
            Direction::Right => Slot::new(slot.column.checked_add(1)?, slot.index),
        };
        self.contains(next).then_some(next)
    }

    /// Slot at the entry edge of a column
    pub fn entry_slot(&self, column: u8) -> Slot {
        Slot::new(column, self.height - 1)
    }

    pub fn is_entry_slot_occupied(&self, column: u8) -> bool {
        self.is_occupied(self.entry_slot(column))
    }

    /// Game-over condition: every column's entry slot is occupied
    pub fn all_entry_slots_occupied(&self) -> bool {
        (0..self.width).all(|column| self.is_entry_slot_occupied(column))
    }

    /// Cells of one column, anchor first
    pub fn column(&self, column: u8) -> Option<&[Cell]> {
        if column >= self.width {
            return None;
        }
        let h = self.height as usize;
        let start = column as usize * h;
        Some(&self.cells[start..start + h])
    }

    /// True when no empty slot sits closer to the anchor than an occupied one
    pub fn is_column_compact(&self, column: u8) -> bool {
        self.column(column)
            .map(|cells| {
                let filled = cells.iter().take_while(|c| c.is_some()).count();
                cells[filled..].iter().all(|c| c.is_none())
            })
            .unwrap_or(false)
    }

    pub fn is_compact(&self) -> bool {
        (0..self.width).all(|column| self.is_column_compact(column))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Convert to columns, anchor first
    pub fn to_columns(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.height as usize)
            .map(<[Cell]>::to_vec)
            .collect()
    }

    /// Clear the entire grid
    pub fn clear_all(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}
