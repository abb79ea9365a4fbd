use crate::grid::Grid;
use crate::types::{CascadeState, Cell};

/// Read-only copy of the controller's observable state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    pub width: u8,
    pub height: u8,
    /// Columns left to right, each listed anchor first
    pub columns: Vec<Vec<Cell>>,
    pub state: CascadeState,
    /// Collections performed since the last insertion
    pub chain: u32,
    pub game_over: bool,
}

impl GridSnapshot {
    pub fn capture(grid: &Grid, state: CascadeState, chain: u32) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            columns: grid.to_columns(),
            state,
            chain,
            game_over: state == CascadeState::GameOver,
        }
    }

    pub fn occupied(&self) -> usize {
        self.columns
            .iter()
            .flatten()
            .filter(|cell| cell.is_some())
            .count()
    }

    /// True when the host may insert
    pub fn playable(&self) -> bool {
        self.state == CascadeState::Idle
    }
}
