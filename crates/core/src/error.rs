//! Error types for grid access and cascade control.

use thiserror::Error;

use crate::types::{CascadeState, Signal};

/// Out-of-bounds access or an unusable grid shape.
///
/// These are programming errors: callers that respect the grid's contract
/// never see them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("slot ({column}, {index}) is outside the grid")]
    InvalidSlot { column: u8, index: u8 },

    #[error("grid of {width}x{height} is not a valid shape")]
    InvalidGrid { width: u8, height: u8 },
}

impl GridError {
    pub fn code(self) -> &'static str {
        match self {
            GridError::InvalidSlot { .. } => "invalid_slot",
            GridError::InvalidGrid { .. } => "invalid_grid",
        }
    }
}

/// Rejections reported by the cascade controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CascadeError {
    /// Column has no empty slot; nothing changed
    #[error("column {column} is full")]
    ColumnFull { column: u8 },

    /// Signal arrived in a state that does not accept it; nothing changed
    #[error("{signal} is not accepted while {state}")]
    InvalidTransition { state: CascadeState, signal: Signal },

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl CascadeError {
    pub fn code(self) -> &'static str {
        match self {
            CascadeError::ColumnFull { .. } => "column_full",
            CascadeError::InvalidTransition { .. } => "invalid_transition",
            CascadeError::Grid(e) => e.code(),
        }
    }

    /// Whether the host can carry on after this error
    pub fn is_recoverable(self) -> bool {
        !matches!(self, CascadeError::Grid(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(CascadeError::ColumnFull { column: 1 }.code(), "column_full");
        assert_eq!(
            CascadeError::InvalidTransition {
                state: CascadeState::Idle,
                signal: Signal::CollectAnimationFinished,
            }
            .code(),
            "invalid_transition"
        );
        assert_eq!(
            CascadeError::from(GridError::InvalidSlot { column: 9, index: 0 }).code(),
            "invalid_slot"
        );
    }

    #[test]
    fn messages_name_state_and_signal() {
        let err = CascadeError::InvalidTransition {
            state: CascadeState::AwaitingCollectAnim,
            signal: Signal::Insertion,
        };
        assert_eq!(
            err.to_string(),
            "insertion is not accepted while awaiting_collect_anim"
        );
    }

    #[test]
    fn only_grid_errors_are_fatal() {
        assert!(CascadeError::ColumnFull { column: 0 }.is_recoverable());
        assert!(!CascadeError::Grid(GridError::InvalidGrid { width: 0, height: 1 }).is_recoverable());
    }
}
