//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, headless drivers, the JSON adapter).
//!
//! # Grid Coordinates
//!
//! A grid has `width` columns, each holding `height` slots:
//!
//! - **Column**: 0 .. width-1 (left to right)
//! - **Index**: 0 .. height-1, where index 0 is the *anchor edge* cubes settle
//!   toward and index `height - 1` is the *entry edge* new cubes appear at
//!
//! # Adjacency
//!
//! Matching only ever looks [`Direction::Above`] (toward the anchor edge),
//! [`Direction::Left`] and [`Direction::Right`]. There is deliberately no
//! "below" direction.
//!
//! # Examples
//!
//! ```
//! use cube_drop_types::{AnimationKind, CascadeState, Direction, Slot, DEFAULT_HEIGHT, DEFAULT_WIDTH};
//!
//! let slot = Slot::new(2, 0);
//! assert_eq!(slot.column, 2);
//! assert!(slot.is_anchor());
//!
//! assert_eq!(Direction::ALL, [Direction::Above, Direction::Left, Direction::Right]);
//!
//! let anim = AnimationKind::from_str("collect").unwrap();
//! assert_eq!(anim, AnimationKind::Collect);
//!
//! assert_eq!(CascadeState::Idle.as_str(), "idle");
//! assert_eq!(DEFAULT_WIDTH, 5);
//! assert_eq!(DEFAULT_HEIGHT, 7);
//! ```

use std::fmt;

/// Default grid width in columns
pub const DEFAULT_WIDTH: u8 = 5;

/// Default grid height in slots per column
pub const DEFAULT_HEIGHT: u8 = 7;

/// Largest accepted width or height
pub const MAX_DIMENSION: u8 = 64;

/// Smallest value the cube spawner hands out
pub const MIN_SPAWN_VALUE: CubeValue = 1;

/// Largest value the cube spawner hands out
pub const MAX_SPAWN_VALUE: CubeValue = 4;

/// Merge level carried by a cube.
///
/// Cubes have no identity beyond their value.
pub type CubeValue = u32;

/// A slot's content
///
/// - `None`: Empty slot
/// - `Some(value)`: Slot holds a cube of that value
pub type Cell = Option<CubeValue>;

/// Position of a slot on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub column: u8,
    pub index: u8,
}

impl Slot {
    pub const fn new(column: u8, index: u8) -> Self {
        Self { column, index }
    }

    /// True for slots on the anchor edge (index 0)
    pub fn is_anchor(&self) -> bool {
        self.index == 0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.index)
    }
}

/// Neighbor directions inspected by match detection
///
/// - **Above**: one step toward the anchor edge (`index - 1`)
/// - **Left**: previous column (`column - 1`)
/// - **Right**: next column (`column + 1`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Above,
    Left,
    Right,
}

impl Direction {
    /// Every direction, in the order match detection inspects them
    pub const ALL: [Direction; 3] = [Direction::Above, Direction::Left, Direction::Right];
}

/// States of the cascade controller
///
/// The three `Awaiting*` states are the only points where resolution pauses
/// for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CascadeState {
    /// Quiescent, accepting insertions
    Idle,
    /// A cube was placed; waiting for the insertion animation
    AwaitingInsertAnim,
    /// Resolving a match set (transient within a transition)
    Checking,
    /// Cubes were collected; waiting for the collect animation
    AwaitingCollectAnim,
    /// The grid was compacted; waiting for the compaction animation
    AwaitingCompactAnim,
    /// Every entry slot is occupied
    GameOver,
}

impl CascadeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CascadeState::Idle => "idle",
            CascadeState::AwaitingInsertAnim => "awaiting_insert_anim",
            CascadeState::Checking => "checking",
            CascadeState::AwaitingCollectAnim => "awaiting_collect_anim",
            CascadeState::AwaitingCompactAnim => "awaiting_compact_anim",
            CascadeState::GameOver => "game_over",
        }
    }

    /// True while a resolution is paused on the presentation layer
    pub fn is_awaiting(&self) -> bool {
        matches!(
            self,
            CascadeState::AwaitingInsertAnim
                | CascadeState::AwaitingCollectAnim
                | CascadeState::AwaitingCompactAnim
        )
    }
}

impl fmt::Display for CascadeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External inputs the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Insertion,
    InsertionAnimationFinished,
    CollectAnimationFinished,
    CompactionAnimationFinished,
    NewGame,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Insertion => "insertion",
            Signal::InsertionAnimationFinished => "insertion_animation_finished",
            Signal::CollectAnimationFinished => "collect_animation_finished",
            Signal::CompactionAnimationFinished => "compaction_animation_finished",
            Signal::NewGame => "new_game",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Animations the presentation layer reports as finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Insertion,
    Collect,
    Compaction,
}

impl AnimationKind {
    /// Parse animation kind from its wire name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use cube_drop_types::AnimationKind;
    ///
    /// assert_eq!(AnimationKind::from_str("Insertion"), Some(AnimationKind::Insertion));
    /// assert_eq!(AnimationKind::from_str("compaction"), Some(AnimationKind::Compaction));
    /// assert_eq!(AnimationKind::from_str("bubble"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "insertion" => Some(AnimationKind::Insertion),
            "collect" => Some(AnimationKind::Collect),
            "compaction" => Some(AnimationKind::Compaction),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationKind::Insertion => "insertion",
            AnimationKind::Collect => "collect",
            AnimationKind::Compaction => "compaction",
        }
    }

    /// The controller signal this animation completes
    pub fn signal(&self) -> Signal {
        match self {
            AnimationKind::Insertion => Signal::InsertionAnimationFinished,
            AnimationKind::Collect => Signal::CollectAnimationFinished,
            AnimationKind::Compaction => Signal::CompactionAnimationFinished,
        }
    }
}

/// One cube moved during compaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeMove {
    pub from: Slot,
    pub to: Slot,
    pub value: CubeValue,
}

/// Events the controller emits to the presentation layer.
///
/// Each `CubeAddedToBoard`, `CubesCollected` and `BoardCompactionComplete`
/// must be answered by exactly one matching animation-finished signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A cube was placed at `destination`, entering from `entry`
    CubeAddedToBoard {
        destination: Slot,
        entry: Slot,
        value: CubeValue,
    },
    /// Matched cubes were removed and a merged cube placed at `origin`
    CubesCollected {
        origin: Slot,
        cleared: Vec<Slot>,
        original_value: CubeValue,
        merged_value: CubeValue,
    },
    /// Gaps were closed; moves are listed in the order performed
    BoardCompactionComplete { moves: Vec<CubeMove> },
    GameOver,
}

impl BoardEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardEvent::CubeAddedToBoard { .. } => "cube_added",
            BoardEvent::CubesCollected { .. } => "cubes_collected",
            BoardEvent::BoardCompactionComplete { .. } => "compaction_complete",
            BoardEvent::GameOver => "game_over",
        }
    }

    /// The animation the presentation layer must report for this event, if any
    pub fn awaited_animation(&self) -> Option<AnimationKind> {
        match self {
            BoardEvent::CubeAddedToBoard { .. } => Some(AnimationKind::Insertion),
            BoardEvent::CubesCollected { .. } => Some(AnimationKind::Collect),
            BoardEvent::BoardCompactionComplete { .. } => Some(AnimationKind::Compaction),
            BoardEvent::GameOver => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_order_is_above_left_right() {
        assert_eq!(Direction::ALL[0], Direction::Above);
        assert_eq!(Direction::ALL[1], Direction::Left);
        assert_eq!(Direction::ALL[2], Direction::Right);
    }

    #[test]
    fn animation_kinds_map_to_signals() {
        assert_eq!(
            AnimationKind::Insertion.signal(),
            Signal::InsertionAnimationFinished
        );
        assert_eq!(AnimationKind::Collect.signal(), Signal::CollectAnimationFinished);
        assert_eq!(
            AnimationKind::Compaction.signal(),
            Signal::CompactionAnimationFinished
        );
    }

    #[test]
    fn awaiting_states() {
        assert!(!CascadeState::Idle.is_awaiting());
        assert!(!CascadeState::Checking.is_awaiting());
        assert!(!CascadeState::GameOver.is_awaiting());
        assert!(CascadeState::AwaitingInsertAnim.is_awaiting());
        assert!(CascadeState::AwaitingCollectAnim.is_awaiting());
        assert!(CascadeState::AwaitingCompactAnim.is_awaiting());
    }

    #[test]
    fn events_name_their_animation() {
        let ev = BoardEvent::BoardCompactionComplete { moves: Vec::new() };
        assert_eq!(ev.awaited_animation(), Some(AnimationKind::Compaction));
        assert_eq!(BoardEvent::GameOver.awaited_animation(), None);
        assert_eq!(ev.as_str(), "compaction_complete");
    }

    #[test]
    fn signal_names() {
        assert_eq!(Signal::Insertion.to_string(), "insertion");
        assert_eq!(Signal::NewGame.to_string(), "new_game");
        assert_eq!(
            Signal::CompactionAnimationFinished.as_str(),
            "compaction_animation_finished"
        );
    }

    #[test]
    fn slot_display() {
        assert_eq!(Slot::new(3, 1).to_string(), "(3, 1)");
    }
}
