//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the resolution engine of the cube-drop puzzle: cubes
//! carrying a value are dropped into columns; equal cubes that touch (above,
//! left or right, never below) collapse into one cube whose value grows by the
//! number of cubes absorbed, the columns compact toward the anchor edge, and
//! the process repeats until nothing matches.
//!
//! It has **zero dependencies** on rendering, timing, networking, or I/O:
//!
//! - **Deterministic**: The same signals in the same order produce the same grid
//! - **Testable**: Animation phases are explicit states, so tests simply fire
//!   the "finished" signals themselves
//! - **Portable**: Any host (terminal, GUI, network adapter) drives it the same way
//!
//! # Module Structure
//!
//! - [`grid`]: Fixed-size slot storage and neighbor queries
//! - [`matcher`]: Match detection against direct neighbors
//! - [`merge`]: Collapsing a match set into its origin
//! - [`compactor`]: Closing gaps after a collection ("bubbling")
//! - [`cascade`]: The state machine driving insertion through chain reactions
//! - [`rng`]: Seeded next-cube values for hosts
//! - [`snapshot`]: Read-only copies of controller state
//!
//! # Example
//!
//! ```
//! use cube_drop_core::{CascadeController, GridConfig};
//! use cube_drop_core::types::{BoardEvent, CascadeState};
//!
//! let mut game = CascadeController::new(GridConfig::new(1, 3)).unwrap();
//!
//! game.request_insertion(0, 2).unwrap();
//! game.on_insertion_animation_finished().unwrap();
//!
//! game.request_insertion(0, 2).unwrap();
//! game.on_insertion_animation_finished().unwrap();
//! assert_eq!(game.state(), CascadeState::AwaitingCollectAnim);
//!
//! game.on_collect_animation_finished().unwrap();
//! game.on_compaction_animation_finished().unwrap();
//! assert_eq!(game.state(), CascadeState::Idle);
//! assert_eq!(game.grid().value(cube_drop_core::types::Slot::new(0, 0)), Some(3));
//!
//! let events = game.take_events();
//! assert!(matches!(events[2], BoardEvent::CubesCollected { merged_value: 3, .. }));
//! ```

pub mod cascade;
pub mod compactor;
pub mod config;
pub mod error;
pub mod grid;
pub mod matcher;
pub mod merge;
pub mod rng;
pub mod snapshot;

pub use cube_drop_types as types;

// Re-export commonly used types for convenience
pub use cascade::{CascadeController, CascadeListener};
pub use compactor::{compact, CompactionPlan};
pub use config::GridConfig;
pub use error::{CascadeError, GridError};
pub use grid::Grid;
pub use matcher::{find_matches, MatchSet};
pub use merge::{merged_value, resolve, MergeResult};
pub use rng::{CubeSpawner, SimpleRng};
pub use snapshot::GridSnapshot;
