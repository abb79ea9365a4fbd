//! Cascade controller - the resolution state machine
//!
//! The controller owns the [`Grid`] and advances one transition per external
//! signal:
//!
//! ```text
//! Idle --insert--> AwaitingInsertAnim --finished--> (match check)
//!   no match:   game-over check -> Idle | GameOver
//!   match:      Checking -> AwaitingCollectAnim --finished--> (compact)
//!               -> AwaitingCompactAnim --finished--> (re-check moved slots)
//! ```
//!
//! Re-checks after a compaction are processed lazily and in order: the first
//! slot that still holds a cube with a non-empty match set starts the next
//! pass (chain reaction). When nothing is left to check, the game-over check
//! runs and the controller goes quiescent.
//!
//! Events are pushed to registered listeners and also buffered for hosts that
//! prefer to pull them with [`CascadeController::take_events`].

use std::collections::VecDeque;
use std::fmt;

use log::{debug, info};

use crate::compactor;
use crate::config::GridConfig;
use crate::error::{CascadeError, GridError};
use crate::grid::Grid;
use crate::matcher::{self, MatchSet};
use crate::merge;
use crate::snapshot::GridSnapshot;
use crate::types::{AnimationKind, BoardEvent, CascadeState, CubeValue, Signal, Slot};

/// Receives controller output.
pub trait CascadeListener: Send {
    fn on_event(&mut self, event: &BoardEvent);

    /// Input must be disabled while `enabled` is false.
    fn on_input_gate(&mut self, _enabled: bool) {}
}

impl CascadeListener for std::sync::mpsc::Sender<BoardEvent> {
    fn on_event(&mut self, event: &BoardEvent) {
        if self.send(event.clone()).is_err() {
            debug!("event receiver gone; dropping {}", event.as_str());
        }
    }
}

pub struct CascadeController {
    grid: Grid,
    state: CascadeState,
    /// Slot filled by the insertion awaiting its animation
    inserted: Option<Slot>,
    /// Merge origin awaiting compaction
    origin: Option<Slot>,
    /// Slots still to be re-checked in this resolution
    pending: VecDeque<Slot>,
    /// Collections since the last insertion
    chain: u32,
    events: Vec<BoardEvent>,
    listeners: Vec<Box<dyn CascadeListener>>,
}

impl fmt::Debug for CascadeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CascadeController")
            .field("grid", &self.grid)
            .field("state", &self.state)
            .field("inserted", &self.inserted)
            .field("origin", &self.origin)
            .field("pending", &self.pending)
            .field("chain", &self.chain)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl CascadeController {
    /// Create a controller over an empty grid
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        Ok(Self::with_grid(Grid::new(config)?))
    }

    /// Create a controller over an existing grid.
    ///
    /// Starts in `GameOver` if every entry slot is already occupied.
    pub fn with_grid(grid: Grid) -> Self {
        let state = if grid.all_entry_slots_occupied() {
            CascadeState::GameOver
        } else {
            CascadeState::Idle
        };
        Self {
            grid,
            state,
            inserted: None,
            origin: None,
            pending: VecDeque::new(),
            chain: 0,
            events: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn CascadeListener>) {
        self.listeners.push(listener);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> CascadeState {
        self.state
    }

    /// True only while quiescent; the host must gate input on this
    pub fn accepts_input(&self) -> bool {
        self.state == CascadeState::Idle
    }

    pub fn is_game_over(&self) -> bool {
        self.state == CascadeState::GameOver
    }

    pub fn chain(&self) -> u32 {
        self.chain
    }

    /// Game-over condition on the current grid. Pure; safe to call repeatedly.
    pub fn check_game_over(&self) -> bool {
        self.grid.all_entry_slots_occupied()
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::capture(&self.grid, self.state, self.chain)
    }

    /// Drain buffered events, oldest first
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop a cube of `value` into `column`.
    ///
    /// Returns the slot it landed in. A full column is rejected without
    /// touching the grid.
    pub fn request_insertion(&mut self, column: u8, value: CubeValue) -> Result<Slot, CascadeError> {
        self.expect(CascadeState::Idle, Signal::Insertion)?;

        let Some(slot) = self.grid.target_slot_for_insertion(column)? else {
            debug!("insertion rejected: column {} is full", column);
            return Err(CascadeError::ColumnFull { column });
        };

        self.grid.place(slot, value)?;
        self.inserted = Some(slot);
        self.chain = 0;

        self.transition(CascadeState::AwaitingInsertAnim);
        self.gate_input(false);
        let entry = self.grid.entry_slot(column);
        self.emit(BoardEvent::CubeAddedToBoard {
            destination: slot,
            entry,
            value,
        });
        Ok(slot)
    }

    pub fn on_insertion_animation_finished(&mut self) -> Result<(), CascadeError> {
        self.expect(
            CascadeState::AwaitingInsertAnim,
            Signal::InsertionAnimationFinished,
        )?;

        if let Some(slot) = self.inserted.take() {
            self.pending.push_back(slot);
        }
        self.resolve_next()
    }

    pub fn on_collect_animation_finished(&mut self) -> Result<(), CascadeError> {
        self.expect(
            CascadeState::AwaitingCollectAnim,
            Signal::CollectAnimationFinished,
        )?;

        let Some(origin) = self.origin.take() else {
            self.settle();
            return Ok(());
        };

        let plan = compactor::compact(&mut self.grid, origin)?;

        // New re-check slots go first; unchecked ones from the previous pass follow.
        let leftovers = std::mem::take(&mut self.pending);
        self.pending.extend(plan.recheck.iter().copied());
        for slot in leftovers {
            if !self.pending.contains(&slot) {
                self.pending.push_back(slot);
            }
        }

        self.transition(CascadeState::AwaitingCompactAnim);
        self.emit(BoardEvent::BoardCompactionComplete { moves: plan.moves });
        Ok(())
    }

    pub fn on_compaction_animation_finished(&mut self) -> Result<(), CascadeError> {
        self.expect(
            CascadeState::AwaitingCompactAnim,
            Signal::CompactionAnimationFinished,
        )?;
        self.resolve_next()
    }

    /// Dispatch an animation-finished signal by kind
    pub fn animation_finished(&mut self, kind: AnimationKind) -> Result<(), CascadeError> {
        match kind {
            AnimationKind::Insertion => self.on_insertion_animation_finished(),
            AnimationKind::Collect => self.on_collect_animation_finished(),
            AnimationKind::Compaction => self.on_compaction_animation_finished(),
        }
    }

    /// Clear the grid and abandon any resolution in flight. Valid in every state.
    pub fn request_new_game(&mut self) {
        debug!("{} while {}", Signal::NewGame, self.state);
        self.grid.clear_all();
        self.inserted = None;
        self.origin = None;
        self.pending.clear();
        self.chain = 0;
        self.events.clear();
        self.transition(CascadeState::Idle);
        self.gate_input(true);
    }

    /// Check pending slots in order until one produces a merge, or settle.
    fn resolve_next(&mut self) -> Result<(), CascadeError> {
        while let Some(slot) = self.pending.pop_front() {
            if !self.grid.is_occupied(slot) {
                continue;
            }
            let matches = matcher::find_matches(&self.grid, slot);
            if matches.is_empty() {
                continue;
            }
            return self.collect(&matches);
        }

        self.settle();
        Ok(())
    }

    fn collect(&mut self, matches: &MatchSet) -> Result<(), CascadeError> {
        self.transition(CascadeState::Checking);
        let result = merge::resolve(&mut self.grid, matches)?;
        self.chain += 1;
        self.origin = Some(result.origin);

        debug!(
            "collected {} cube(s) into {}: {} -> {} (chain {})",
            matches.len(),
            result.origin,
            result.original_value,
            result.merged_value,
            self.chain
        );

        self.transition(CascadeState::AwaitingCollectAnim);
        self.emit(BoardEvent::CubesCollected {
            origin: result.origin,
            cleared: result.cleared,
            original_value: result.original_value,
            merged_value: result.merged_value,
        });
        Ok(())
    }

    /// Resolution finished: run the game-over check and go quiescent.
    fn settle(&mut self) {
        self.inserted = None;
        self.origin = None;
        self.pending.clear();

        if self.check_game_over() {
            self.transition(CascadeState::GameOver);
            info!("game over: every entry slot is occupied");
            self.emit(BoardEvent::GameOver);
        } else {
            self.transition(CascadeState::Idle);
            self.gate_input(true);
        }
    }

    fn expect(&self, state: CascadeState, signal: Signal) -> Result<(), CascadeError> {
        if self.state == state {
            Ok(())
        } else {
            debug!("rejected {} while {}", signal, self.state);
            Err(CascadeError::InvalidTransition {
                state: self.state,
                signal,
            })
        }
    }

    fn transition(&mut self, next: CascadeState) {
        if self.state != next {
            debug!("{} -> {}", self.state, next);
        }
        self.state = next;
    }

    fn gate_input(&mut self, enabled: bool) {
        for listener in &mut self.listeners {
            listener.on_input_gate(enabled);
        }
    }

    fn emit(&mut self, event: BoardEvent) {
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
        self.events.push(event);
    }
}
