use log::debug;

use crate::core::{CascadeController, CascadeError};
use crate::types::{BoardEvent, CascadeState, CubeValue, Slot};

/// What happened while a cascade was driven to quiescence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettleReport {
    /// Slot filled by the insertion, when the drive started with one
    pub inserted: Option<Slot>,
    /// Every event emitted, in order
    pub events: Vec<BoardEvent>,
    pub game_over: bool,
}

impl SettleReport {
    /// Number of collections (merges) performed
    pub fn collections(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BoardEvent::CubesCollected { .. }))
            .count()
    }

    /// Number of cubes moved by compaction
    pub fn moves(&self) -> usize {
        self.events
            .iter()
            .map(|e| match e {
                BoardEvent::BoardCompactionComplete { moves } => moves.len(),
                _ => 0,
            })
            .sum()
    }

    /// Highest value produced by a merge, if any
    pub fn best_merge(&self) -> Option<CubeValue> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BoardEvent::CubesCollected { merged_value, .. } => Some(*merged_value),
                _ => None,
            })
            .max()
    }
}

/// Fire every pending animation-finished signal instantly until the
/// controller is quiescent. Drains the controller's buffered events into the report.
pub fn settle(controller: &mut CascadeController) -> Result<SettleReport, CascadeError> {
    loop {
        match controller.state() {
            CascadeState::AwaitingInsertAnim => controller.on_insertion_animation_finished()?,
            CascadeState::AwaitingCollectAnim => controller.on_collect_animation_finished()?,
            CascadeState::AwaitingCompactAnim => controller.on_compaction_animation_finished()?,
            CascadeState::Idle | CascadeState::Checking | CascadeState::GameOver => break,
        }
    }

    let events = controller.take_events();
    debug!(
        "settled after {} event(s) in {}",
        events.len(),
        controller.state()
    );
    Ok(SettleReport {
        inserted: None,
        events,
        game_over: controller.is_game_over(),
    })
}

/// Insert a cube and resolve everything it sets off.
pub fn drop_and_settle(
    controller: &mut CascadeController,
    column: u8,
    value: CubeValue,
) -> Result<SettleReport, CascadeError> {
    let slot = controller.request_insertion(column, value)?;
    let mut report = settle(controller)?;
    report.inserted = Some(slot);
    Ok(report)
}
