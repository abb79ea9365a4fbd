//! Game session - a controller paired with its next-cube source.

use crate::core::{CascadeController, CascadeError, CubeSpawner, GridConfig, GridError, GridSnapshot};
use crate::driver::{drop_and_settle, SettleReport};
use crate::types::{CubeValue, Slot};

#[derive(Debug)]
pub struct GameSession {
    controller: CascadeController,
    spawner: CubeSpawner,
}

impl GameSession {
    pub fn new(config: GridConfig, seed: u32) -> Result<Self, GridError> {
        Ok(Self {
            controller: CascadeController::new(config)?,
            spawner: CubeSpawner::new(seed),
        })
    }

    pub fn controller(&self) -> &CascadeController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CascadeController {
        &mut self.controller
    }

    /// Value the next spawned cube will carry
    pub fn next_value(&self) -> CubeValue {
        self.spawner.peek()
    }

    pub fn preview<const N: usize>(&self) -> [CubeValue; N] {
        self.spawner.peek_n()
    }

    /// Start an insertion without resolving it.
    ///
    /// `None` takes the spawner's next value, which is only consumed if the
    /// insertion is accepted.
    pub fn insert(&mut self, column: u8, value: Option<CubeValue>) -> Result<Slot, CascadeError> {
        let v = value.unwrap_or_else(|| self.spawner.peek());
        let slot = self.controller.request_insertion(column, v)?;
        if value.is_none() {
            self.spawner.draw();
        }
        Ok(slot)
    }

    /// Drop the next spawned cube into `column` and resolve it instantly
    pub fn play(&mut self, column: u8) -> Result<SettleReport, CascadeError> {
        let value = self.spawner.peek();
        let report = drop_and_settle(&mut self.controller, column, value)?;
        self.spawner.draw();
        Ok(report)
    }

    /// New game with the spawner replaying from its seed
    pub fn restart(&mut self) {
        self.controller.request_new_game();
        self.spawner.reset();
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.controller.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CascadeState;

    #[test]
    fn play_consumes_spawned_values_in_order() {
        let mut session = GameSession::new(GridConfig::new(5, 6), 11).unwrap();
        let upcoming: [CubeValue; 3] = session.preview();

        // Columns two apart never touch, so nothing merges.
        for (expected, column) in upcoming.into_iter().zip([0u8, 2, 4]) {
            assert_eq!(session.next_value(), expected);
            let report = session.play(column).unwrap();
            assert_eq!(report.collections(), 0);
            assert_eq!(
                session.controller().grid().value(Slot::new(column, 0)),
                Some(expected)
            );
        }
    }

    #[test]
    fn rejected_insert_keeps_spawned_value() {
        let mut session = GameSession::new(GridConfig::new(1, 1), 3).unwrap();
        let first = session.next_value();
        session.play(0).unwrap();
        assert_eq!(session.controller().state(), CascadeState::GameOver);

        let upcoming = session.next_value();
        assert!(session.insert(0, None).is_err());
        assert_eq!(session.next_value(), upcoming);
        assert_eq!(session.controller().grid().value(Slot::new(0, 0)), Some(first));
    }

    #[test]
    fn explicit_value_does_not_consume_spawner() {
        let mut session = GameSession::new(GridConfig::new(2, 2), 8).unwrap();
        let upcoming = session.next_value();
        session.insert(1, Some(9)).unwrap();
        assert_eq!(session.next_value(), upcoming);
    }

    #[test]
    fn restart_replays_spawn_sequence() {
        let mut session = GameSession::new(GridConfig::new(3, 3), 21).unwrap();
        let before: [CubeValue; 4] = session.preview();
        session.play(1).unwrap();
        session.restart();
        assert_eq!(session.preview::<4>(), before);
        assert_eq!(session.snapshot().occupied(), 0);
        assert!(session.snapshot().playable());
    }
}
