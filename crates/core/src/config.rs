//! Grid configuration.

use crate::error::GridError;
use crate::types::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_DIMENSION};

/// Fixed grid dimensions, chosen once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridConfig {
    pub width: u8,
    pub height: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl GridConfig {
    pub fn new(width: u8, height: u8) -> Self {
        Self { width, height }
    }

    /// Create from environment variables
    ///
    /// `CUBE_DROP_WIDTH` and `CUBE_DROP_HEIGHT`; missing or unparseable
    /// values fall back to the defaults.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let width = env::var("CUBE_DROP_WIDTH")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.width);
        let height = env::var("CUBE_DROP_HEIGHT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.height);

        Self { width, height }
    }

    /// Reject empty or oversized grids
    pub fn validate(&self) -> Result<(), GridError> {
        let ok = |d: u8| d > 0 && d <= MAX_DIMENSION;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(GridError::InvalidGrid {
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn slot_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
