//! Headless drivers for the cascade controller.
//!
//! Hosts with a real presentation layer call the controller's
//! animation-finished handlers as their animations end. Everything else
//! (tests, benchmarks, bots, the network adapter's auto mode) can use these
//! helpers, which treat every animation as instantaneous.

pub mod driver;
pub mod session;

pub use cube_drop_core as core;
pub use cube_drop_types as types;

pub use driver::{drop_and_settle, settle, SettleReport};
pub use session::GameSession;
