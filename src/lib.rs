//! Cube Drop (workspace facade crate).
//!
//! Re-exports the workspace crates under one `cube_drop::{adapter,core,engine,types}`
//! path; the implementation lives in dedicated crates under `crates/`.

pub use cube_drop_adapter as adapter;
pub use cube_drop_core as core;
pub use cube_drop_engine as engine;
pub use cube_drop_types as types;
