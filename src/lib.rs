//! Block drop (workspace facade crate).
//!
//! Re-exports the engine crates under `block_drop::{core, types}`. The
//! implementation lives in dedicated crates under `crates/`.

pub use block_drop_core as core;
pub use block_drop_types as types;
