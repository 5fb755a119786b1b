//! Zetris (workspace facade crate).
//!
//! Re-exports the engine as `zetris::{core,types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use zetris_core as core;
pub use zetris_types as types;
