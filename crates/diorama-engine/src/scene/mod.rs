//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic mesh draw commands
//! - provide deterministic ordering (layer + insertion order)
//! - compose hierarchical transforms through a transform stack

mod cmd;
mod key;
mod layer;
mod list;

pub use cmd::{DrawCmd, DrawMode};
pub use key::SortKey;
pub use layer::Layer;
pub use list::{DrawItem, DrawList};
