//! Paint model shared between scenes and renderers.
//!
//! Scope:
//! - color representation (linear, straight alpha)
//! - material selection for the mesh shader

pub mod color;
mod material;

pub use color::Color;
pub use material::Material;
