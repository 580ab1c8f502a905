//! Diorama engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the scene layer:
//! transform builders, the primitive mesh library, the draw stream, the scene
//! clock, and the wgpu mesh renderer that consumes the stream.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod transform;
pub mod mesh;
pub mod render;
pub mod paint;
pub mod scene;
