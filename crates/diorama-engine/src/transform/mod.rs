//! Transform builders.
//!
//! Pure functions producing 4x4 affine matrices from scalar parameters. Matrices
//! compose by multiplication and apply right-to-left to points, so
//! `parent * translate(..) * rotate(..) * scale(..)` scales first and translates last.
//!
//! All angles are in degrees.

mod builders;
mod error;
mod projection;

pub use builders::{rotate, rotate_about, scale, translate, uniform_scale, view_from_eye, OUTLINE_EPSILON};
pub use error::TransformError;
pub use projection::{aspect, Projection};

pub use glam::{Mat4, Vec3, Vec4};
