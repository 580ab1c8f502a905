use thiserror::Error;

/// Errors raised while building view/projection transforms.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("invalid aspect ratio {0}; expected a finite value > 0")]
    InvalidAspect(f32),

    #[error("invalid clip planes near={near} far={far}; expected 0 < near < far")]
    InvalidClipPlanes { near: f32, far: f32 },
}
