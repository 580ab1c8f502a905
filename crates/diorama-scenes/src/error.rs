use thiserror::Error;

/// Errors raised while constructing scenes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("particle pool must hold at least one particle")]
    EmptyPool,

    #[error("dropout interval must be at least one frame")]
    ZeroDropoutInterval,
}
