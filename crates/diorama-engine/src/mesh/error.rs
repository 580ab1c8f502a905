use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("icosphere subdivision level {requested} exceeds maximum {max}")]
    TooManySubdivisions { requested: u32, max: u32 },
}
