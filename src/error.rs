use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MorphError {
    /// Two point sequences that must share a vertex index did not.
    #[error("point sequences differ in length ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    #[error("invalid sampling range: {0}")]
    InvalidRange(#[from] rand::distr::uniform::Error),
}
