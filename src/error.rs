//! Error taxonomy
//!
//! Library APIs that ingest untrusted data return `Result`; the decision
//! boundary in [`crate::engine`] never propagates these to the host, it
//! degrades to the fallback move instead.

/// Errors raised while ingesting a host board grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("cell value {value} at ({x}, {y}, {z}) outside the 0-2 domain")]
    InvalidCell { x: u8, y: u8, z: u8, value: u8 },

    #[error("floating piece at ({x}, {y}, {z}): empty cell below an occupied one")]
    FloatingPiece { x: u8, y: u8, z: u8 },
}

/// Errors raised when validating an [`crate::EngineConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
