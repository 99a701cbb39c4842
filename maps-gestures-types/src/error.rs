//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    /// A projection name that the gestures engine does not know about.
    #[error("unknown projection name: {0}")]
    UnknownProjection(String),
}
