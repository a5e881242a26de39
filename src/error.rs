//! Error types for ndcopy
//!
//! Errors are raised only while *constructing* array views. The copy engine
//! itself treats layout mismatches as caller contracts and never reports
//! them; see the crate docs.

use thiserror::Error;

/// Result type alias using ndcopy's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building array views
#[derive(Error, Debug)]
pub enum Error {
    /// Element count of the data does not match the requested shape
    #[error("Element count mismatch: shape {shape:?} needs {expected} elements, got {got}")]
    ElementCountMismatch {
        /// Requested shape
        shape: Vec<usize>,
        /// Elements the shape requires
        expected: usize,
        /// Elements actually supplied
        got: usize,
    },

    /// Shape and strides have different ranks
    #[error("Rank mismatch: shape has {shape_rank} dims, strides has {strides_rank}")]
    RankMismatch {
        /// Rank of the shape
        shape_rank: usize,
        /// Rank of the stride vector
        strides_rank: usize,
    },

    /// A strided view would address elements outside its backing buffer
    #[error("View out of bounds: needs {needed} elements, buffer holds {available}")]
    ViewOutOfBounds {
        /// Highest element index the view can reach, plus one
        needed: usize,
        /// Elements available in the backing buffer
        available: usize,
    },

    /// A strided view would address elements before the start of its buffer
    #[error("View reaches {below} elements below the start of its buffer")]
    ViewBelowBuffer {
        /// How far below the buffer start the view reaches
        below: usize,
    },
}
