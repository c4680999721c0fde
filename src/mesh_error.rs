//! GMapError: Unified error type for mesh-gmap public APIs
//!
//! Construction, loading and index-checked navigation all report failures
//! through this type. Lookups that simply find nothing (an orbit that was
//! never assigned a value) are `None`, not errors.

use thiserror::Error;

use crate::topology::dart::Dart;

/// Unified error type for generalized-map operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GMapError {
    /// The dart graph breaks a structural invariant (dangling link, wrong
    /// entry length, non-involutive alpha, non-commuting alphas).
    #[error("Structural violation: {0}")]
    StructuralViolation(String),
    /// An alpha index lies outside `0..=dimension`.
    #[error("alpha index {index} out of range for dimension {dimension}")]
    IndexOutOfRange { index: usize, dimension: usize },
    /// A dart index does not address a dart of this map.
    #[error("dart {dart} out of range: map has {ndarts} darts")]
    DartOutOfRange { dart: Dart, ndarts: usize },
    /// Requested dimension exceeds what a generator set can address.
    #[error("Dimensions larger than {max} are not supported (got {dimension})")]
    DimensionTooLarge { dimension: usize, max: usize },
    /// `increase_dimension` was asked to shrink the map.
    #[error("Cannot decrease dimension from {current} to {requested}")]
    CannotDecreaseDimension { current: usize, requested: usize },
    /// The two cells handed to `sew` do not have matching shapes or are
    /// already linked.
    #[error("Darts {d0} and {d1} are not sewable along alpha_{index}")]
    Unsewable { index: usize, d0: Dart, d1: Dart },
    /// The cell handed to `unsew` is not sewn (or is sewn to itself).
    #[error("Dart {dart} cannot be unsewn along alpha_{index}")]
    NotSewn { index: usize, dart: Dart },
    /// The dart belongs to a deleted component.
    #[error("Dart {dart} has been deleted")]
    Deleted { dart: Dart },
    /// Serialized input could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),
    /// Underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for GMapError {
    fn from(e: std::io::Error) -> Self {
        GMapError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for GMapError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            GMapError::Io(e.to_string())
        } else {
            GMapError::Parse(e.to_string())
        }
    }
}

impl GMapError {
    pub(crate) fn structural(message: impl Into<String>) -> Self {
        GMapError::StructuralViolation(message.into())
    }
}
