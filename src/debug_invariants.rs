//! Invariant checking hooks shared by the map and its derived structures.
//!
//! Checks run after every mutation in debug builds, or in release builds with
//! the `strict-invariants` / `check-invariants` features. They are full scans
//! of the dart table, so they are kept out of plain release builds.

use crate::mesh_error::GMapError;

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), GMapError>;

    /// Panic on a broken invariant when invariant checking is enabled.
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "debug_assert_invariants");
    }
}

/// Run a fallible check and panic on error when invariant checking is
/// enabled; expands to nothing otherwise.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
