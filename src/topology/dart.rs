//! `Dart`: a strong, zero-cost handle for the atomic flags of a generalized map
//!
//! A dart is one oriented incidence flag of a subdivision (one corner of one
//! edge of one face, generalized to N dimensions). Darts live in an arena owned
//! by a [`GMap`](crate::topology::gmap::GMap) and are addressed by their
//! position in that arena, so a `Dart` is nothing more than a `usize` index.
//!
//! This module provides:
//! - A transparent `Dart` newtype around `usize`.
//! - Implementations of common traits (`Debug`, `Display`, ordering,
//!   hashing, serde) so darts can be used as map keys and printed easily.
//!
//! Identity, not structure, is what makes two darts equal: attachment maps
//! key their values by this index.

use std::fmt;

/// Index of a dart inside its map's arena.
///
/// # Memory layout
/// This type is `repr(transparent)` and has the same size and alignment as
/// `usize`, so the flat alpha table of a map is a plain `Vec<usize>` in
/// memory.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Dart(pub usize);

impl Dart {
    /// Returns the arena index of this dart.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for Dart {
    #[inline]
    fn from(raw: usize) -> Self {
        Dart(raw)
    }
}

impl fmt::Debug for Dart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Dart").field(&self.0).finish()
    }
}

/// Prints only the raw index.
impl fmt::Display for Dart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
