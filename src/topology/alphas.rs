//! Generator sets: which alpha involutions an orbit traversal may follow.
//!
//! A generator set is either a finite explicit set of alpha indices, or a
//! finite explicit set plus a *cofinite tail* "and every index from `t`
//! upward". The tail lets "every alpha except `i`" be written once and work
//! for any dimension: the traversal clips it at the map's own dimension.

use std::fmt;

use crate::mesh_error::GMapError;

/// Largest dimension a generator set can address.
///
/// Explicit indices are stored in a `u64` bitfield. The number of darts of a
/// cell grows exponentially with dimension, so this is far beyond practical use.
pub const MAX_DIMENSION: usize = 63;

#[inline]
const fn mask_below(k: usize) -> u64 {
    if k > MAX_DIMENSION {
        !0
    } else {
        (1u64 << k) - 1
    }
}

/// Set of alpha indices used as generators of an orbit.
///
/// Values are kept normalized (explicit bits never overlap the tail, and a
/// tail starting past [`MAX_DIMENSION`] is folded away) so derived equality
/// and hashing compare the denoted sets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Alphas {
    /// Bit `i` set means `alpha_i` is a generator.
    Finite(u64),
    /// Explicit bits plus every index `>= from`.
    Cofinite { explicit: u64, from: usize },
}

impl Alphas {
    /// No generators: every orbit is a single dart.
    pub const DART: Self = Alphas::Finite(0);
    /// Every alpha: orbits are connected components.
    pub const ALL: Self = Alphas::cofinite(0, 0);
    pub const VERTEX: Self = Alphas::cell(0);
    pub const EDGE: Self = Alphas::cell(1);
    pub const FACE: Self = Alphas::cell(2);
    /// Every alpha except 0 and 1.
    pub const HALF_EDGE: Self = Alphas::cofinite(0, 2);
    /// Every alpha except 0 and 2.
    pub const ANGLE: Self = Alphas::cofinite(0b10, 3);
    /// Every alpha except 1 and 2.
    pub const SIDE: Self = Alphas::cofinite(0b1, 3);

    /// Builds a normalized cofinite set.
    pub const fn cofinite(explicit: u64, from: usize) -> Self {
        if from > MAX_DIMENSION {
            Alphas::Finite(explicit)
        } else {
            Alphas::Cofinite {
                explicit: explicit & mask_below(from),
                from,
            }
        }
    }

    /// Every alpha index except `i`, for any dimension.
    ///
    /// `i` must not exceed [`MAX_DIMENSION`].
    pub const fn cell(i: usize) -> Self {
        Alphas::cofinite(mask_below(i), i + 1)
    }

    /// Every alpha index in `0..=dim` except `i`.
    pub const fn cell_in(i: usize, dim: usize) -> Self {
        let all = mask_below(dim + 1);
        if i > MAX_DIMENSION {
            Alphas::Finite(all)
        } else {
            Alphas::Finite(all & !(1u64 << i))
        }
    }

    /// Every alpha index at distance greater than one from `i`: the indices
    /// whose orbit is matched up when two `i`-cells are sewn.
    pub const fn sewing(i: usize) -> Self {
        let below = if i >= 2 { mask_below(i - 1) } else { 0 };
        Alphas::cofinite(below, i + 2)
    }

    /// Finite set of the given indices.
    ///
    /// # Errors
    /// `IndexOutOfRange` if an index exceeds [`MAX_DIMENSION`].
    pub fn from_indices<I>(indices: I) -> Result<Self, GMapError>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut bits = 0u64;
        for i in indices {
            if i > MAX_DIMENSION {
                return Err(GMapError::IndexOutOfRange {
                    index: i,
                    dimension: MAX_DIMENSION,
                });
            }
            bits |= 1 << i;
        }
        Ok(Alphas::Finite(bits))
    }

    /// Adds the tail "every index from `from` upward".
    pub fn with_tail(self, from: usize) -> Self {
        match self {
            Alphas::Finite(bits) => Alphas::cofinite(bits, from),
            Alphas::Cofinite { explicit, from: old } => {
                let from = from.min(old);
                Alphas::cofinite(explicit, from)
            }
        }
    }

    /// Restores the normalized form of a value built outside the
    /// constructors, e.g. one decoded from external data.
    pub const fn normalized(self) -> Self {
        match self {
            Alphas::Finite(bits) => Alphas::Finite(bits),
            Alphas::Cofinite { explicit, from } => Alphas::cofinite(explicit, from),
        }
    }

    /// Whether `alpha_i` is a generator.
    #[inline]
    pub const fn has(self, i: usize) -> bool {
        match self {
            Alphas::Finite(bits) => i <= MAX_DIMENSION && (bits >> i) & 1 == 1,
            Alphas::Cofinite { explicit, from } => i >= from || (explicit >> i) & 1 == 1,
        }
    }

    /// Generator indices in `0..=dim`, ascending.
    #[inline]
    pub fn indices(self, dim: usize) -> impl Iterator<Item = usize> + Clone {
        (0..=dim.min(MAX_DIMENSION)).filter(move |&i| self.has(i))
    }

    /// Explicitly listed indices, ignoring the tail.
    pub fn explicit_indices(self) -> impl Iterator<Item = usize> {
        let bits = match self {
            Alphas::Finite(bits) => bits,
            Alphas::Cofinite { explicit, .. } => explicit,
        };
        (0..=MAX_DIMENSION).filter(move |&i| (bits >> i) & 1 == 1)
    }

    /// Start of the cofinite tail, if any.
    pub fn tail(self) -> Option<usize> {
        match self {
            Alphas::Finite(_) => None,
            Alphas::Cofinite { from, .. } => Some(from),
        }
    }

    /// Checks that every explicit index addresses an alpha of a map of
    /// dimension `dim`. A tail reaching past `dim` is never an error.
    ///
    /// # Errors
    /// `IndexOutOfRange` for the first explicit index greater than `dim`.
    pub fn check(self, dim: usize) -> Result<(), GMapError> {
        match self.explicit_indices().find(|&i| i > dim) {
            Some(index) => Err(GMapError::IndexOutOfRange {
                index,
                dimension: dim,
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Alphas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let explicit: Vec<String> = self.explicit_indices().map(|i| i.to_string()).collect();
        write!(f, "<{}", explicit.join(","))?;
        if let Some(from) = self.tail() {
            if !explicit.is_empty() {
                write!(f, ",")?;
            }
            write!(f, "{from}..")?;
        }
        write!(f, ">")
    }
}
