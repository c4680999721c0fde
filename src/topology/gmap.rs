//! `GMap`: the dart arena and its alpha involutions.
//!
//! A generalized map of dimension `N` owns an ordered arena of darts. Every
//! dart carries exactly `N + 1` alpha links, stored in one flat table indexed
//! as `dart * (N + 1) + i`. A free (boundary) link points back at its own
//! dart, so traversal never has to branch on a missing neighbor.
//!
//! Construction (`add_*`, `sew`, `unsew`, `increase_dimension`, `delete`) is
//! the only write phase. Everything else borrows the map immutably, so a finished map
//! can be shared across threads for concurrent queries.
//!
//! # Invariants
//!
//! - Closure: every link addresses a dart of this map.
//! - I1: `alpha_i(alpha_i(d)) == d` for every dart and every `i`.
//! - I2: `alpha_i(alpha_j(d)) == alpha_j(alpha_i(d))` whenever `|i - j| >= 2`.
//!
//! All three are checked by [`GMap::from_alpha`] and re-asserted after each
//! mutation in debug builds or when the `check-invariants` feature is enabled.
//! A map keeps the [`ValidationOptions`] it was built with, so a map loaded
//! with relaxed commutation checks is re-checked with the same leniency.
//!
//! # Deletion
//!
//! [`GMap::delete`] removes a whole connected component. Deleted darts keep
//! their arena slots and links, so dart numbers stay stable, but they are
//! skipped by [`GMap::darts`] and every enumeration built on it, refused by
//! `sew`/`unsew`, and left out when the map is serialized.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::Index;

use itertools::{EitherOrBoth, Itertools};

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::GMapError;
use crate::topology::alphas::{Alphas, MAX_DIMENSION};
use crate::topology::dart::Dart;
use crate::topology::validation::{ValidationOptions, validate_gmap};

/// Generalized map over an arena of darts.
#[derive(Clone)]
pub struct GMap {
    dimension: usize,
    /// Flat alpha table: `alpha[d * (dimension + 1) + i]`.
    alpha: Vec<Dart>,
    /// One flag per arena slot.
    deleted: Vec<bool>,
    validation: ValidationOptions,
}

/// Equality compares topology and deletion marks, not validation options.
impl PartialEq for GMap {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension
            && self.alpha == other.alpha
            && self.deleted == other.deleted
    }
}

impl Eq for GMap {}

impl Index<(Dart, usize)> for GMap {
    type Output = Dart;

    /// Unchecked navigation: `g[(d, i)]` is `alpha_i(d)`.
    ///
    /// # Panics
    /// Panics if `d` is not a dart of this map. An index `i > dimension`
    /// silently reads a neighboring dart's entry; use [`GMap::alpha`] for
    /// checked access.
    #[inline(always)]
    fn index(&self, (d, i): (Dart, usize)) -> &Self::Output {
        debug_assert!(i <= self.dimension, "alpha_{i} out of range");
        &self.alpha[d.0 * (self.dimension + 1) + i]
    }
}

impl GMap {
    /// Creates an empty map of the given dimension.
    ///
    /// # Errors
    /// `DimensionTooLarge` if `dimension > MAX_DIMENSION`.
    pub fn new(dimension: usize) -> Result<Self, GMapError> {
        check_dimension(dimension)?;
        Ok(GMap {
            dimension,
            alpha: Vec::new(),
            deleted: Vec::new(),
            validation: ValidationOptions::default(),
        })
    }

    /// Builds a map from one alpha list per dart.
    ///
    /// `darts[d][i]` is `alpha_i(d)`. The slice is copied, so later changes
    /// to the caller's collection never reach the map.
    ///
    /// # Errors
    /// `StructuralViolation` if an entry does not have `dimension + 1` links
    /// or the resulting map fails validation.
    pub fn with_darts(dimension: usize, darts: &[Vec<Dart>]) -> Result<Self, GMapError> {
        check_dimension(dimension)?;
        let mut alpha = Vec::with_capacity(darts.len() * (dimension + 1));
        for (d, links) in darts.iter().enumerate() {
            if links.len() != dimension + 1 {
                return Err(GMapError::structural(format!(
                    "dart {d} has {} alpha links, expected {}",
                    links.len(),
                    dimension + 1
                )));
            }
            alpha.extend_from_slice(links);
        }
        Self::from_alpha(dimension, alpha)
    }

    /// Builds a map from a flat alpha table, validating every invariant.
    pub fn from_alpha(dimension: usize, alpha: Vec<Dart>) -> Result<Self, GMapError> {
        Self::from_alpha_with(dimension, alpha, ValidationOptions::default())
    }

    /// Builds a map from a flat alpha table with explicit validation options.
    ///
    /// Link ranges and involutions are always checked; `options` decides how
    /// commutation failures are handled, now and after every later mutation.
    pub fn from_alpha_with(
        dimension: usize,
        alpha: Vec<Dart>,
        options: ValidationOptions,
    ) -> Result<Self, GMapError> {
        check_dimension(dimension)?;
        if alpha.len() % (dimension + 1) != 0 {
            return Err(GMapError::structural(format!(
                "alpha table has {} entries, not a multiple of {}",
                alpha.len(),
                dimension + 1
            )));
        }
        let n = alpha.len() / (dimension + 1);
        let g = GMap {
            dimension,
            alpha,
            deleted: vec![false; n],
            validation: options,
        };
        validate_gmap(&g, options)?;
        log::debug!(
            "built GMap of dimension {} with {} darts",
            g.dimension,
            g.ndarts()
        );
        Ok(g)
    }

    #[inline(always)]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of arena slots, deleted darts included.
    #[inline(always)]
    pub fn ndarts(&self) -> usize {
        self.alpha.len() / (self.dimension + 1)
    }

    /// Number of darts that are not deleted.
    pub fn nlive_darts(&self) -> usize {
        self.deleted.iter().filter(|&&x| !x).count()
    }

    /// Options the map was validated with.
    #[inline]
    pub fn validation_options(&self) -> ValidationOptions {
        self.validation
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alpha.is_empty()
    }

    /// All live darts in arena order.
    pub fn darts(&self) -> impl DoubleEndedIterator<Item = Dart> + Clone + '_ {
        (0..self.ndarts())
            .map(Dart)
            .filter(|&d| !self.deleted[d.0])
    }

    /// The flat alpha table, `dimension + 1` entries per dart.
    pub fn alpha_table(&self) -> &[Dart] {
        &self.alpha
    }

    /// Alpha links of one dart.
    pub fn links(&self, d: Dart) -> Result<&[Dart], GMapError> {
        self.check_dart(d)?;
        let start = d.0 * (self.dimension + 1);
        Ok(&self.alpha[start..start + self.dimension + 1])
    }

    #[inline]
    pub fn contains(&self, d: Dart) -> bool {
        d.0 < self.ndarts()
    }

    pub fn check_dart(&self, d: Dart) -> Result<(), GMapError> {
        if self.contains(d) {
            Ok(())
        } else {
            Err(GMapError::DartOutOfRange {
                dart: d,
                ndarts: self.ndarts(),
            })
        }
    }

    pub fn check_index(&self, i: usize) -> Result<(), GMapError> {
        if i <= self.dimension {
            Ok(())
        } else {
            Err(GMapError::IndexOutOfRange {
                index: i,
                dimension: self.dimension,
            })
        }
    }

    /// `alpha_i(d)`, checked.
    pub fn alpha(&self, d: Dart, i: usize) -> Result<Dart, GMapError> {
        self.check_dart(d)?;
        self.check_index(i)?;
        Ok(self[(d, i)])
    }

    /// Applies alpha indices left to right starting at `d`.
    ///
    /// `g.al(d, [0, 1])` is `alpha_1(alpha_0(d))`.
    ///
    /// # Errors
    /// `IndexOutOfRange` on the first index greater than the dimension.
    pub fn al<I>(&self, d: Dart, indices: I) -> Result<Dart, GMapError>
    where
        I: IntoIterator<Item = usize>,
    {
        self.check_dart(d)?;
        indices.into_iter().try_fold(d, |d, i| {
            self.check_index(i)?;
            Ok(self[(d, i)])
        })
    }

    /// Whether `alpha_i(d)` is `d` itself.
    ///
    /// # Panics
    /// Panics if `d` is not a dart of this map, like indexing; use
    /// [`GMap::alpha`] for checked access.
    #[inline]
    pub fn is_free(&self, d: Dart, i: usize) -> bool {
        self[(d, i)] == d
    }

    /// Whether `d` lies in a deleted component. Darts outside the arena are
    /// not deleted.
    #[inline]
    pub fn is_deleted(&self, d: Dart) -> bool {
        self.deleted.get(d.0).copied().unwrap_or(false)
    }

    fn check_live(&self, d: Dart) -> Result<(), GMapError> {
        self.check_dart(d)?;
        if self.deleted[d.0] {
            return Err(GMapError::Deleted { dart: d });
        }
        Ok(())
    }

    #[inline(always)]
    fn link_mut(&mut self, d: Dart, i: usize) -> &mut Dart {
        &mut self.alpha[d.0 * (self.dimension + 1) + i]
    }

    /// Iterates the cycle obtained by repeatedly applying `indices` to `d`
    /// until it returns to `d`. The first item is `d` itself.
    pub fn cycle<'a>(
        &'a self,
        d: Dart,
        indices: &'a [usize],
    ) -> Result<impl Iterator<Item = Dart> + 'a, GMapError> {
        self.check_dart(d)?;
        if let Some(&i) = indices.iter().find(|&&i| i > self.dimension) {
            return Err(GMapError::IndexOutOfRange {
                index: i,
                dimension: self.dimension,
            });
        }
        Ok(std::iter::successors(Some(d), move |&x| {
            let next = indices.iter().fold(x, |x, &i| self[(x, i)]);
            (next != d).then_some(next)
        }))
    }

    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    /// Grows every dart to `dim + 1` links; new links start free.
    pub fn increase_dimension(&mut self, dim: usize) -> Result<(), GMapError> {
        if dim < self.dimension {
            return Err(GMapError::CannotDecreaseDimension {
                current: self.dimension,
                requested: dim,
            });
        }
        check_dimension(dim)?;
        let n = self.ndarts();
        let mut alpha = Vec::with_capacity(n * (dim + 1));
        for d in 0..n {
            let start = d * (self.dimension + 1);
            alpha.extend_from_slice(&self.alpha[start..start + self.dimension + 1]);
            alpha.extend(std::iter::repeat_n(Dart(d), dim - self.dimension));
        }
        self.alpha = alpha;
        self.dimension = dim;
        crate::debug_invariants!(self.validate_invariants(), "GMap::increase_dimension");
        Ok(())
    }

    /// Appends a dart whose links are all free.
    pub fn add_dart(&mut self) -> Dart {
        let d = Dart(self.ndarts());
        self.alpha
            .resize(self.alpha.len() + self.dimension + 1, d);
        self.deleted.push(false);
        d
    }

    /// Deletes the connected component of `d` and returns how many darts
    /// were newly marked. Deleting an already deleted component is a no-op.
    ///
    /// # Errors
    /// `DartOutOfRange` if `d` is not a dart of this map.
    pub fn delete(&mut self, d: Dart) -> Result<usize, GMapError> {
        self.check_dart(d)?;
        if self.deleted[d.0] {
            return Ok(0);
        }
        let component: Vec<Dart> = self.orbit_iter(d, Alphas::ALL).collect();
        for x in &component {
            self.deleted[x.0] = true;
        }
        log::trace!("deleted component of {d} ({} darts)", component.len());
        Ok(component.len())
    }

    fn link(&mut self, i: usize, d0: Dart, d1: Dart) -> Result<(), GMapError> {
        self.check_live(d0)?;
        self.check_live(d1)?;
        if d0 == d1 || !self.is_free(d0, i) || !self.is_free(d1, i) {
            return Err(GMapError::Unsewable { index: i, d0, d1 });
        }
        *self.link_mut(d0, i) = d1;
        *self.link_mut(d1, i) = d0;
        Ok(())
    }

    fn unlink(&mut self, i: usize, d0: Dart) {
        let d1 = self[(d0, i)];
        *self.link_mut(d0, i) = d0;
        *self.link_mut(d1, i) = d1;
    }

    /// Adds two darts joined by `alpha_0` and returns the first.
    pub fn add_edge(&mut self) -> Dart {
        let d0 = self.add_dart();
        let d1 = self.add_dart();
        *self.link_mut(d0, 0) = d1;
        *self.link_mut(d1, 0) = d0;
        d0
    }

    /// Adds a closed cycle of `2n` darts linked alternately by `alpha_i` and
    /// `alpha_j`, and returns its lowest-numbered dart.
    ///
    /// The lower-numbered dart of each `i`-link has the same parity in the
    /// cycle as the returned dart.
    ///
    /// # Errors
    /// `StructuralViolation` if `i == j`, if `n == 0`, or if `i` and `j` must
    /// commute (`|i - j| >= 2`) and `n > 2`, since `alpha_i alpha_j` is then
    /// not an involution.
    pub fn add_cycle(&mut self, i: usize, j: usize, n: usize) -> Result<Dart, GMapError> {
        self.check_index(i)?;
        self.check_index(j)?;
        if i == j {
            return Err(GMapError::structural(format!(
                "a cycle needs two distinct alphas, got alpha_{i} twice"
            )));
        }
        if n == 0 {
            return Err(GMapError::structural("a cycle needs at least one pair of darts"));
        }
        if i.abs_diff(j) >= 2 && n > 2 {
            return Err(GMapError::structural(format!(
                "a cycle of {n} alpha_{i}/alpha_{j} pairs breaks their commutation"
            )));
        }
        let start = self.add_dart();
        let start1 = self.add_dart();
        self.link(i, start, start1)?;
        let mut prev = start1;
        for _ in 1..n {
            let d0 = self.add_dart();
            self.link(j, prev, d0)?;
            let d1 = self.add_dart();
            self.link(i, d0, d1)?;
            prev = d1;
        }
        self.link(j, prev, start)?;
        crate::debug_invariants!(self.validate_invariants(), "GMap::add_cycle");
        Ok(start)
    }

    /// Adds an isolated `n`-gon (a `(1, 0)` cycle) and returns its first dart,
    /// which sits on the polygon's first edge at its first vertex.
    pub fn add_polygon(&mut self, n: usize) -> Result<Dart, GMapError> {
        self.add_cycle(1, 0, n)
    }

    /// Sews the `i`-cell at `d0` to the `i`-cell at `d1` so that they share an
    /// incident `(i - 1)`-cell.
    ///
    /// The orbits of `d0` and `d1` under every alpha at distance greater than
    /// one from `i` are matched by breadth-first discovery order; they must be
    /// disjoint, isomorphic under that matching, and free along `alpha_i`.
    /// Returns the pairs of darts that were linked.
    pub fn sew(&mut self, i: usize, d0: Dart, d1: Dart) -> Result<HashMap<Dart, Dart>, GMapError> {
        self.check_live(d0)?;
        self.check_live(d1)?;
        self.check_index(i)?;
        let unsewable = || GMapError::Unsewable { index: i, d0, d1 };
        let a = Alphas::sewing(i);

        let mut m01: HashMap<Dart, Dart> = HashMap::new();
        let mut image: HashSet<Dart> = HashSet::new();
        for pair in self
            .orbit_steps(d0, a)
            .zip_longest(self.orbit_steps(d1, a))
        {
            let (x0, x1) = match pair {
                EitherOrBoth::Both((s0, x0), (s1, x1)) if s0 == s1 => (x0, x1),
                _ => return Err(unsewable()),
            };
            if !self.is_free(x0, i) || !self.is_free(x1, i) {
                return Err(unsewable());
            }
            m01.insert(x0, x1);
            image.insert(x1);
        }
        if m01.keys().any(|x| image.contains(x)) {
            return Err(unsewable());
        }
        for (&x0, &x1) in &m01 {
            for j in a.indices(self.dimension) {
                if m01.get(&self[(x0, j)]) != Some(&self[(x1, j)]) {
                    return Err(unsewable());
                }
            }
        }

        for (&x0, &x1) in &m01 {
            self.link(i, x0, x1)?;
        }
        log::trace!("sewed {} dart pairs along alpha_{i}", m01.len());
        crate::debug_invariants!(self.validate_invariants(), "GMap::sew");
        Ok(m01)
    }

    /// Unsews the pair of `i`-cells at `d`. Returns the pairs of darts that
    /// were unlinked.
    pub fn unsew(&mut self, d: Dart, i: usize) -> Result<HashMap<Dart, Dart>, GMapError> {
        self.check_live(d)?;
        self.check_index(i)?;
        let orbit: Vec<Dart> = self.orbit_iter(d, Alphas::sewing(i)).collect();
        let pairs: HashMap<Dart, Dart> = orbit.iter().map(|&x| (x, self[(x, i)])).collect();
        if pairs
            .iter()
            .any(|(x, y)| x == y || pairs.contains_key(y))
        {
            return Err(GMapError::NotSewn { index: i, dart: d });
        }
        for x in orbit {
            self.unlink(i, x);
        }
        log::trace!("unsewed {} dart pairs along alpha_{i}", pairs.len());
        crate::debug_invariants!(self.validate_invariants(), "GMap::unsew");
        Ok(pairs)
    }
}

fn check_dimension(dimension: usize) -> Result<(), GMapError> {
    if dimension > MAX_DIMENSION {
        Err(GMapError::DimensionTooLarge {
            dimension,
            max: MAX_DIMENSION,
        })
    } else {
        Ok(())
    }
}

impl DebugInvariants for GMap {
    fn validate_invariants(&self) -> Result<(), GMapError> {
        validate_gmap(self, self.validation)
    }
}

impl fmt::Debug for GMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.ndarts().saturating_sub(1).to_string().len();
        writeln!(f, "GMap {{")?;
        writeln!(f, "  dimension: {}", self.dimension)?;
        writeln!(f, "  alpha: {{")?;
        for d in self.darts() {
            let links = (0..=self.dimension)
                .map(|i| format!("{:width$}", self[(d, i)].0))
                .join(", ");
            writeln!(f, "    {:width$}: [{links}],", d.0)?;
        }
        write!(f, "  }}\n}}")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::topology::validation::ViolationHandling;

    pub(crate) fn darts(x: impl IntoIterator<Item = usize>) -> Vec<Dart> {
        x.into_iter().map(Dart).collect()
    }

    /// Square split along one diagonal into two triangles.
    pub(crate) fn split_square() -> GMap {
        #[rustfmt::skip]
        let alpha = darts([
            1, 5, 7,
            0, 2, 6,
            3, 1, 2,
            2, 4, 3,
            5, 3, 4,
            4, 0, 5,
            7, 11, 1,
            6, 8, 0,
            9, 7, 8,
            8, 10, 9,
            11, 9, 10,
            10, 6, 11,
        ]);
        GMap::from_alpha(2, alpha).unwrap()
    }

    #[test]
    fn load_and_navigate() {
        let g = split_square();
        assert_eq!(g.ndarts(), 12);
        assert_eq!(g[(Dart(0), 2)], Dart(7));
        assert_eq!(g.alpha(Dart(0), 1).unwrap(), Dart(5));
        assert_eq!(g.al(Dart(0), [0, 2, 1, 0]).unwrap(), Dart(10));
        assert_eq!(g.al(Dart(3), []).unwrap(), Dart(3));
        assert!(g.is_free(Dart(4), 2));
        assert!(!g.is_free(Dart(4), 0));
        assert_eq!(g.links(Dart(6)).unwrap(), &darts([7, 11, 1])[..]);
    }

    #[test]
    fn out_of_range_indices_are_errors() {
        let g = split_square();
        assert_eq!(
            g.al(Dart(0), [0, 3]),
            Err(GMapError::IndexOutOfRange {
                index: 3,
                dimension: 2
            })
        );
        assert!(matches!(
            g.alpha(Dart(12), 0),
            Err(GMapError::DartOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_dangling_link() {
        let err = GMap::from_alpha(1, darts([1, 0, 0, 5])).unwrap_err();
        assert!(matches!(err, GMapError::StructuralViolation(_)));
    }

    #[test]
    fn rejects_non_involution() {
        // alpha_0: 0 -> 1 -> 2 -> 0
        let err = GMap::from_alpha(0, darts([1, 2, 0])).unwrap_err();
        assert!(matches!(err, GMapError::StructuralViolation(_)));
    }

    #[test]
    fn rejects_ragged_entries() {
        let err = GMap::with_darts(1, &[darts([0, 0]), darts([1])]).unwrap_err();
        assert!(matches!(err, GMapError::StructuralViolation(_)));
    }

    #[test]
    fn commutation_failure_is_configurable() {
        // alpha_0 swaps 0<->1, alpha_2 swaps 1<->2: alpha_0 alpha_2 != alpha_2 alpha_0
        let alpha = darts([1, 0, 0, 0, 1, 2, 2, 2, 1]);
        assert!(GMap::from_alpha(2, alpha.clone()).is_err());
        let opts = ValidationOptions {
            commutation: ViolationHandling::Warn,
        };
        assert!(GMap::from_alpha_with(2, alpha.clone(), opts).is_ok());
        let opts = ValidationOptions::structural_only();
        assert!(GMap::from_alpha_with(2, alpha, opts).is_ok());
    }

    #[test]
    fn with_darts_copies_input() {
        let mut entries = vec![darts([1]), darts([0])];
        let g = GMap::with_darts(0, &entries).unwrap();
        entries[0][0] = Dart(0);
        assert_eq!(g[(Dart(0), 0)], Dart(1));
    }

    #[test]
    fn dimension_limits() {
        assert!(matches!(
            GMap::new(MAX_DIMENSION + 1),
            Err(GMapError::DimensionTooLarge { .. })
        ));
        let mut g = GMap::new(2).unwrap();
        assert!(matches!(
            g.increase_dimension(1),
            Err(GMapError::CannotDecreaseDimension { .. })
        ));
    }

    #[test]
    fn cycles() {
        let g = split_square();
        let face0: Vec<Dart> = g.cycle(Dart(0), &[1, 0]).unwrap().collect();
        let face1: Vec<Dart> = g.cycle(Dart(1), &[1, 0]).unwrap().collect();
        let edge: Vec<Dart> = g.cycle(Dart(0), &[0, 2]).unwrap().collect();
        assert_eq!(face0, darts([0, 4, 2]));
        assert_eq!(face1, darts([1, 3, 5]));
        assert_eq!(edge, darts([0, 6]));
    }

    #[test]
    fn polygon_construction() {
        let mut g = GMap::new(2).unwrap();
        let d = g.add_polygon(4).unwrap();
        assert_eq!(g.ndarts(), 8);
        assert_eq!(g.cycle(d, &[0, 1]).unwrap().count(), 4);
        assert!(g.is_free(d, 2));
        let single = g.add_polygon(1).unwrap();
        assert_eq!(g[(single, 0)], g[(single, 1)]);
        assert!(g.add_polygon(0).is_err());
        assert!(g.add_cycle(1, 1, 3).is_err());
        g.validate_invariants().unwrap();
    }

    #[test]
    fn sew_links_matching_cells() {
        let mut g = split_square();
        assert!(g.sew(1, Dart(2), Dart(4)).is_err());
        assert!(g.sew(2, Dart(2), Dart(3)).is_err());
        assert!(g.is_free(Dart(2), 2));

        let pairs = g.sew(2, Dart(2), Dart(10)).unwrap();
        assert_eq!(g[(Dart(2), 2)], Dart(10));
        assert_eq!(g[(Dart(3), 2)], Dart(11));
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[&Dart(2)], Dart(10));
        assert_eq!(pairs[&Dart(3)], Dart(11));
    }

    #[test]
    fn sew_rejects_same_size_different_shape() {
        let mut g = GMap::new(3).unwrap();
        let x = g.add_edge();
        let y = g.add_dart();
        let z = g.add_dart();
        g.sew(1, y, z).unwrap();
        assert!(g.sew(3, x, y).is_err());
        assert!(g.is_free(x, 3));

        let w = g.add_dart();
        g.sew(1, x, w).unwrap();
        let v = g.add_dart();
        g.sew(0, y, v).unwrap();
        let pairs = g.sew(3, x, y).unwrap();
        assert_eq!(pairs.len(), 3);
        assert!(!g.is_free(x, 3));
    }

    #[test]
    fn unsew_frees_whole_orbit() {
        let mut g = split_square();
        assert!(g.unsew(Dart(2), 2).is_err());
        g.unsew(Dart(2), 1).unwrap();
        assert!(g.is_free(Dart(2), 1));
        assert!(g.is_free(Dart(1), 1));

        let mut g = split_square();
        g.unsew(Dart(0), 0).unwrap();
        for d in [0, 1, 6, 7] {
            assert!(g.is_free(Dart(d), 0));
            assert!(!g.is_free(Dart(d), 2));
        }

        let mut g = split_square();
        g.unsew(Dart(0), 2).unwrap();
        for d in [0, 1, 6, 7] {
            assert!(!g.is_free(Dart(d), 0));
            assert!(g.is_free(Dart(d), 2));
        }
    }

    #[test]
    fn unsew_rejects_self_linked_orbit() {
        let mut g = GMap::from_alpha(2, darts([1, 0, 1, 0, 1, 0])).unwrap();
        assert!(matches!(g.unsew(Dart(0), 2), Err(GMapError::NotSewn { .. })));
        assert!(!g.is_free(Dart(0), 2));
    }

    #[test]
    fn increase_dimension_adds_free_links() {
        let mut g = split_square();
        g.increase_dimension(4).unwrap();
        assert_eq!(g.dimension(), 4);
        assert_eq!(g.ndarts(), 12);
        assert_eq!(g[(Dart(0), 2)], Dart(7));
        assert!(g.is_free(Dart(5), 3));
        assert!(g.is_free(Dart(5), 4));
    }

    #[test]
    fn relaxed_map_keeps_its_options_across_mutations() {
        // alpha_0 and alpha_2 do not commute at dart 0
        let alpha = darts([1, 0, 2, 0, 1, 1, 2, 2, 0]);
        let relaxed = ValidationOptions {
            commutation: ViolationHandling::Warn,
        };
        let mut g = GMap::from_alpha_with(2, alpha, relaxed).unwrap();
        assert_eq!(g.validation_options(), relaxed);
        let a = g.add_dart();
        let b = g.add_dart();
        g.sew(1, a, b).unwrap();
        g.unsew(a, 1).unwrap();
        g.increase_dimension(3).unwrap();
        g.validate_invariants().unwrap();

        let mut strict = g.clone();
        strict.validation = ValidationOptions::all();
        assert!(strict.validate_invariants().is_err());
        assert_eq!(strict, g);
    }

    #[test]
    fn add_cycle_rejects_non_commuting_cycles() {
        let mut g = GMap::new(2).unwrap();
        assert!(matches!(
            g.add_cycle(0, 2, 3),
            Err(GMapError::StructuralViolation(_))
        ));
        assert!(g.is_empty());
        let d = g.add_cycle(0, 2, 2).unwrap();
        assert_eq!(g.cycle(d, &[0, 2]).unwrap().count(), 2);
        g.add_cycle(2, 0, 1).unwrap();
        g.validate_invariants().unwrap();
    }

    #[test]
    #[should_panic]
    fn is_free_panics_outside_arena() {
        let g = split_square();
        g.is_free(Dart(12), 0);
    }

    #[test]
    fn delete_removes_whole_component() {
        let mut g = split_square();
        let tri = g.add_polygon(3).unwrap();
        assert_eq!(g.delete(Dart(13)), Ok(6));
        assert_eq!(g.delete(tri), Ok(0));
        assert_eq!(g.ndarts(), 18);
        assert_eq!(g.nlive_darts(), 12);
        assert!(g.is_deleted(Dart(17)));
        assert!(!g.is_deleted(Dart(11)));
        assert!(!g.is_deleted(Dart(40)));
        assert_eq!(g.darts().collect::<Vec<_>>(), darts(0..12));
        assert_eq!(g.darts().next_back(), Some(Dart(11)));
        assert!(matches!(
            g.delete(Dart(40)),
            Err(GMapError::DartOutOfRange { .. })
        ));
    }

    #[test]
    fn deleted_darts_leave_enumeration() {
        let mut g = split_square();
        let tri = g.add_polygon(3).unwrap();
        assert_eq!(g.one_dart_per_cell(2, None).unwrap().count(), 3);
        g.delete(tri).unwrap();
        assert_eq!(
            g.one_dart_per_cell(2, None).unwrap().collect::<Vec<_>>(),
            darts([0, 6])
        );
        assert_eq!(g.all_cells(0, None).unwrap().count(), 4);
        assert!(!format!("{g:?}").contains("12:"));
        g.validate_invariants().unwrap();
    }

    #[test]
    fn deleted_darts_cannot_be_sewn() {
        let mut g = split_square();
        let tri = g.add_polygon(3).unwrap();
        let other = g.add_polygon(3).unwrap();
        g.sew(2, tri, other).unwrap();
        g.delete(tri).unwrap();
        assert_eq!(
            g.sew(2, Dart(2), Dart(14)),
            Err(GMapError::Deleted { dart: Dart(14) })
        );
        assert_eq!(g.unsew(tri, 2), Err(GMapError::Deleted { dart: tri }));
        assert!(g.is_free(Dart(2), 2));
        assert_eq!(g.nlive_darts(), 12);
    }

    #[test]
    fn debug_output_lists_links() {
        let g = GMap::from_alpha(1, darts([1, 0, 0, 1])).unwrap();
        let s = format!("{g:?}");
        assert!(s.contains("dimension: 1"));
        assert!(s.contains("0: [1, 0],"));
        assert!(s.contains("1: [0, 1],"));
    }
}
