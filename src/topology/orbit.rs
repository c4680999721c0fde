//! Orbit traversal iterators for generalized maps.
//!
//! An orbit is the set of darts reachable from a seed by any sequence of
//! alphas drawn from a generator set. The iterators here run a breadth-first
//! search with a FIFO frontier and a seen-set keyed by dart identity; each
//! call starts a fresh traversal, so re-iterating means calling again.
//!
//! Use via [`GMap::orbit`], [`GMap::orbit_paths`], or the cell helpers.

use std::collections::{HashSet, VecDeque};

use crate::mesh_error::GMapError;
use crate::topology::alphas::Alphas;
use crate::topology::dart::Dart;
use crate::topology::gmap::GMap;

/// What a traversal carries along with each discovered dart.
trait Trail: Sized {
    fn root() -> Self;
    fn step(&self, i: usize) -> Self;
}

impl Trail for () {
    #[inline]
    fn root() -> Self {}
    #[inline]
    fn step(&self, _i: usize) -> Self {}
}

/// Last alpha index used to reach the dart.
impl Trail for Option<usize> {
    #[inline]
    fn root() -> Self {
        None
    }
    #[inline]
    fn step(&self, i: usize) -> Self {
        Some(i)
    }
}

/// Full alpha-index path from the seed.
impl Trail for Vec<usize> {
    #[inline]
    fn root() -> Self {
        Vec::new()
    }
    #[inline]
    fn step(&self, i: usize) -> Self {
        let mut path = Vec::with_capacity(self.len() + 1);
        path.extend_from_slice(self);
        path.push(i);
        path
    }
}

/// Breadth-first traversal with "first discovered wins" semantics.
struct Bfs<'a, T> {
    gmap: &'a GMap,
    generators: Vec<usize>,
    seen: HashSet<Dart>,
    frontier: VecDeque<(T, Dart)>,
}

impl<'a, T: Trail> Bfs<'a, T> {
    fn new(gmap: &'a GMap, seed: Dart, alphas: Alphas) -> Self {
        debug_assert!(gmap.contains(seed), "dart {seed} does not belong to this map");
        let mut frontier = VecDeque::with_capacity(1);
        frontier.push_back((T::root(), seed));
        Self {
            gmap,
            generators: alphas.indices(gmap.dimension()).collect(),
            seen: HashSet::from([seed]),
            frontier,
        }
    }
}

impl<T: Trail> Iterator for Bfs<'_, T> {
    type Item = (T, Dart);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (trail, d) = self.frontier.pop_front()?;
        for &i in &self.generators {
            let n = self.gmap[(d, i)];
            if self.seen.insert(n) {
                self.frontier.push_back((trail.step(i), n));
            }
        }
        Some((trail, d))
    }
}

/// Darts of one orbit in breadth-first order.
pub struct Orbit<'a>(Bfs<'a, ()>);

/// `(path, dart)` pairs of one orbit in breadth-first order, where `path` is
/// the alpha-index sequence that maps the seed onto `dart`.
///
/// The path is one valid composition of generator alphas (shortest first);
/// other paths to the same dart may exist.
pub struct OrbitPaths<'a>(Bfs<'a, Vec<usize>>);

/// `(last index, dart)` pairs; the seed has `None`.
pub(crate) struct OrbitSteps<'a>(Bfs<'a, Option<usize>>);

impl Iterator for Orbit<'_> {
    type Item = Dart;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|((), d)| d)
    }
}

impl Iterator for OrbitPaths<'_> {
    type Item = (Vec<usize>, Dart);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

impl Iterator for OrbitSteps<'_> {
    type Item = (Option<usize>, Dart);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

impl GMap {
    /// Enumerates the `alphas`-orbit of `d`.
    ///
    /// # Errors
    /// `DartOutOfRange` if `d` is not a dart of this map, and
    /// `IndexOutOfRange` if `alphas` lists an index above the dimension.
    /// A cofinite tail is clipped at the dimension.
    pub fn orbit(&self, d: Dart, alphas: Alphas) -> Result<Orbit<'_>, GMapError> {
        self.check_dart(d)?;
        alphas.check(self.dimension())?;
        Ok(self.orbit_iter(d, alphas))
    }

    /// Enumerates the `alphas`-orbit of `d` together with the discovery path
    /// of every dart. Always starts with `(vec![], d)`.
    pub fn orbit_paths(&self, d: Dart, alphas: Alphas) -> Result<OrbitPaths<'_>, GMapError> {
        self.check_dart(d)?;
        alphas.check(self.dimension())?;
        Ok(OrbitPaths(Bfs::new(self, d, alphas)))
    }

    /// Unchecked orbit; callers have validated `d` and `alphas`.
    #[inline]
    pub(crate) fn orbit_iter(&self, d: Dart, alphas: Alphas) -> Orbit<'_> {
        Orbit(Bfs::new(self, d, alphas))
    }

    #[inline]
    pub(crate) fn orbit_steps(&self, d: Dart, alphas: Alphas) -> OrbitSteps<'_> {
        OrbitSteps(Bfs::new(self, d, alphas))
    }
}
