//! OrbitMap: values attached to orbits of a generalized map.
//!
//! An `OrbitMap<V>` is a partial function from darts to values, fixed to one
//! generator set. Writing a value for a dart writes it for every dart of that
//! dart's orbit, and deleting clears the whole orbit, so all darts of an orbit
//! always observe the same value.
//!
//! The map holds no reference to the `GMap`; darts are plain lookup keys. The
//! gmap is passed to each mutating call and must be the one the darts come
//! from. Passing a dart of another map is not detected outside debug builds.

use std::collections::HashMap;

use crate::mesh_error::GMapError;
use crate::topology::alphas::Alphas;
use crate::topology::dart::Dart;
use crate::topology::gmap::GMap;

/// Orbit-uniform attachment store.
///
/// # Invariants
///
/// If `get(d)` is `Some(v)` and `d'` lies in the orbit of `d`, then
/// `get(d') == Some(v)`. Checked by [`validate_uniformity`](Self::validate_uniformity).
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitMap<V> {
    alphas: Alphas,
    map: HashMap<Dart, V>,
}

impl<V> OrbitMap<V> {
    /// Creates an empty map over `alphas`-orbits.
    pub fn new(alphas: Alphas) -> Self {
        Self {
            alphas,
            map: HashMap::new(),
        }
    }

    /// Creates an empty map, checking `alphas` against `g`.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `alphas` lists an index above `g`'s dimension.
    pub fn for_gmap(g: &GMap, alphas: Alphas) -> Result<Self, GMapError> {
        alphas.check(g.dimension())?;
        Ok(Self::new(alphas))
    }

    #[inline]
    pub fn alphas(&self) -> Alphas {
        self.alphas
    }

    /// Value attached to the orbit of `d`, or `None` if it was never set.
    #[inline]
    pub fn get(&self, d: Dart) -> Option<&V> {
        self.map.get(&d)
    }

    #[inline]
    pub fn contains(&self, d: Dart) -> bool {
        self.map.contains_key(&d)
    }

    /// Number of darts carrying a value (not the number of orbits).
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Every `(dart, value)` pair, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (Dart, &V)> {
        self.map.iter().map(|(&d, v)| (d, v))
    }

    pub fn map(&self) -> &HashMap<Dart, V> {
        &self.map
    }

    pub fn into_map(self) -> HashMap<Dart, V> {
        self.map
    }

    /// Removes the value from every dart of the orbit of `d`.
    ///
    /// Returns the removed value, if the orbit had one.
    pub fn delete(&mut self, g: &GMap, d: Dart) -> Option<V> {
        debug_assert!(self.alphas.check(g.dimension()).is_ok());
        let mut removed = None;
        for n in g.orbit_iter(d, self.alphas) {
            if let Some(v) = self.map.remove(&n) {
                removed.get_or_insert(v);
            }
        }
        removed
    }

    /// One `(dart, value)` per orbit, keyed by the lowest dart of the orbit,
    /// in ascending dart order.
    pub fn orbit_values<'a>(&'a self, g: &'a GMap) -> Vec<(Dart, &'a V)> {
        let mut keys: Vec<Dart> = self.map.keys().copied().collect();
        keys.sort_unstable();
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for d in keys {
            if !seen.insert(d) {
                continue;
            }
            seen.extend(g.orbit_iter(d, self.alphas));
            out.push((d, &self.map[&d]));
        }
        out
    }
}

impl<V: Clone> OrbitMap<V> {
    /// Attaches `value` to every dart of the orbit of `d`, overwriting any
    /// previous value.
    pub fn set(&mut self, g: &GMap, d: Dart, value: V) {
        debug_assert!(self.alphas.check(g.dimension()).is_ok());
        for n in g.orbit_iter(d, self.alphas) {
            self.map.insert(n, value.clone());
        }
    }
}

impl<V: PartialEq> OrbitMap<V> {
    /// Checks that every orbit touched by the map is uniformly assigned.
    ///
    /// # Errors
    /// `StructuralViolation` naming the first dart whose orbit disagrees.
    pub fn validate_uniformity(&self, g: &GMap) -> Result<(), GMapError> {
        for (&d, v) in &self.map {
            g.check_dart(d)?;
            for n in g.orbit_iter(d, self.alphas) {
                if self.map.get(&n) != Some(v) {
                    return Err(GMapError::structural(format!(
                        "orbit {} of dart {d} is not uniform at dart {n}",
                        self.alphas
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Read/write access to orbit-attached values, implemented by
/// [`OrbitMap`] and [`CellMap`](crate::data::cell_map::CellMap).
pub trait AttachMap<V> {
    /// Generator set of the orbits values are attached to.
    fn alphas(&self) -> Alphas;
    fn get(&self, d: Dart) -> Option<&V>;
    fn set(&mut self, g: &GMap, d: Dart, value: V);
    fn delete(&mut self, g: &GMap, d: Dart) -> Option<V>;
}

impl<V: Clone> AttachMap<V> for OrbitMap<V> {
    fn alphas(&self) -> Alphas {
        OrbitMap::alphas(self)
    }

    fn get(&self, d: Dart) -> Option<&V> {
        OrbitMap::get(self, d)
    }

    fn set(&mut self, g: &GMap, d: Dart, value: V) {
        OrbitMap::set(self, g, d, value)
    }

    fn delete(&mut self, g: &GMap, d: Dart) -> Option<V> {
        OrbitMap::delete(self, g, d)
    }
}
