//! CellMap: an [`OrbitMap`] fixed to the `i`-cells of a map.
//!
//! Renderers attach screen coordinates to vertices, solvers attach clue
//! values to faces; both are cell maps. The cell index and optional view
//! dimension are kept so the map can be written back out in its external
//! `{ i, dim, darts }` shape.

use crate::data::orbit_map::{AttachMap, OrbitMap};
use crate::mesh_error::GMapError;
use crate::topology::alphas::Alphas;
use crate::topology::dart::Dart;
use crate::topology::gmap::GMap;

/// Values attached to the `i`-cells of a map.
#[derive(Clone, Debug, PartialEq)]
pub struct CellMap<V> {
    i: usize,
    dim: Option<usize>,
    inner: OrbitMap<V>,
}

impl<V> CellMap<V> {
    /// Creates an empty map over the `i`-cells of `g` (in the `dim` view).
    ///
    /// # Errors
    /// `IndexOutOfRange` as for [`GMap::cell_alphas`].
    pub fn new(g: &GMap, i: usize, dim: Option<usize>) -> Result<Self, GMapError> {
        let alphas = g.cell_alphas(i, dim)?;
        Ok(Self {
            i,
            dim,
            inner: OrbitMap::new(alphas),
        })
    }

    /// Map over vertices.
    pub fn vertices(g: &GMap) -> Result<Self, GMapError> {
        Self::new(g, 0, None)
    }

    /// Map over edges.
    pub fn edges(g: &GMap) -> Result<Self, GMapError> {
        Self::new(g, 1, None)
    }

    /// Map over faces.
    pub fn faces(g: &GMap) -> Result<Self, GMapError> {
        Self::new(g, 2, None)
    }

    /// Cell index.
    #[inline]
    pub fn cell(&self) -> usize {
        self.i
    }

    /// View dimension override, if any.
    #[inline]
    pub fn dim(&self) -> Option<usize> {
        self.dim
    }

    #[inline]
    pub fn get(&self, d: Dart) -> Option<&V> {
        self.inner.get(d)
    }

    #[inline]
    pub fn contains(&self, d: Dart) -> bool {
        self.inner.contains(d)
    }

    pub fn delete(&mut self, g: &GMap, d: Dart) -> Option<V> {
        self.inner.delete(g, d)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn as_orbit_map(&self) -> &OrbitMap<V> {
        &self.inner
    }

    pub fn into_orbit_map(self) -> OrbitMap<V> {
        self.inner
    }

    /// One `(dart, value)` per assigned cell, lowest dart first.
    pub fn cell_values<'a>(&'a self, g: &'a GMap) -> Vec<(Dart, &'a V)> {
        self.inner.orbit_values(g)
    }
}

impl<V: Clone> CellMap<V> {
    /// Attaches `value` to every dart of the cell of `d`.
    pub fn set(&mut self, g: &GMap, d: Dart, value: V) {
        self.inner.set(g, d, value)
    }
}

impl<V: Clone> AttachMap<V> for CellMap<V> {
    fn alphas(&self) -> Alphas {
        self.inner.alphas()
    }

    fn get(&self, d: Dart) -> Option<&V> {
        CellMap::get(self, d)
    }

    fn set(&mut self, g: &GMap, d: Dart, value: V) {
        CellMap::set(self, g, d, value)
    }

    fn delete(&mut self, g: &GMap, d: Dart) -> Option<V> {
        CellMap::delete(self, g, d)
    }
}
