//! Cells and orbit deduplication.
//!
//! An `i`-cell is the orbit under "every alpha except `i`": vertices for
//! `i = 0`, edges for `i = 1`, faces for `i = 2`. Restricting the generators
//! to indices `<= dim` gives the cells of a lower-dimensional view of the map
//! (e.g. the boundary edges of a face when `dim = 1`).
//!
//! [`GMap::cell_alphas`] is the only place that turns a cell index into a
//! generator set; every other helper goes through it.

use std::collections::HashSet;

use crate::mesh_error::GMapError;
use crate::topology::alphas::Alphas;
use crate::topology::dart::Dart;
use crate::topology::gmap::GMap;
use crate::topology::orbit::Orbit;

/// Lazily filters a dart sequence down to one dart per orbit.
///
/// The first dart seen from each orbit is the one kept.
pub struct UniqueByOrbit<'a, I> {
    gmap: &'a GMap,
    alphas: Alphas,
    seen: HashSet<Dart>,
    darts: I,
}

impl<I: Iterator<Item = Dart>> Iterator for UniqueByOrbit<'_, I> {
    type Item = Dart;

    fn next(&mut self) -> Option<Self::Item> {
        for d in self.darts.by_ref() {
            if self.seen.contains(&d) {
                continue;
            }
            self.seen.extend(self.gmap.orbit_iter(d, self.alphas));
            return Some(d);
        }
        None
    }
}

/// Lazily groups a dart sequence by orbit: each item is a representative
/// together with its whole orbit in breadth-first order (representative
/// first).
pub struct GroupByOrbit<'a, I> {
    gmap: &'a GMap,
    alphas: Alphas,
    seen: HashSet<Dart>,
    darts: I,
}

impl<I: Iterator<Item = Dart>> Iterator for GroupByOrbit<'_, I> {
    type Item = (Dart, Vec<Dart>);

    fn next(&mut self) -> Option<Self::Item> {
        for d in self.darts.by_ref() {
            if self.seen.contains(&d) {
                continue;
            }
            let members: Vec<Dart> = self.gmap.orbit_iter(d, self.alphas).collect();
            self.seen.extend(members.iter().copied());
            return Some((d, members));
        }
        None
    }
}

/// Lazily maps a dart sequence to orbit representatives (the lowest dart of
/// each orbit), one per orbit.
pub struct RepPerOrbit<'a, I> {
    gmap: &'a GMap,
    alphas: Alphas,
    seen: HashSet<Dart>,
    darts: I,
}

impl<I: Iterator<Item = Dart>> Iterator for RepPerOrbit<'_, I> {
    type Item = Dart;

    fn next(&mut self) -> Option<Self::Item> {
        for d in self.darts.by_ref() {
            if self.seen.contains(&d) {
                continue;
            }
            let mut rep = d;
            for n in self.gmap.orbit_iter(d, self.alphas) {
                rep = rep.min(n);
                self.seen.insert(n);
            }
            return Some(rep);
        }
        None
    }
}

impl GMap {
    /// Generator set of the `i`-cells in the `dim`-dimensional view.
    ///
    /// With `dim` equal to `None` or the map's own dimension the cofinite
    /// form "every index except `i`" is returned; otherwise the finite set
    /// `0..=dim` without `i`.
    ///
    /// # Errors
    /// `IndexOutOfRange` if `dim` exceeds the map's dimension or `i` exceeds
    /// `dim`.
    pub fn cell_alphas(&self, i: usize, dim: Option<usize>) -> Result<Alphas, GMapError> {
        let dim = dim.unwrap_or(self.dimension());
        self.check_index(dim)?;
        if i > dim {
            return Err(GMapError::IndexOutOfRange {
                index: i,
                dimension: dim,
            });
        }
        if dim == self.dimension() {
            Ok(Alphas::cell(i))
        } else {
            Ok(Alphas::cell_in(i, dim))
        }
    }

    /// Darts of the `i`-cell containing `d`.
    pub fn cell(&self, d: Dart, i: usize, dim: Option<usize>) -> Result<Orbit<'_>, GMapError> {
        let alphas = self.cell_alphas(i, dim)?;
        self.orbit(d, alphas)
    }

    /// Filters `darts` to one dart per `alphas`-orbit, first seen wins.
    ///
    /// Every input dart must belong to this map.
    pub fn unique_by_orbit<I>(
        &self,
        darts: I,
        alphas: Alphas,
    ) -> Result<UniqueByOrbit<'_, I::IntoIter>, GMapError>
    where
        I: IntoIterator<Item = Dart>,
    {
        alphas.check(self.dimension())?;
        Ok(UniqueByOrbit {
            gmap: self,
            alphas,
            seen: HashSet::new(),
            darts: darts.into_iter(),
        })
    }

    /// Groups `darts` by `alphas`-orbit; see [`GroupByOrbit`].
    pub fn group_by_orbit<I>(
        &self,
        darts: I,
        alphas: Alphas,
    ) -> Result<GroupByOrbit<'_, I::IntoIter>, GMapError>
    where
        I: IntoIterator<Item = Dart>,
    {
        alphas.check(self.dimension())?;
        Ok(GroupByOrbit {
            gmap: self,
            alphas,
            seen: HashSet::new(),
            darts: darts.into_iter(),
        })
    }

    /// Groups `darts` by `i`-cell.
    pub fn group_by_cell<I>(
        &self,
        darts: I,
        i: usize,
        dim: Option<usize>,
    ) -> Result<GroupByOrbit<'_, I::IntoIter>, GMapError>
    where
        I: IntoIterator<Item = Dart>,
    {
        let alphas = self.cell_alphas(i, dim)?;
        self.group_by_orbit(darts, alphas)
    }

    /// One dart per `alphas`-orbit of the whole map, in arena order.
    ///
    /// Each returned dart is the lowest-numbered dart of its orbit.
    pub fn one_dart_per_orbit(
        &self,
        alphas: Alphas,
    ) -> Result<impl Iterator<Item = Dart> + '_, GMapError> {
        self.unique_by_orbit(self.darts(), alphas)
    }

    /// One dart per `i`-cell of the whole map, each the lowest of its cell.
    pub fn one_dart_per_cell(
        &self,
        i: usize,
        dim: Option<usize>,
    ) -> Result<impl Iterator<Item = Dart> + '_, GMapError> {
        let alphas = self.cell_alphas(i, dim)?;
        self.one_dart_per_orbit(alphas)
    }

    /// Every `i`-cell of the map as `(representative, members)`.
    pub fn all_cells(
        &self,
        i: usize,
        dim: Option<usize>,
    ) -> Result<impl Iterator<Item = (Dart, Vec<Dart>)> + '_, GMapError> {
        self.group_by_cell(self.darts(), i, dim)
    }

    /// One dart per `a`-orbit incident to the `b`-orbit of `d`.
    ///
    /// Every returned dart lies in both orbits.
    pub fn one_dart_per_incident_orbit(
        &self,
        d: Dart,
        a: Alphas,
        b: Alphas,
    ) -> Result<UniqueByOrbit<'_, Orbit<'_>>, GMapError> {
        let around = self.orbit(d, b)?;
        self.unique_by_orbit(around, a)
    }

    /// One dart per `i`-cell incident to the `j`-cell of `d`.
    ///
    /// `(0, 2)` lists the vertices of a face, `(2, 1)` the faces along an
    /// edge. Every returned dart lies in both cells.
    pub fn one_dart_per_incident_cell(
        &self,
        d: Dart,
        i: usize,
        j: usize,
        dim: Option<usize>,
    ) -> Result<UniqueByOrbit<'_, Orbit<'_>>, GMapError> {
        let a = self.cell_alphas(i, dim)?;
        let b = self.cell_alphas(j, dim)?;
        self.one_dart_per_incident_orbit(d, a, b)
    }

    /// The lowest-numbered dart of the `alphas`-orbit of `d`.
    pub fn rep(&self, d: Dart, alphas: Alphas) -> Result<Dart, GMapError> {
        let orbit = self.orbit(d, alphas)?;
        Ok(orbit.fold(d, Dart::min))
    }

    /// Orbit representative of each dart in `darts`, one per orbit.
    pub fn rep_per_orbit<I>(
        &self,
        darts: I,
        alphas: Alphas,
    ) -> Result<RepPerOrbit<'_, I::IntoIter>, GMapError>
    where
        I: IntoIterator<Item = Dart>,
    {
        alphas.check(self.dimension())?;
        Ok(RepPerOrbit {
            gmap: self,
            alphas,
            seen: HashSet::new(),
            darts: darts.into_iter(),
        })
    }

    /// Representative of each `a`-orbit incident to the `b`-orbit of `d`.
    pub fn rep_per_incident_orbit(
        &self,
        d: Dart,
        a: Alphas,
        b: Alphas,
    ) -> Result<RepPerOrbit<'_, Orbit<'_>>, GMapError> {
        let around = self.orbit(d, b)?;
        self.rep_per_orbit(around, a)
    }
}
