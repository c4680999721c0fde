//! OrbitReprs: cached orbit representatives.
//!
//! For each generator set it has been asked about, the cache stores the
//! representative (lowest-numbered dart) of every dart's orbit. Lookups are
//! then O(1) instead of O(orbit size), which pays off when many attachment
//! maps over the same orbits are read, e.g. when a renderer resolves every
//! dart of a large grid to its vertex.
//!
//! The cache does not observe the map. Call [`OrbitReprs::clear`] after
//! mutating the map; a cache built for a map with a different dart count is
//! rebuilt automatically by [`OrbitReprs::ensure`].

use std::collections::{HashMap, HashSet};
use std::ops::Index;

use crate::mesh_error::GMapError;
use crate::topology::alphas::Alphas;
use crate::topology::dart::Dart;
use crate::topology::gmap::GMap;

#[derive(Clone, Debug, Default)]
pub struct OrbitReprs {
    reprs: HashMap<Alphas, Vec<Dart>>,
}

impl OrbitReprs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached representative of `d`'s `a`-orbit, if `a` was built.
    pub fn get(&self, a: Alphas, d: Dart) -> Option<Dart> {
        self.reprs.get(&a).and_then(|v| v.get(d.0).copied())
    }

    /// Cached representative, falling back to a traversal.
    pub fn get_or_search(&self, g: &GMap, a: Alphas, d: Dart) -> Result<Dart, GMapError> {
        match self.get(a, d) {
            Some(r) => Ok(r),
            None => g.rep(d, a),
        }
    }

    /// Representatives of every dart for `a`, if built.
    pub fn get_all(&self, a: Alphas) -> Option<&[Dart]> {
        self.reprs.get(&a).map(Vec::as_slice)
    }

    /// Representatives of every dart for `a`, building them if missing or
    /// built for a map of another size.
    pub fn ensure(&mut self, g: &GMap, a: Alphas) -> Result<&[Dart], GMapError> {
        let stale = self
            .reprs
            .get(&a)
            .is_none_or(|v| v.len() != g.ndarts());
        if stale {
            self.build(g, a)?;
        }
        Ok(self.reprs.get(&a).map(Vec::as_slice).unwrap_or_default())
    }

    /// (Re)builds the representative table for `a`-orbits.
    pub fn build(&mut self, g: &GMap, a: Alphas) -> Result<(), GMapError> {
        a.check(g.dimension())?;
        let mut table = vec![Dart(usize::MAX); g.ndarts()];
        let mut seen = HashSet::new();
        for d in g.darts() {
            if !seen.insert(d) {
                continue;
            }
            for n in g.orbit_iter(d, a) {
                seen.insert(n);
                table[n.0] = d;
            }
        }
        log::debug!("built orbit representatives for {a} over {} darts", g.ndarts());
        self.reprs.insert(a, table);
        Ok(())
    }

    /// Drops every cached table.
    pub fn clear(&mut self) {
        self.reprs.clear();
    }

    /// Representative of each dart in `darts`, one per orbit, in input order.
    ///
    /// Uses the cached table for `a` when it matches the map's size and
    /// traverses otherwise.
    pub fn unique_orbit_repr<'a, I>(
        &'a self,
        g: &'a GMap,
        darts: I,
        a: Alphas,
    ) -> Result<impl Iterator<Item = Dart> + 'a, GMapError>
    where
        I: IntoIterator<Item = Dart> + 'a,
    {
        a.check(g.dimension())?;
        let table = self.get_all(a).filter(|t| t.len() == g.ndarts());
        let mut seen = HashSet::new();
        Ok(darts.into_iter().filter_map(move |d| {
            if let Some(&r) = table.and_then(|t| t.get(d.0)) {
                return seen.insert(r).then_some(r);
            }
            if seen.contains(&d) {
                return None;
            }
            let mut r = d;
            for n in g.orbit_iter(d, a) {
                r = r.min(n);
                seen.insert(n);
            }
            Some(r)
        }))
    }

    /// Representative of each `a`-orbit incident to the `b`-orbit of `d`.
    pub fn orbit_repr_per_incident_orbit<'a>(
        &'a self,
        g: &'a GMap,
        d: Dart,
        a: Alphas,
        b: Alphas,
    ) -> Result<impl Iterator<Item = Dart> + 'a, GMapError> {
        let around = g.orbit(d, b)?;
        self.unique_orbit_repr(g, around, a)
    }
}

impl Index<(Alphas, Dart)> for OrbitReprs {
    type Output = Dart;

    /// # Panics
    /// Panics if the table for the generator set was never built.
    fn index(&self, (a, d): (Alphas, Dart)) -> &Self::Output {
        &self.reprs[&a][d.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::gmap::tests::{darts, split_square};

    #[test]
    fn build_face_and_edge_tables() {
        let g = split_square();
        let mut or = OrbitReprs::new();
        or.build(&g, Alphas::FACE).unwrap();

        assert_eq!(or[(Alphas::FACE, Dart(4))], Dart(0));
        assert_eq!(
            or.get_all(Alphas::FACE).unwrap(),
            &darts([0, 0, 0, 0, 0, 0, 6, 6, 6, 6, 6, 6])[..]
        );
        assert_eq!(
            or.ensure(&g, Alphas::EDGE).unwrap(),
            &darts([0, 0, 2, 2, 4, 4, 0, 0, 8, 8, 10, 10])[..]
        );
    }

    #[test]
    fn lookups_with_and_without_table() {
        let g = split_square();
        let mut or = OrbitReprs::new();
        assert_eq!(or.get(Alphas::VERTEX, Dart(8)), None);
        assert_eq!(or.get_or_search(&g, Alphas::VERTEX, Dart(8)).unwrap(), Dart(0));

        let uncached: Vec<Dart> = or
            .unique_orbit_repr(&g, g.darts(), Alphas::VERTEX)
            .unwrap()
            .collect();
        or.build(&g, Alphas::VERTEX).unwrap();
        let cached: Vec<Dart> = or
            .unique_orbit_repr(&g, g.darts(), Alphas::VERTEX)
            .unwrap()
            .collect();
        assert_eq!(uncached, cached);
        assert_eq!(cached, darts([0, 1, 3, 9]));
    }

    #[test]
    fn incident_representatives() {
        let g = split_square();
        let mut or = OrbitReprs::new();
        or.build(&g, Alphas::VERTEX).unwrap();
        let mut reps: Vec<Dart> = or
            .orbit_repr_per_incident_orbit(&g, Dart(6), Alphas::VERTEX, Alphas::FACE)
            .unwrap()
            .collect();
        reps.sort_unstable();
        assert_eq!(reps, darts([0, 1, 9]));
    }

    #[test]
    fn stale_table_falls_back_to_traversal() {
        let mut g = split_square();
        let mut or = OrbitReprs::new();
        or.build(&g, Alphas::FACE).unwrap();
        let tri = g.add_polygon(3).unwrap();
        let reps: Vec<Dart> = or
            .unique_orbit_repr(&g, g.darts(), Alphas::FACE)
            .unwrap()
            .collect();
        assert_eq!(reps, vec![Dart(0), Dart(6), tri]);
    }

    #[test]
    fn stale_tables_are_rebuilt() {
        let mut g = split_square();
        let mut or = OrbitReprs::new();
        or.build(&g, Alphas::FACE).unwrap();
        let extra = g.add_dart();
        assert_eq!(or.ensure(&g, Alphas::FACE).unwrap()[extra.0], extra);
        or.clear();
        assert!(or.get_all(Alphas::FACE).is_none());
    }
}
