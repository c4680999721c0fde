//! Parallel cell enumeration over a shared map.
//!
//! A finished `GMap` is immutable and `Sync`, so orbit queries can run on
//! many threads at once. These helpers compute every dart's orbit
//! representative in parallel and keep the darts that are their own
//! representative.

use rayon::prelude::*;

use crate::mesh_error::GMapError;
use crate::topology::alphas::Alphas;
use crate::topology::dart::Dart;
use crate::topology::gmap::GMap;

/// Representative of every dart's `alphas`-orbit, computed in parallel.
pub fn par_orbit_reprs(g: &GMap, alphas: Alphas) -> Result<Vec<Dart>, GMapError> {
    alphas.check(g.dimension())?;
    Ok((0..g.ndarts())
        .into_par_iter()
        .map(|d| g.orbit_iter(Dart(d), alphas).fold(Dart(d), Dart::min))
        .collect())
}

/// Lowest dart of every `i`-cell, ascending. Same result as
/// [`GMap::one_dart_per_cell`].
pub fn par_one_dart_per_cell(
    g: &GMap,
    i: usize,
    dim: Option<usize>,
) -> Result<Vec<Dart>, GMapError> {
    let alphas = g.cell_alphas(i, dim)?;
    let reps = par_orbit_reprs(g, alphas)?;
    Ok(reps
        .par_iter()
        .enumerate()
        .filter_map(|(d, &r)| (r.0 == d && !g.is_deleted(r)).then_some(r))
        .collect())
}

/// Number of `i`-cells for every `i` in `0..=dimension`.
pub fn par_cell_counts(g: &GMap) -> Vec<usize> {
    (0..=g.dimension())
        .into_par_iter()
        .map(|i| {
            par_orbit_reprs(g, Alphas::cell(i))
                .map(|reps| {
                    reps.iter()
                        .enumerate()
                        .filter(|&(d, r)| r.0 == d && !g.is_deleted(*r))
                        .count()
                })
                .unwrap_or(0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::incidence::cell_counts;
    use crate::mesh_generation::{hex_grid, square_grid};

    #[test]
    fn matches_sequential_enumeration() {
        let grid = square_grid(5, 4).unwrap();
        let g = &grid.gmap;
        for i in 0..=2 {
            let seq: Vec<Dart> = g.one_dart_per_cell(i, None).unwrap().collect();
            assert_eq!(par_one_dart_per_cell(g, i, None).unwrap(), seq);
        }
    }

    #[test]
    fn counts_match() {
        let grid = hex_grid(4, 3).unwrap();
        assert_eq!(par_cell_counts(&grid.gmap), cell_counts(&grid.gmap));
    }

    #[test]
    fn skips_deleted_darts() {
        let mut g = square_grid(2, 2).unwrap().gmap;
        let extra = g.add_polygon(4).unwrap();
        g.delete(extra).unwrap();
        assert_eq!(par_cell_counts(&g), cell_counts(&g));
        let seq: Vec<Dart> = g.one_dart_per_cell(2, None).unwrap().collect();
        assert_eq!(par_one_dart_per_cell(&g, 2, None).unwrap(), seq);
    }

    #[test]
    fn rejects_bad_generators() {
        let grid = square_grid(1, 1).unwrap();
        let a = Alphas::from_indices([5]).unwrap();
        assert!(par_orbit_reprs(&grid.gmap, a).is_err());
    }
}
