//! Cell incidence tables and the dual graph of top cells.
//
// Both structures are returned in CSR (compressed-sparse-row) form:
//
// * `offsets[k] .. offsets[k+1]` = neighbour range of row *k*
// * `adjacency`                  = concatenated column indices
//
// Rows and columns are cells, numbered by ascending representative dart
// (the lowest dart of each cell), so two tables built from the same map
// index the same cell with the same number.

use std::collections::HashMap;

use crate::data::orbit_reprs::OrbitReprs;
use crate::mesh_error::GMapError;
use crate::topology::alphas::Alphas;
use crate::topology::dart::Dart;
use crate::topology::gmap::GMap;

/// Which `j`-cells touch each `i`-cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidenceTable {
    /// Representative of each row cell.
    pub rows: Vec<Dart>,
    /// Representative of each column cell.
    pub columns: Vec<Dart>,
    pub offsets: Vec<usize>,
    /// Column indices, ascending within each row.
    pub adjacency: Vec<usize>,
}

impl IncidenceTable {
    /// Incidence of the `i`-cells (rows) with the `j`-cells (columns).
    ///
    /// Two cells are incident when they share a dart.
    pub fn build(g: &GMap, i: usize, j: usize, dim: Option<usize>) -> Result<Self, GMapError> {
        let a = g.cell_alphas(i, dim)?;
        let b = g.cell_alphas(j, dim)?;
        let mut reprs = OrbitReprs::new();
        reprs.build(g, a)?;
        reprs.build(g, b)?;

        let rows: Vec<Dart> = reprs
            .unique_orbit_repr(g, g.darts(), a)?
            .collect();
        let columns: Vec<Dart> = reprs
            .unique_orbit_repr(g, g.darts(), b)?
            .collect();
        let column_of: HashMap<Dart, usize> =
            columns.iter().enumerate().map(|(k, &d)| (d, k)).collect();

        let mut offsets = Vec::with_capacity(rows.len() + 1);
        let mut adjacency = Vec::new();
        offsets.push(0);
        for &r in &rows {
            let mut cols: Vec<usize> = reprs
                .orbit_repr_per_incident_orbit(g, r, b, a)?
                .map(|c| column_of[&c])
                .collect();
            cols.sort_unstable();
            adjacency.extend(cols);
            offsets.push(adjacency.len());
        }
        log::debug!(
            "incidence {i}-cells x {j}-cells: {} x {}, {} entries",
            rows.len(),
            columns.len(),
            adjacency.len()
        );
        Ok(IncidenceTable {
            rows,
            columns,
            offsets,
            adjacency,
        })
    }

    /// Number of row cells.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column indices incident to row `k`.
    pub fn neighbors(&self, k: usize) -> &[usize] {
        &self.adjacency[self.offsets[k]..self.offsets[k + 1]]
    }

    /// Column representatives incident to row `k`.
    pub fn incident(&self, k: usize) -> impl Iterator<Item = Dart> + '_ {
        self.neighbors(k).iter().map(|&c| self.columns[c])
    }

    /// Row index of the cell represented by `d`, if `d` is a representative.
    pub fn row_of(&self, d: Dart) -> Option<usize> {
        self.rows.binary_search(&d).ok()
    }

    /// The same relation with rows and columns swapped.
    pub fn transpose(&self) -> IncidenceTable {
        let mut counts = vec![0usize; self.columns.len() + 1];
        for &c in &self.adjacency {
            counts[c + 1] += 1;
        }
        for k in 0..self.columns.len() {
            counts[k + 1] += counts[k];
        }
        let offsets = counts.clone();
        let mut next = counts;
        let mut adjacency = vec![0; self.adjacency.len()];
        for r in 0..self.rows.len() {
            for &c in self.neighbors(r) {
                adjacency[next[c]] = r;
                next[c] += 1;
            }
        }
        IncidenceTable {
            rows: self.columns.clone(),
            columns: self.rows.clone(),
            offsets,
            adjacency,
        }
    }
}

/// Adjacency of the top-dimensional cells across shared facets.
///
/// Symmetric and self-free: a cell glued to itself along a facet gets no
/// loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualGraph {
    /// Representative of each vertex (top cell) of the dual graph.
    pub cells: Vec<Dart>,
    pub xadj: Vec<usize>,
    pub adjncy: Vec<usize>,
}

impl DualGraph {
    pub fn neighbors(&self, k: usize) -> &[usize] {
        &self.adjncy[self.xadj[k]..self.xadj[k + 1]]
    }
}

/// Builds the dual graph of `g`: top cells joined by `alpha_N`.
pub fn dual_graph(g: &GMap) -> Result<DualGraph, GMapError> {
    let top = g.dimension();
    let a = g.cell_alphas(top, None)?;
    let mut reprs = OrbitReprs::new();
    let table = reprs.ensure(g, a)?;

    let cells: Vec<Dart> = g.darts().filter(|d| table[d.0] == *d).collect();
    let index_of: HashMap<Dart, usize> =
        cells.iter().enumerate().map(|(k, &d)| (d, k)).collect();

    let mut xadj = Vec::with_capacity(cells.len() + 1);
    let mut adjncy = Vec::new();
    xadj.push(0);
    for &c in &cells {
        let mut nbrs: Vec<usize> = g
            .orbit(c, a)?
            .map(|d| g[(d, top)])
            .map(|n| index_of[&table[n.0]])
            .filter(|&k| cells[k] != c)
            .collect();
        nbrs.sort_unstable();
        nbrs.dedup();
        adjncy.extend(nbrs);
        xadj.push(adjncy.len());
    }
    Ok(DualGraph {
        cells,
        xadj,
        adjncy,
    })
}

/// Number of `i`-cells for every `i` in `0..=dimension`.
pub fn cell_counts(g: &GMap) -> Vec<usize> {
    (0..=g.dimension())
        .map(|i| {
            g.one_dart_per_orbit(Alphas::cell(i))
                .map(Iterator::count)
                .unwrap_or(0)
        })
        .collect()
}

/// Alternating sum of the cell counts.
///
/// 2 for a closed sphere-like surface, 1 for a disk.
pub fn euler_characteristic(g: &GMap) -> isize {
    cell_counts(g)
        .into_iter()
        .enumerate()
        .map(|(i, n)| if i % 2 == 0 { n as isize } else { -(n as isize) })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh_generation::{cube, square_grid, tetrahedron};
    use crate::topology::gmap::tests::{darts, split_square};

    #[test]
    fn faces_by_vertex() {
        let g = split_square();
        let t = IncidenceTable::build(&g, 2, 0, None).unwrap();
        assert_eq!(t.rows, darts([0, 6]));
        assert_eq!(t.columns, darts([0, 1, 3, 9]));
        assert_eq!(t.neighbors(0), &[0, 1, 2]);
        assert_eq!(t.neighbors(1), &[0, 1, 3]);
        assert_eq!(t.incident(1).collect::<Vec<_>>(), darts([0, 1, 9]));
        assert_eq!(t.row_of(Dart(6)), Some(1));
        assert_eq!(t.row_of(Dart(7)), None);
    }

    #[test]
    fn edge_face_incidence_is_symmetric() {
        let grid = square_grid(2, 3).unwrap();
        let g = &grid.gmap;
        let ef = IncidenceTable::build(g, 1, 2, None).unwrap();
        let fe = IncidenceTable::build(g, 2, 1, None).unwrap();
        assert_eq!(ef.transpose(), fe);
        assert_eq!(fe.transpose(), ef);
        // every face of a square grid has four edges
        assert!((0..fe.len()).all(|k| fe.neighbors(k).len() == 4));
    }

    #[test]
    fn dual_graph_of_grid() {
        let grid = square_grid(2, 2).unwrap();
        let dual = dual_graph(&grid.gmap).unwrap();
        assert_eq!(dual.cells.len(), 4);
        // each square of a 2x2 grid touches two others across an edge
        assert!((0..4).all(|k| dual.neighbors(k).len() == 2));
        for k in 0..4 {
            for &n in dual.neighbors(k) {
                assert!(dual.neighbors(n).contains(&k));
            }
        }
    }

    #[test]
    fn dual_graph_of_tetrahedron_is_complete() {
        let (g, _) = tetrahedron().unwrap();
        let dual = dual_graph(&g).unwrap();
        assert!((0..4).all(|k| dual.neighbors(k).len() == 3));
    }

    #[test]
    fn euler_characteristics() {
        assert_eq!(cell_counts(&split_square()), vec![4, 5, 2]);
        assert_eq!(euler_characteristic(&split_square()), 1);
        assert_eq!(euler_characteristic(&tetrahedron().unwrap().0), 2);
        assert_eq!(euler_characteristic(&cube().unwrap().0), 2);
    }
}
