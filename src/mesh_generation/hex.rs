//! Parallelogram-shaped grids of hexagons in axial coordinates.

use itertools::Itertools;

use crate::data::cell_map::CellMap;
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::GMapError;
use crate::mesh_generation::GridMesh;
use crate::topology::dart::Dart;
use crate::topology::gmap::GMap;

/// Builds hexes at axial coordinates `0 <= r < n`, `0 <= q < m`.
///
/// `rows[r][q]` is the dart on the hex's northeast edge at its north vertex.
pub fn hex_grid(n: usize, m: usize) -> Result<GridMesh, GMapError> {
    let mut g = GMap::new(2)?;
    let mut rows = Vec::with_capacity(n);
    for _ in 0..n {
        let row = (0..m)
            .map(|_| g.add_polygon(6))
            .collect::<Result<Vec<Dart>, _>>()?;
        rows.push(row);
    }

    for row in &rows {
        for (&h0, &h1) in row.iter().tuple_windows() {
            let d0 = g.al(h0, [0, 1])?;
            let d1 = g.al(h1, [1, 0, 1])?;
            g.sew(2, d0, d1)?;
        }
    }
    for (r0, r1) in rows.iter().tuple_windows() {
        for (&h0, &h1) in r0.iter().zip(r1) {
            let d0 = g.al(h0, [0, 1, 0, 1])?;
            let d1 = g.al(h1, [1])?;
            g.sew(2, d0, d1)?;
        }
        for (&h0, &h1) in r0.iter().skip(1).zip(r1) {
            let d0 = g.al(h0, [1, 0, 1, 0, 1])?;
            g.sew(2, d0, h1)?;
        }
    }
    log::debug!("generated {n}x{m} hex grid with {} darts", g.ndarts());
    let grid = GridMesh { gmap: g, rows };
    grid.debug_assert_invariants();
    Ok(grid)
}

/// Vertex positions of a [`hex_grid`] along basis vectors `(a, b)` with
/// `a + b = (0, 1)` and `2a - b = (1, 0)`.
///
/// Both basis vectors have the length of a hex's circumradius, so every
/// vertex lands on an integer pair.
pub fn hex_vertex_coords(grid: &GridMesh) -> Result<CellMap<(isize, isize)>, GMapError> {
    const CORNERS: [(&[usize], isize, isize); 6] = [
        (&[], 0, -1),
        (&[0], 1, -1),
        (&[0, 1, 0], 1, 0),
        (&[0, 1, 0, 1, 0], 0, 1),
        (&[0, 1, 0, 1, 0, 1, 0], -1, 1),
        (&[0, 1, 0, 1, 0, 1, 0, 1, 0], -1, 0),
    ];

    let g = &grid.gmap;
    let mut coords = CellMap::vertices(g)?;
    for (r, row) in grid.rows.iter().enumerate() {
        for (q, &h) in row.iter().enumerate() {
            let (r, q) = (r as isize, q as isize);
            let a = r + 2 * q;
            let b = r - q;
            for &(path, da, db) in &CORNERS {
                let v = g.al(h, path.iter().copied())?;
                coords.set(g, v, (a + da, b + db));
            }
        }
    }
    Ok(coords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn cell_counts() {
        for (n, m) in [(1, 1), (1, 2), (2, 2), (3, 4)] {
            let grid = hex_grid(n, m).unwrap();
            let g = &grid.gmap;
            let v = g.one_dart_per_cell(0, None).unwrap().count();
            let e = g.one_dart_per_cell(1, None).unwrap().count();
            let f = g.one_dart_per_cell(2, None).unwrap().count();
            assert_eq!(f, n * m);
            assert_eq!(v, 2 * n * m + 2 * n + 2 * m, "{n}x{m}");
            // a disk: V - E + F = 1 counting only inner faces
            assert_eq!(v + f, e + 1);
        }
    }

    #[test]
    fn vertex_coords_are_consistent_and_distinct() {
        let grid = hex_grid(3, 3).unwrap();
        let g = &grid.gmap;
        let coords = hex_vertex_coords(&grid).unwrap();
        coords.as_orbit_map().validate_uniformity(g).unwrap();

        let vertices: Vec<Dart> = g.one_dart_per_cell(0, None).unwrap().collect();
        assert!(vertices.iter().all(|&d| coords.contains(d)));
        let distinct: HashSet<(isize, isize)> =
            vertices.iter().map(|&d| coords.get(d).copied().unwrap()).collect();
        assert_eq!(distinct.len(), vertices.len());
    }

    #[test]
    fn origin_hex_corners() {
        let grid = hex_grid(1, 1).unwrap();
        let coords = hex_vertex_coords(&grid).unwrap();
        let h = grid.rows[0][0];
        assert_eq!(coords.get(h), Some(&(0, -1)));
        let mut corners: Vec<(isize, isize)> = coords
            .cell_values(&grid.gmap)
            .into_iter()
            .map(|(_, &c)| c)
            .collect();
        corners.sort_unstable();
        assert_eq!(corners, vec![(-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0)]);
    }
}
