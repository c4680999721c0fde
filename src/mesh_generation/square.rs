//! Rectangular grids of quadrilaterals.

use itertools::Itertools;

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::GMapError;
use crate::mesh_generation::GridMesh;
use crate::topology::dart::Dart;
use crate::topology::gmap::GMap;

/// Builds an `n × m` grid of squares (`n` rows, `m` columns).
///
/// Each face handle is the dart on the square's north edge at its northwest
/// vertex. Row 0 is the northmost row.
pub fn square_grid(n: usize, m: usize) -> Result<GridMesh, GMapError> {
    let mut g = GMap::new(2)?;
    let mut rows = Vec::with_capacity(n);
    for _ in 0..n {
        let row = (0..m)
            .map(|_| g.add_polygon(4))
            .collect::<Result<Vec<Dart>, _>>()?;
        rows.push(row);
    }

    for row in &rows {
        for (&s0, &s1) in row.iter().tuple_windows() {
            let east = g.al(s0, [0, 1])?;
            let west = g.al(s1, [1])?;
            g.sew(2, east, west)?;
        }
    }
    for (r0, r1) in rows.iter().tuple_windows() {
        for (&s0, &s1) in r0.iter().zip(r1) {
            let south = g.al(s0, [1, 0, 1])?;
            g.sew(2, south, s1)?;
        }
    }
    log::debug!("generated {n}x{m} square grid with {} darts", g.ndarts());
    let grid = GridMesh { gmap: g, rows };
    grid.debug_assert_invariants();
    Ok(grid)
}

impl GridMesh {
    /// One dart per grid vertex of a square grid, as an `(n + 1) × (m + 1)`
    /// array in the same orientation as the face rows.
    ///
    /// Only meaningful for meshes built by [`square_grid`].
    pub fn vertex_grid(&self) -> Result<Vec<Vec<Dart>>, GMapError> {
        let g = &self.gmap;
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        for row in &self.rows {
            let mut vs = row.clone();
            if let Some(&last) = row.last() {
                vs.push(g.al(last, [0])?);
            }
            out.push(vs);
        }
        if let Some(row) = self.rows.last() {
            let mut vs = row
                .iter()
                .map(|&d| g.al(d, [1, 0, 1]))
                .collect::<Result<Vec<Dart>, _>>()?;
            if let Some(&last) = row.last() {
                vs.push(g.al(last, [1, 0, 1, 0])?);
            }
            out.push(vs);
        }
        Ok(out)
    }
}
