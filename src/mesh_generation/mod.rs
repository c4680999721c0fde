//! Structured map generators: square and hexagonal grids, small polyhedra.
//!
//! Every generator builds its faces as isolated polygons and then sews
//! neighbors together along `alpha_2`, so the result always satisfies the
//! gmap invariants. Grid generators also return one dart per face, arranged
//! by row, which callers use as stable handles for rendering and for
//! attaching per-face data.

pub mod hex;
pub mod polyhedra;
pub mod square;

use std::collections::HashSet;

use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::GMapError;
use crate::topology::alphas::Alphas;
use crate::topology::dart::Dart;
use crate::topology::gmap::GMap;

pub use hex::{hex_grid, hex_vertex_coords};
pub use polyhedra::{cube, tetrahedron};
pub use square::square_grid;

/// Output of a grid generator.
#[derive(Clone, Debug)]
pub struct GridMesh {
    /// The 2-map of the grid.
    pub gmap: GMap,
    /// `rows[r][c]` is the handle dart of the face in row `r`, column `c`.
    pub rows: Vec<Vec<Dart>>,
}

impl GridMesh {
    /// Number of faces.
    pub fn nfaces(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Handle darts in row-major order.
    pub fn faces(&self) -> impl Iterator<Item = Dart> + '_ {
        self.rows.iter().flatten().copied()
    }
}

impl DebugInvariants for GridMesh {
    /// The map is valid and every handle names a different face.
    fn validate_invariants(&self) -> Result<(), GMapError> {
        self.gmap.validate_invariants()?;
        let mut faces = HashSet::new();
        for d in self.faces() {
            let face = self.gmap.rep(d, Alphas::FACE)?;
            if !faces.insert(face) {
                return Err(GMapError::structural(format!(
                    "face handle {d} shares face {face} with another handle"
                )));
            }
        }
        Ok(())
    }
}
