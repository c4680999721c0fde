#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-gmap
//!
//! mesh-gmap is a Rust library for combinatorial surface meshes built as
//! *generalized maps*: a set of darts (oriented incidence flags) connected
//! by involutions `alpha_0 .. alpha_N`. Vertices, edges, faces and every
//! other cell are orbits of darts under subsets of the alphas, so one
//! traversal routine answers every incidence query in every dimension.
//!
//! ## Features
//! - Dart arena with checked construction, sewing and unsewing
//! - Generator sets with cofinite "every alpha except" forms
//! - Lazy breadth-first orbit traversal and cell/incidence queries
//! - Orbit- and cell-keyed attachment maps with uniform writes
//! - Square, hexagonal and polyhedral generators
//! - JSON reading and writing of maps and cell maps, validated on load
//! - Optional Rayon-backed parallel cell enumeration (`rayon` feature)
//!
//! ## Usage
//!
//! ```
//! use mesh_gmap::prelude::*;
//!
//! let grid = square_grid(2, 3)?;
//! let g = &grid.gmap;
//! assert_eq!(g.one_dart_per_cell(0, None)?.count(), 12);
//!
//! let mut labels = CellMap::faces(g)?;
//! labels.set(g, grid.rows[1][2], "corner");
//! let corners: Vec<Dart> = g
//!     .one_dart_per_incident_cell(grid.rows[1][2], 0, 2, None)?
//!     .collect();
//! assert_eq!(corners.len(), 4);
//! # Ok::<(), GMapError>(())
//! ```
//!
//! ## Invariants
//! Maps loaded from external data are always checked for link ranges and
//! the involution law; commutation of non-adjacent alphas is checked by
//! default and can be relaxed through [`topology::ValidationOptions`].

pub mod algs;
pub mod data;
pub mod debug_invariants;
pub mod io;
pub mod mesh_error;
pub mod mesh_generation;
pub mod topology;

pub use debug_invariants::DebugInvariants;
pub use mesh_error::GMapError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::incidence::{IncidenceTable, cell_counts, euler_characteristic};
    pub use crate::algs::isomorphism::is_isomorphic;
    pub use crate::data::{AttachMap, CellMap, OrbitMap, OrbitReprs};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::io::{GMapReader, GMapWriter, JsonFormat, LoadOptions};
    pub use crate::mesh_error::GMapError;
    pub use crate::mesh_generation::{
        GridMesh, cube, hex_grid, hex_vertex_coords, square_grid, tetrahedron,
    };
    pub use crate::topology::{Alphas, Dart, GMap, ValidationOptions, ViolationHandling};
}
