//! Re-export public algorithms.

pub mod incidence;
pub mod isomorphism;
#[cfg(feature = "rayon")]
pub mod parallel;

pub use incidence::{DualGraph, IncidenceTable, cell_counts, dual_graph, euler_characteristic};
pub use isomorphism::{find_isomorphism, is_isomorphic};
