//! Data module: values attached to orbits and cells.

pub mod cell_map;
pub mod orbit_map;
pub mod orbit_reprs;

pub use cell_map::CellMap;
pub use orbit_map::{AttachMap, OrbitMap};
pub use orbit_reprs::OrbitReprs;
