//! Map I/O: the flat external shapes and readers/writers for them.
//!
//! This module provides trait-based readers and writers for loading and
//! saving a `GMap` together with cell-attached data. Loading always runs
//! structural validation; [`LoadOptions`] decides how strictly.

pub mod format;
pub mod json;

use std::io::{Read, Write};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::data::cell_map::CellMap;
use crate::mesh_error::GMapError;
use crate::topology::gmap::GMap;
use crate::topology::validation::ValidationOptions;

pub use format::{SerializedCellMap, SerializedGMap, SerializedOrbitMap};
pub use json::JsonFormat;

/// Options applied when a map is loaded from external data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Validation applied to the loaded dart graph.
    pub validation: ValidationOptions,
}

/// Trait for readers that produce maps and cell maps.
pub trait GMapReader {
    /// Parse and validate a map from a reader.
    fn read_gmap<R: Read>(&self, reader: R) -> Result<GMap, GMapError>;

    /// Parse a cell map over `g`, converting each stored value with `f`.
    fn read_cell_map<R, A, V, F>(&self, reader: R, g: &GMap, f: F) -> Result<CellMap<V>, GMapError>
    where
        R: Read,
        A: DeserializeOwned,
        V: Clone,
        F: FnMut(A) -> V;
}

/// Trait for writers that serialize maps and cell maps.
pub trait GMapWriter {
    /// Write a map to a writer.
    fn write_gmap<W: Write>(&self, writer: W, g: &GMap) -> Result<(), GMapError>;

    /// Write a cell map over `g`, one entry per assigned cell.
    fn write_cell_map<W, V>(&self, writer: W, g: &GMap, map: &CellMap<V>) -> Result<(), GMapError>
    where
        W: Write,
        V: Clone + Serialize;
}
