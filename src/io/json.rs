//! JSON reader/writer for maps and cell maps, backed by `serde_json`.

use std::io::{Read, Write};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::data::cell_map::CellMap;
use crate::io::format::{SerializedCellMap, SerializedGMap};
use crate::io::{GMapReader, GMapWriter, LoadOptions};
use crate::mesh_error::GMapError;
use crate::topology::gmap::GMap;

/// JSON encoding of the serialized shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat {
    pub options: LoadOptions,
    /// Indent output.
    pub pretty: bool,
}

impl JsonFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LoadOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Parses a map from a JSON string.
    pub fn gmap_from_str(&self, s: &str) -> Result<GMap, GMapError> {
        self.read_gmap(s.as_bytes())
    }

    /// Encodes a map as a JSON string.
    pub fn gmap_to_string(&self, g: &GMap) -> Result<String, GMapError> {
        let mut out = Vec::new();
        self.write_gmap(&mut out, g)?;
        String::from_utf8(out).map_err(|e| GMapError::Parse(e.to_string()))
    }

    fn encode<W: Write, T: Serialize>(&self, writer: W, value: &T) -> Result<(), GMapError> {
        if self.pretty {
            serde_json::to_writer_pretty(writer, value)?;
        } else {
            serde_json::to_writer(writer, value)?;
        }
        Ok(())
    }
}

impl GMapReader for JsonFormat {
    fn read_gmap<R: Read>(&self, reader: R) -> Result<GMap, GMapError> {
        let s: SerializedGMap = serde_json::from_reader(reader)?;
        let g = s.to_gmap(self.options)?;
        log::debug!(
            "read {}-dimensional gmap with {} darts from JSON",
            g.dimension(),
            g.ndarts()
        );
        Ok(g)
    }

    fn read_cell_map<R, A, V, F>(&self, reader: R, g: &GMap, f: F) -> Result<CellMap<V>, GMapError>
    where
        R: Read,
        A: DeserializeOwned,
        V: Clone,
        F: FnMut(A) -> V,
    {
        let s: SerializedCellMap<A> = serde_json::from_reader(reader)?;
        s.into_cell_map(g, f)
    }
}

impl GMapWriter for JsonFormat {
    fn write_gmap<W: Write>(&self, writer: W, g: &GMap) -> Result<(), GMapError> {
        self.encode(writer, &SerializedGMap::from(g))
    }

    fn write_cell_map<W, V>(&self, writer: W, g: &GMap, map: &CellMap<V>) -> Result<(), GMapError>
    where
        W: Write,
        V: Clone + Serialize,
    {
        self.encode(writer, &SerializedCellMap::from_cell_map(g, map))
    }
}
