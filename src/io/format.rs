//! Flat, index-based external shapes of maps and attachments.
//!
//! Darts are plain integers in every shape, so any serde format can carry
//! them. Map keys are dart indices; JSON writes them as strings (`"3"`) and
//! reads them back as integers.
//!
//! Deleted darts are never written. The live darts are renumbered densely in
//! arena order, and attachment keys are renumbered the same way, so a map and
//! its cell maps written together still agree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::cell_map::CellMap;
use crate::data::orbit_map::OrbitMap;
use crate::io::LoadOptions;
use crate::mesh_error::GMapError;
use crate::topology::alphas::{Alphas, MAX_DIMENSION};
use crate::topology::dart::Dart;
use crate::topology::gmap::GMap;

/// `{ "dimension": N, "darts": [[a0, a1, ...], ...] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedGMap {
    pub dimension: usize,
    /// `darts[d][i]` is `alpha_i(d)`.
    pub darts: Vec<Vec<usize>>,
}

impl From<&GMap> for SerializedGMap {
    fn from(g: &GMap) -> Self {
        let positions = live_positions(g);
        let darts = g
            .darts()
            .map(|d| {
                (0..=g.dimension())
                    .map(|i| positions[g[(d, i)].0])
                    .collect()
            })
            .collect();
        SerializedGMap {
            dimension: g.dimension(),
            darts,
        }
    }
}

impl SerializedGMap {
    /// Rebuilds the map, checking entry lengths, link ranges and the
    /// involution law, and commutation as configured in `options`.
    ///
    /// # Errors
    /// `DimensionTooLarge` for an unsupported dimension; `StructuralViolation`
    /// for anything else that does not describe a valid map.
    pub fn to_gmap(&self, options: LoadOptions) -> Result<GMap, GMapError> {
        if self.dimension > MAX_DIMENSION {
            return Err(GMapError::DimensionTooLarge {
                dimension: self.dimension,
                max: MAX_DIMENSION,
            });
        }
        let n = self.darts.len();
        let width = self.dimension + 1;
        let mut alpha = Vec::with_capacity(n * width);
        for (d, links) in self.darts.iter().enumerate() {
            if links.len() != width {
                return Err(GMapError::structural(format!(
                    "dart {d} has {} alpha links, expected {width}",
                    links.len()
                )));
            }
            for (i, &target) in links.iter().enumerate() {
                if target >= n {
                    return Err(GMapError::structural(format!(
                        "alpha_{i}({d}) = {target} is not one of the {n} darts"
                    )));
                }
                alpha.push(Dart(target));
            }
        }
        GMap::from_alpha_with(self.dimension, alpha, options.validation)
    }
}

/// `{ "i": i, "dim": dim | null, "darts": { "3": value, ... } }`
///
/// Only one dart per cell needs to be listed; loading spreads each value over
/// its whole cell. Writing lists the lowest dart of each assigned cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedCellMap<A> {
    pub i: usize,
    #[serde(default)]
    pub dim: Option<usize>,
    pub darts: BTreeMap<usize, A>,
}

impl<A: Clone> SerializedCellMap<A> {
    pub fn from_cell_map(g: &GMap, map: &CellMap<A>) -> Self {
        SerializedCellMap {
            i: map.cell(),
            dim: map.dim(),
            darts: representatives(g, map.cell_values(g)),
        }
    }
}

impl<A> SerializedCellMap<A> {
    /// Attaches the values to `g`, converting each with `f`.
    ///
    /// When several listed darts share a cell, the highest-numbered one wins.
    ///
    /// # Errors
    /// `IndexOutOfRange` if the cell does not exist in `g`; `DartOutOfRange`
    /// for a key that is not a dart of `g`.
    pub fn into_cell_map<V, F>(self, g: &GMap, mut f: F) -> Result<CellMap<V>, GMapError>
    where
        V: Clone,
        F: FnMut(A) -> V,
    {
        let mut map = CellMap::new(g, self.i, self.dim)?;
        for (d, value) in self.darts {
            let d = Dart(d);
            g.check_dart(d)?;
            map.set(g, d, f(value));
        }
        Ok(map)
    }
}

/// `{ "alphas": ..., "darts": { "3": value, ... } }`, for attachments over
/// arbitrary generator sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedOrbitMap<A> {
    pub alphas: Alphas,
    pub darts: BTreeMap<usize, A>,
}

impl<A: Clone> SerializedOrbitMap<A> {
    pub fn from_orbit_map(g: &GMap, map: &OrbitMap<A>) -> Self {
        SerializedOrbitMap {
            alphas: map.alphas(),
            darts: representatives(g, map.orbit_values(g)),
        }
    }
}

impl<A> SerializedOrbitMap<A> {
    /// Attaches the values to `g`, converting each with `f`.
    ///
    /// # Errors
    /// `IndexOutOfRange` if the generator set names an alpha `g` lacks;
    /// `DartOutOfRange` for a key that is not a dart of `g`.
    pub fn into_orbit_map<V, F>(self, g: &GMap, mut f: F) -> Result<OrbitMap<V>, GMapError>
    where
        V: Clone,
        F: FnMut(A) -> V,
    {
        let mut map = OrbitMap::for_gmap(g, self.alphas.normalized())?;
        for (d, value) in self.darts {
            let d = Dart(d);
            g.check_dart(d)?;
            map.set(g, d, f(value));
        }
        Ok(map)
    }
}

/// Index of each live dart once deleted darts are dropped. Deleted slots
/// hold `usize::MAX`; links of live darts never reach them.
fn live_positions(g: &GMap) -> Vec<usize> {
    let mut positions = vec![usize::MAX; g.ndarts()];
    for (k, d) in g.darts().enumerate() {
        positions[d.0] = k;
    }
    positions
}

fn representatives<A: Clone>(g: &GMap, values: Vec<(Dart, &A)>) -> BTreeMap<usize, A> {
    let positions = live_positions(g);
    values
        .into_iter()
        .filter(|&(d, _)| g.contains(d) && !g.is_deleted(d))
        .map(|(d, v)| (positions[d.0], v.clone()))
        .collect()
}
