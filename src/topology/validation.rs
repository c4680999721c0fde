//! Structural validation of generalized maps.
//!
//! Loading a map from external data must never produce a dart graph that
//! silently breaks the gmap axioms. Link ranges and involutions are always
//! checked; commutation of non-adjacent alphas is checked according to
//! [`ValidationOptions`].

use crate::mesh_error::GMapError;
use crate::topology::dart::Dart;
use crate::topology::gmap::GMap;

/// How to react to a violated optional axiom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationHandling {
    /// Skip the check entirely.
    Ignore,
    /// Log a warning and accept the map.
    Warn,
    /// Reject the map with `StructuralViolation`.
    Error,
}

/// Optional validation toggles for gmap construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Handling of `alpha_i alpha_j != alpha_j alpha_i` for `|i - j| >= 2`.
    pub commutation: ViolationHandling,
}

impl ValidationOptions {
    /// Enable all checks, rejecting on any violation.
    pub fn all() -> Self {
        Self {
            commutation: ViolationHandling::Error,
        }
    }

    /// Only closure and involution checks.
    pub fn structural_only() -> Self {
        Self {
            commutation: ViolationHandling::Ignore,
        }
    }
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self::all()
    }
}

/// Validate `g` against the gmap axioms.
pub fn validate_gmap(g: &GMap, options: ValidationOptions) -> Result<(), GMapError> {
    validate_links(g)?;
    validate_involutions(g)?;
    match options.commutation {
        ViolationHandling::Ignore => {}
        ViolationHandling::Warn => {
            if let Err(e) = validate_commutation(g) {
                log::warn!("accepting gmap despite violation: {e}");
            }
        }
        ViolationHandling::Error => validate_commutation(g)?,
    }
    Ok(())
}

/// Every link must address a dart of the map.
pub fn validate_links(g: &GMap) -> Result<(), GMapError> {
    let n = g.ndarts();
    let stride = g.dimension() + 1;
    for (k, target) in g.alpha_table().iter().enumerate() {
        if target.0 >= n {
            return Err(GMapError::structural(format!(
                "dart {} alpha_{} points to {target}, outside 0..{n}",
                k / stride,
                k % stride
            )));
        }
    }
    Ok(())
}

/// `alpha_i(alpha_i(d)) == d` for every dart and index.
///
/// Assumes [`validate_links`] passed.
pub fn validate_involutions(g: &GMap) -> Result<(), GMapError> {
    for i in 0..=g.dimension() {
        for d in g.darts() {
            let back = g[(g[(d, i)], i)];
            if back != d {
                return Err(GMapError::structural(format!(
                    "alpha_{i} is not an involution: {d} -> {} -> {back}",
                    g[(d, i)]
                )));
            }
        }
    }
    Ok(())
}

/// `alpha_i alpha_j == alpha_j alpha_i` for every pair with `|i - j| >= 2`.
///
/// Assumes [`validate_links`] passed.
pub fn validate_commutation(g: &GMap) -> Result<(), GMapError> {
    let dim = g.dimension();
    for i in 0..dim.saturating_sub(1) {
        for j in (i + 2)..=dim {
            if let Some(d) = g.darts().find(|&d| !commutes(g, d, i, j)) {
                return Err(GMapError::structural(format!(
                    "alpha_{i} and alpha_{j} do not commute at dart {d}"
                )));
            }
        }
    }
    Ok(())
}

#[inline]
fn commutes(g: &GMap, d: Dart, i: usize, j: usize) -> bool {
    g[(g[(d, i)], j)] == g[(g[(d, j)], i)]
}
