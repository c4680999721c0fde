//! Top-level module for generalized-map topology.
//!
//! This module provides the core types for representing subdivided surfaces
//! as generalized maps. It includes:
//! - `Dart` handles and the `GMap` arena with its alpha involutions
//! - `Alphas` generator sets, including cofinite "all except" forms
//! - Breadth-first orbit traversal and derived cell queries
//! - Structural validation of the gmap axioms
//!
//! Most users build a map with the generators in [`crate::mesh_generation`]
//! or load one through [`crate::io`], then query it with [`GMap::cell`],
//! [`GMap::one_dart_per_cell`] and [`GMap::one_dart_per_incident_cell`].

pub mod alphas;
pub mod cells;
pub mod dart;
pub mod gmap;
pub mod orbit;
pub mod validation;

pub use alphas::{Alphas, MAX_DIMENSION};
pub use cells::{GroupByOrbit, RepPerOrbit, UniqueByOrbit};
pub use dart::Dart;
pub use gmap::GMap;
pub use orbit::{Orbit, OrbitPaths};
pub use validation::{ValidationOptions, ViolationHandling};
