#![allow(dead_code)]
use std::collections::HashSet;

use mesh_gmap::io::{LoadOptions, SerializedGMap};
use mesh_gmap::topology::{Alphas, Dart, GMap};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// Every generator set exercised by the property tests.
pub const ALL_GENERATORS: [Alphas; 8] = [
    Alphas::DART,
    Alphas::ALL,
    Alphas::VERTEX,
    Alphas::EDGE,
    Alphas::FACE,
    Alphas::HALF_EDGE,
    Alphas::ANGLE,
    Alphas::SIDE,
];

/// Number of `i`-cells of `g`.
pub fn ncells(g: &GMap, i: usize) -> usize {
    g.one_dart_per_cell(i, None).unwrap().count()
}

/// Darts of the orbit of `d`, as a set.
pub fn orbit_set(g: &GMap, d: Dart, a: Alphas) -> HashSet<Dart> {
    g.orbit(d, a).unwrap().collect()
}

/// Same map with darts renumbered by a seeded random permutation.
pub fn shuffled(g: &GMap, seed: u64) -> GMap {
    let n = g.ndarts();
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(&mut SmallRng::seed_from_u64(seed));
    let s = SerializedGMap::from(g);
    let mut darts = vec![Vec::new(); n];
    for (old, links) in s.darts.iter().enumerate() {
        darts[perm[old]] = links.iter().map(|&t| perm[t]).collect();
    }
    SerializedGMap {
        dimension: s.dimension,
        darts,
    }
    .to_gmap(LoadOptions::default())
    .unwrap()
}
