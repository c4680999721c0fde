//! Isomorphism of generalized maps.
//!
//! Two maps are isomorphic when a bijection of their darts commutes with
//! every alpha. A connected map is rigid: once one dart's image is fixed the
//! rest follows by breadth-first propagation, so checking is linear per
//! candidate image.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::topology::alphas::Alphas;
use crate::topology::dart::Dart;
use crate::topology::gmap::GMap;

/// Extends `d -> e` to an isomorphism from the component of `d` in `g` onto
/// the component of `e` in `h`.
///
/// Returns `None` if the dimensions differ, either dart is out of range or
/// deleted, or the components are not isomorphic under that choice.
pub fn find_isomorphism(g: &GMap, d: Dart, h: &GMap, e: Dart) -> Option<HashMap<Dart, Dart>> {
    if g.dimension() != h.dimension() || !g.contains(d) || !h.contains(e) {
        return None;
    }
    if g.is_deleted(d) || h.is_deleted(e) {
        return None;
    }
    let mut forward = HashMap::from([(d, e)]);
    let mut used = HashSet::from([e]);
    let mut queue = VecDeque::from([d]);
    while let Some(x) = queue.pop_front() {
        let y = forward[&x];
        for i in 0..=g.dimension() {
            let (x1, y1) = (g[(x, i)], h[(y, i)]);
            match forward.get(&x1) {
                Some(&mapped) if mapped == y1 => {}
                Some(_) => return None,
                None => {
                    if !used.insert(y1) {
                        return None;
                    }
                    forward.insert(x1, y1);
                    queue.push_back(x1);
                }
            }
        }
    }
    Some(forward)
}

/// Whether the live parts of `g` and `h` are isomorphic.
///
/// Components of `g` are matched greedily against the not yet matched
/// components of `h`.
pub fn is_isomorphic(g: &GMap, h: &GMap) -> bool {
    if g.dimension() != h.dimension() || g.nlive_darts() != h.nlive_darts() {
        return false;
    }
    let Ok(components) = g.one_dart_per_orbit(Alphas::ALL) else {
        return false;
    };
    let mut covered: HashSet<Dart> = HashSet::new();
    for c in components {
        let image = h
            .darts()
            .filter(|e| !covered.contains(e))
            .find_map(|e| find_isomorphism(g, c, h, e));
        match image {
            Some(m) => covered.extend(m.into_values()),
            None => return false,
        }
    }
    true
}
