//! Closed polyhedral surfaces.

use crate::mesh_error::GMapError;
use crate::topology::dart::Dart;
use crate::topology::gmap::GMap;

/// Surface of a tetrahedron: four triangles, every edge sewn.
///
/// Returns the map and a dart of the first triangle.
pub fn tetrahedron() -> Result<(GMap, Dart), GMapError> {
    let mut g = GMap::new(2)?;
    let t: Vec<Dart> = (0..4)
        .map(|_| g.add_polygon(3))
        .collect::<Result<_, _>>()?;

    g.sew(2, t[0], t[1])?;
    let d = g.al(t[0], [0, 1])?;
    g.sew(2, d, t[2])?;
    let d = g.al(t[0], [1, 0])?;
    g.sew(2, d, t[3])?;

    for k in 1..4 {
        let next = if k == 3 { 1 } else { k + 1 };
        let d0 = g.al(t[k], [0, 1])?;
        let d1 = g.al(t[next], [1])?;
        g.sew(2, d0, d1)?;
    }
    Ok((g, t[0]))
}

/// Surface of a cube: bottom, top and four sides, every edge sewn.
///
/// Returns the map and a dart of the bottom face.
pub fn cube() -> Result<(GMap, Dart), GMapError> {
    let mut g = GMap::new(2)?;
    let bottom = g.add_polygon(4)?;
    let top = g.add_polygon(4)?;
    let sides: Vec<Dart> = (0..4)
        .map(|_| g.add_polygon(4))
        .collect::<Result<_, _>>()?;

    let (mut b, mut t) = (bottom, top);
    for &s in &sides {
        g.sew(2, b, s)?;
        let s_top = g.al(s, [1, 0, 1])?;
        g.sew(2, t, s_top)?;
        b = g.al(b, [0, 1])?;
        t = g.al(t, [0, 1])?;
    }
    for (k, &s0) in sides.iter().enumerate() {
        let s1 = sides[(k + 1) % sides.len()];
        let d0 = g.al(s0, [0, 1])?;
        let d1 = g.al(s1, [1])?;
        g.sew(2, d0, d1)?;
    }
    Ok((g, bottom))
}
