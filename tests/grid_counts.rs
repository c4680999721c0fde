mod util;
use mesh_gmap::algs::{cell_counts, euler_characteristic};
use mesh_gmap::mesh_generation::{hex_grid, square_grid};
use mesh_gmap::topology::Alphas;
use std::collections::HashSet;
use util::*;

#[test]
fn square_grid_cell_counts() {
    for n in 1..=4 {
        for m in 1..=4 {
            let grid = square_grid(n, m).unwrap();
            let g = &grid.gmap;
            assert_eq!(ncells(g, 0), (n + 1) * (m + 1), "vertices of {n}x{m}");
            assert_eq!(ncells(g, 1), n * (m + 1) + m * (n + 1), "edges of {n}x{m}");
            assert_eq!(ncells(g, 2), n * m, "faces of {n}x{m}");
            assert_eq!(euler_characteristic(g), 1);
        }
    }
}

#[test]
fn unit_square_face_has_four_vertices() {
    let grid = square_grid(1, 1).unwrap();
    let g = &grid.gmap;
    assert_eq!(cell_counts(g), vec![4, 4, 1]);
    let face = grid.rows[0][0];
    let corners: Vec<_> = g
        .one_dart_per_incident_cell(face, 0, 2, None)
        .unwrap()
        .collect();
    assert_eq!(corners.len(), 4);
    let reps: HashSet<_> = corners
        .iter()
        .map(|&d| g.rep(d, Alphas::VERTEX).unwrap())
        .collect();
    assert_eq!(reps.len(), 4, "corners must be distinct vertices");
}

#[test]
fn boundary_of_grid() {
    // free alpha_2 darts are exactly the boundary edges, two darts each
    let (n, m) = (3, 5);
    let grid = square_grid(n, m).unwrap();
    let g = &grid.gmap;
    let free = g.darts().filter(|&d| g.is_free(d, 2)).count();
    assert_eq!(free, 2 * (2 * n + 2 * m));
}

#[test]
fn interior_vertices_have_degree_four() {
    let grid = square_grid(3, 3).unwrap();
    let g = &grid.gmap;
    let vg = grid.vertex_grid().unwrap();
    for row in &vg[1..3] {
        for &v in &row[1..3] {
            let edges = g.one_dart_per_incident_cell(v, 1, 0, None).unwrap().count();
            assert_eq!(edges, 4);
        }
    }
    let corner = g.one_dart_per_incident_cell(vg[0][0], 1, 0, None).unwrap().count();
    assert_eq!(corner, 2);
}

#[test]
fn hex_grid_faces_are_hexagons() {
    let grid = hex_grid(3, 4).unwrap();
    let g = &grid.gmap;
    assert_eq!(ncells(g, 2), 12);
    for h in grid.faces() {
        assert_eq!(g.one_dart_per_incident_cell(h, 0, 2, None).unwrap().count(), 6);
        assert_eq!(g.cell(h, 2, None).unwrap().count(), 12);
    }
}
