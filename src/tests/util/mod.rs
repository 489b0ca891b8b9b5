pub mod backend;
pub mod events;
pub mod polygon;
mod grid;

pub use grid::GridVertex;

use crate::Mesh;

/// Summed planar area of every mesh triangle
pub fn planar_area(mesh: &Mesh) -> f64 {
    mesh.iter_triangles().map(|t| {
        let [a, b, c] = t.map(|vi| mesh.vertex(vi as usize).unwrap());
        ((b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])).abs() / 2.
    }).sum()
}
