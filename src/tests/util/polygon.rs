use crate::Polygon;

pub fn unit_square() -> Polygon {
    Polygon::from_rings(&[[0., 0.], [1., 0.], [1., 1.], [0., 1.]], &[])
}

pub fn star() -> Polygon {
    Polygon::from_rings(&[
        [1.0, 0.0],
        [2.0, 2.0],
        [0.0, 1.0],
        [-2.0, 2.0],
        [-1.0, 0.0],
        [-2.0, -2.0],
        [0.0, -1.0],
        [2.0, -2.0],
    ], &[])
}

/// A 10x10 square with a 4x4 hole in the middle
pub fn frame() -> Polygon {
    Polygon::from_rings(
        &[[0., 0.], [10., 0.], [10., 10.], [0., 10.]],
        &[&[[3., 3.], [3., 7.], [7., 7.], [7., 3.]]],
    )
}

/// Points only, no segments: taken as one ring in order
pub fn bare_points() -> Polygon {
    Polygon::new(vec![0., 0., 4., 0., 4., 2., 0., 2.], Vec::new(), Vec::new())
}

pub fn all() -> Vec<Polygon> {
    vec![unit_square(), star(), frame(), bare_points()]
}

pub fn regular(n: usize, radius: f64) -> Polygon {
    let ring: Vec<[f64; 2]> = (0..n).map(|i| {
        let theta = std::f64::consts::PI * 2. * (i as f64) / (n as f64);
        let (y, x) = theta.sin_cos();
        [x * radius, y * radius]
    }).collect();
    Polygon::from_rings(&ring, &[])
}
