use num_traits::ToPrimitive;

use crate::{PolygonError, Vertex};

/// Planar footprint geometry in packed form.
///
/// `points` and `holes` are packed `(x, y)` pairs, `segments` are packed pairs of indices into
/// `points` describing constrained edges. Each entry of `holes` is a single point lying inside a
/// region which must be left out of the triangulation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    pub points: Vec<f64>,
    pub holes: Vec<f64>,
    pub segments: Vec<i32>,
}

impl Polygon {
    pub fn new(points: Vec<f64>, holes: Vec<f64>, segments: Vec<i32>) -> Self {
        Self { points, holes, segments }
    }

    /// Build a polygon from an outer ring and any number of hole rings.
    ///
    /// Every ring is closed with constrained segments. A marker is placed inside each hole ring
    /// (the centroid of its first ear with a positive area, falling back to the ring's vertex average).
    pub fn from_rings<V: Vertex>(outer: &[V], holes: &[&[V]]) -> Self {
        let mut polygon = Self::default();
        polygon.push_ring(outer);
        for hole in holes {
            if polygon.push_ring(hole) {
                let ring: Vec<[f64; 2]> = hole.iter().filter_map(to_pair).collect();
                let [x, y] = interior_marker(&ring);
                polygon.holes.push(x);
                polygon.holes.push(y);
            }
        }
        polygon
    }

    /// Append a closed ring of constrained segments. Returns `false` if the ring was skipped because it
    /// has fewer than 3 representable vertices.
    pub fn push_ring<V: Vertex>(&mut self, ring: &[V]) -> bool {
        let ring: Vec<[f64; 2]> = ring.iter().filter_map(to_pair).collect();
        if ring.len() < 3 {
            return false;
        }

        let first = self.point_count() as i32;
        let len = ring.len() as i32;
        for (i, [x, y]) in ring.into_iter().enumerate() {
            self.points.push(x);
            self.points.push(y);
            self.segments.push(first + i as i32);
            self.segments.push(first + (i as i32 + 1) % len);
        }
        true
    }

    pub fn point_count(&self) -> usize {
        self.points.len() / 2
    }

    pub fn hole_count(&self) -> usize {
        self.holes.len() / 2
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len() / 2
    }

    /// Check the packing invariants of the three buffers
    pub fn validate(&self) -> Result<(), PolygonError> {
        if self.points.len() % 2 != 0 {
            return Err(PolygonError::OddPointCoordinates(self.points.len()));
        }
        if self.holes.len() % 2 != 0 {
            return Err(PolygonError::OddHoleCoordinates(self.holes.len()));
        }
        if self.segments.len() % 2 != 0 {
            return Err(PolygonError::OddSegmentIndices(self.segments.len()));
        }
        let point_count = self.point_count();
        for (i, &index) in self.segments.iter().enumerate() {
            if index < 0 || index as usize >= point_count {
                return Err(PolygonError::SegmentOutOfRange { segment: i / 2, index: index.max(0) as usize, point_count });
            }
        }
        Ok(())
    }
}

fn to_pair<V: Vertex>(v: &V) -> Option<[f64; 2]> {
    Some([v.x().to_f64()?, v.y().to_f64()?])
}

fn interior_marker(ring: &[[f64; 2]]) -> [f64; 2] {
    let n = ring.len();
    let signed_area: f64 = (0..n).map(|i| {
        let [x0, y0] = ring[i];
        let [x1, y1] = ring[(i + 1) % n];
        x0 * y1 - x1 * y0
    }).sum();

    for i in 0..n {
        let a = ring[(i + n - 1) % n];
        let b = ring[i];
        let c = ring[(i + 1) % n];
        let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
        // Convex corner in the ring's own orientation
        if cross * signed_area <= 0. {
            continue;
        }
        let centroid = [(a[0] + b[0] + c[0]) / 3., (a[1] + b[1] + c[1]) / 3.];
        if ring.iter().enumerate().all(|(j, p)| j == (i + n - 1) % n || j == i || j == (i + 1) % n || !in_triangle(a, b, c, *p)) {
            return centroid;
        }
    }

    let (sx, sy) = ring.iter().fold((0., 0.), |(sx, sy), [x, y]| (sx + x, sy + y));
    [sx / n as f64, sy / n as f64]
}

fn in_triangle(a: [f64; 2], b: [f64; 2], c: [f64; 2], p: [f64; 2]) -> bool {
    let d0 = (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0]);
    let d1 = (c[0] - b[0]) * (p[1] - b[1]) - (c[1] - b[1]) * (p[0] - b[0]);
    let d2 = (a[0] - c[0]) * (p[1] - c[1]) - (a[1] - c[1]) * (p[0] - c[0]);
    let has_neg = d0 < 0. || d1 < 0. || d2 < 0.;
    let has_pos = d0 > 0. || d1 > 0. || d2 > 0.;
    !(has_neg && has_pos)
}
