use std::collections::HashMap;

use zot::Zot;

use super::{earcut::{allocation, orientation}, AreaConstraints, Triangulation, TriangulationOutput, EarcutBackendError, BOUNDARY_MARKER};

type Edge = (usize, usize);

#[inline(always)]
fn edge(a: usize, b: usize) -> Edge {
    if a < b { (a, b) } else { (b, a) }
}

/// Conforming red/green subdivision of a triangulation.
///
/// A red split cuts a triangle into four at its edge midpoints, a green split bisects it from the
/// midpoint of its one split edge. Any triangle with two split edges is promoted to red, so no
/// hanging vertices remain after a round. Children inherit their parent's area limit.
pub(super) struct Refiner {
    points: Vec<[f64; 2]>,
    markers: Vec<i32>,
    triangles: Vec<[usize; 3]>,
    limits: Vec<f64>,
}

impl Refiner {
    pub fn new(prior: &Triangulation, constraints: &AreaConstraints, area_constrained: bool) -> Result<Self, EarcutBackendError> {
        let points: Vec<[f64; 2]> = prior.points.chunks_exact(2).map(|p| [p[0], p[1]]).collect();
        let markers = match prior.point_markers() {
            Some(markers) if markers.len() == points.len() => markers.to_vec(),
            Some(markers) => return Err(EarcutBackendError::InvalidPrior(format!("{} markers for {} points", markers.len(), points.len()))),
            None => vec![0; points.len()],
        };

        let mut triangles = Vec::new();
        triangles.try_reserve_exact(prior.triangle_count()).map_err(allocation(prior.triangle_count()))?;
        for (ti, t) in prior.triangles.chunks_exact(3).enumerate() {
            if let Some(&vi) = t.iter().find(|&&vi| vi < 0 || vi as usize >= points.len()) {
                return Err(EarcutBackendError::InvalidPrior(format!("Triangle {} refers to point {} of {}", ti, vi, points.len())));
            }
            triangles.push([t[0] as usize, t[1] as usize, t[2] as usize]);
        }

        let limits = if area_constrained {
            constraints.as_slice().to_vec()
        } else {
            vec![f64::INFINITY; triangles.len()]
        };
        Ok(Self { points, markers, triangles, limits })
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    fn area(&self, [a, b, c]: [usize; 3]) -> f64 {
        orientation(self.points[a], self.points[b], self.points[c]).abs() / 2.
    }

    fn is_oversized(&self, ti: usize) -> bool {
        let limit = self.limits[ti];
        // Non-positive limits constrain nothing
        limit > 0. && self.area(self.triangles[ti]) > limit
    }

    pub fn has_oversized(&self) -> bool {
        (0..self.triangles.len()).any(|ti| self.is_oversized(ti))
    }

    /// Split every triangle exceeding its limit. Returns `false` once nothing needed splitting.
    pub fn subdivide_oversized(&mut self) -> Result<bool, EarcutBackendError> {
        let marked: Vec<bool> = (0..self.triangles.len()).map(|ti| self.is_oversized(ti)).collect();
        if !marked.contains(&true) {
            return Ok(false);
        }
        let adjacency = self.adjacency()?;
        self.subdivide(marked, HashMap::new(), &adjacency)?;
        Ok(true)
    }

    /// Bisect every edge owned by a single triangle once, closing the mesh up with green and red splits
    pub fn split_boundary(&mut self) -> Result<(), EarcutBackendError> {
        let adjacency = self.adjacency()?;
        let mut split_edges = HashMap::new();
        split_edges.try_reserve(adjacency.len()).map_err(allocation(adjacency.len()))?;
        split_edges.extend(adjacency.iter()
            .filter(|(_, owners)| matches!(owners, Zot::One(_)))
            .map(|(&e, _)| (e, None)));
        self.subdivide(vec![false; self.triangles.len()], split_edges, &adjacency)
    }

    fn adjacency(&self) -> Result<HashMap<Edge, Zot<usize>>, EarcutBackendError> {
        let mut adjacency: HashMap<Edge, Zot<usize>> = HashMap::new();
        adjacency.try_reserve(self.triangles.len() * 3).map_err(allocation(self.triangles.len() * 3))?;
        for (ti, t) in self.triangles.iter().enumerate() {
            for k in 0..3 {
                let slot = adjacency.entry(edge(t[k], t[(k + 1) % 3])).or_insert(Zot::Zero);
                *slot = match std::mem::replace(slot, Zot::Zero) {
                    Zot::Zero => Zot::One(ti),
                    Zot::One(t0) => Zot::Two(t0, ti),
                    // Non-manifold edge; the first two owners are enough to stay conforming
                    two => two,
                };
            }
        }
        Ok(adjacency)
    }

    fn subdivide(&mut self, mut marked: Vec<bool>, mut split_edges: HashMap<Edge, Option<usize>>, adjacency: &HashMap<Edge, Zot<usize>>) -> Result<(), EarcutBackendError> {
        split_edges.try_reserve(self.triangles.len() * 3).map_err(allocation(self.triangles.len() * 3))?;
        for (ti, t) in self.triangles.iter().enumerate() {
            if marked[ti] {
                for k in 0..3 {
                    split_edges.insert(edge(t[k], t[(k + 1) % 3]), None);
                }
            }
        }

        // Promote triangles with two or more split edges until stable
        let mut changed = true;
        while changed {
            changed = false;
            for (ti, t) in self.triangles.iter().enumerate() {
                if marked[ti] {
                    continue;
                }
                let split = (0..3).filter(|&k| split_edges.contains_key(&edge(t[k], t[(k + 1) % 3]))).count();
                if split >= 2 {
                    marked[ti] = true;
                    changed = true;
                    for k in 0..3 {
                        split_edges.insert(edge(t[k], t[(k + 1) % 3]), None);
                    }
                }
            }
        }

        let mut triangles = Vec::new();
        let mut limits = Vec::new();
        let estimate = self.triangles.len() + 3 * marked.iter().filter(|&&m| m).count() + split_edges.len();
        triangles.try_reserve(estimate).map_err(allocation(estimate))?;
        limits.try_reserve(estimate).map_err(allocation(estimate))?;
        self.points.try_reserve(split_edges.len()).map_err(allocation(split_edges.len()))?;
        self.markers.try_reserve(split_edges.len()).map_err(allocation(split_edges.len()))?;

        for ti in 0..self.triangles.len() {
            let [a, b, c] = self.triangles[ti];
            let limit = self.limits[ti];
            if marked[ti] {
                let ab = self.midpoint(&mut split_edges, adjacency, a, b);
                let bc = self.midpoint(&mut split_edges, adjacency, b, c);
                let ca = self.midpoint(&mut split_edges, adjacency, c, a);
                for child in [[a, ab, ca], [ab, b, bc], [ca, bc, c], [ab, bc, ca]] {
                    triangles.push(child);
                    limits.push(limit);
                }
                continue;
            }

            let rotation = (0..3).find(|&k| {
                let t = [a, b, c];
                split_edges.contains_key(&edge(t[k], t[(k + 1) % 3]))
            });
            match rotation {
                Some(k) => {
                    let t = [a, b, c];
                    let (p, q, r) = (t[k], t[(k + 1) % 3], t[(k + 2) % 3]);
                    let m = self.midpoint(&mut split_edges, adjacency, p, q);
                    triangles.push([p, m, r]);
                    triangles.push([m, q, r]);
                    limits.push(limit);
                    limits.push(limit);
                }
                None => {
                    triangles.push([a, b, c]);
                    limits.push(limit);
                }
            }
        }

        self.triangles = triangles;
        self.limits = limits;
        Ok(())
    }

    fn midpoint(&mut self, split_edges: &mut HashMap<Edge, Option<usize>>, adjacency: &HashMap<Edge, Zot<usize>>, a: usize, b: usize) -> usize {
        let key = edge(a, b);
        if let Some(Some(vi)) = split_edges.get(&key) {
            return *vi;
        }

        let [xa, ya] = self.points[a];
        let [xb, yb] = self.points[b];
        let vi = self.points.len();
        self.points.push([(xa + xb) / 2., (ya + yb) / 2.]);
        let on_boundary = matches!(adjacency.get(&key), Some(Zot::One(_)) | None);
        self.markers.push(if on_boundary { BOUNDARY_MARKER } else { 0 });
        split_edges.insert(key, Some(vi));
        vi
    }

    pub fn finish(self, markers: bool) -> Result<Triangulation, EarcutBackendError> {
        let mut points = Vec::new();
        points.try_reserve_exact(self.points.len() * 2).map_err(allocation(self.points.len() * 2))?;
        points.extend(self.points.iter().flatten());

        let mut triangles = Vec::new();
        triangles.try_reserve_exact(self.triangles.len() * 3).map_err(allocation(self.triangles.len() * 3))?;
        triangles.extend(self.triangles.iter().flatten().map(|&vi| vi as i32));

        Ok(Triangulation {
            points,
            triangles,
            point_markers: markers.then_some(self.markers),
        })
    }
}
