use std::{collections::TryReserveError, error, fmt};

use ordered_float::OrderedFloat;
use smallvec::{smallvec, SmallVec};
use tracing::{debug, warn};

use super::{refine::Refiner, AreaConstraints, PlanarGeometry, Triangulation, TriangulationBackend, TriangulationBehavior, TriangulationOutput, BOUNDARY_MARKER};

/// Describes an error which occurred inside [EarcutBackend]
#[derive(Debug)]
#[non_exhaustive]
pub enum EarcutBackendError {
    /// `earcutr` rejected a ring set
    Earcut(String),
    /// An output buffer of the given element count could not be allocated
    AllocationFailed(usize),
    /// The number of area constraints does not match the prior triangulation
    ConstraintCount { constraints: usize, triangles: usize },
    /// The triangulation handed to refinement is internally inconsistent
    InvalidPrior(String),
}

impl error::Error for EarcutBackendError { }

impl fmt::Display for EarcutBackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Earcut(msg) => write!(f, "Ear clipping failed: {}", msg),
            Self::AllocationFailed(len) => write!(f, "Failed to allocate a buffer of {} elements", len),
            Self::ConstraintCount { constraints, triangles } =>
                write!(f, "{} area constraints supplied for {} triangles", constraints, triangles),
            Self::InvalidPrior(msg) => write!(f, "Invalid prior triangulation: {}", msg),
        }
    }
}

pub(super) fn allocation(len: usize) -> impl Fn(TryReserveError) -> EarcutBackendError {
    move |_| EarcutBackendError::AllocationFailed(len)
}

/// A pure Rust [TriangulationBackend].
///
/// The conforming pass splits the plane along the constrained segments into faces and ear clips
/// each bounded face, with the outlines of the components nested directly inside it cut out. No
/// points are ever inserted and every segment ends up as a triangle edge, provided segments only
/// meet at their endpoints. A face is left empty when it is the innermost face around one of the
/// hole markers. Segments which don't bound any face (dangling chains) are ignored. Without
/// segments, the points are taken as a single ring in order.
///
/// The refinement pass subdivides conformingly (see [TriangulationBackend::refine]): each
/// over-sized triangle is split into four at its edge midpoints and neighbors are bisected or split
/// to stay conforming. Every quality pass then bisects each boundary edge once more.
#[derive(Debug, Default, Clone, Copy)]
pub struct EarcutBackend {
    /// Upper bound on area-driven subdivision rounds
    pub max_rounds: Option<u32>,
    /// No further subdivision round starts once this many triangles exist
    pub max_triangles: Option<usize>,
}

impl EarcutBackend {
    pub const DEFAULT_MAX_ROUNDS: u32 = 24;
    pub const DEFAULT_MAX_TRIANGLES: usize = 1 << 22;
    /// Quality passes beyond this are ignored
    pub const MAX_QUALITY_PASSES: u32 = 8;

    pub fn new() -> Self {
        Self::default()
    }
}

impl TriangulationBackend for EarcutBackend {
    type Output = Triangulation;
    type Error = EarcutBackendError;

    fn triangulate(&self, geometry: PlanarGeometry<'_>, behavior: &TriangulationBehavior) -> Result<Triangulation, EarcutBackendError> {
        let point_count = geometry.point_count();

        let mut points = Vec::new();
        points.try_reserve_exact(point_count * 2).map_err(allocation(point_count * 2))?;
        points.extend_from_slice(&geometry.points[..point_count * 2]);

        if point_count < 3 {
            return Ok(Triangulation {
                points,
                triangles: Vec::new(),
                point_markers: behavior.markers.then(|| vec![BOUNDARY_MARKER; point_count]),
            });
        }

        let coords: Vec<[f64; 2]> = points.chunks_exact(2).map(|p| [p[0], p[1]]).collect();
        let mut markers = vec![0; point_count];
        let faces = if geometry.segments.is_empty() {
            markers.iter_mut().for_each(|m| *m = BOUNDARY_MARKER);
            Faces::single_ring((0..point_count).collect(), &coords)
        } else {
            for &vi in geometry.segments {
                if vi >= 0 && (vi as usize) < point_count {
                    markers[vi as usize] = BOUNDARY_MARKER;
                }
            }
            Faces::trace(geometry.segments, &coords)
        };

        let holes: Vec<[f64; 2]> = geometry.holes.chunks_exact(2).map(|h| [h[0], h[1]]).collect();
        let triangles = faces.clip(&holes, &coords)?;

        debug!(
            points = point_count,
            regions = faces.regions.len(),
            outlines = faces.outlines.len(),
            holes = holes.len(),
            triangles = triangles.len() / 3,
            "earcut conforming pass"
        );

        Ok(Triangulation {
            points,
            triangles,
            point_markers: behavior.markers.then_some(markers),
        })
    }

    fn refine(&self, prior: &Triangulation, constraints: &AreaConstraints, behavior: &TriangulationBehavior) -> Result<Triangulation, EarcutBackendError> {
        if behavior.area_constrained && constraints.len() != prior.triangle_count() {
            return Err(EarcutBackendError::ConstraintCount { constraints: constraints.len(), triangles: prior.triangle_count() });
        }

        let mut refiner = Refiner::new(prior, constraints, behavior.area_constrained)?;
        let max_rounds = self.max_rounds.unwrap_or(Self::DEFAULT_MAX_ROUNDS);
        let max_triangles = self.max_triangles.unwrap_or(Self::DEFAULT_MAX_TRIANGLES);

        let mut rounds = 0;
        while rounds < max_rounds && refiner.triangle_count() < max_triangles && refiner.subdivide_oversized()? {
            rounds += 1;
        }
        if refiner.has_oversized() {
            warn!(rounds, triangles = refiner.triangle_count(), "area refinement stopped before every triangle met its constraint");
        }

        let passes = behavior.quality_passes.min(Self::MAX_QUALITY_PASSES);
        if passes < behavior.quality_passes {
            warn!(requested = behavior.quality_passes, applied = passes, "quality passes clamped");
        }
        for pass in 0..passes {
            if refiner.triangle_count() >= max_triangles {
                warn!(pass, triangles = refiner.triangle_count(), "quality passes stopped at the triangle budget");
                break;
            }
            refiner.split_boundary()?;
        }

        let refined = refiner.finish(behavior.markers)?;
        debug!(rounds, quality_passes = passes, triangles = refined.triangle_count(), "earcut refinement pass");
        Ok(refined)
    }
}

struct Face {
    indices: Vec<usize>,
    area: f64,
    component: usize,
}

impl Face {
    fn new(indices: Vec<usize>, coords: &[[f64; 2]], component: usize) -> Self {
        let n = indices.len();
        let area = (0..n).map(|i| {
            let [x0, y0] = coords[indices[i]];
            let [x1, y1] = coords[indices[(i + 1) % n]];
            x0 * y1 - x1 * y0
        }).sum::<f64>() / 2.;
        Self { indices, area, component }
    }

    fn contains(&self, coords: &[[f64; 2]], [px, py]: [f64; 2]) -> bool {
        let n = self.indices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let [xi, yi] = coords[self.indices[i]];
            let [xj, yj] = coords[self.indices[j]];
            if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

/// The segment graph cut into faces
struct Faces {
    /// Bounded faces
    regions: Vec<Face>,
    /// The outer outline of each connected component, clockwise
    outlines: Vec<Face>,
}

impl Faces {
    fn single_ring(indices: Vec<usize>, coords: &[[f64; 2]]) -> Self {
        Self {
            regions: vec![Face::new(indices, coords, 0)],
            outlines: Vec::new(),
        }
    }

    /// Walk every face of the planar graph formed by `segments`
    fn trace(segments: &[i32], coords: &[[f64; 2]]) -> Self {
        let point_count = coords.len();
        let mut adjacency: Vec<SmallVec<[usize; 4]>> = vec![SmallVec::new(); point_count];
        for pair in segments.chunks_exact(2) {
            let (a, b) = (pair[0], pair[1]);
            if a < 0 || b < 0 || a == b || a as usize >= point_count || b as usize >= point_count {
                continue;
            }
            let (a, b) = (a as usize, b as usize);
            if !adjacency[a].contains(&b) {
                adjacency[a].push(b);
                adjacency[b].push(a);
            }
        }

        // Peel dangling chains, they enclose nothing
        let mut dangling = 0;
        let mut leaves: Vec<usize> = (0..point_count).filter(|&v| adjacency[v].len() == 1).collect();
        while let Some(v) = leaves.pop() {
            if adjacency[v].len() != 1 {
                continue;
            }
            let u = adjacency[v][0];
            adjacency[v].clear();
            adjacency[u].retain(|w| *w != v);
            dangling += 1;
            if adjacency[u].len() == 1 {
                leaves.push(u);
            }
        }
        if dangling > 0 {
            warn!(dangling, "ignored segments which do not bound any face");
        }

        for (v, neighbors) in adjacency.iter_mut().enumerate() {
            let [x, y] = coords[v];
            neighbors.sort_by_key(|&w| OrderedFloat((coords[w][1] - y).atan2(coords[w][0] - x)));
        }
        let component = components(&adjacency);

        let mut faces = Self { regions: Vec::new(), outlines: Vec::new() };
        let mut visited: Vec<SmallVec<[bool; 4]>> = adjacency.iter().map(|n| smallvec![false; n.len()]).collect();
        for start in 0..point_count {
            for first in 0..adjacency[start].len() {
                if visited[start][first] {
                    continue;
                }

                let mut cycle = Vec::new();
                let (mut u, mut k) = (start, first);
                while !visited[u][k] {
                    visited[u][k] = true;
                    cycle.push(u);
                    let v = adjacency[u][k];
                    let Some(back) = adjacency[v].iter().position(|&w| w == u) else {
                        break;
                    };
                    // The face stays on the left: leave `v` by the edge clockwise of the one we came in on
                    let len = adjacency[v].len();
                    k = (back + len - 1) % len;
                    u = v;
                }

                let face = Face::new(cycle, coords, component[start]);
                if face.area > 0. {
                    faces.regions.push(face);
                } else if face.area < 0. {
                    faces.outlines.push(face);
                }
            }
        }
        faces
    }

    /// Ear clip every filled region with the outlines directly nested in it cut out.
    ///
    /// Returned triangles are counterclockwise and index the original points.
    fn clip(&self, holes: &[[f64; 2]], coords: &[[f64; 2]]) -> Result<Vec<i32>, EarcutBackendError> {
        // Smallest region of another component around each outline
        let parent: Vec<Option<usize>> = self.outlines.iter().map(|outline| {
            let corner = coords[outline.indices[0]];
            self.regions.iter().enumerate()
                .filter(|(_, region)| region.component != outline.component && region.contains(coords, corner))
                .min_by_key(|(_, region)| OrderedFloat(region.area.abs()))
                .map(|(ri, _)| ri)
        }).collect();

        let mut is_hole = vec![false; self.regions.len()];
        for &marker in holes {
            let innermost = self.regions.iter().enumerate()
                .filter(|(_, region)| region.contains(coords, marker))
                .min_by_key(|(_, region)| OrderedFloat(region.area.abs()));
            if let Some((ri, _)) = innermost {
                is_hole[ri] = true;
            }
        }

        let mut triangles = Vec::new();
        for (ri, region) in self.regions.iter().enumerate() {
            if is_hole[ri] {
                continue;
            }

            let mut local_to_global = region.indices.clone();
            let mut hole_starts = Vec::new();
            for (oi, _) in parent.iter().enumerate().filter(|(_, p)| **p == Some(ri)) {
                hole_starts.push(local_to_global.len());
                local_to_global.extend_from_slice(&self.outlines[oi].indices);
            }

            let flat: Vec<f64> = local_to_global.iter().flat_map(|&vi| coords[vi]).collect();
            let local = earcutr::earcut(&flat, &hole_starts, 2)
                .map_err(|e| EarcutBackendError::Earcut(format!("{:?}", e)))?;

            triangles.try_reserve(local.len()).map_err(allocation(triangles.len() + local.len()))?;
            for t in local.chunks_exact(3) {
                let [a, b, c] = [local_to_global[t[0]], local_to_global[t[1]], local_to_global[t[2]]];
                let [b, c] = if orientation(coords[a], coords[b], coords[c]) < 0. { [c, b] } else { [b, c] };
                triangles.push(a as i32);
                triangles.push(b as i32);
                triangles.push(c as i32);
            }
        }
        Ok(triangles)
    }
}

/// Label the connected components of the segment graph
fn components(adjacency: &[SmallVec<[usize; 4]>]) -> Vec<usize> {
    let mut label = vec![usize::MAX; adjacency.len()];
    let mut next = 0;
    let mut stack = Vec::new();
    for start in 0..adjacency.len() {
        if label[start] != usize::MAX {
            continue;
        }
        label[start] = next;
        stack.push(start);
        while let Some(v) = stack.pop() {
            for &w in &adjacency[v] {
                if label[w] == usize::MAX {
                    label[w] = next;
                    stack.push(w);
                }
            }
        }
        next += 1;
    }
    label
}

pub(super) fn orientation(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}
