//! The seam between mesh building and whatever performs planar triangulation.
//!
//! A [TriangulationBackend] receives borrowed polygon geometry plus a [TriangulationBehavior],
//! and hands back an owned [TriangulationOutput]. Output buffers belong to the returned value and
//! are released when it is dropped.

use std::{collections::TryReserveError, error, fmt};

use crate::Polygon;

mod earcut;
pub use earcut::{EarcutBackend, EarcutBackendError};
mod refine;

/// Marker value reported for points lying on an input segment or the triangulation boundary
pub const BOUNDARY_MARKER: i32 = 1;

/// Borrowed planar straight-line graph handed to a backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarGeometry<'p> {
    /// Packed `(x, y)` pairs
    pub points: &'p [f64],
    /// One packed `(x, y)` marker inside each hole
    pub holes: &'p [f64],
    /// Packed pairs of indices into `points`
    pub segments: &'p [i32],
}

impl<'p> PlanarGeometry<'p> {
    pub fn point_count(&self) -> usize {
        self.points.len() / 2
    }

    pub fn hole_count(&self) -> usize {
        self.holes.len() / 2
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len() / 2
    }
}

impl<'p> From<&'p Polygon> for PlanarGeometry<'p> {
    fn from(polygon: &'p Polygon) -> Self {
        Self {
            points: &polygon.points,
            holes: &polygon.holes,
            segments: &polygon.segments,
        }
    }
}

/// Independent switches controlling one backend pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriangulationBehavior {
    /// Never insert points on input segments
    pub preserve_boundary: bool,
    /// Suppress console output from backends which write any. `tracing` events are unaffected.
    pub quiet: bool,
    pub exact_arithmetic: bool,
    /// Report point boundary markers
    pub markers: bool,
    /// The input is a previous triangulation rather than a planar graph
    pub refine_prior: bool,
    /// Honor per-triangle [AreaConstraints]
    pub area_constrained: bool,
    /// Additional quality passes, each bisecting the boundary segments once more. Larger values never
    /// request less subdivision.
    pub quality_passes: u32,
}

impl TriangulationBehavior {
    /// Triangulate the planar graph exactly as given, without inserting any points
    pub const fn conforming() -> Self {
        Self {
            preserve_boundary: true,
            quiet: true,
            exact_arithmetic: true,
            markers: true,
            refine_prior: false,
            area_constrained: false,
            quality_passes: 0,
        }
    }

    /// Refine a previous triangulation under area constraints, inserting points wherever needed
    pub const fn refinement(quality_passes: u32) -> Self {
        Self {
            preserve_boundary: false,
            quiet: true,
            exact_arithmetic: true,
            markers: true,
            refine_prior: true,
            area_constrained: true,
            quality_passes,
        }
    }

    /// Render as a Triangle-style switch string, for backends which speak that encoding
    pub fn switches(&self) -> String {
        let mut switches = String::from("p");
        if self.refine_prior {
            switches.push('r');
        }
        if self.area_constrained {
            switches.push('a');
        }
        switches.push('z');
        if !self.markers {
            switches.push('B');
        }
        if self.quiet {
            switches.push('Q');
        }
        if !self.exact_arithmetic {
            switches.push('X');
        }
        for _ in 0..self.quality_passes {
            switches.push('Y');
        }
        switches
    }
}

impl fmt::Display for TriangulationBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.switches())
    }
}

/// Maximum area for each triangle of a prior triangulation, in triangle order
#[derive(Debug, Clone, PartialEq)]
pub struct AreaConstraints(Vec<f64>);

impl AreaConstraints {
    /// Constrain `triangle_count` triangles to the same maximum `area`
    pub fn uniform(triangle_count: usize, area: f64) -> Result<Self, TryReserveError> {
        let mut areas = Vec::new();
        areas.try_reserve_exact(triangle_count)?;
        areas.resize(triangle_count, area);
        Ok(Self(areas))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for AreaConstraints {
    fn from(areas: Vec<f64>) -> Self {
        Self(areas)
    }
}

/// Read access to the buffers of a finished triangulation.
///
/// The declared counts are authoritative; buffers shorter than the counts imply are a contract
/// violation reported as an [InternalError](crate::InternalError) by the consumer.
pub trait TriangulationOutput {
    fn point_count(&self) -> usize;
    fn triangle_count(&self) -> usize;
    /// Corner indices stored per triangle; the first three are the vertices
    fn corners(&self) -> usize {
        3
    }
    /// Packed `(x, y)` pairs
    fn points(&self) -> &[f64];
    /// Packed corner indices, [TriangulationOutput::corners] per triangle, counterclockwise
    fn triangles(&self) -> &[i32];
    /// One marker per point, if the backend produced them
    fn point_markers(&self) -> Option<&[i32]>;
}

/// A planar triangulator usable by [MeshBuilder](crate::MeshBuilder)
pub trait TriangulationBackend {
    type Output: TriangulationOutput;
    type Error: error::Error;

    /// Triangulate a planar straight-line graph
    fn triangulate(&self, geometry: PlanarGeometry<'_>, behavior: &TriangulationBehavior) -> Result<Self::Output, Self::Error>;

    /// Refine `prior` so that triangle `i`, and everything it is split into, respects `constraints[i]`
    fn refine(&self, prior: &Self::Output, constraints: &AreaConstraints, behavior: &TriangulationBehavior) -> Result<Self::Output, Self::Error>;
}

impl<B: TriangulationBackend + ?Sized> TriangulationBackend for &B {
    type Output = B::Output;
    type Error = B::Error;

    fn triangulate(&self, geometry: PlanarGeometry<'_>, behavior: &TriangulationBehavior) -> Result<Self::Output, Self::Error> {
        (**self).triangulate(geometry, behavior)
    }

    fn refine(&self, prior: &Self::Output, constraints: &AreaConstraints, behavior: &TriangulationBehavior) -> Result<Self::Output, Self::Error> {
        (**self).refine(prior, constraints, behavior)
    }
}

/// Owned triangulation buffers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Triangulation {
    pub points: Vec<f64>,
    pub triangles: Vec<i32>,
    pub point_markers: Option<Vec<i32>>,
}

impl TriangulationOutput for Triangulation {
    fn point_count(&self) -> usize {
        self.points.len() / 2
    }

    fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    fn points(&self) -> &[f64] {
        &self.points
    }

    fn triangles(&self) -> &[i32] {
        &self.triangles
    }

    fn point_markers(&self) -> Option<&[i32]> {
        self.point_markers.as_deref()
    }
}
