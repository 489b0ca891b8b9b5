//! Builds renderable terrain meshes out of planar footprints.
//!
//! Polygons are triangulated (and optionally refined to a maximum triangle area) by a
//! [TriangulationBackend], then lifted onto the terrain: every vertex samples an
//! [ElevationProvider], interior vertices are jittered by a [Noise] field, and colors come from a
//! [Gradient]. Vertical planes between two points can be extruded into the same [Mesh].

mod assembler;
mod builder;
mod elevation;
mod extruder;
mod gradient;
mod noise;
mod options;
mod triangulator;
mod inputs;
mod outputs;
mod errors;

pub mod backend;

#[cfg(any(test, feature = "benchmarking"))]
pub mod tests;

pub use errors::{InternalError, MeshError, PolygonError};

pub use backend::{AreaConstraints, EarcutBackend, EarcutBackendError, PlanarGeometry, Triangulation, TriangulationBackend, TriangulationBehavior, TriangulationOutput};
pub use builder::MeshBuilder;
pub use elevation::{ElevationProvider, FlatElevation};
pub use gradient::{sample_color, ColorGradient, Gradient};
pub use noise::{Noise, NoNoise, PerlinNoise};
pub use options::Options;

pub use inputs::*;
pub use outputs::*;

pub use num_traits::real::Real;
