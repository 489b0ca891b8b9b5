use crate::{assembler::MeshAssembler, extruder::PlaneExtruder, triangulator::PolygonTriangulator, EarcutBackend, ElevationProvider, Gradient, InternalError, Mesh, MeshError, Noise, Options, PerlinNoise, Point, Polygon, TriangulationBackend, Vertex};

/// Turns footprint polygons and wall segments into terrain geometry.
///
/// The builder owns its collaborators: an [ElevationProvider], a [Noise] field used both to jitter
/// elevations and to pick gradient colors, and a [TriangulationBackend]. Every operation appends to
/// a caller-owned [Mesh]; a builder holds no per-call state, so one instance can serve any number of
/// meshes.
///
/// ```
/// use terrain_mesh::{FlatElevation, Mesh, MeshBuilder, Options, Polygon};
///
/// let builder = MeshBuilder::new(FlatElevation(0.));
/// let polygon = Polygon::from_rings(&[[0., 0.], [1., 0.], [1., 1.], [0., 1.]], &[]);
/// let mut mesh = Mesh::new();
/// builder.add_polygon(&mut mesh, &polygon, &Options::new().elevation(5.)).unwrap();
/// assert_eq!(mesh.triangle_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MeshBuilder<E, N = PerlinNoise, B = EarcutBackend> {
    elevation: E,
    noise: N,
    backend: B,
}

impl<E: ElevationProvider> MeshBuilder<E> {
    /// A builder using [PerlinNoise] with its default seed and the [EarcutBackend]
    pub fn new(elevation: E) -> Self {
        Self {
            elevation,
            noise: PerlinNoise::default(),
            backend: EarcutBackend::default(),
        }
    }
}

impl<E, N, B> MeshBuilder<E, N, B> {
    pub fn with_noise<N2: Noise>(self, noise: N2) -> MeshBuilder<E, N2, B> {
        MeshBuilder {
            elevation: self.elevation,
            noise,
            backend: self.backend,
        }
    }

    pub fn with_backend<B2: TriangulationBackend>(self, backend: B2) -> MeshBuilder<E, N, B2> {
        MeshBuilder {
            elevation: self.elevation,
            noise: self.noise,
            backend,
        }
    }

    pub fn elevation_provider(&self) -> &E {
        &self.elevation
    }

    pub fn noise(&self) -> &N {
        &self.noise
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<E: ElevationProvider, N: Noise, B: TriangulationBackend> MeshBuilder<E, N, B> {
    /// Triangulate `polygon`, refining it if `options.area` is non-zero, and append the result to `mesh`.
    ///
    /// Degenerate polygons contribute nothing.
    pub fn add_polygon<G: Gradient>(&self, mesh: &mut Mesh, polygon: &Polygon, options: &Options<G>) -> Result<(), MeshError<B::Error>> {
        let assembler = MeshAssembler::new(&self.elevation, &self.noise);
        PolygonTriangulator::new(&self.backend).add_polygon(&assembler, mesh, polygon, options)
    }

    /// Append a vertical plane between `p1` and `p2`, standing on the sampled terrain
    pub fn add_plane<V: Vertex, G: Gradient>(&self, mesh: &mut Mesh, p1: V, p2: V, options: &Options<G>) -> Result<(), InternalError> {
        let (p1, p2) = (to_point(&p1)?, to_point(&p2)?);
        PlaneExtruder::new(&self.elevation, &self.noise).add_plane(mesh, p1, p2, options)
    }

    /// Append a vertical plane between `p1` at `ele1` and `p2` at `ele2`
    pub fn add_plane_with_elevation<V: Vertex, G: Gradient>(&self, mesh: &mut Mesh, p1: V, p2: V, ele1: f64, ele2: f64, options: &Options<G>) -> Result<(), InternalError> {
        let (p1, p2) = (to_point(&p1)?, to_point(&p2)?);
        PlaneExtruder::new(&self.elevation, &self.noise).add_plane_with_elevation(mesh, p1, p2, ele1, ele2, options)
    }
}

fn to_point<V: Vertex>(v: &V) -> Result<Point, InternalError> {
    Point::from_vertex(v).ok_or_else(|| InternalError::new(format!("Vertex coordinates of type {} are not representable as f64", std::any::type_name::<V::Coordinate>())))
}
