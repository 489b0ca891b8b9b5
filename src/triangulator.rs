use tracing::{debug, trace};

use crate::{assembler::MeshAssembler, AreaConstraints, ElevationProvider, Gradient, Mesh, MeshError, Noise, Options, PlanarGeometry, Polygon, TriangulationBackend, TriangulationBehavior, TriangulationOutput};

/// Drives the conforming pass and the optional area-constrained refinement pass.
///
/// Every backend output is an owned value scoped to [PolygonTriangulator::add_polygon], so it is
/// dropped exactly once on every return path. The area constraints only exist when refining.
pub(crate) struct PolygonTriangulator<'c, B: ?Sized> {
    backend: &'c B,
}

impl<'c, B: TriangulationBackend + ?Sized> PolygonTriangulator<'c, B> {
    pub fn new(backend: &'c B) -> Self {
        Self { backend }
    }

    pub fn add_polygon<E, N, G>(&self, assembler: &MeshAssembler<'_, E, N>, mesh: &mut Mesh, polygon: &Polygon, options: &Options<G>) -> Result<(), MeshError<B::Error>>
    where E: ElevationProvider + ?Sized, N: Noise + ?Sized, G: Gradient {
        polygon.validate()?;

        let conforming = TriangulationBehavior::conforming();
        let base = self.backend.triangulate(PlanarGeometry::from(polygon), &conforming).map_err(MeshError::Backend)?;
        debug!(
            points = base.point_count(),
            triangles = base.triangle_count(),
            switches = %conforming,
            "conforming triangulation"
        );

        if !options.refines() {
            trace!(area = options.area, "refinement skipped");
            assembler.fill(&base, options, mesh)?;
            return Ok(());
        }

        let constraints = AreaConstraints::uniform(base.triangle_count(), options.area)
            .map_err(|e| MeshError::internal(format!("Failed to allocate {} area constraints: {}", base.triangle_count(), e)))?;
        let refinement = TriangulationBehavior::refinement(options.segment_split);
        let refined = self.backend.refine(&base, &constraints, &refinement).map_err(MeshError::Backend)?;
        debug!(
            points = refined.point_count(),
            triangles = refined.triangle_count(),
            area = options.area,
            switches = %refinement,
            "refined triangulation"
        );

        assembler.fill(&refined, options, mesh)?;
        Ok(())
    }
}
