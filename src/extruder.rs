use tracing::trace;

use crate::{gradient, ElevationProvider, Gradient, InternalError, Mesh, Noise, Options, Point};

/// Builds vertical quads standing on the terrain between two points
pub(crate) struct PlaneExtruder<'c, E: ?Sized, N: ?Sized> {
    elevation: &'c E,
    noise: &'c N,
}

impl<'c, E: ElevationProvider + ?Sized, N: Noise + ?Sized> PlaneExtruder<'c, E, N> {
    pub fn new(elevation: &'c E, noise: &'c N) -> Self {
        Self { elevation, noise }
    }

    /// Sample (and perturb) the ground elevation under both points, then extrude between them
    pub fn add_plane<G: Gradient>(&self, mesh: &mut Mesh, p1: Point, p2: Point, options: &Options<G>) -> Result<(), InternalError> {
        let ele1 = self.elevation.elevation(p1.y, p1.x) + self.noise.perlin2d(p1.x, p1.y, options.ele_noise_freq);
        let ele2 = self.elevation.elevation(p2.y, p2.x) + self.noise.perlin2d(p2.x, p2.y, options.ele_noise_freq);
        self.add_plane_with_elevation(mesh, p1, p2, ele1, ele2, options)
    }

    /// Append two triangles spanning `ele` to `ele + height_offset` at both points.
    ///
    /// All six corners are fresh vertices sharing the color sampled at `p1`.
    pub fn add_plane_with_elevation<G: Gradient>(&self, mesh: &mut Mesh, p1: Point, p2: Point, ele1: f64, ele2: f64, options: &Options<G>) -> Result<(), InternalError> {
        let base = mesh.next_index(6)?;
        let color = gradient::sample_color(&options.gradient, self.noise, p1.x, p1.y, options.color_noise_freq);
        let top1 = ele1 + options.height_offset;
        let top2 = ele2 + options.height_offset;

        mesh.reserve(6, 2);
        mesh.push_vertex(p1.x, p1.y, ele1, color);
        mesh.push_vertex(p2.x, p2.y, ele2, color);
        mesh.push_vertex(p2.x, p2.y, top2, color);
        mesh.push_triangle([base, base + 1, base + 2]);

        mesh.push_vertex(p1.x, p1.y, top1, color);
        mesh.push_vertex(p1.x, p1.y, ele1, color);
        mesh.push_vertex(p2.x, p2.y, top2, color);
        mesh.push_triangle([base + 3, base + 4, base + 5]);

        trace!(%p1, %p2, base, "plane extruded");
        Ok(())
    }
}
