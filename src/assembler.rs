use crate::{backend::BOUNDARY_MARKER, gradient, ElevationProvider, Gradient, InternalError, Mesh, Noise, Options, TriangulationOutput};

/// Copies a finished triangulation into a [Mesh], lifting every point onto the terrain
pub(crate) struct MeshAssembler<'c, E: ?Sized, N: ?Sized> {
    elevation: &'c E,
    noise: &'c N,
}

impl<'c, E: ElevationProvider + ?Sized, N: Noise + ?Sized> MeshAssembler<'c, E, N> {
    pub fn new(elevation: &'c E, noise: &'c N) -> Self {
        Self { elevation, noise }
    }

    /// Append every point of `output` as a vertex and every triangle with [Mesh::WINDING].
    ///
    /// The output is checked against its declared counts before anything is appended, so a
    /// violation leaves `mesh` untouched.
    pub fn fill<T: TriangulationOutput + ?Sized, G: Gradient>(&self, output: &T, options: &Options<G>, mesh: &mut Mesh) -> Result<(), InternalError> {
        let point_count = output.point_count();
        let triangle_count = output.triangle_count();
        if triangle_count == 0 {
            return Ok(());
        }

        let corners = output.corners();
        if corners < 3 {
            return Err(InternalError::new(format!("Backend reported {} corners per triangle", corners)));
        }
        let points = output.points();
        if points.len() / 2 < point_count {
            return Err(InternalError::new(format!("Backend declared {} points but supplied {} coordinates", point_count, points.len())));
        }
        let triangles = output.triangles();
        let corner_total = triangle_count.checked_mul(corners)
            .ok_or_else(|| InternalError::new("Backend triangle count overflowed"))?;
        if triangles.len() < corner_total {
            return Err(InternalError::new(format!("Backend declared {} triangles of {} corners but supplied {} indices", triangle_count, corners, triangles.len())));
        }
        let markers = output.point_markers();
        if let Some(markers) = markers {
            if markers.len() < point_count {
                return Err(InternalError::new(format!("Backend declared {} points but supplied {} markers", point_count, markers.len())));
            }
        }
        for t in triangles[..corner_total].chunks_exact(corners) {
            if let Some(&vi) = t[..3].iter().find(|&&vi| vi < 0 || vi as usize >= point_count) {
                return Err(InternalError::new(format!("Backend triangle refers to point {} of {}", vi, point_count)));
            }
        }

        let base = mesh.next_index(point_count)?;
        mesh.reserve(point_count, triangle_count);

        for (i, p) in points[..point_count * 2].chunks_exact(2).enumerate() {
            let (x, y) = (p[0], p[1]);

            let mut ele = options.height_offset + match options.elevation {
                Some(elevation) => elevation,
                None => self.elevation.elevation(y, x),
            };
            // Boundary points are never perturbed
            if let Some(markers) = markers {
                if markers[i] != BOUNDARY_MARKER {
                    ele += self.noise.perlin2d(x, y, options.ele_noise_freq);
                }
            }

            let color = gradient::sample_color(&options.gradient, self.noise, x, y, options.color_noise_freq);
            mesh.push_vertex(x, y, ele, color);
        }

        for t in triangles[..corner_total].chunks_exact(corners) {
            let [a, b, c] = [base + t[0] as u32, base + t[1] as u32, base + t[2] as u32];
            mesh.push_triangle(Mesh::WINDING.arrange(a, b, c));
        }

        Ok(())
    }
}
