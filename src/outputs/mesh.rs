use crate::{InternalError, TriangleWinding};

/// Append-only accumulator of renderable geometry.
///
/// `vertices` holds flattened `(x, y, z)` triplets, `colors` one packed color per vertex and
/// `triangles` flattened vertex index triplets. A single mesh is typically shared across many
/// [MeshBuilder](crate::MeshBuilder) calls; each call only ever appends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<f64>,
    pub colors: Vec<u32>,
    pub triangles: Vec<u32>,
}

impl Mesh {
    /// The winding triangles are stored with
    pub const WINDING: TriangleWinding = TriangleWinding::Clockwise;

    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with room for `vertices` vertices and `triangles` triangles
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices * 3),
            colors: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles * 3),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.triangles.is_empty()
    }

    /// The `(x, y, z)` coordinates of vertex `index`
    pub fn vertex(&self, index: usize) -> Option<[f64; 3]> {
        let v = self.vertices.get(index * 3..index * 3 + 3)?;
        Some([v[0], v[1], v[2]])
    }

    /// The vertex indices of triangle `index`
    pub fn triangle(&self, index: usize) -> Option<[u32; 3]> {
        let t = self.triangles.get(index * 3..index * 3 + 3)?;
        Some([t[0], t[1], t[2]])
    }

    pub fn iter_triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.triangles.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.colors.clear();
        self.triangles.clear();
    }

    pub(crate) fn reserve(&mut self, vertices: usize, triangles: usize) {
        self.vertices.reserve(vertices * 3);
        self.colors.reserve(vertices);
        self.triangles.reserve(triangles * 3);
    }

    #[inline(always)]
    pub(crate) fn push_vertex(&mut self, x: f64, y: f64, z: f64, color: u32) {
        self.vertices.push(x);
        self.vertices.push(y);
        self.vertices.push(z);
        self.colors.push(color);
    }

    #[inline(always)]
    pub(crate) fn push_triangle(&mut self, [v0, v1, v2]: [u32; 3]) {
        self.triangles.push(v0);
        self.triangles.push(v1);
        self.triangles.push(v2);
    }

    /// The global index the next appended vertex will receive
    pub(crate) fn next_index(&self, additional: usize) -> Result<u32, InternalError> {
        let last = self.vertex_count().checked_add(additional)
            .ok_or_else(|| InternalError::new("Mesh vertex count overflowed usize"))?;
        if last as u64 > u32::MAX as u64 + 1 {
            return Err(InternalError::new(format!("Mesh would hold {} vertices, more than a u32 index can address", last)));
        }
        Ok(self.vertex_count() as u32)
    }

    /// Verify the parallel-buffer invariants: one color per vertex, whole triangles, and no index past the last vertex
    pub fn check_invariants(&self) -> Result<(), InternalError> {
        if self.vertices.len() % 3 != 0 {
            return Err(InternalError::new(format!("Vertex buffer length {} is not a multiple of 3", self.vertices.len())));
        }
        if self.colors.len() * 3 != self.vertices.len() {
            return Err(InternalError::new(format!("{} colors for {} vertices", self.colors.len(), self.vertex_count())));
        }
        if self.triangles.len() % 3 != 0 {
            return Err(InternalError::new(format!("Triangle buffer length {} is not a multiple of 3", self.triangles.len())));
        }
        let vertex_count = self.vertex_count();
        if let Some(index) = self.triangles.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(InternalError::new(format!("Triangle index {} is past the last of {} vertices", index, vertex_count)));
        }
        Ok(())
    }
}
