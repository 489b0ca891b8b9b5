mod mesh;
pub use mesh::Mesh;
mod triangle_winding;
pub use triangle_winding::TriangleWinding;
