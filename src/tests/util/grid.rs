use crate::Vertex;

/// Single-precision easting/northing pair, standing in for coordinates read from survey data
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct GridVertex {
    pub east: f32,
    pub north: f32,
}

impl GridVertex {
    pub fn ring(coords: &[(f32, f32)]) -> Vec<Self> {
        coords.iter().map(|&c| c.into()).collect()
    }
}

impl Vertex for GridVertex {
    type Coordinate = f32;

    #[inline(always)]
    fn x(&self) -> f32 { self.east }

    #[inline(always)]
    fn y(&self) -> f32 { self.north }
}

impl From<(f32, f32)> for GridVertex {
    fn from((east, north): (f32, f32)) -> Self {
        Self { east, north }
    }
}
