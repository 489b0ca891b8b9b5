/// The order the vertices in a triangle are listed in
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TriangleWinding {
    Counterclockwise,
    Clockwise,
}

impl TriangleWinding {
    /// Reorder a counterclockwise triangle `(a, b, c)` into this winding.
    ///
    /// Clockwise output swaps the first two corners, giving `(b, a, c)`.
    #[inline(always)]
    pub fn arrange<T>(self, a: T, b: T, c: T) -> [T; 3] {
        match self {
            Self::Counterclockwise => [a, b, c],
            Self::Clockwise => [b, a, c],
        }
    }
}
