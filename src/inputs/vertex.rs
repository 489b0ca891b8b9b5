use std::fmt::{self, Debug};

use num_traits::{real::Real, ToPrimitive};

/// A two-dimensional point.
///
/// The coordinate type must implement [num_traits::real::Real], reexported as [crate::Real].
pub trait Vertex {
    /// The type of the individual `x` and `y` coordinates
    type Coordinate: Real;

    /// The x [Vertex::Coordinate] value
    fn x(&self) -> Self::Coordinate;
    /// The y [Vertex::Coordinate] value
    fn y(&self) -> Self::Coordinate;
}

/// A planar `f64` coordinate, the unit every mesh vertex is built from
#[derive(Default, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Converts any [Vertex] into a [Point], returning [None] if a coordinate can't be represented as an `f64`
    pub fn from_vertex<V: Vertex>(v: &V) -> Option<Self> {
        Some(Self::new(v.x().to_f64()?, v.y().to_f64()?))
    }
}

impl Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl Vertex for Point {
    type Coordinate = f64;

    #[inline(always)]
    fn x(&self) -> Self::Coordinate { self.x }

    #[inline(always)]
    fn y(&self) -> Self::Coordinate { self.y }
}

impl<C: Debug + Real> Vertex for [C; 2] {
    type Coordinate = C;

    #[inline(always)]
    fn x(&self) -> Self::Coordinate {
        self[0]
    }

    #[inline(always)]
    fn y(&self) -> Self::Coordinate {
        self[1]
    }
}

impl<C: Debug + Real> Vertex for (C, C) {
    type Coordinate = C;

    #[inline(always)]
    fn x(&self) -> Self::Coordinate {
        self.0
    }

    #[inline(always)]
    fn y(&self) -> Self::Coordinate {
        self.1
    }
}

impl<V: Vertex> Vertex for &V {
    type Coordinate = V::Coordinate;

    #[inline(always)]
    fn x(&self) -> Self::Coordinate {
        (**self).x()
    }

    #[inline(always)]
    fn y(&self) -> Self::Coordinate {
        (**self).y()
    }
}
