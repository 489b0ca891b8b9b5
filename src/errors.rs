use std::{error, fmt};

use backtrace::Backtrace;

/// Describes why a [Polygon](crate::Polygon) cannot be handed to a triangulation backend
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PolygonError {
    /// `points` holds an odd number of coordinates
    OddPointCoordinates(usize),
    /// `holes` holds an odd number of coordinates
    OddHoleCoordinates(usize),
    /// `segments` holds an odd number of indices
    OddSegmentIndices(usize),
    /// A segment refers to a point which does not exist
    SegmentOutOfRange { segment: usize, index: usize, point_count: usize },
}

impl error::Error for PolygonError { }

impl fmt::Display for PolygonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OddPointCoordinates(len) => write!(f, "Point list contains an odd number of coordinates ({})", len),
            Self::OddHoleCoordinates(len) => write!(f, "Hole list contains an odd number of coordinates ({})", len),
            Self::OddSegmentIndices(len) => write!(f, "Segment list contains an odd number of indices ({})", len),
            Self::SegmentOutOfRange { segment, index, point_count } =>
                write!(f, "Segment {} refers to point {}, but the polygon only has {} points", segment, index, point_count),
        }
    }
}

/// A broken invariant, either in the data a backend returned or in this crate itself.
///
/// These are never recoverable; the backtrace is captured unresolved and resolved on display.
#[derive(Debug)]
pub struct InternalError {
    pub msg: String,
    pub backtrace: Backtrace,
}

impl InternalError {
    #[cold]
    #[inline(always)]
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            backtrace: Backtrace::new_unresolved(),
        }
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut backtrace = self.backtrace.clone();
        backtrace.resolve();
        write!(f, "{}\n{:?}", self.msg, backtrace)
    }
}

impl error::Error for InternalError { }

/// Describes an error which occurred while adding a polygon to a [Mesh](crate::Mesh)
#[derive(Debug)]
#[non_exhaustive]
pub enum MeshError<BackendError: error::Error> {
    /// The polygon's packed buffers are malformed
    InvalidPolygon(PolygonError),
    /// The [TriangulationBackend](crate::TriangulationBackend) failed, including failing to allocate its output
    Backend(BackendError),
    /// The backend broke its output contract, or a mesh index no longer fits in a `u32`
    InternalError(InternalError),
}

impl<BackendError: error::Error> MeshError<BackendError> {
    #[inline(always)]
    pub(crate) fn internal(msg: impl Into<String>) -> Self {
        MeshError::InternalError(InternalError::new(msg))
    }
}

impl<BackendError: error::Error> From<PolygonError> for MeshError<BackendError> {
    fn from(e: PolygonError) -> Self {
        Self::InvalidPolygon(e)
    }
}

impl<BackendError: error::Error> From<InternalError> for MeshError<BackendError> {
    fn from(e: InternalError) -> Self {
        Self::InternalError(e)
    }
}

impl<BackendError: error::Error> fmt::Display for MeshError<BackendError> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPolygon(error) => fmt::Display::fmt(error, f),
            Self::Backend(error) => write!(f, "Triangulation backend failed: {}", error),
            Self::InternalError(error) => fmt::Display::fmt(error, f),
        }
    }
}

impl<BackendError: error::Error + 'static> error::Error for MeshError<BackendError> {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::InvalidPolygon(error) => Some(error),
            Self::Backend(error) => Some(error),
            Self::InternalError(error) => Some(error),
        }
    }
}
