/// Source of terrain heights.
///
/// Providers are addressed in `(latitude, longitude)` order, i.e. `(y, x)` relative to how
/// [Point](crate::Point)s and mesh vertices are stored. Implementations must be deterministic.
pub trait ElevationProvider {
    fn elevation(&self, latitude: f64, longitude: f64) -> f64;
}

impl<F: Fn(f64, f64) -> f64> ElevationProvider for F {
    fn elevation(&self, latitude: f64, longitude: f64) -> f64 {
        self(latitude, longitude)
    }
}

/// The same height everywhere
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FlatElevation(pub f64);

impl ElevationProvider for FlatElevation {
    fn elevation(&self, _latitude: f64, _longitude: f64) -> f64 {
        self.0
    }
}
