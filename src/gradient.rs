use ordered_float::OrderedFloat;

use crate::Noise;

/// A color ramp over `[0, 1]`, producing packed colors
pub trait Gradient {
    fn evaluate(&self, t: f64) -> u32;
}

impl<G: Gradient + ?Sized> Gradient for &G {
    fn evaluate(&self, t: f64) -> u32 {
        (**self).evaluate(t)
    }
}

/// Sample `gradient` at a point, using `noise` to pick the ramp position.
///
/// The noise value in `[-1, 1]` is mapped onto `[0, 1]` before evaluation.
pub fn sample_color<G: Gradient + ?Sized, N: Noise + ?Sized>(gradient: &G, noise: &N, x: f64, y: f64, frequency: f64) -> u32 {
    gradient.evaluate((noise.perlin2d(x, y, frequency) + 1.) / 2.)
}

/// Piecewise-linear ramp between `0xRRGGBBAA` color stops.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorGradient {
    stops: Vec<(f64, u32)>,
}

impl ColorGradient {
    /// Build a ramp from `(position, color)` stops. Positions are clamped to `[0, 1]` and sorted;
    /// non-finite positions are dropped.
    pub fn new(stops: impl IntoIterator<Item = (f64, u32)>) -> Self {
        let mut stops: Vec<(f64, u32)> = stops.into_iter()
            .filter(|(t, _)| t.is_finite())
            .map(|(t, c)| (t.clamp(0., 1.), c))
            .collect();
        stops.sort_by_key(|&(t, _)| OrderedFloat(t));
        Self { stops }
    }

    /// A gradient which evaluates to `color` everywhere
    pub fn solid(color: u32) -> Self {
        Self { stops: vec![(0., color)] }
    }

    pub fn stops(&self) -> &[(f64, u32)] {
        &self.stops
    }
}

impl Default for ColorGradient {
    fn default() -> Self {
        Self::solid(0xffffffff)
    }
}

impl Gradient for ColorGradient {
    fn evaluate(&self, t: f64) -> u32 {
        let t = if t.is_nan() { 0. } else { t.clamp(0., 1.) };
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return 0,
        };
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }

        let upper = self.stops.partition_point(|&(s, _)| s <= t);
        let (t0, c0) = self.stops[upper - 1];
        let (t1, c1) = self.stops[upper];
        let span = t1 - t0;
        if span <= 0. {
            return c1;
        }
        lerp_color(c0, c1, (t - t0) / span)
    }
}

fn lerp_color(c0: u32, c1: u32, t: f64) -> u32 {
    (0..4).fold(0u32, |color, channel| {
        let shift = 24 - channel * 8;
        let a = ((c0 >> shift) & 0xff) as f64;
        let b = ((c1 >> shift) & 0xff) as f64;
        let v = (a + (b - a) * t).round().clamp(0., 255.) as u32;
        color | (v << shift)
    })
}
