use crate::ColorGradient;

/// Per-call settings for [MeshBuilder](crate::MeshBuilder) operations
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, bound(serialize = "G: serde::Serialize", deserialize = "G: serde::Deserialize<'de> + Default")))]
pub struct Options<G = ColorGradient> {
    /// Maximum triangle area. Zero (within `f64::EPSILON`) disables refinement.
    pub area: f64,
    /// Absolute elevation for every vertex. [None] samples the elevation provider instead.
    pub elevation: Option<f64>,
    /// Added to every sampled elevation; the extrusion height of planes.
    pub height_offset: f64,
    pub ele_noise_freq: f64,
    pub color_noise_freq: f64,
    pub gradient: G,
    /// Extra refinement quality passes requested from the backend
    pub segment_split: u32,
}

impl<G: Default> Default for Options<G> {
    fn default() -> Self {
        Self {
            area: 0.,
            elevation: None,
            height_offset: 0.,
            ele_noise_freq: 0.,
            color_noise_freq: 0.,
            gradient: G::default(),
            segment_split: 0,
        }
    }
}

impl Options {
    /// Default options with the default [ColorGradient]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G> Options<G> {
    /// Options with default values around the given gradient
    pub fn with_gradient(gradient: G) -> Self {
        Self {
            area: 0.,
            elevation: None,
            height_offset: 0.,
            ele_noise_freq: 0.,
            color_noise_freq: 0.,
            gradient,
            segment_split: 0,
        }
    }

    #[must_use]
    pub fn area(mut self, area: f64) -> Self {
        self.area = area;
        self
    }

    #[must_use]
    pub fn elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    #[must_use]
    pub fn height_offset(mut self, height_offset: f64) -> Self {
        self.height_offset = height_offset;
        self
    }

    #[must_use]
    pub fn ele_noise_freq(mut self, frequency: f64) -> Self {
        self.ele_noise_freq = frequency;
        self
    }

    #[must_use]
    pub fn color_noise_freq(mut self, frequency: f64) -> Self {
        self.color_noise_freq = frequency;
        self
    }

    #[must_use]
    pub fn segment_split(mut self, segment_split: u32) -> Self {
        self.segment_split = segment_split;
        self
    }

    /// Whether `area` asks for an area-constrained refinement pass
    pub fn refines(&self) -> bool {
        self.area.abs() >= f64::EPSILON
    }
}
