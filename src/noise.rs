use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Deterministic 2D procedural perturbation
pub trait Noise {
    /// Sample the noise field at `(x, y)` scaled by `frequency`. The result lies within `[-1, 1]`.
    fn perlin2d(&self, x: f64, y: f64, frequency: f64) -> f64;
}

impl<N: Noise + ?Sized> Noise for &N {
    fn perlin2d(&self, x: f64, y: f64, frequency: f64) -> f64 {
        (**self).perlin2d(x, y, frequency)
    }
}

/// A field which is zero everywhere
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoNoise;

impl Noise for NoNoise {
    fn perlin2d(&self, _x: f64, _y: f64, _frequency: f64) -> f64 {
        0.
    }
}

/// Classic gradient noise over a shuffled permutation table.
///
/// Integer lattice points always sample to zero, so a frequency of `0` disables the perturbation.
#[derive(Clone)]
pub struct PerlinNoise {
    perm: [u8; 512],
}

impl PerlinNoise {
    pub const DEFAULT_SEED: u64 = 0x5eed;

    /// Build a noise field whose permutation table is shuffled from `seed`
    pub fn new(seed: u64) -> Self {
        let mut table: Vec<u8> = (0..=255).collect();
        table.shuffle(&mut StdRng::seed_from_u64(seed));

        let mut perm = [0u8; 512];
        for (i, p) in perm.iter_mut().enumerate() {
            *p = table[i & 255];
        }
        Self { perm }
    }

    /// Sample the unscaled field
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let xf = x.floor();
        let yf = y.floor();
        let xi = (xf as i64 & 255) as usize;
        let yi = (yf as i64 & 255) as usize;
        let x = x - xf;
        let y = y - yf;
        let u = fade(x);
        let v = fade(y);

        let p = &self.perm;
        let aa = p[p[xi] as usize + yi];
        let ab = p[p[xi] as usize + yi + 1];
        let ba = p[p[xi + 1] as usize + yi];
        let bb = p[p[xi + 1] as usize + yi + 1];

        let x0 = lerp(u, grad(aa, x, y), grad(ba, x - 1., y));
        let x1 = lerp(u, grad(ab, x, y - 1.), grad(bb, x - 1., y - 1.));
        lerp(v, x0, x1).clamp(-1., 1.)
    }
}

impl Default for PerlinNoise {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl std::fmt::Debug for PerlinNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerlinNoise").finish_non_exhaustive()
    }
}

impl Noise for PerlinNoise {
    fn perlin2d(&self, x: f64, y: f64, frequency: f64) -> f64 {
        self.sample(x * frequency, y * frequency)
    }
}

#[inline(always)]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6. - 15.) + 10.)
}

#[inline(always)]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

#[inline(always)]
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    match hash & 7 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        3 => -x - y,
        4 => x,
        5 => -x,
        6 => y,
        _ => -y,
    }
}
