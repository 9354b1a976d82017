use glam::DVec2;
use rand::Rng;
use std::f64::consts::TAU;

/// Continuous uniform sample in `[min, max)`. A degenerate range yields `min`.
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + rng.gen::<f64>() * (max - min)
}

/// Integer uniform sample in `[min, max]` inclusive. Returns `min` when
/// `max <= min`.
#[inline]
pub fn uniform_int<R: Rng + ?Sized>(rng: &mut R, min: usize, max: usize) -> usize {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Two-in-one sampler: continuous in `[min, max)` or integral in `[min, max]`.
pub fn random<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64, continuous: bool) -> f64 {
    if continuous {
        uniform(rng, min, max)
    } else {
        let lo = min.ceil();
        let hi = max.floor();
        if hi <= lo {
            return lo;
        }
        rng.gen_range(lo as i64..=hi as i64) as f64
    }
}

/// Periodic ambient drift: a point on a circle sampled at frame `i`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriftPath {
    pub length: u32,
    pub radius: f64,
}

impl DriftPath {
    pub fn new(length: u32, radius: f64) -> Self {
        Self {
            length: length.max(1),
            radius,
        }
    }

    #[inline]
    pub fn angle_step(&self) -> f64 {
        TAU / self.length as f64
    }

    /// Point on the circle for frame `i`. Pure; the angle is reduced modulo
    /// the period first so `point(i) == point(i + length)` holds exactly.
    pub fn point(&self, i: u64) -> DVec2 {
        let a = self.angle_step() * (i % self.length as u64) as f64;
        DVec2::new(self.radius * a.cos(), self.radius * a.sin())
    }

    /// Next drift index, wrapping at the period.
    #[inline]
    pub fn advance(&self, i: u32) -> u32 {
        let next = i + 1;
        if next >= self.length {
            0
        } else {
            next
        }
    }
}

/// `noise_point` with explicit period and radius.
#[inline]
pub fn noise_point(i: u64, length: u32, radius: f64) -> DVec2 {
    DriftPath::new(length, radius).point(i)
}
