//! Viewpoint state and the logical → pixel projection shared by every entity.

use crate::constants::{FALLBACK_SURFACE_SIZE, SIZE_RATIO_DIVISOR};
use glam::{DVec2, DVec3};

/// Everything `project` reads: surface size, viewpoint offset (pointer or
/// tilt), ambient drift and the two parallax gains.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
    pub width: f64,
    pub height: f64,
    pub viewpoint: DVec2,
    pub drift: DVec2,
    pub motion: f64,
    pub noise_strength: f64,
}

impl View {
    pub fn new(width: f64, height: f64, motion: f64, noise_strength: f64) -> Self {
        Self {
            width,
            height,
            viewpoint: DVec2::new(width / 2.0, height / 2.0),
            drift: DVec2::ZERO,
            motion,
            noise_strength,
        }
    }

    #[inline]
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    /// Project a logical `(x, y, z)` to surface pixels. Depth `z` multiplies
    /// the offset between the surface centre and the viewpoint.
    pub fn project(&self, x: f64, y: f64, z: f64) -> DVec2 {
        let size = self.size();
        let logical = DVec2::new(x, y);
        let offset = size / 2.0 - self.viewpoint + (self.drift - 0.5) * self.noise_strength;
        logical * size + offset * z * self.motion
    }

    #[inline]
    pub fn project_vec(&self, p: DVec3) -> DVec2 {
        self.project(p.x, p.y, p.z)
    }

    /// Largest surface dimension; radius scaling uses `size_ratio() / 1000`.
    pub fn size_ratio(&self) -> f64 {
        if self.width <= 0.0 && self.height <= 0.0 {
            return FALLBACK_SURFACE_SIZE;
        }
        self.width.max(self.height)
    }

    #[inline]
    pub fn radius_scale(&self) -> f64 {
        self.size_ratio() / SIZE_RATIO_DIVISOR
    }
}
