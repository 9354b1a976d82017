//! Particles and flares: the two static populations of the field.

use crate::color::Color;
use crate::constants::*;
use crate::noise::{uniform, uniform_int};
use crate::settings::FieldSettings;
use crate::surface::Surface;
use crate::view::View;
use glam::DVec3;
use rand::Rng;
use smallvec::SmallVec;

pub type Neighbors = SmallVec<[usize; 4]>;

/// A depth-parallaxed point. Position never changes after creation; apparent
/// motion comes entirely from projection.
#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub color: Color,
    pub opacity: f64,
    pub flicker: f64,
    pub neighbors: Neighbors,
}

impl Particle {
    pub fn new(x: f64, y: f64, z: f64, color: Color, opacity: f64) -> Self {
        Self {
            x,
            y,
            z,
            color,
            opacity,
            flicker: 0.0,
            neighbors: Neighbors::new(),
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R, color: Color) -> Self {
        let (lo, hi) = PARTICLE_XY_RANGE;
        let x = uniform(rng, lo, hi);
        let y = uniform(rng, lo, hi);
        let z = uniform_int(rng, 0, PARTICLE_Z_MAX as usize) as f64;
        let (o_lo, o_hi) = PARTICLE_OPACITY_RANGE;
        let opacity = uniform(rng, o_lo, o_hi);
        Self::new(x, y, z, color, opacity)
    }

    #[inline]
    pub fn position(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Ease the flicker toward `sample`, then clamp to `±FLICKER_LIMIT`.
    pub fn update_flicker(&mut self, sample: f64, smoothing: f64) -> f64 {
        self.flicker += (sample - self.flicker) / smoothing;
        self.flicker = self.flicker.clamp(-FLICKER_LIMIT, FLICKER_LIMIT);
        self.flicker
    }

    pub fn radius(&self, settings: &FieldSettings, view: &View) -> f64 {
        (self.z * settings.particle_size_multiplier + settings.particle_size_base)
            * view.radius_scale()
    }

    pub fn render<R, S>(&mut self, settings: &FieldSettings, view: &View, rng: &mut R, surface: &mut S)
    where
        R: Rng + ?Sized,
        S: Surface + ?Sized,
    {
        let pos = view.project(self.x, self.y, self.z);
        let r = self.radius(settings, view);
        let mut o = self.opacity;

        if settings.flicker {
            let sample = uniform(rng, -FLICKER_LIMIT, FLICKER_LIMIT);
            o = (o + self.update_flicker(sample, settings.flicker_smoothing)).clamp(0.0, 1.0);
        }

        surface.fill_circle(pos, r, self.color, o);

        if settings.render_particle_glare {
            let tilt = (view.drift.x - 0.5) * view.noise_strength * view.motion;
            surface.fill_ellipse(
                pos,
                r * GLARE_STRETCH,
                r,
                (settings.glare_angle - tilt).to_radians(),
                self.color,
                o * settings.glare_opacity_multiplier,
            );
        }
    }
}

/// Large, faint glow disc. Never interacts with anything.
#[derive(Clone, Debug)]
pub struct Flare {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub color: Color,
    pub opacity: f64,
}

impl Flare {
    pub fn random<R: Rng + ?Sized>(rng: &mut R, color: Color) -> Self {
        let (lo, hi) = FLARE_XY_RANGE;
        let (o_lo, o_hi) = FLARE_OPACITY_RANGE;
        Self {
            x: uniform(rng, lo, hi),
            y: uniform(rng, lo, hi),
            z: uniform_int(rng, 0, FLARE_Z_MAX as usize) as f64,
            color,
            opacity: uniform(rng, o_lo, o_hi),
        }
    }

    pub fn radius(&self, settings: &FieldSettings, view: &View) -> f64 {
        (self.z * settings.flare_size_multiplier + settings.flare_size_base) * view.radius_scale()
    }

    pub fn render<S: Surface + ?Sized>(&self, settings: &FieldSettings, view: &View, surface: &mut S) {
        let pos = view.project(self.x, self.y, self.z);
        surface.fill_circle(pos, self.radius(settings, view), self.color, self.opacity);
    }
}
