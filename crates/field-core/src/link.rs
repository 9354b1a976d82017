//! Links: a random walk across particle neighbours that grows, sends a glowing
//! head along the path, then fades out.

use crate::constants::{FALLBACK_SURFACE_SIZE, LINK_SPEED_SCALE};
use crate::noise::uniform_int;
use crate::particle::Particle;
use crate::settings::FieldSettings;
use crate::surface::{draw_line, Surface};
use crate::view::View;
use glam::DVec2;
use rand::Rng;
use smallvec::SmallVec;

pub type Walk = SmallVec<[usize; 8]>;
pub type Points = SmallVec<[DVec2; 8]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkStage {
    Growing,
    Traveling,
    Fading,
    Finished,
}

/// Projected path plus the alpha it should be stroked at.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkStroke {
    pub points: Points,
    pub alpha: f64,
}

#[derive(Clone, Debug)]
pub struct Link {
    /// Target walk length.
    pub length: usize,
    pub verts: Walk,
    /// Prefix of `verts` the head has already reached.
    pub linked: Walk,
    /// Planar distance of each edge of `verts`; filled when growth ends.
    pub distances: SmallVec<[f64; 8]>,
    /// Progress along the current edge, in logical units.
    pub traveled: f64,
    pub fade: u32,
    pub stage: LinkStage,
    pub finished: bool,
}

impl Link {
    pub fn new(start: usize, length: usize) -> Self {
        let mut verts = Walk::new();
        verts.push(start);
        Self {
            length,
            linked: verts.clone(),
            verts,
            distances: SmallVec::new(),
            traveled: 0.0,
            fade: 0,
            stage: LinkStage::Growing,
            finished: false,
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn finish(&mut self) {
        self.stage = LinkStage::Finished;
        self.finished = true;
    }

    /// Advance one frame and return what should be drawn, if anything.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        particles: &[Particle],
        view: &View,
        settings: &FieldSettings,
        rng: &mut R,
    ) -> Option<LinkStroke> {
        match self.stage {
            LinkStage::Growing => {
                self.grow(particles, rng);
                None
            }
            LinkStage::Traveling => self.travel(particles, view, settings),
            LinkStage::Fading => self.fade_out(particles, view, settings),
            LinkStage::Finished => {
                self.finished = true;
                None
            }
        }
    }

    pub fn render<R, S>(
        &mut self,
        particles: &[Particle],
        view: &View,
        settings: &FieldSettings,
        rng: &mut R,
        surface: &mut S,
    ) where
        R: Rng + ?Sized,
        S: Surface + ?Sized,
    {
        if let Some(stroke) = self.step(particles, view, settings, rng) {
            draw_line(
                surface,
                &stroke.points,
                settings.color,
                settings.line_width,
                stroke.alpha,
            );
        }
    }

    fn grow<R: Rng + ?Sized>(&mut self, particles: &[Particle], rng: &mut R) {
        let last = self.verts.last().and_then(|&i| particles.get(i));
        let Some(last) = last.filter(|p| !p.neighbors.is_empty()) else {
            self.finish();
            return;
        };
        // Every neighbour already visited: the walk can never reach its length.
        if last.neighbors.iter().all(|n| self.verts.contains(n)) {
            log::debug!("[link] dead end after {} verts", self.verts.len());
            self.finish();
            return;
        }

        let pick = last.neighbors[uniform_int(rng, 0, last.neighbors.len() - 1)];
        if !self.verts.contains(&pick) {
            self.verts.push(pick);
        }

        if self.verts.len() >= self.length {
            let mut distances = SmallVec::new();
            for pair in self.verts.windows(2) {
                match (particles.get(pair[0]), particles.get(pair[1])) {
                    (Some(a), Some(b)) => {
                        distances.push(DVec2::new(a.x - b.x, a.y - b.y).length())
                    }
                    _ => {
                        self.finish();
                        return;
                    }
                }
            }
            self.distances = distances;
            self.stage = LinkStage::Traveling;
        }
    }

    fn travel(
        &mut self,
        particles: &[Particle],
        view: &View,
        settings: &FieldSettings,
    ) -> Option<LinkStroke> {
        if self.distances.is_empty() {
            self.finish();
            return None;
        }

        let mut points = project_walk(&self.linked, particles, view);
        let width = if view.width > 0.0 {
            view.width
        } else {
            FALLBACK_SURFACE_SIZE
        };
        self.traveled += settings.link_speed * LINK_SPEED_SCALE * width;

        let edge = self.linked.len() - 1;
        let d = self.distances[edge];
        let from = self.linked[edge];
        let to = self.verts[self.linked.len()];
        let (a, b) = match (particles.get(from), particles.get(to)) {
            (Some(a), Some(b)) => (a.position(), b.position()),
            _ => {
                self.finish();
                return None;
            }
        };

        if self.traveled >= d {
            self.traveled = 0.0;
            self.linked.push(to);
            points.push(view.project_vec(b));
            if self.linked.len() >= self.verts.len() {
                self.stage = LinkStage::Fading;
            }
        } else {
            let rest = d - self.traveled;
            let head = (b * self.traveled + a * rest) / d;
            points.push(view.project_vec(head));
        }

        Some(LinkStroke {
            points,
            alpha: settings.link_opacity,
        })
    }

    fn fade_out(
        &mut self,
        particles: &[Particle],
        view: &View,
        settings: &FieldSettings,
    ) -> Option<LinkStroke> {
        if self.verts.len() < 2 {
            self.finish();
            return None;
        }

        self.fade += 1;
        let alpha = (1.0 - self.fade as f64 / settings.link_fade as f64) * settings.link_opacity;
        if self.fade >= settings.link_fade {
            self.finish();
        }

        (alpha > 0.0).then(|| LinkStroke {
            points: project_walk(&self.verts, particles, view),
            alpha,
        })
    }
}

fn project_walk(walk: &[usize], particles: &[Particle], view: &View) -> Points {
    walk.iter()
        .filter_map(|&i| particles.get(i))
        .map(|p| view.project_vec(p.position()))
        .collect()
}
