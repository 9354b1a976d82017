//! The field controller: owns every entity and drives the per-frame
//! update/draw sequence.

use crate::mesh;
use crate::noise::{uniform_int, DriftPath};
use crate::particle::{Flare, Particle};
use crate::link::Link;
use crate::settings::FieldSettings;
use crate::surface::{draw_line, Surface};
use crate::view::View;
use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct Field {
    pub settings: FieldSettings,
    pub view: View,
    particles: Vec<Particle>,
    flares: Vec<Flare>,
    links: Vec<Link>,
    triangles: Vec<[usize; 3]>,
    drift_path: DriftPath,
    drift_index: u32,
    rng: StdRng,
}

impl Field {
    pub fn new(settings: FieldSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(settings: FieldSettings, rng: StdRng) -> Self {
        let view = View::new(0.0, 0.0, settings.motion, settings.noise_strength);
        let drift_path = DriftPath::new(settings.noise_length, settings.noise_radius);
        Self {
            settings,
            view,
            particles: Vec::new(),
            flares: Vec::new(),
            links: Vec::new(),
            triangles: Vec::new(),
            drift_path,
            drift_index: 0,
            rng,
        }
    }

    /// Seed particles, wire neighbours and seed flares. Replaces any previous
    /// population; the viewpoint starts at the centre of `client_size`.
    pub fn init(&mut self, client_size: DVec2) {
        let color = self.settings.color;
        self.particles = (0..self.settings.particle_count)
            .map(|_| Particle::random(&mut self.rng, color))
            .collect();
        self.triangles = mesh::triangulate(self.particles.len());
        mesh::assign_neighbors(&mut self.particles, &self.triangles);

        self.flares.clear();
        if self.settings.render_flares {
            self.flares = (0..self.settings.flare_count)
                .map(|_| Flare::random(&mut self.rng, color))
                .collect();
        }
        self.links.clear();
        self.view.viewpoint = client_size / 2.0;

        log::info!(
            "[field] init particles={} triangles={} flares={}",
            self.particles.len(),
            self.triangles.len(),
            self.flares.len()
        );
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn flares(&self) -> &[Flare] {
        &self.flares
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    pub fn drift_index(&self) -> u32 {
        self.drift_index
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.view.width = width;
        self.view.height = height;
    }

    pub fn set_viewpoint(&mut self, viewpoint: DVec2) {
        self.view.viewpoint = viewpoint;
    }

    /// Push a new growing link. Out-of-range start indices are ignored.
    pub fn spawn_link(&mut self, start: usize, length: usize) -> bool {
        if start >= self.particles.len() {
            return false;
        }
        log::debug!("[link] spawn at {} length {}", start, length);
        self.links.push(Link::new(start, length));
        true
    }

    /// The per-frame spawn roll: an integer draw over `[0, link_chance]`
    /// that must land exactly on `link_chance`.
    pub fn roll_link_spawn(&mut self) -> bool {
        let chance = self.settings.link_chance as usize;
        uniform_int(&mut self.rng, 0, chance) == chance
    }

    fn advance_drift(&mut self) {
        self.drift_index = self.drift_path.advance(self.drift_index);
        self.view.drift = self.drift_path.point(self.drift_index as u64);
    }

    /// One full frame: drift, clear, particles, mesh, links, flares.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if self.settings.random_motion {
            self.advance_drift();
        }

        surface.clear_rect(0.0, 0.0, self.view.width, self.view.height);

        if self.settings.blur_size > 0.0 {
            surface.set_shadow(self.settings.blur_size, self.settings.color);
        }

        if self.settings.render_particles {
            for p in &mut self.particles {
                p.render(&self.settings, &self.view, &mut self.rng, surface);
            }
        }

        if self.settings.render_mesh {
            self.render_mesh(surface);
        }

        if self.settings.render_links {
            self.update_links(surface);
        }

        if self.settings.render_flares {
            for f in &self.flares {
                f.render(&self.settings, &self.view, surface);
            }
        }
    }

    fn render_mesh<S: Surface + ?Sized>(&self, surface: &mut S) {
        for (a, b) in mesh::mesh_edges(self.particles.len()) {
            let (pa, pb) = (&self.particles[a], &self.particles[b]);
            let points = [
                self.view.project_vec(pa.position()),
                self.view.project_vec(pb.position()),
            ];
            draw_line(surface, &points, self.settings.color, self.settings.line_width, 1.0);
        }
    }

    fn update_links<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if !self.particles.is_empty() && self.roll_link_spawn() {
            let length = uniform_int(
                &mut self.rng,
                self.settings.link_length_min,
                self.settings.link_length_max,
            );
            let start = uniform_int(&mut self.rng, 0, self.particles.len() - 1);
            self.spawn_link(start, length);
        }

        // Reverse so removal does not disturb the indices still to visit.
        for i in (0..self.links.len()).rev() {
            if self.links[i].is_finished() {
                self.links.remove(i);
            } else {
                self.links[i].render(
                    &self.particles,
                    &self.view,
                    &self.settings,
                    &mut self.rng,
                    surface,
                );
            }
        }
    }
}
