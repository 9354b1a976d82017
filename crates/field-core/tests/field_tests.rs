// Host-side tests for the field controller and frame loop.

use field_core::*;
use glam::DVec2;

fn make_field(seed: u64) -> Field {
    let mut field = Field::new(FieldSettings::default(), seed);
    field.resize(1600.0, 900.0);
    field.init(DVec2::new(800.0, 450.0));
    field
}

#[test]
fn init_seeds_default_populations() {
    let field = make_field(42);
    assert_eq!(field.particles().len(), 40);
    assert_eq!(field.flares().len(), 10);
    assert!(field.links().is_empty());
    assert_eq!(field.triangles().len(), 13);
    assert_eq!(field.view.viewpoint, DVec2::new(400.0, 225.0));
}

#[test]
fn neighbors_come_from_index_triangles() {
    let field = make_field(42);
    for (i, p) in field.particles().iter().enumerate() {
        assert!(!p.neighbors.contains(&i), "self reference at {i}");
        let mut sorted = p.neighbors.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), p.neighbors.len(), "duplicate at {i}");
        if i < 39 {
            let base = i / 3 * 3;
            let expected: Vec<usize> = (base..base + 3).filter(|&j| j != i).collect();
            assert_eq!(sorted, expected);
        } else {
            assert!(p.neighbors.is_empty());
        }
    }
}

#[test]
fn forced_spawn_adds_one_growing_link() {
    let mut field = make_field(7);
    assert!(field.spawn_link(3, 5));
    assert_eq!(field.links().len(), 1);
    let link = &field.links()[0];
    assert_eq!(link.stage, LinkStage::Growing);
    assert_eq!(link.verts.len(), 1);
    assert!(!field.spawn_link(400, 5));
}

#[test]
fn frame_with_certain_roll_spawns_one_link_of_drawn_length() {
    let mut settings = FieldSettings::default();
    settings.link_chance = 0;
    for seed in 0..20 {
        let mut field = Field::new(settings.clone(), seed);
        field.resize(1600.0, 900.0);
        field.init(DVec2::new(800.0, 450.0));
        let mut surface = RecordingSurface::new();
        field.frame(&mut surface);

        assert_eq!(field.links().len(), 1, "seed {seed}");
        let link = &field.links()[0];
        assert!(
            (settings.link_length_min..=settings.link_length_max).contains(&link.length),
            "length {} for seed {seed}",
            link.length
        );
        assert!(link.verts[0] < field.particles().len());
        // Spawned and stepped once in the same frame: still growing unless
        // the start had no neighbours.
        assert!(link.verts.len() <= 2);
        assert!(link.stage == LinkStage::Growing || link.verts[0] == 39);
    }
}

#[test]
fn spawn_roll_hits_roughly_one_in_seventy_six() {
    let mut field = make_field(11);
    let hits = (0..76_000).filter(|_| field.roll_link_spawn()).count();
    assert!((700..1300).contains(&hits), "hits={hits}");
}

#[test]
fn zero_link_chance_spawns_every_frame() {
    let mut settings = FieldSettings::default();
    settings.link_chance = 0;
    let mut field = Field::new(settings, 1);
    field.resize(800.0, 600.0);
    field.init(DVec2::new(400.0, 300.0));
    assert!((0..20).all(|_| field.roll_link_spawn()));
}

#[test]
fn frame_draws_in_layer_order() {
    let mut field = make_field(3);
    let mut surface = RecordingSurface::new();
    field.frame(&mut surface);

    assert_eq!(
        surface.commands.first(),
        Some(&DrawCommand::Clear {
            width: 1600.0,
            height: 900.0
        })
    );
    // Each particle: core + glare. Each flare: one circle.
    assert_eq!(surface.ellipses(), 40);
    assert_eq!(surface.circles(), 50);
    let last_particle = surface
        .commands
        .iter()
        .rposition(|c| matches!(c, DrawCommand::Ellipse { .. }))
        .unwrap_or(0);
    let first_flare_radius = (0.0 * 100.0 + 100.0) * 1.6;
    let flare_start = surface
        .commands
        .iter()
        .position(|c| matches!(c, DrawCommand::Circle { radius, .. } if *radius >= first_flare_radius))
        .unwrap_or(0);
    assert!(flare_start > last_particle);
}

#[test]
fn drift_advances_and_wraps() {
    let mut settings = FieldSettings::default();
    settings.noise_length = 4;
    let mut field = Field::new(settings, 5);
    field.resize(100.0, 100.0);
    field.init(DVec2::new(50.0, 50.0));
    let mut surface = RecordingSurface::new();
    let mut seen = Vec::new();
    for _ in 0..5 {
        field.frame(&mut surface);
        seen.push(field.drift_index());
    }
    assert_eq!(seen, vec![1, 2, 3, 0, 1]);
    assert!((field.view.drift.length() - 100.0).abs() < 1e-9);
}

#[test]
fn disabled_random_motion_keeps_drift_still() {
    let mut settings = FieldSettings::default();
    settings.random_motion = false;
    let mut field = Field::new(settings, 5);
    field.resize(100.0, 100.0);
    field.init(DVec2::new(50.0, 50.0));
    let mut surface = RecordingSurface::new();
    field.frame(&mut surface);
    assert_eq!(field.drift_index(), 0);
    assert_eq!(field.view.drift, DVec2::ZERO);
}

#[test]
fn flicker_stays_clamped_over_many_frames() {
    let mut field = make_field(99);
    let mut surface = RecordingSurface::new();
    for _ in 0..500 {
        surface.clear_log();
        field.frame(&mut surface);
        for p in field.particles() {
            assert!((-0.5..=0.5).contains(&p.flicker));
        }
        for cmd in &surface.commands {
            if let DrawCommand::Circle { alpha, .. } = cmd {
                assert!((0.0..=1.0).contains(alpha));
            }
        }
    }
}

#[test]
fn flicker_update_clamps_extreme_samples() {
    let mut p = Particle::new(0.0, 0.0, 0.0, Color::default(), 0.5);
    for _ in 0..1000 {
        p.update_flicker(50.0, 15.0);
        assert!(p.flicker <= 0.5);
    }
    assert_eq!(p.flicker, 0.5);
    for _ in 0..1000 {
        p.update_flicker(-50.0, 1.0);
    }
    assert_eq!(p.flicker, -0.5);
}

#[test]
fn mesh_overlay_only_when_enabled() {
    let mut settings = FieldSettings::default();
    settings.render_links = false;
    let mut field = Field::new(settings.clone(), 21);
    field.resize(800.0, 600.0);
    field.init(DVec2::new(400.0, 300.0));
    let mut surface = RecordingSurface::new();
    field.frame(&mut surface);
    assert_eq!(surface.polylines(), 0);

    settings.render_mesh = true;
    let mut field = Field::new(settings, 21);
    field.resize(800.0, 600.0);
    field.init(DVec2::new(400.0, 300.0));
    let mut surface = RecordingSurface::new();
    field.frame(&mut surface);
    assert_eq!(surface.polylines(), 26);
}

#[test]
fn blur_sets_shadow_before_drawing() {
    let mut settings = FieldSettings::default();
    settings.blur_size = 4.0;
    let mut field = Field::new(settings, 2);
    field.resize(800.0, 600.0);
    field.init(DVec2::new(400.0, 300.0));
    let mut surface = RecordingSurface::new();
    field.frame(&mut surface);
    assert_eq!(surface.commands[1], DrawCommand::Shadow { blur: 4.0 });
}

#[test]
fn links_run_to_completion_and_are_dropped() {
    let mut settings = FieldSettings::default();
    settings.link_chance = u32::MAX;
    let mut field = Field::new(settings, 13);
    field.resize(800.0, 600.0);
    field.init(DVec2::new(400.0, 300.0));
    let mut surface = RecordingSurface::new();

    // Particle 39 sits outside every triangle.
    field.spawn_link(39, 5);
    field.frame(&mut surface);
    assert_eq!(field.links().len(), 1);
    assert!(field.links()[0].finished);
    field.frame(&mut surface);
    assert!(field.links().is_empty());
}

#[test]
fn without_flares_flag_no_flares_are_seeded() {
    let mut settings = FieldSettings::default();
    settings.render_flares = false;
    let mut field = Field::new(settings, 2);
    field.init(DVec2::new(400.0, 300.0));
    assert!(field.flares().is_empty());
}

#[test]
fn frame_loop_requests_before_rendering_and_stops_cleanly() {
    let mut field = make_field(1);
    let mut surface = RecordingSurface::new();
    let mut frame_loop = FrameLoop::new(ManualScheduler::default());

    frame_loop.tick(&mut field, &mut surface, 640.0, 480.0);
    assert_eq!(frame_loop.frames(), 0, "ticks before start are ignored");

    frame_loop.start();
    assert_eq!(frame_loop.pending(), Some(FrameHandle(1)));
    frame_loop.tick(&mut field, &mut surface, 640.0, 480.0);
    assert_eq!(frame_loop.pending(), Some(FrameHandle(2)));
    assert_eq!(frame_loop.frames(), 1);
    assert_eq!(field.view.width, 640.0);
    assert_eq!(field.view.height, 480.0);

    frame_loop.stop();
    assert!(!frame_loop.is_running());
    assert_eq!(frame_loop.scheduler().cancelled, vec![FrameHandle(2)]);
    frame_loop.tick(&mut field, &mut surface, 640.0, 480.0);
    assert_eq!(frame_loop.frames(), 1);
    assert_eq!(frame_loop.scheduler().requested, 2);
}

struct RefusingScheduler;

impl FrameScheduler for RefusingScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        None
    }

    fn cancel_frame(&mut self, _handle: FrameHandle) {}
}

#[test]
fn frame_loop_stops_when_host_refuses() {
    let mut frame_loop = FrameLoop::new(RefusingScheduler);
    frame_loop.start();
    assert!(!frame_loop.is_running());
}
