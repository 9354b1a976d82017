// Host-side tests for the link stage machine.

use field_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn particle(x: f64, y: f64, neighbors: &[usize]) -> Particle {
    let mut p = Particle::new(x, y, 1.0, Color::default(), 0.5);
    p.neighbors.extend_from_slice(neighbors);
    p
}

/// A straight chain 0-1-2-...-(n-1), each particle linked to its
/// predecessor and successor.
fn chain(n: usize) -> Vec<Particle> {
    (0..n)
        .map(|i| {
            let mut nb = Vec::new();
            if i > 0 {
                nb.push(i - 1);
            }
            if i + 1 < n {
                nb.push(i + 1);
            }
            particle(i as f64 * 0.1, 0.5, &nb)
        })
        .collect()
}

fn view() -> View {
    View::new(1000.0, 1000.0, 0.05, 1.0)
}

fn step(link: &mut Link, particles: &[Particle], rng: &mut StdRng) -> Option<LinkStroke> {
    link.step(particles, &view(), &FieldSettings::default(), rng)
}

fn run_until(link: &mut Link, particles: &[Particle], rng: &mut StdRng, stage: LinkStage) {
    for _ in 0..10_000 {
        if link.stage == stage {
            return;
        }
        step(link, particles, rng);
    }
    panic!("link never reached {stage:?}, stuck in {:?}", link.stage);
}

#[test]
fn isolated_start_finishes_on_first_update() {
    let particles = vec![particle(0.5, 0.5, &[])];
    let mut rng = StdRng::seed_from_u64(1);
    let mut link = Link::new(0, 5);
    assert!(step(&mut link, &particles, &mut rng).is_none());
    assert!(link.finished);
    assert_eq!(link.stage, LinkStage::Finished);
    assert_eq!(link.verts.len(), 1);
}

#[test]
fn growth_stops_exactly_at_target_length() {
    let particles = chain(10);
    let mut rng = StdRng::seed_from_u64(2);
    let mut link = Link::new(0, 6);

    while link.stage == LinkStage::Growing {
        assert!(link.verts.len() < 6);
        step(&mut link, &particles, &mut rng);
    }
    assert_eq!(link.stage, LinkStage::Traveling);
    assert_eq!(link.verts.as_slice(), &[0, 1, 2, 3, 4, 5]);
    assert_eq!(link.distances.len(), 5);
    for d in &link.distances {
        assert!((d - 0.1).abs() < 1e-9);
    }
}

#[test]
fn walk_never_repeats_a_vertex() {
    // Fully connected 5-clique.
    let particles: Vec<Particle> = (0..5)
        .map(|i| {
            let nb: Vec<usize> = (0..5).filter(|&j| j != i).collect();
            particle(0.1 * i as f64, 0.2 * i as f64, &nb)
        })
        .collect();
    let mut rng = StdRng::seed_from_u64(3);
    let mut link = Link::new(2, 5);
    run_until(&mut link, &particles, &mut rng, LinkStage::Traveling);
    let mut seen = link.verts.to_vec();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 5);
}

#[test]
fn dead_end_walk_finishes_instead_of_stalling() {
    // Triangle: only three distinct vertices but a target length of five.
    let particles = vec![
        particle(0.1, 0.1, &[1, 2]),
        particle(0.2, 0.1, &[0, 2]),
        particle(0.1, 0.2, &[0, 1]),
    ];
    let mut rng = StdRng::seed_from_u64(4);
    let mut link = Link::new(0, 5);
    run_until(&mut link, &particles, &mut rng, LinkStage::Finished);
    assert!(link.finished);
    assert_eq!(link.verts.len(), 3);
}

#[test]
fn traveling_head_moves_then_snaps_to_next_vertex() {
    let particles = chain(3);
    let mut rng = StdRng::seed_from_u64(5);
    let mut link = Link::new(0, 3);
    run_until(&mut link, &particles, &mut rng, LinkStage::Traveling);

    // 1000px wide: 0.01 logical units per frame, edge length 0.1.
    let first = step(&mut link, &particles, &mut rng).expect("stroke");
    assert_eq!(first.points.len(), 2);
    assert!((first.alpha - 0.25).abs() < 1e-12);
    assert_eq!(link.linked.len(), 1);
    assert!(link.traveled > 0.0);

    run_until(&mut link, &particles, &mut rng, LinkStage::Fading);
    assert_eq!(link.linked.as_slice(), link.verts.as_slice());
    assert_eq!(link.traveled, 0.0);
}

#[test]
fn traveling_head_interpolates_position_and_depth() {
    // Planar edge 0 -> 1 has length 0.1 and climbs two depth layers.
    let mut a = particle(0.0, 0.5, &[1]);
    a.z = 0.0;
    let mut b = particle(0.06, 0.58, &[0, 2]);
    b.z = 2.0;
    let c = particle(0.2, 0.6, &[1]);
    let particles = vec![a, b, c];
    let mut rng = StdRng::seed_from_u64(10);
    let mut link = Link::new(0, 3);
    run_until(&mut link, &particles, &mut rng, LinkStage::Traveling);
    assert!((link.distances[0] - 0.1).abs() < 1e-12);

    // One update moves 0.01 logical units on a 1000px surface: a tenth of
    // the edge, so the head sits at a + (b - a) / 10 in x, y and z.
    let stroke = step(&mut link, &particles, &mut rng).expect("stroke");
    let v = view();
    assert_eq!(stroke.points.len(), 2);
    assert_eq!(stroke.points[0], v.project(0.0, 0.5, 0.0));
    let expected = v.project(0.006, 0.508, 0.2);
    assert!(
        (stroke.points[1] - expected).length() < 1e-9,
        "head {:?} != {:?}",
        stroke.points[1],
        expected
    );
}

#[test]
fn target_shorter_than_two_still_takes_one_step() {
    // Growth appends before checking the length, so even a target of one
    // ends with a two-vertex walk.
    let particles = chain(3);
    let mut rng = StdRng::seed_from_u64(6);
    let mut link = Link::new(1, 1);
    step(&mut link, &particles, &mut rng);
    assert_eq!(link.stage, LinkStage::Traveling);
    assert_eq!(link.verts.len(), 2);
    assert_eq!(link.distances.len(), 1);
    run_until(&mut link, &particles, &mut rng, LinkStage::Finished);
    assert!(link.finished);
}

#[test]
fn missing_start_particle_finishes() {
    let particles = chain(2);
    let mut rng = StdRng::seed_from_u64(9);
    let mut link = Link::new(7, 5);
    step(&mut link, &particles, &mut rng);
    assert!(link.finished);
}

#[test]
fn fading_takes_exactly_link_fade_updates_with_falling_alpha() {
    let particles = chain(5);
    let mut rng = StdRng::seed_from_u64(7);
    let mut link = Link::new(0, 5);
    run_until(&mut link, &particles, &mut rng, LinkStage::Fading);

    let settings = FieldSettings::default();
    let mut alphas = Vec::new();
    let mut updates = 0;
    while !link.finished {
        updates += 1;
        if let Some(stroke) = step(&mut link, &particles, &mut rng) {
            assert_eq!(stroke.points.len(), 5);
            alphas.push(stroke.alpha);
        }
        assert!(updates <= settings.link_fade, "fade overran");
    }
    assert_eq!(updates, settings.link_fade);
    assert_eq!(alphas.len() as u32, settings.link_fade - 1);
    assert!(alphas[0] < settings.link_opacity);
    assert!((alphas[0] - settings.link_opacity * (1.0 - 1.0 / 90.0)).abs() < 1e-12);
    for pair in alphas.windows(2) {
        assert!(pair[1] < pair[0], "alpha must strictly decrease");
    }
    assert!(alphas.iter().all(|a| *a > 0.0));
}

#[test]
fn finished_link_draws_nothing() {
    let particles = chain(2);
    let mut rng = StdRng::seed_from_u64(8);
    let mut link = Link::new(0, 2);
    run_until(&mut link, &particles, &mut rng, LinkStage::Finished);
    let mut surface = RecordingSurface::new();
    link.render(&particles, &view(), &FieldSettings::default(), &mut rng, &mut surface);
    assert!(surface.commands.is_empty());
}
