use anyhow::Context;
use field_core::{
    tilt_to_viewpoint, Field, FieldSettings, FrameLoop, LinkStage, ManualScheduler, RecordingSurface,
};
use glam::DVec2;
use std::time::Instant;

const ENV_PREFIX: &str = "AMBIENT_FIELD_";
const DEFAULT_FRAMES: u64 = 600;
const DEFAULT_SEED: u64 = 42;
const SURFACE: DVec2 = DVec2::new(1920.0, 1080.0);

#[derive(Default, Debug)]
struct Stats {
    circles: usize,
    ellipses: usize,
    strokes: usize,
    peak_links: usize,
    links_seen_traveling: usize,
}

fn env_u64(name: &str, default: u64) -> anyhow::Result<u64> {
    match std::env::var(format!("{ENV_PREFIX}{name}")) {
        Ok(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{ENV_PREFIX}{name}={v} is not an integer")),
        Err(_) => Ok(default),
    }
}

fn load_settings() -> anyhow::Result<FieldSettings> {
    let mut settings = FieldSettings::default();
    for (key, value) in std::env::vars() {
        let Some(name) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        if name == "FRAMES" || name == "SEED" {
            continue;
        }
        settings
            .apply(name, &value)
            .with_context(|| format!("bad override {key}"))?;
    }
    settings.validate()?;
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = load_settings()?;
    let frames = env_u64("FRAMES", DEFAULT_FRAMES)?;
    let seed = env_u64("SEED", DEFAULT_SEED)?;
    log::info!("headless run: frames={} seed={}", frames, seed);

    let mut field = Field::new(settings, seed);
    field.resize(SURFACE.x, SURFACE.y);
    field.init(SURFACE);

    let mut surface = RecordingSurface::new();
    let mut frame_loop = FrameLoop::new(ManualScheduler::default());
    let mut stats = Stats::default();
    frame_loop.start();

    let started = Instant::now();
    for i in 0..frames {
        // Sweep a fake tilt so parallax is exercised too.
        let t = i as f64 / frames.max(1) as f64;
        field.set_viewpoint(tilt_to_viewpoint(90.0 * t - 45.0, 0.0, SURFACE));

        surface.clear_log();
        frame_loop.tick(&mut field, &mut surface, SURFACE.x, SURFACE.y);

        stats.circles += surface.circles();
        stats.ellipses += surface.ellipses();
        stats.strokes += surface.polylines();
        stats.peak_links = stats.peak_links.max(field.links().len());
        stats.links_seen_traveling += field
            .links()
            .iter()
            .filter(|l| l.stage == LinkStage::Traveling)
            .count();
    }
    frame_loop.stop();

    let elapsed = started.elapsed();
    log::info!(
        "{} frames in {:.1?} ({:.2} ms/frame)",
        frame_loop.frames(),
        elapsed,
        elapsed.as_secs_f64() * 1000.0 / frame_loop.frames().max(1) as f64
    );
    log::info!("{:?}", stats);
    Ok(())
}
