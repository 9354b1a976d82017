// Default tuning for the ambient field. `FieldSettings::default()` is built
// from these, and the front-ends only override them through settings.

// Population
pub const PARTICLE_COUNT: usize = 40;
pub const FLARE_COUNT: usize = 10;

// Parallax
pub const MOTION: f64 = 0.05; // how strongly depth shifts with the viewpoint
pub const DEFAULT_COLOR: &str = "#FFEED4";

// Sizing (radii are scaled by max(width, height) / SIZE_RATIO_DIVISOR)
pub const PARTICLE_SIZE_BASE: f64 = 1.0;
pub const PARTICLE_SIZE_MULTIPLIER: f64 = 0.5;
pub const FLARE_SIZE_BASE: f64 = 100.0;
pub const FLARE_SIZE_MULTIPLIER: f64 = 100.0;
pub const SIZE_RATIO_DIVISOR: f64 = 1000.0;
pub const LINE_WIDTH: f64 = 1.0;

// Entity ranges
pub const PARTICLE_XY_RANGE: (f64, f64) = (-0.1, 1.1);
pub const PARTICLE_Z_MAX: u32 = 3; // inclusive
pub const PARTICLE_OPACITY_RANGE: (f64, f64) = (0.1, 1.0);
pub const FLARE_XY_RANGE: (f64, f64) = (-0.25, 1.25);
pub const FLARE_Z_MAX: u32 = 1; // inclusive
pub const FLARE_OPACITY_RANGE: (f64, f64) = (0.001, 0.01);

// Links
pub const LINK_CHANCE: u32 = 75; // 1 in (LINK_CHANCE + 1) per frame
pub const LINK_LENGTH_MIN: usize = 5;
pub const LINK_LENGTH_MAX: usize = 7;
pub const LINK_OPACITY: f64 = 0.25;
pub const LINK_FADE_FRAMES: u32 = 90;
pub const LINK_SPEED: f64 = 1.0;
pub const LINK_SPEED_SCALE: f64 = 0.00001; // per pixel of surface width

// Glare
pub const GLARE_ANGLE_DEG: f64 = -60.0;
pub const GLARE_OPACITY_MULTIPLIER: f64 = 0.05;
pub const GLARE_STRETCH: f64 = 100.0; // major radius = r * GLARE_STRETCH

// Flicker
pub const FLICKER_LIMIT: f64 = 0.5;
pub const FLICKER_SMOOTHING: f64 = 15.0;

// Ambient drift
pub const NOISE_LENGTH: u32 = 1000; // frames per full drift orbit
pub const NOISE_RADIUS: f64 = 100.0;
pub const NOISE_STRENGTH: f64 = 1.0;

// Input
pub const MAX_TILT_DEG: f64 = 45.0;
pub const MOTION_PROMPT_TIMEOUT_MS: i32 = 5000;

// Fallback surface size before the first resize
pub const FALLBACK_SURFACE_SIZE: f64 = 1000.0;
