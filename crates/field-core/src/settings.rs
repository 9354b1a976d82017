//! Tunable parameters of the ambient field.
//!
//! Front-ends start from `FieldSettings::default()` and layer string overrides
//! on top (canvas `data-*` attributes on the web, environment variables on
//! native) through [`FieldSettings::apply`].

use crate::color::{Color, ColorError};
use crate::constants::*;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown setting `{0}`")]
    UnknownKey(String),
    #[error("setting `{key}` has invalid value `{value}`")]
    InvalidValue { key: String, value: String },
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error("link length bounds are reversed ({min} > {max})")]
    LinkLengthBounds { min: usize, max: usize },
    #[error("`{0}` must be greater than zero")]
    NotPositive(&'static str),
}

/// Every knob of the renderer. Defaults mirror `constants.rs`.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSettings {
    pub particle_count: usize,
    pub flare_count: usize,
    pub motion: f64,
    pub color: Color,
    pub particle_size_base: f64,
    pub particle_size_multiplier: f64,
    pub flare_size_base: f64,
    pub flare_size_multiplier: f64,
    pub line_width: f64,
    pub link_chance: u32,
    pub link_length_min: usize,
    pub link_length_max: usize,
    pub link_opacity: f64,
    pub link_fade: u32,
    pub link_speed: f64,
    pub glare_angle: f64,
    pub glare_opacity_multiplier: f64,
    pub render_particles: bool,
    pub render_particle_glare: bool,
    pub render_flares: bool,
    pub render_links: bool,
    pub render_mesh: bool,
    pub flicker: bool,
    pub flicker_smoothing: f64,
    pub blur_size: f64,
    pub random_motion: bool,
    pub noise_length: u32,
    pub noise_strength: f64,
    pub noise_radius: f64,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            flare_count: FLARE_COUNT,
            motion: MOTION,
            color: Color::default(),
            particle_size_base: PARTICLE_SIZE_BASE,
            particle_size_multiplier: PARTICLE_SIZE_MULTIPLIER,
            flare_size_base: FLARE_SIZE_BASE,
            flare_size_multiplier: FLARE_SIZE_MULTIPLIER,
            line_width: LINE_WIDTH,
            link_chance: LINK_CHANCE,
            link_length_min: LINK_LENGTH_MIN,
            link_length_max: LINK_LENGTH_MAX,
            link_opacity: LINK_OPACITY,
            link_fade: LINK_FADE_FRAMES,
            link_speed: LINK_SPEED,
            glare_angle: GLARE_ANGLE_DEG,
            glare_opacity_multiplier: GLARE_OPACITY_MULTIPLIER,
            render_particles: true,
            render_particle_glare: true,
            render_flares: true,
            render_links: true,
            render_mesh: false,
            flicker: true,
            flicker_smoothing: FLICKER_SMOOTHING,
            blur_size: 0.0,
            random_motion: true,
            noise_length: NOISE_LENGTH,
            noise_strength: NOISE_STRENGTH,
            noise_radius: NOISE_RADIUS,
        }
    }
}

/// Fold `particleCount`, `particle-count` and `PARTICLE_COUNT` onto
/// `particle_count`.
pub fn normalize_key(key: &str) -> String {
    let key = key.trim();
    let camel = key.chars().any(|c| c.is_ascii_lowercase());
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        match c {
            '-' => out.push('_'),
            c if camel && c.is_ascii_uppercase() => {
                if !out.is_empty() {
                    out.push('_');
                }
                out.push(c.to_ascii_lowercase());
            }
            c => out.push(c.to_ascii_lowercase()),
        }
    }
    out
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, SettingsError> {
    value.trim().parse::<T>().map_err(|_| SettingsError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_flag(key: &str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

impl FieldSettings {
    /// Apply one `key = value` override. Keys may be snake_case, kebab-case,
    /// camelCase (canvas `dataset`) or SCREAMING_SNAKE (environment).
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let norm = normalize_key(key);
        let k = norm.as_str();
        match k {
            "particle_count" => self.particle_count = parse(k, value)?,
            "flare_count" => self.flare_count = parse(k, value)?,
            "motion" => self.motion = parse(k, value)?,
            "color" => self.color = value.parse::<Color>()?,
            "particle_size_base" => self.particle_size_base = parse(k, value)?,
            "particle_size_multiplier" => self.particle_size_multiplier = parse(k, value)?,
            "flare_size_base" => self.flare_size_base = parse(k, value)?,
            "flare_size_multiplier" => self.flare_size_multiplier = parse(k, value)?,
            "line_width" => self.line_width = parse(k, value)?,
            "link_chance" => self.link_chance = parse(k, value)?,
            "link_length_min" => self.link_length_min = parse(k, value)?,
            "link_length_max" => self.link_length_max = parse(k, value)?,
            "link_opacity" => self.link_opacity = parse(k, value)?,
            "link_fade" => self.link_fade = parse(k, value)?,
            "link_speed" => self.link_speed = parse(k, value)?,
            "glare_angle" => self.glare_angle = parse(k, value)?,
            "glare_opacity_multiplier" => self.glare_opacity_multiplier = parse(k, value)?,
            "render_particles" => self.render_particles = parse_flag(k, value)?,
            "render_particle_glare" => self.render_particle_glare = parse_flag(k, value)?,
            "render_flares" => self.render_flares = parse_flag(k, value)?,
            "render_links" => self.render_links = parse_flag(k, value)?,
            "render_mesh" => self.render_mesh = parse_flag(k, value)?,
            "flicker" => self.flicker = parse_flag(k, value)?,
            "flicker_smoothing" => self.flicker_smoothing = parse(k, value)?,
            "blur_size" => self.blur_size = parse(k, value)?,
            "random_motion" => self.random_motion = parse_flag(k, value)?,
            "noise_length" => self.noise_length = parse(k, value)?,
            "noise_strength" => self.noise_strength = parse(k, value)?,
            "noise_radius" => self.noise_radius = parse(k, value)?,
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Apply a batch of overrides, stopping at the first bad one.
    pub fn apply_all<'a, I>(&mut self, pairs: I) -> Result<(), SettingsError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, value) in pairs {
            self.apply(key, value)?;
        }
        Ok(())
    }

    /// Reject combinations that would stall or divide by zero at runtime.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.noise_length == 0 {
            return Err(SettingsError::NotPositive("noise_length"));
        }
        if self.link_fade == 0 {
            return Err(SettingsError::NotPositive("link_fade"));
        }
        if self.flicker_smoothing <= 0.0 {
            return Err(SettingsError::NotPositive("flicker_smoothing"));
        }
        if self.link_length_min > self.link_length_max {
            return Err(SettingsError::LinkLengthBounds {
                min: self.link_length_min,
                max: self.link_length_max,
            });
        }
        Ok(())
    }
}
