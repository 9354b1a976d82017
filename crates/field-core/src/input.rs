// Pure input mapping used by the web front-end's pointer and orientation
// listeners, plus surface sizing.

use crate::constants::MAX_TILT_DEG;
use glam::DVec2;

/// Map device tilt to a viewpoint inside a `screen` sized area. `gamma`
/// (left-right) drives x and `beta` (front-back) drives y; both are clamped
/// to ±45° before the linear map.
#[inline]
pub fn tilt_to_viewpoint(gamma: f64, beta: f64, screen: DVec2) -> DVec2 {
    let ratio = |deg: f64| (deg.clamp(-MAX_TILT_DEG, MAX_TILT_DEG) + MAX_TILT_DEG) / (MAX_TILT_DEG * 2.0);
    DVec2::new(ratio(gamma) * screen.x, ratio(beta) * screen.y)
}

/// Canvas backing size: full viewport width in device pixels, height keeping
/// the element's on-screen aspect ratio.
pub fn backing_size(inner_width: f64, device_pixel_ratio: f64, client_w: f64, client_h: f64) -> DVec2 {
    let dpr = if device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    let width = inner_width * dpr;
    let height = if client_w > 0.0 {
        width * (client_h / client_w)
    } else {
        0.0
    };
    DVec2::new(width, height)
}

/// Outcome of probing / asking for motion-sensor access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionPermission {
    /// No orientation events on this device.
    Unsupported,
    /// Events available without asking.
    NotRequired,
    /// Platform needs an explicit user gesture first.
    Prompt,
    Granted,
    Denied,
}

impl MotionPermission {
    /// Interpret the string a permission request resolves with.
    pub fn from_response(response: &str) -> Self {
        if response == "granted" {
            Self::Granted
        } else {
            Self::Denied
        }
    }

    /// Decide the startup path from what the host exposes.
    pub fn probe(has_orientation_events: bool, touch_capable: bool, needs_request: bool) -> Self {
        match (has_orientation_events && touch_capable, needs_request) {
            (false, _) => Self::Unsupported,
            (true, true) => Self::Prompt,
            (true, false) => Self::NotRequired,
        }
    }

    pub fn allows_listening(self) -> bool {
        matches!(self, Self::NotRequired | Self::Granted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_client_width_yields_zero_height() {
        assert_eq!(backing_size(800.0, 2.0, 0.0, 600.0), DVec2::new(1600.0, 0.0));
    }

    #[test]
    fn missing_dpr_defaults_to_one() {
        assert_eq!(backing_size(800.0, 0.0, 800.0, 400.0), DVec2::new(800.0, 400.0));
    }
}
