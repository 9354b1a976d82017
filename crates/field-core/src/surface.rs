//! Drawing-surface abstraction. Entities only ever paint through [`Surface`];
//! the web front-end backs it with a 2D canvas context and tests use
//! [`RecordingSurface`].

use crate::color::Color;
use glam::DVec2;

pub trait Surface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color, alpha: f64);
    #[allow(clippy::too_many_arguments)]
    fn fill_ellipse(
        &mut self,
        center: DVec2,
        radius_x: f64,
        radius_y: f64,
        rotation_rad: f64,
        color: Color,
        alpha: f64,
    );
    /// Stroke each consecutive pair of `points`.
    fn stroke_polyline(&mut self, points: &[DVec2], color: Color, line_width: f64, alpha: f64);
    fn set_shadow(&mut self, _blur: f64, _color: Color) {}
}

/// Stroke a polyline, skipping degenerate input (fewer than two points or a
/// non-positive alpha).
pub fn draw_line<S: Surface + ?Sized>(
    surface: &mut S,
    points: &[DVec2],
    color: Color,
    line_width: f64,
    alpha: f64,
) -> bool {
    if points.len() < 2 || alpha <= 0.0 {
        return false;
    }
    surface.stroke_polyline(points, color, line_width, alpha);
    true
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Circle {
        center: DVec2,
        radius: f64,
        color: Color,
        alpha: f64,
    },
    Ellipse {
        center: DVec2,
        radius_x: f64,
        radius_y: f64,
        rotation_rad: f64,
        alpha: f64,
    },
    Polyline {
        points: Vec<DVec2>,
        line_width: f64,
        alpha: f64,
    },
    Shadow {
        blur: f64,
    },
}

/// In-memory surface that records every call in order.
#[derive(Default, Debug)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_log(&mut self) {
        self.commands.clear();
    }

    pub fn circles(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn ellipses(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Ellipse { .. }))
    }

    pub fn polylines(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Polyline { .. }))
    }

    fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, _x: f64, _y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color, alpha: f64) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn fill_ellipse(
        &mut self,
        center: DVec2,
        radius_x: f64,
        radius_y: f64,
        rotation_rad: f64,
        _color: Color,
        alpha: f64,
    ) {
        self.commands.push(DrawCommand::Ellipse {
            center,
            radius_x,
            radius_y,
            rotation_rad,
            alpha,
        });
    }

    fn stroke_polyline(&mut self, points: &[DVec2], _color: Color, line_width: f64, alpha: f64) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            line_width,
            alpha,
        });
    }

    fn set_shadow(&mut self, blur: f64, _color: Color) {
        self.commands.push(DrawCommand::Shadow { blur });
    }
}
