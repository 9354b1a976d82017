use field_core::{Color, Surface};
use glam::DVec2;
use std::f64::consts::TAU;
use web_sys as web;

/// `Surface` over a 2D canvas context. Every primitive restores
/// `globalAlpha` to 1 afterwards.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
    css: Option<(Color, String)>,
}

impl CanvasSurface {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        Self { ctx, css: None }
    }

    /// Cached CSS string for the last colour used.
    fn css(cache: &mut Option<(Color, String)>, color: Color) -> &str {
        if cache.as_ref().map(|(c, _)| *c) != Some(color) {
            *cache = Some((color, color.to_css()));
        }
        cache.as_ref().map(|(_, s)| s.as_str()).unwrap_or_default()
    }
}

impl Surface for CanvasSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Color, alpha: f64) {
        let css = Self::css(&mut self.css, color);
        let ctx = &self.ctx;
        ctx.set_fill_style_str(css);
        ctx.set_global_alpha(alpha);
        ctx.begin_path();
        _ = ctx.arc(center.x, center.y, radius.max(0.0), 0.0, TAU);
        ctx.fill();
        ctx.close_path();
        ctx.set_global_alpha(1.0);
    }

    fn fill_ellipse(
        &mut self,
        center: DVec2,
        radius_x: f64,
        radius_y: f64,
        rotation_rad: f64,
        color: Color,
        alpha: f64,
    ) {
        let css = Self::css(&mut self.css, color);
        let ctx = &self.ctx;
        ctx.set_fill_style_str(css);
        ctx.set_global_alpha(alpha);
        ctx.begin_path();
        _ = ctx.ellipse(
            center.x,
            center.y,
            radius_x.max(0.0),
            radius_y.max(0.0),
            rotation_rad,
            0.0,
            TAU,
        );
        ctx.fill();
        ctx.close_path();
        ctx.set_global_alpha(1.0);
    }

    fn stroke_polyline(&mut self, points: &[DVec2], color: Color, line_width: f64, alpha: f64) {
        let css = Self::css(&mut self.css, color);
        let ctx = &self.ctx;
        ctx.set_global_alpha(alpha);
        ctx.begin_path();
        for pair in points.windows(2) {
            ctx.move_to(pair[0].x, pair[0].y);
            ctx.line_to(pair[1].x, pair[1].y);
        }
        ctx.set_stroke_style_str(css);
        ctx.set_line_width(line_width);
        ctx.stroke();
        ctx.close_path();
        ctx.set_global_alpha(1.0);
    }

    fn set_shadow(&mut self, blur: f64, color: Color) {
        let css = Self::css(&mut self.css, color);
        self.ctx.set_shadow_blur(blur);
        self.ctx.set_shadow_color(css);
    }
}
