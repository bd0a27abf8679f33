use anyhow::{anyhow, Context, Result};
use std::path::Path;
use tiny_skia::*;
use tracing::warn;

use wheel_engine::config::{Config, RenderConfig, WheelConfig};
use wheel_engine::geometry::{divider_line, segment_arc_path};
use wheel_engine::{generate_layout, BallFrame, SegmentColor};

use crate::canvas_size;

/// Points per segment edge when flattening the outer arc.
const ARC_STEPS: usize = 8;

#[derive(Clone, Copy)]
struct Palette {
    red: Color,
    black: Color,
    green: Color,
    wood: Color,
    track: Color,
    hub: Color,
    divider: Color,
    ball: Color,
}

impl Palette {
    fn from_config(render: &RenderConfig) -> Self {
        let defaults = RenderConfig::default();
        let pick = |value: &str, fallback: &str| {
            parse_hex_color(value).unwrap_or_else(|| {
                warn!("Invalid color '{}', using {}", value, fallback);
                parse_hex_color(fallback).unwrap_or(Color::BLACK)
            })
        };

        Self {
            red: pick(&render.red, &defaults.red),
            black: pick(&render.black, &defaults.black),
            green: pick(&render.green, &defaults.green),
            wood: pick(&render.wood, &defaults.wood),
            track: pick(&render.track, &defaults.track),
            hub: pick(&render.hub, &defaults.hub),
            divider: pick(&render.divider, &defaults.divider),
            ball: pick(&render.ball, &defaults.ball),
        }
    }

    fn segment(&self, color: SegmentColor) -> Color {
        match color {
            SegmentColor::Red => self.red,
            SegmentColor::Black => self.black,
            SegmentColor::Green => self.green,
        }
    }
}

/// `#rrggbb` to an opaque color.
fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::from_rgba8(r, g, b, 255))
}

pub struct WheelRenderer {
    size: u32,
    pixmap: Pixmap,
    palette: Palette,
    wheel: WheelConfig,
}

impl WheelRenderer {
    pub fn new(config: &Config) -> Result<Self> {
        let size = canvas_size(config);
        let pixmap = Pixmap::new(size, size)
            .ok_or_else(|| anyhow!("Failed to create {size}x{size} pixmap"))?;

        Ok(Self {
            size,
            pixmap,
            palette: Palette::from_config(&config.render),
            wheel: config.wheel.clone(),
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Draw the wheel with the ball at `ball` and return RGBA (premultiplied) pixels.
    pub fn render(&mut self, ball: &BallFrame) -> &[u8] {
        self.pixmap.fill(Color::TRANSPARENT);

        let center = self.size as f32 / 2.0;
        let transform = Transform::from_translate(center, center);
        let wheel_radius = self.wheel.wheel_radius as f32;

        let rim = self.wheel.rim_radius() as f32;
        self.fill_circle(0.0, 0.0, rim, self.palette.wood, transform);
        self.fill_circle(0.0, 0.0, wheel_radius, self.palette.track, transform);

        for (index, segment) in generate_layout().iter().enumerate() {
            if let Some(path) = Self::segment_path(index, self.wheel.wheel_radius) {
                let mut paint = Paint::default();
                paint.anti_alias = true;
                paint.set_color(self.palette.segment(segment.color));
                self.pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);

                paint.set_color(Color::WHITE);
                let stroke = Stroke { width: 1.0, ..Default::default() };
                self.pixmap.stroke_path(&path, &paint, &stroke, transform, None);
            }
        }

        self.fill_circle(
            ball.position.x as f32,
            ball.position.y as f32,
            self.wheel.ball_radius as f32,
            self.palette.ball,
            transform,
        );

        let cone = self.wheel.cone_radius() as f32;
        let hub = self.wheel.hub_radius as f32;
        self.fill_circle(0.0, 0.0, cone, self.palette.wood, transform);
        self.fill_circle(0.0, 0.0, hub, self.palette.hub, transform);

        let mut paint = Paint::default();
        paint.anti_alias = true;
        paint.set_color(self.palette.divider);
        let stroke = Stroke { width: 2.0, ..Default::default() };
        for index in 0..generate_layout().len() {
            let (inner, outer) =
                divider_line(index, self.wheel.wheel_radius, self.wheel.rim_radius());
            let mut pb = PathBuilder::new();
            pb.move_to(inner.x as f32, inner.y as f32);
            pb.line_to(outer.x as f32, outer.y as f32);
            if let Some(path) = pb.finish() {
                self.pixmap.stroke_path(&path, &paint, &stroke, transform, None);
            }
        }

        self.pixmap.data()
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.pixmap
            .save_png(path)
            .with_context(|| format!("Failed to write PNG to {}", path.display()))
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color, transform: Transform) {
        if radius <= 0.0 {
            return;
        }
        if let Some(path) = PathBuilder::from_circle(cx, cy, radius) {
            let mut paint = Paint::default();
            paint.anti_alias = true;
            paint.set_color(color);
            self.pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
        }
    }

    /// Pie slice with the outer arc flattened into `ARC_STEPS` chords.
    fn segment_path(index: usize, radius: f64) -> Option<tiny_skia::Path> {
        let arc = segment_arc_path(index, radius);
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.line_to(arc.start.x as f32, arc.start.y as f32);
        for step in 1..=ARC_STEPS {
            let t = step as f64 / ARC_STEPS as f64;
            let angle = arc.start_angle + (arc.end_angle - arc.start_angle) * t;
            pb.line_to((radius * angle.cos()) as f32, (radius * angle.sin()) as f32);
        }
        pb.close();
        pb.finish()
    }
}
