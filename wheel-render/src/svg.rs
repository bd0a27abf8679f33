//! SVG snapshot of the wheel with the ball at a given frame.

use std::fmt::{self, Write};

use wheel_engine::config::Config;
use wheel_engine::geometry::{divider_line, segment_arc_path, segment_label};
use wheel_engine::{generate_layout, BallFrame, SegmentColor};

use crate::canvas_size;

fn fill_for<'a>(config: &'a Config, color: SegmentColor) -> &'a str {
    match color {
        SegmentColor::Red => &config.render.red,
        SegmentColor::Black => &config.render.black,
        SegmentColor::Green => &config.render.green,
    }
}

pub fn render_svg(config: &Config, ball: &BallFrame) -> String {
    let mut out = String::new();
    // a String sink never reports an error
    let _ = write_svg(&mut out, config, ball);
    out
}

fn write_svg(out: &mut String, config: &Config, ball: &BallFrame) -> fmt::Result {
    let wheel = &config.wheel;
    let render = &config.render;
    let size = canvas_size(config);
    let center = f64::from(size) / 2.0;

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
    )?;
    writeln!(out, r#"<g transform="translate({center:.3}, {center:.3})">"#)?;
    write_circle(out, wheel.rim_radius(), &render.wood)?;
    write_circle(out, wheel.wheel_radius, &render.track)?;

    writeln!(out, r#"<g class="segments">"#)?;
    for (index, segment) in generate_layout().iter().enumerate() {
        let arc = segment_arc_path(index, wheel.wheel_radius);
        let label = segment_label(index, wheel.label_radius());
        writeln!(
            out,
            r#"<path d="{}" fill="{}" stroke="white" stroke-width="1"/>"#,
            arc.to_svg_path_data(),
            fill_for(config, segment.color)
        )?;
        writeln!(
            out,
            r#"<text x="{x:.3}" y="{y:.3}" fill="white" font-size="12" font-weight="bold" text-anchor="middle" dominant-baseline="middle" transform="rotate({rot:.3}, {x:.3}, {y:.3})">{}</text>"#,
            segment.number,
            x = label.position.x,
            y = label.position.y,
            rot = label.rotation_degrees,
        )?;
    }
    writeln!(out, "</g>")?;

    writeln!(
        out,
        r#"<circle class="ball" cx="{:.3}" cy="{:.3}" r="{:.3}" fill="{}"/>"#,
        ball.position.x, ball.position.y, wheel.ball_radius, render.ball
    )?;

    write_circle(out, wheel.cone_radius(), &render.wood)?;
    write_circle(out, wheel.hub_radius, &render.hub)?;

    for index in 0..generate_layout().len() {
        let (inner, outer) = divider_line(index, wheel.wheel_radius, wheel.rim_radius());
        writeln!(
            out,
            r#"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke="{}" stroke-width="2"/>"#,
            inner.x, inner.y, outer.x, outer.y, render.divider
        )?;
    }

    writeln!(out, "</g>")?;
    writeln!(out, "</svg>")
}

fn write_circle(out: &mut String, radius: f64, fill: &str) -> fmt::Result {
    writeln!(out, r#"<circle r="{:.3}" fill="{}"/>"#, radius, fill)
}
