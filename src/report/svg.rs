//! SVG backend for the radar chart plus its colour-bar legend.

use crate::color::ColorScale;
use crate::geometry::layout::Point;
use crate::geometry::{DrawOp, SceneGraph, TextRole};
use std::fmt::{self, Write};

/// Side of the square chart area in pixels.
const CHART_SIZE: f64 = 600.0;
const BAR_X: f64 = CHART_SIZE + 40.0;
const BAR_WIDTH: f64 = 24.0;
const BAR_TOP: f64 = 120.0;
const BAR_HEIGHT: f64 = 360.0;
const WIDTH: f64 = CHART_SIZE + 120.0;

/// Legend ticks as fractions of the bar.
pub const LEGEND_TICKS: [f64; 4] = [0.0, 0.5, 0.75, 1.0];

struct Viewport {
    extent: f64,
    unit: f64,
}

impl Viewport {
    fn new(extent: f64) -> Self {
        Self {
            extent,
            unit: CHART_SIZE / (2.0 * extent),
        }
    }

    fn point(&self, (x, y): Point) -> (f64, f64) {
        ((x + self.extent) * self.unit, (self.extent - y) * self.unit)
    }

    fn polar(&self, radius: f64, degrees: f64) -> (f64, f64) {
        let radians = degrees.to_radians();
        self.point((radius * radians.cos(), radius * radians.sin()))
    }
}

pub fn to_svg(scene: &SceneGraph, scale: &ColorScale) -> Result<String, fmt::Error> {
    let view = Viewport::new(scene.extent);
    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH:.0}" height="{CHART_SIZE:.0}" viewBox="0 0 {WIDTH:.0} {CHART_SIZE:.0}">"#
    )?;
    writeln!(svg, r#"  <rect width="100%" height="100%" fill="white"/>"#)?;

    for op in &scene.ops {
        match op {
            DrawOp::Wedge {
                inner_radius,
                outer_radius,
                start_angle,
                end_angle,
                fill,
                ..
            } => {
                let (ox1, oy1) = view.polar(*outer_radius, *start_angle);
                let (ox2, oy2) = view.polar(*outer_radius, *end_angle);
                let (ix2, iy2) = view.polar(*inner_radius, *end_angle);
                let (ix1, iy1) = view.polar(*inner_radius, *start_angle);
                let outer = outer_radius * view.unit;
                let inner = inner_radius * view.unit;
                writeln!(
                    svg,
                    r#"  <path d="M{ox1:.2},{oy1:.2}A{outer:.2},{outer:.2} 0 0 0 {ox2:.2},{oy2:.2}L{ix2:.2},{iy2:.2}A{inner:.2},{inner:.2} 0 0 1 {ix1:.2},{iy1:.2}Z" fill="{fill}" stroke="black" stroke-width="0.5"/>"#
                )?;
            }
            DrawOp::Polygon { points, fill, .. } => {
                let points = points
                    .iter()
                    .map(|point| {
                        let (x, y) = view.point(*point);
                        format!("{x:.2},{y:.2}")
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                match fill {
                    Some(fill) => writeln!(
                        svg,
                        r#"  <polygon points="{points}" fill="{fill}" stroke="black" stroke-width="0.5"/>"#
                    )?,
                    None => writeln!(
                        svg,
                        r#"  <polygon points="{points}" fill="none" stroke="black" stroke-width="1"/>"#
                    )?,
                }
            }
            DrawOp::Disk {
                center,
                radius,
                fill,
            } => {
                let (cx, cy) = view.point(*center);
                let r = radius * view.unit;
                writeln!(
                    svg,
                    r#"  <circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" fill="{fill}" stroke="black" stroke-width="0.5"/>"#
                )?;
            }
            DrawOp::Text {
                role,
                position,
                content,
            } => {
                let (x, y) = view.point(*position);
                let (family, size) = match role {
                    TextRole::Total => ("Times New Roman", 26.0),
                    TextRole::DimensionScore | TextRole::DimensionLetter => ("Times New Roman", 17.0),
                    TextRole::PrincipleNumber => ("Arial", 12.0),
                };
                writeln!(
                    svg,
                    r#"  <text x="{x:.2}" y="{y:.2}" text-anchor="middle" dominant-baseline="middle" font-family="{family}" font-size="{size:.0}">{}</text>"#,
                    escape(content)
                )?;
            }
        }
    }

    write_color_bar(&mut svg, scale)?;
    writeln!(svg, "</svg>")?;
    Ok(svg)
}

/// Vertical gradient, 0 at the bottom and 100 % at the top.
fn write_color_bar(svg: &mut String, scale: &ColorScale) -> fmt::Result {
    writeln!(svg, "  <defs>")?;
    writeln!(
        svg,
        r#"    <linearGradient id="esai-scale" x1="0" y1="1" x2="0" y2="0">"#
    )?;
    for offset in [0.0, 0.5, 1.0] {
        writeln!(
            svg,
            r#"      <stop offset="{offset}" stop-color="{}"/>"#,
            scale.map_value(offset)
        )?;
    }
    writeln!(svg, "    </linearGradient>")?;
    writeln!(svg, "  </defs>")?;
    writeln!(
        svg,
        r#"  <rect x="{BAR_X:.2}" y="{BAR_TOP:.2}" width="{BAR_WIDTH:.2}" height="{BAR_HEIGHT:.2}" fill="url(#esai-scale)" stroke="black" stroke-width="0.5"/>"#
    )?;
    for tick in LEGEND_TICKS {
        let y = BAR_TOP + BAR_HEIGHT * (1.0 - tick);
        let x1 = BAR_X + BAR_WIDTH;
        let x2 = x1 + 5.0;
        writeln!(
            svg,
            r#"  <line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="black" stroke-width="0.5"/>"#
        )?;
        writeln!(
            svg,
            r#"  <text x="{:.2}" y="{y:.2}" dominant-baseline="middle" font-family="Times New Roman" font-size="12">{:.0}%</text>"#,
            x2 + 3.0,
            tick * 100.0
        )?;
    }
    Ok(())
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::scene_for;
    use crate::scoring::ScoreCalculator;

    fn render_default() -> String {
        let scale = ColorScale::default();
        let scene = scene_for(&ScoreCalculator::default(), &scale);
        to_svg(&scene, &scale).expect("svg should render")
    }

    #[test]
    fn svg_contains_every_primitive() {
        let svg = render_default();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<path d=").count(), 8);
        assert_eq!(svg.matches("<polygon").count(), 27 + 6);
        assert_eq!(svg.matches("<circle").count(), 1);
        assert!(svg.contains(">0.00</text>"));
        assert!(svg.contains(">27</text>"));
    }

    #[test]
    fn text_is_painted_after_shapes() {
        let svg = render_default();
        let last_shape = svg.rfind("<circle").expect("centre disk present");
        let first_text = svg.find("<text").expect("labels present");
        assert!(first_text > last_shape);
    }

    #[test]
    fn color_bar_has_gradient_and_ticks() {
        let svg = render_default();
        assert!(svg.contains(r#"stop-color="rgb(197,22,27)""#));
        assert!(svg.contains(r#"stop-color="rgb(255,255,255)""#));
        assert!(svg.contains(r#"stop-color="rgb(0,136,67)""#));
        for label in ["0%", "50%", "75%", "100%"] {
            assert!(svg.contains(&format!(">{label}</text>")), "missing tick {label}");
        }
    }

    #[test]
    fn chart_is_centred_in_its_area() {
        let view = Viewport::new(10.1);
        let (x, y) = view.point((0.0, 0.0));
        assert!((x - CHART_SIZE / 2.0).abs() < 1e-9);
        assert!((y - CHART_SIZE / 2.0).abs() < 1e-9);
        let (_, top) = view.point((0.0, 10.1));
        assert!(top.abs() < 1e-9);
    }
}
