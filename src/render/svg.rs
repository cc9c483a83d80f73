//! SVG chord diagram renderer.
//!
//! Normalized layout coordinates are scaled about the surface centre so the
//! outer ring's unit radius maps to `min(width, height) / 2` minus a margin.
//! SVG's y axis points down, so increasing turn fractions run clockwise on
//! screen; every arc is drawn with sweep flag 1 to match.

use crate::error::RenderError;
use crate::layout::{ArcShape, Layout, PathSegment, Point, RibbonPath};
use crate::render::palette::ColorPalette;
use crate::render::Renderer;

/// Fraction of the half-size kept clear around the outer ring.
const MARGIN: f64 = 0.08;

pub struct SvgRenderer {
    pub width: u32,
    pub height: u32,
    pub palette: ColorPalette,
    pub legend: bool,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            palette: ColorPalette::default(),
            legend: true,
        }
    }
}

/// Maps normalized coordinates onto the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub cx: f64,
    pub cy: f64,
    pub scale: f64,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        let half = width.min(height) as f64 / 2.0;
        Self {
            cx: width as f64 / 2.0,
            cy: height as f64 / 2.0,
            scale: half * (1.0 - MARGIN),
        }
    }

    pub fn map(&self, p: Point) -> (f64, f64) {
        (self.cx + p.x * self.scale, self.cy + p.y * self.scale)
    }

    pub fn length(&self, r: f64) -> f64 {
        r * self.scale
    }
}

fn large_arc(span: f64) -> u8 {
    u8::from(span > 0.5)
}

/// Path data for an annular sector.
pub fn sector_d(shape: &ArcShape, surface: &Surface) -> String {
    let (ox0, oy0) = surface.map(shape.point_at(shape.start, shape.r));
    let (ox1, oy1) = surface.map(shape.point_at(shape.end, shape.r));
    let (ix1, iy1) = surface.map(shape.point_at(shape.end, shape.r0));
    let (ix0, iy0) = surface.map(shape.point_at(shape.start, shape.r0));
    let r = surface.length(shape.r);
    let r0 = surface.length(shape.r0);
    let large = large_arc(shape.span());

    format!(
        "M {:.3} {:.3} A {:.3} {:.3} 0 {} 1 {:.3} {:.3} L {:.3} {:.3} A {:.3} {:.3} 0 {} 0 {:.3} {:.3} Z",
        ox0, oy0, r, r, large, ox1, oy1, ix1, iy1, r0, r0, large, ix0, iy0
    )
}

/// Path data for a ribbon contour.
pub fn ribbon_d(path: &RibbonPath, surface: &Surface) -> String {
    path.segments
        .iter()
        .map(|segment| match *segment {
            PathSegment::MoveTo { to } => {
                let (x, y) = surface.map(to);
                format!("M {:.3} {:.3}", x, y)
            }
            PathSegment::Arc {
                radius,
                from,
                until,
                to,
                ..
            } => {
                let (x, y) = surface.map(to);
                let r = surface.length(radius);
                format!(
                    "A {:.3} {:.3} 0 {} 1 {:.3} {:.3}",
                    r,
                    r,
                    large_arc(until - from),
                    x,
                    y
                )
            }
            PathSegment::QuadTo { ctrl, to } => {
                let (qx, qy) = surface.map(ctrl);
                let (x, y) = surface.map(to);
                format!("Q {:.3} {:.3} {:.3} {:.3}", qx, qy, x, y)
            }
            PathSegment::Close => "Z".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

impl SvgRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_palette(mut self, palette: ColorPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    /// Scale factor for text and strokes relative to a 512px canvas.
    fn ui_scale(&self) -> f64 {
        self.width.min(self.height) as f64 / 512.0
    }

    fn node_colors(&self, layout: &Layout) -> Vec<String> {
        let count = layout.model().len();
        layout
            .model()
            .iter()
            .enumerate()
            .map(|(i, share)| self.palette.node_color(i, count, &share.name))
            .collect()
    }

    fn draw_ribbons(&self, layout: &Layout, colors: &[String], surface: &Surface) -> Vec<String> {
        let stroke = 0.5 * self.ui_scale();
        layout
            .curves()
            .iter()
            .map(|curve| {
                let (source, _) = layout.curve_arcs(curve);
                let color = &colors[source.node.0];
                format!(
                    r#"<path class="ribbon" data-edge="{}" d="{}" fill="{}" fill-opacity="{:.2}" stroke="{}" stroke-opacity="{:.2}" stroke-width="{:.2}"/>"#,
                    escape_xml(&curve.id),
                    ribbon_d(&curve.path, surface),
                    color,
                    self.palette.ribbon_opacity,
                    color,
                    (self.palette.ribbon_opacity + 0.2).min(1.0),
                    stroke
                )
            })
            .collect()
    }

    fn draw_sectors<'a>(
        &self,
        class: &str,
        arcs: impl Iterator<Item = (usize, &'a ArcShape)>,
        layout: &Layout,
        colors: &[String],
        surface: &Surface,
    ) -> Vec<String> {
        arcs.filter(|(_, shape)| shape.span() > 0.0)
            .map(|(node, shape)| {
                format!(
                    r#"<path class="{}" data-node="{}" d="{}" fill="{}"/>"#,
                    class,
                    escape_xml(&layout.model()[node].name),
                    sector_d(shape, surface),
                    colors[node]
                )
            })
            .collect()
    }

    fn draw_legend(&self, layout: &Layout, colors: &[String]) -> Vec<String> {
        let scale = self.ui_scale();
        let swatch = 10.0 * scale;
        let line = 16.0 * scale;
        let font = 10.0 * scale;
        let x = 8.0 * scale;

        layout
            .model()
            .iter()
            .enumerate()
            .map(|(i, share)| {
                let y = 8.0 * scale + i as f64 * line;
                format!(
                    r#"<g class="legend-item"><rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/><text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="{:.1}" fill="{}">{} {:.1}%</text></g>"#,
                    x,
                    y,
                    swatch,
                    swatch,
                    colors[i],
                    x + swatch * 1.5,
                    y + swatch * 0.9,
                    font,
                    self.text_color(),
                    escape_xml(&share.name),
                    share.value * 100.0
                )
            })
            .collect()
    }

    /// Dark text on light backgrounds, light text otherwise.
    fn text_color(&self) -> &'static str {
        let hex = self.palette.background.trim_start_matches('#');
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .unwrap_or(255) as f64
        };
        let luma = 0.299 * channel(0) + 0.587 * channel(2) + 0.114 * channel(4);
        if luma > 128.0 {
            "#222222"
        } else {
            "#eeeeee"
        }
    }

    fn wrap_svg(&self, content: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">
  <!-- Background -->
  <rect width="100%" height="100%" fill="{}"/>
  {}
</svg>"#,
            self.width, self.height, self.width, self.height, self.palette.background, content
        )
    }
}

impl Renderer for SvgRenderer {
    fn name(&self) -> &'static str {
        "svg"
    }

    fn render(&self, layout: &Layout) -> Result<String, RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::EmptySurface {
                width: self.width,
                height: self.height,
            });
        }

        let surface = Surface::new(self.width, self.height);
        let colors = self.node_colors(layout);

        let ribbons = self.draw_ribbons(layout, &colors, &surface);
        let outer = self.draw_sectors(
            "outer-arc",
            layout.outer_arcs().iter().map(|a| (a.node.0, &a.shape)),
            layout,
            &colors,
            &surface,
        );
        let inner = self.draw_sectors(
            "inner-arc",
            layout.inner_arcs().iter().map(|a| (a.node.0, &a.shape)),
            layout,
            &colors,
            &surface,
        );

        let mut content = format!(
            "<!-- Ribbons -->\n  <g id=\"ribbons\">\n    {}\n  </g>\n  <!-- Node ring -->\n  <g id=\"outer-arcs\">\n    {}\n  </g>\n  <!-- Edge ring -->\n  <g id=\"inner-arcs\">\n    {}\n  </g>",
            ribbons.join("\n    "),
            outer.join("\n    "),
            inner.join("\n    ")
        );

        if self.legend {
            let legend = self.draw_legend(layout, &colors);
            content.push_str(&format!(
                "\n  <!-- Legend -->\n  <g id=\"legend\">\n    {}\n  </g>",
                legend.join("\n    ")
            ));
        }

        Ok(self.wrap_svg(&content))
    }

    fn extension(&self) -> &'static str {
        "svg"
    }
}
