//! SVG serialization of the map surface
//!
//! The document has two groups: the raster tiles first (drawn below) and
//! the earthquake points second (drawn above).

use crate::{
    core::{constants::TILE_SIZE, viewport::Viewport},
    layers::overlay::OverlayLayer,
    tiles::layer::RasterLayer,
};
use std::fmt::Write;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Renders the whole surface to an SVG string
pub fn render_svg(viewport: &Viewport, raster: &RasterLayer, overlay: &OverlayLayer) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_svg(&mut out, viewport, raster, overlay);
    out
}

fn write_svg(
    out: &mut String,
    viewport: &Viewport,
    raster: &RasterLayer,
    overlay: &OverlayLayer,
) -> std::fmt::Result {
    writeln!(
        out,
        r#"<svg xmlns="{}" xmlns:xlink="{}" width="{}" height="{}">"#,
        SVG_NS, XLINK_NS, viewport.width, viewport.height
    )?;

    match raster.group() {
        Some(group) => writeln!(out, r#"  <g class="raster" transform="{}">"#, group.to_svg())?,
        None => writeln!(out, r#"  <g class="raster">"#)?,
    }
    for image in raster.images() {
        writeln!(
            out,
            r#"    <image xlink:href="{}" x="{}" y="{}" width="{size}" height="{size}"/>"#,
            escape_attr(&image.url),
            image.position.x,
            image.position.y,
            size = TILE_SIZE
        )?;
    }
    writeln!(out, "  </g>")?;

    writeln!(out, r#"  <g class="vector">"#)?;
    for point in overlay.points() {
        let magnitude = overlay
            .features()
            .get(point.index)
            .map(|f| f.magnitude)
            .unwrap_or_default();
        writeln!(
            out,
            r#"    <path d="{}" data-mag="{}"/>"#,
            point.path_data(),
            magnitude
        )?;
    }
    writeln!(out, "  </g>")?;
    writeln!(out, "</svg>")
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
