use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::geometry::PixelPoint;
use crate::scene::{Scene, Shape, ViewportState};

/// Write a scene to an SVG file
///
/// Layout:
/// - outer group: viewport zoom and pan
/// - inner group: map group placement (translate, rotate, then shift the
///   extent minimum to the origin)
/// - shapes in scene order, so later shapes draw on top
pub fn write_svg(path: &Path, scene: &Scene, viewport: &ViewportState) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create SVG file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_svg_to(&mut writer, scene, viewport)?;
    writer.flush()?;
    Ok(())
}

pub fn write_svg_to<W: Write>(
    writer: &mut W,
    scene: &Scene,
    viewport: &ViewportState,
) -> std::io::Result<()> {
    writeln!(
        writer,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = scene.width,
        h = scene.height
    )?;

    let pan = viewport.pan();
    writeln!(
        writer,
        r#"<g transform="matrix({z} 0 0 {z} {} {})">"#,
        pan.x,
        pan.y,
        z = viewport.zoom()
    )?;

    let (min_x, min_y) = scene
        .extent
        .as_ref()
        .map(|b| (b.min_x, b.min_y))
        .unwrap_or((0.0, 0.0));
    writeln!(
        writer,
        r#"<g transform="translate({} {}) rotate({}) translate({} {})">"#,
        scene.transform.left,
        scene.transform.top,
        scene.transform.angle,
        -min_x,
        -min_y
    )?;

    for shape in &scene.shapes {
        match shape {
            Shape::Polyline(p) => writeln!(
                writer,
                r#"<polyline class="{}" points="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                p.group.as_str(),
                points_attr(&p.points),
                escape(&p.fill),
                escape(&p.stroke),
                p.stroke_width
            )?,
            Shape::Quay(q) => {
                let status = q.status.map(|s| s.as_str()).unwrap_or("UNKNOWN");
                writeln!(
                    writer,
                    r#"<polygon class="quay" data-quay="{}" data-status="{}" points="{}" fill="{}" stroke="{}" stroke-width="{}" transform="rotate({} {} {})"/>"#,
                    escape(&q.quay_name),
                    status,
                    points_attr(&q.points),
                    escape(&q.fill),
                    escape(&q.stroke),
                    q.stroke_width,
                    q.angle,
                    q.pivot.x,
                    q.pivot.y
                )?
            }
            Shape::Label(l) => writeln!(
                writer,
                r#"<text x="{x}" y="{y}" font-size="{}" font-family="Arial" fill="{}" dominant-baseline="hanging" transform="rotate({} {x} {y})">{}</text>"#,
                l.font_size,
                escape(&l.fill),
                l.angle,
                escape(&l.text),
                x = l.position.x,
                y = l.position.y
            )?,
        }
    }

    writeln!(writer, "</g>")?;
    writeln!(writer, "</g>")?;
    writeln!(writer, "</svg>")?;
    Ok(())
}

fn points_attr(points: &[PixelPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{:.3},{:.3}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
