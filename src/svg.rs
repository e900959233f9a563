//! SVG presenter: draws the core's output as shapes, a legend, and
//! per-feature tooltips. Pure glue; all join/scale decisions happen upstream.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde_json::Value;

use crate::config::MapConfig;
use crate::engine::RenderOutput;
use crate::error::{Error, Result};
use crate::topology::Geometry;

const LEGEND_ROW_H: f64 = 18.0;
const TITLE_H: f64 = 24.0;

/// Render `output` to an SVG file at `path`.
pub fn write_svg(path: &Path, output: &RenderOutput, config: &MapConfig) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    render_svg(&mut writer, output, config, 960.0, 10.0)?;
    writer.flush()?;
    Ok(())
}

/// Render `output` as an SVG document to `writer`.
pub fn render_svg(
    writer: &mut impl Write,
    output: &RenderOutput,
    config: &MapConfig,
    width: f64,
    margin: f64,
) -> Result<()> {
    let arcs = output.topology.decode_arcs();
    let bounds = arc_bounds(&arcs)
        .ok_or_else(|| Error::load("[svg] topology has no arcs; nothing to draw"))?;
    let [min_x, min_y, max_x, max_y] = bounds;

    let title_h = if output.title.is_empty() { 0.0 } else { TITLE_H };
    let scale = (width - 2.0 * margin) / (max_x - min_x).max(f64::MIN_POSITIVE);
    let map_h = (max_y - min_y) * scale + 2.0 * margin;

    let legend = output.scale.legend(config.legend_steps);
    let legend_h = if legend.is_empty() { 0.0 } else { legend.len() as f64 * LEGEND_ROW_H + margin };
    let height = title_h + map_h + legend_h;

    // Map lon/lat -> SVG coords (preserve aspect, Y down).
    let project = move |p: &[f64; 2]| -> (f64, f64) {
        let x = margin + (p[0] - min_x) * scale;
        let y = title_h + margin + (max_y - p[1]) * scale;
        (x, y)
    };

    write_header(writer, width, height)?;

    if !output.title.is_empty() {
        writeln!(
            writer,
            r##"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="16" text-anchor="middle">{}</text>"##,
            width / 2.0,
            TITLE_H - 8.0,
            escape_xml(&output.title)
        )?;
    }

    for feature in output.features()? {
        let d = feature_path(feature.feature, &arcs, &project);
        if d.is_empty() {
            continue; // point or empty geometry; nothing to outline
        }
        writeln!(
            writer,
            r##"<path d="{}" fill="{}" stroke="{}" stroke-width="0.5"><title>{}</title></path>"##,
            d,
            feature.color.to_hex(),
            escape_xml(&config.stroke_color),
            escape_xml(&feature.label)
        )?;
    }

    draw_legend(writer, &legend, margin, title_h + map_h)?;

    writeln!(writer, "</svg>")?;
    Ok(())
}

fn write_header(writer: &mut impl Write, width: f64, height: f64) -> Result<()> {
    writeln!(writer, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
    writeln!(
        writer,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"##
    )?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    Ok(())
}

fn draw_legend(
    writer: &mut impl Write,
    legend: &[(f64, crate::color::Rgb)],
    margin: f64,
    top: f64,
) -> Result<()> {
    for (i, (value, color)) in legend.iter().enumerate() {
        let y = top + i as f64 * LEGEND_ROW_H;
        writeln!(
            writer,
            r##"<rect x="{margin:.1}" y="{y:.1}" width="14" height="14" fill="{}"/>"##,
            color.to_hex()
        )?;
        writeln!(
            writer,
            r##"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="11">{}</text>"##,
            margin + 20.0,
            y + 11.0,
            format_tick(*value)
        )?;
    }
    Ok(())
}

/// Build a compact path string for all of a feature's rings.
fn feature_path(
    feature: &Geometry,
    arcs: &[Vec<[f64; 2]>],
    project: &impl Fn(&[f64; 2]) -> (f64, f64),
) -> String {
    let mut rings = Vec::new();
    collect_rings(&feature.arcs, &mut rings);

    let mut out = String::new();
    for ring in &rings {
        ring_to_path(&stitch_ring(ring, arcs), project, &mut out);
    }
    out
}

/// Rings are the innermost integer arrays of a Polygon/MultiPolygon arcs
/// nesting; anything deeper-structured recurses.
fn collect_rings(value: &Value, out: &mut Vec<Vec<i64>>) {
    if let Value::Array(items) = value {
        if !items.is_empty() && items.iter().all(Value::is_number) {
            out.push(items.iter().filter_map(Value::as_i64).collect());
        } else {
            for item in items {
                collect_rings(item, out);
            }
        }
    }
}

/// Concatenate a ring's arcs into one point sequence. A negative index `i`
/// means arc `!i` traversed backwards; consecutive arcs share their junction
/// point, which is emitted only once.
fn stitch_ring(ring: &[i64], arcs: &[Vec<[f64; 2]>]) -> Vec<[f64; 2]> {
    let mut points: Vec<[f64; 2]> = Vec::new();
    for &index in ring {
        let (i, reversed) = if index < 0 { (!index as usize, true) } else { (index as usize, false) };
        let Some(arc) = arcs.get(i) else { continue };

        let iter: Box<dyn Iterator<Item = &[f64; 2]>> =
            if reversed { Box::new(arc.iter().rev()) } else { Box::new(arc.iter()) };
        for (j, p) in iter.enumerate() {
            if j == 0 && !points.is_empty() {
                continue;
            }
            points.push(*p);
        }
    }
    points
}

fn ring_to_path(
    points: &[[f64; 2]],
    project: &impl Fn(&[f64; 2]) -> (f64, f64),
    out: &mut String,
) {
    let mut coords = points.iter().map(project);
    if let Some((x, y)) = coords.next() {
        out.push_str(&format!("M{x:.3},{y:.3}"));
        for (x, y) in coords {
            out.push_str(&format!("L{x:.3},{y:.3}"));
        }
        out.push('Z');
    }
}

/// Bounding box [min_x, min_y, max_x, max_y] over all decoded arcs.
fn arc_bounds(arcs: &[Vec<[f64; 2]>]) -> Option<[f64; 4]> {
    let mut bounds: Option<[f64; 4]> = None;
    for p in arcs.iter().flatten() {
        bounds = Some(match bounds {
            None => [p[0], p[1], p[0], p[1]],
            Some([min_x, min_y, max_x, max_y]) => [
                min_x.min(p[0]),
                min_y.min(p[1]),
                max_x.max(p[0]),
                max_y.max(p[1]),
            ],
        });
    }
    bounds
}

/// Short numeric label for legend ticks.
fn format_tick(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() { "0".into() } else { s.into() }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
