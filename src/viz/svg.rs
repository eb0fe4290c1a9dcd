//! Draw a [`Frame`] with plotters' SVG backend.

use super::scene::Frame;
use super::surface::{Anchor, Bar, Element, Label, Rule};
use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontFamily, FontTransform};
use plotters_svg::SVGBackend;
use std::path::Path;

/// Write `frame` to an SVG file.
pub fn render_svg<P: AsRef<Path>>(frame: &Frame, out_path: P) -> Result<()> {
    let path_string = out_path.as_ref().to_string_lossy().into_owned();
    let root = SVGBackend::new(path_string.as_str(), (frame.width, frame.height)).into_drawing_area();
    draw_frame(root, frame)
}

/// Render `frame` to an SVG document in memory.
pub fn render_svg_string(frame: &Frame) -> Result<String> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (frame.width, frame.height)).into_drawing_area();
        draw_frame(root, frame)?;
    }
    Ok(buf)
}

fn draw_frame<DB: DrawingBackend>(root: DrawingArea<DB, Shift>, frame: &Frame) -> Result<()> {
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    for item in &frame.items {
        match &item.element {
            Element::Bar(b) => draw_bar(&root, b)?,
            Element::Rule(r) => draw_rule(&root, r)?,
            Element::Label(l) => draw_label(&root, l)?,
        }
    }
    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

fn px(v: f64) -> i32 {
    v.round() as i32
}

fn draw_bar<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, b: &Bar) -> Result<()> {
    if b.width <= 0.0 || b.height <= 0.0 {
        return Ok(());
    }
    let rect = Rectangle::new(
        [(px(b.x), px(b.y)), (px(b.x + b.width), px(b.y + b.height))],
        b.fill.mix(b.opacity).filled(),
    );
    root.draw(&rect).map_err(|e| anyhow!("{:?}", e))
}

/// Split a line into `(on, off)` dashes.
pub fn dash_segments(
    from: (f64, f64),
    to: (f64, f64),
    on: f64,
    off: f64,
) -> Vec<((f64, f64), (f64, f64))> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 || on <= 0.0 {
        return Vec::new();
    }
    let (ux, uy) = (dx / len, dy / len);
    let mut out = Vec::new();
    let mut d = 0.0;
    while d < len {
        let e = (d + on).min(len);
        out.push((
            (from.0 + ux * d, from.1 + uy * d),
            (from.0 + ux * e, from.1 + uy * e),
        ));
        d = e + off.max(0.0);
    }
    out
}

fn draw_rule<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, r: &Rule) -> Result<()> {
    let style = r.color.stroke_width(1);
    let segments = match r.dash {
        Some((on, off)) => dash_segments(r.from, r.to, on, off),
        None => vec![(r.from, r.to)],
    };
    for (a, b) in segments {
        root.draw(&PathElement::new(
            vec![(px(a.0), px(a.1)), (px(b.0), px(b.1))],
            style,
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

fn draw_label<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, l: &Label) -> Result<()> {
    let h = match l.anchor {
        Anchor::Start => HPos::Left,
        Anchor::Middle => HPos::Center,
        Anchor::End => HPos::Right,
    };
    let mut style = TextStyle::from((FontFamily::SansSerif, l.font_px)).color(&l.color);
    if l.rotated {
        // glyphs centred on x once turned
        style = style
            .pos(Pos::new(h, VPos::Center))
            .transform(FontTransform::Rotate90);
    } else {
        style = style.pos(Pos::new(h, VPos::Bottom));
    }
    root.draw(&Text::new(l.text.as_str(), (px(l.x), px(l.y)), style))
        .map_err(|e| anyhow!("{:?}", e))
}
