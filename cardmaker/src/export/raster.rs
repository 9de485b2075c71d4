use ab_glyph::{Font, FontArc, Glyph, ScaleFont};
use cardlayout::prelude::{CardLayout, Placed, PlacedRun, Rgb};
use image::{Rgba, RgbaImage};

use super::art::{self, CardArt};
use super::fonts::{px_scale, FontSet};
use super::ExportError;

/// Paints the fitted card at `ratio` device pixels per card pixel.
pub fn rasterize(
    layout: &CardLayout,
    fonts: &FontSet,
    art: &CardArt,
    ratio: f32,
    background: Rgb,
) -> Result<RgbaImage, ExportError> {
    let width = (layout.width * ratio).ceil() as u32;
    let height = (layout.total_height() * ratio).ceil() as u32;
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyCanvas);
    }

    let mut canvas = RgbaImage::from_pixel(width, height, art::rgba(background));
    paint_background(&mut canvas, layout, art, ratio);

    let (ox, oy) = layout.origin;
    for item in &layout.content.items {
        match item {
            Placed::Line(line) => {
                for run in &line.runs {
                    let font = fonts.pick(&run.style);
                    let scaled = font.as_scaled(px_scale(font, run.style.size));
                    let glyph_height = scaled.ascent() - scaled.descent();
                    let baseline = oy + line.y + (line.height - glyph_height) / 2.0 + scaled.ascent();
                    draw_run(&mut canvas, font, run, ox + run.x, baseline, ratio);
                }
            }
            Placed::Separator { y, height, width } => {
                let x0 = (ox * ratio).round() as u32;
                let x1 = ((ox + width) * ratio).round() as u32;
                let y0 = ((oy + y) * ratio).round() as u32;
                let y1 = ((oy + y + height) * ratio).round() as u32;
                match art.linebreak() {
                    Some(image) => art::overlay_scaled(
                        &mut canvas,
                        image,
                        x0 as i64,
                        y0 as i64,
                        x1.saturating_sub(x0),
                        y1.saturating_sub(y0),
                    ),
                    None => art::paint_rule(&mut canvas, x0, x1, y0, y1, ratio.round() as u32),
                }
            }
        }
    }

    Ok(canvas)
}

pub(crate) fn paint_background(canvas: &mut RgbaImage, layout: &CardLayout, art: &CardArt, ratio: f32) {
    let width = canvas.width();
    for segment in layout.background.segments() {
        let y0 = (segment.y * ratio).round() as u32;
        let y1 = ((segment.y + segment.height) * ratio).round() as u32;
        match art.segment(segment.kind) {
            Some(image) => {
                art::overlay_scaled(canvas, image, 0, y0 as i64, width, y1.saturating_sub(y0))
            }
            None => art::paint_segment(canvas, segment.kind, segment.index, y0, y1),
        }
    }
}

fn draw_run(canvas: &mut RgbaImage, font: &FontArc, run: &PlacedRun, x: f32, baseline: f32, ratio: f32) {
    let scale = px_scale(font, run.style.size * ratio);
    let scaled = font.as_scaled(scale);
    let spacing = run.style.letter_spacing * ratio;
    let color = run.style.color;

    let mut pen = x * ratio;
    let mut prev = None;
    for ch in run.text.chars() {
        let id = font.glyph_id(ch);
        if let Some(prev) = prev {
            pen += scaled.kern(prev, id);
        }
        let glyph = Glyph {
            id,
            scale,
            position: ab_glyph::point(pen, baseline * ratio),
        };
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            let left = bounds.min.x.floor() as i64;
            let top = bounds.min.y.floor() as i64;
            outlined.draw(|gx, gy, coverage| {
                blend(canvas, left + gx as i64, top + gy as i64, color, coverage);
            });
        }
        pen += scaled.h_advance(id) + spacing;
        prev = Some(id);
    }
}

fn blend(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgb, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let alpha = coverage.clamp(0.0, 1.0);
    let pixel = canvas.get_pixel_mut(x as u32, y as u32);
    let Rgba([r, g, b, a]) = *pixel;
    let mix = |dst: u8, src: u8| (dst as f32 * (1.0 - alpha) + src as f32 * alpha).round() as u8;
    *pixel = Rgba([
        mix(r, color.0),
        mix(g, color.1),
        mix(b, color.2),
        a.max((alpha * 255.0).round() as u8),
    ]);
}
