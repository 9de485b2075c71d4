use std::path::Path;

use cardlayout::prelude::{Rgb, SegmentKind};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

const PARCHMENT: Rgb = Rgb::hex(0xefe6cf);
const PARCHMENT_SHADE: Rgb = Rgb::hex(0xe9dec3);
const ROLL: Rgb = Rgb::hex(0xc9b48a);
const ROLL_EDGE: Rgb = Rgb::hex(0x8a6f45);
const RULE: Rgb = Rgb::hex(0x9c2f14);

/// Scroll artwork. Missing images are painted procedurally.
#[derive(Debug, Clone, Default)]
pub struct CardArt {
    top: Option<RgbaImage>,
    middle: Option<RgbaImage>,
    bottom: Option<RgbaImage>,
    linebreak: Option<RgbaImage>,
}

impl CardArt {
    pub fn load(assets_dir: Option<&Path>) -> Self {
        let Some(dir) = assets_dir else {
            return Self::default();
        };
        let read = |name: &str| {
            let path = dir.join(name);
            if !path.exists() {
                return None;
            }
            match image::open(&path) {
                Ok(img) => Some(img.to_rgba8()),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "ignoring artwork");
                    None
                }
            }
        };
        Self {
            top: read("top.png"),
            middle: read("middle.png"),
            bottom: read("bottom.png"),
            linebreak: read("linebreak.png"),
        }
    }

    pub fn segment(&self, kind: SegmentKind) -> Option<&RgbaImage> {
        match kind {
            SegmentKind::Top => self.top.as_ref(),
            SegmentKind::Middle => self.middle.as_ref(),
            SegmentKind::Bottom => self.bottom.as_ref(),
        }
    }

    pub fn linebreak(&self) -> Option<&RgbaImage> {
        self.linebreak.as_ref()
    }
}

pub(crate) fn rgba(color: Rgb) -> Rgba<u8> {
    Rgba([color.0, color.1, color.2, 255])
}

/// Draws `source` stretched over the given pixel rectangle.
pub(crate) fn overlay_scaled(canvas: &mut RgbaImage, source: &RgbaImage, x: i64, y: i64, w: u32, h: u32) {
    if w == 0 || h == 0 {
        return;
    }
    let scaled = imageops::resize(source, w, h, FilterType::Triangle);
    imageops::overlay(canvas, &scaled, x, y);
}

pub(crate) fn fill_rect(canvas: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgba<u8>) {
    let x1 = x1.min(canvas.width());
    let y1 = y1.min(canvas.height());
    for y in y0..y1 {
        for x in x0..x1 {
            canvas.put_pixel(x, y, color);
        }
    }
}

/// Procedural parchment band for one background segment.
pub(crate) fn paint_segment(canvas: &mut RgbaImage, kind: SegmentKind, index: u32, y0: u32, y1: u32) {
    let width = canvas.width();
    match kind {
        SegmentKind::Top | SegmentKind::Bottom => {
            fill_rect(canvas, 0, y0, width, y1, rgba(ROLL));
            let edge = ((y1 - y0) / 12).max(1);
            let (ey0, ey1) = if kind == SegmentKind::Top {
                (y1.saturating_sub(edge), y1)
            } else {
                (y0, y0 + edge)
            };
            fill_rect(canvas, 0, ey0, width, ey1, rgba(ROLL_EDGE));
        }
        SegmentKind::Middle => {
            let color = if index % 2 == 0 { PARCHMENT } else { PARCHMENT_SHADE };
            fill_rect(canvas, 0, y0, width, y1, rgba(color));
        }
    }
}

/// Procedural separator: a thin centered rule.
pub(crate) fn paint_rule(canvas: &mut RgbaImage, x0: u32, x1: u32, y0: u32, y1: u32, thickness: u32) {
    let mid = (y0 + y1) / 2;
    let top = mid.saturating_sub(thickness / 2);
    fill_rect(canvas, x0, top, x1, top + thickness.max(1), rgba(RULE));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_assets_dir_means_procedural_art() {
        let art = CardArt::load(None);
        assert!(art.segment(SegmentKind::Top).is_none());
        assert!(art.linebreak().is_none());
    }

    #[test]
    fn artwork_is_loaded_from_assets_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        RgbaImage::from_pixel(4, 2, Rgba([1, 2, 3, 255]))
            .save(dir.path().join("middle.png"))
            .expect("write png");
        std::fs::write(dir.path().join("top.png"), b"not a png").expect("write");

        let art = CardArt::load(Some(dir.path()));
        assert!(art.segment(SegmentKind::Top).is_none());
        let middle = art.segment(SegmentKind::Middle).expect("middle art");
        assert_eq!(middle.dimensions(), (4, 2));
    }

    #[test]
    fn procedural_segments_cover_their_band() {
        let mut canvas = RgbaImage::new(10, 30);
        paint_segment(&mut canvas, SegmentKind::Top, 0, 0, 12);
        paint_segment(&mut canvas, SegmentKind::Middle, 0, 12, 20);
        paint_segment(&mut canvas, SegmentKind::Bottom, 0, 20, 30);

        assert_eq!(*canvas.get_pixel(5, 0), rgba(ROLL));
        assert_eq!(*canvas.get_pixel(5, 11), rgba(ROLL_EDGE));
        assert_eq!(*canvas.get_pixel(5, 15), rgba(PARCHMENT));
        assert_eq!(*canvas.get_pixel(5, 20), rgba(ROLL_EDGE));
        assert_eq!(*canvas.get_pixel(5, 29), rgba(ROLL));
    }
}
