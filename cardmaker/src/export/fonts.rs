use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use cardlayout::prelude::{TextMeasure, TextStyle};

use super::ExportError;

const VARIANTS: [&str; 4] = ["regular", "bold", "italic", "bold-italic"];

/// System serif faces tried when the assets dir has no card fonts, per variant.
const SYSTEM_FONTS: [[&str; 4]; 3] = [
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSerif-Bold.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSerif-Italic.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSerif-BoldItalic.ttf",
    ],
    [
        "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSerif-Bold.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSerif-Italic.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSerif-BoldItalic.ttf",
    ],
    [
        "/System/Library/Fonts/Supplemental/Times New Roman.ttf",
        "/System/Library/Fonts/Supplemental/Times New Roman Bold.ttf",
        "/System/Library/Fonts/Supplemental/Times New Roman Italic.ttf",
        "/System/Library/Fonts/Supplemental/Times New Roman Bold Italic.ttf",
    ],
];

/// The four faces the card uses. Missing variants reuse the regular face.
#[derive(Clone)]
pub struct FontSet {
    regular: FontArc,
    bold: FontArc,
    italic: FontArc,
    bold_italic: FontArc,
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSet").finish_non_exhaustive()
    }
}

impl FontSet {
    pub fn discover(assets_dir: Option<&Path>) -> Result<Self, ExportError> {
        let mut families: Vec<[PathBuf; 4]> = Vec::new();
        if let Some(dir) = assets_dir {
            families.push(
                VARIANTS.map(|variant| dir.join("fonts").join(format!("card-{variant}.ttf"))),
            );
        }
        families.extend(SYSTEM_FONTS.iter().map(|paths| paths.map(PathBuf::from)));

        for paths in &families {
            let Some(regular) = load_font(&paths[0]) else {
                continue;
            };
            let variant =
                |index: usize| load_font(&paths[index]).unwrap_or_else(|| regular.clone());
            tracing::debug!(path = %paths[0].display(), "using card font");
            return Ok(Self {
                bold: variant(1),
                italic: variant(2),
                bold_italic: variant(3),
                regular,
            });
        }

        let searched = families
            .iter()
            .map(|paths| paths[0].display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(ExportError::FontUnavailable(searched))
    }

    pub fn pick(&self, style: &TextStyle) -> &FontArc {
        match (style.is_bold(), style.italic) {
            (false, false) => &self.regular,
            (true, false) => &self.bold,
            (false, true) => &self.italic,
            (true, true) => &self.bold_italic,
        }
    }
}

fn load_font(path: &Path) -> Option<FontArc> {
    let bytes = fs::read(path).ok()?;
    match FontArc::try_from_vec(bytes) {
        Ok(font) => Some(font),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable font");
            None
        }
    }
}

/// Scale for a CSS-style pixel size (em box, not line box).
pub fn px_scale(font: &FontArc, size: f32) -> PxScale {
    let units = font.units_per_em().unwrap_or(1000.0);
    PxScale::from(size * font.height_unscaled() / units)
}

/// Advance of `text` in pixels, letter spacing included.
pub fn text_advance(font: &FontArc, size: f32, spacing: f32, text: &str) -> f32 {
    let scaled = font.as_scaled(px_scale(font, size));
    let mut width = 0.0;
    let mut prev = None;
    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if let Some(prev) = prev {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id) + spacing;
        prev = Some(id);
    }
    width
}

/// Measures text with the real card faces, in card pixels.
#[derive(Debug, Clone, Copy)]
pub struct GlyphMeasure<'a> {
    pub fonts: &'a FontSet,
}

impl TextMeasure for GlyphMeasure<'_> {
    fn advance(&self, text: &str, style: &TextStyle) -> f32 {
        let font = self.fonts.pick(style);
        text_advance(font, style.size, style.letter_spacing, text)
    }
}
