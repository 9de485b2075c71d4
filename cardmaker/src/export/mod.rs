//! PNG export and clipboard copy of the laid-out card.

mod art;
mod fonts;
mod raster;

use std::borrow::Cow;
use std::io;
use std::path::PathBuf;

use cardlayout::prelude::{fit_card, CardLayout, FitConfig, FitError, Rgb};
use image::{ImageFormat, RgbaImage};

pub use art::CardArt;
pub use fonts::{FontSet, GlyphMeasure};
pub use raster::rasterize;

use crate::card::compose_card;
use crate::dictionary::Language;
use crate::monster::MonsterRecord;

pub const DEFAULT_PIXEL_RATIO: f32 = 3.0;
/// Painted under the artwork so transparent pixels export opaque.
pub const EXPORT_BACKGROUND: Rgb = Rgb::hex(0xf4f1e8);
const FALLBACK_FILE_STEM: &str = "monster";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no usable font (searched {0})")]
    FontUnavailable(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error("card has nothing to paint")]
    EmptyCanvas,

    #[error("layout error: {0}")]
    Layout(#[from] FitError),
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub assets_dir: Option<PathBuf>,
    pub pixel_ratio: f32,
    pub background: Rgb,
    pub fit: FitConfig,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            assets_dir: None,
            pixel_ratio: DEFAULT_PIXEL_RATIO,
            background: EXPORT_BACKGROUND,
            fit: FitConfig::default(),
        }
    }
}

/// A card laid out with real font metrics, ready to rasterize.
#[derive(Debug, Clone)]
pub struct RenderedCard {
    pub layout: CardLayout,
    pub name: String,
    fonts: FontSet,
    art: CardArt,
}

impl RenderedCard {
    pub fn rasterize(&self, options: &ExportOptions) -> Result<RgbaImage, ExportError> {
        rasterize(
            &self.layout,
            &self.fonts,
            &self.art,
            options.pixel_ratio,
            options.background,
        )
    }
}

pub fn prepare_card(
    record: &MonsterRecord,
    language: Language,
    options: &ExportOptions,
) -> Result<RenderedCard, ExportError> {
    let fonts = FontSet::discover(options.assets_dir.as_deref())?;
    let art = CardArt::load(options.assets_dir.as_deref());
    let content = compose_card(record, language.dictionary());
    let layout = fit_card(&content, &GlyphMeasure { fonts: &fonts }, &options.fit)?;
    Ok(RenderedCard {
        layout,
        name: record.name.clone(),
        fonts,
        art,
    })
}

/// `<name>-card.png`, with path separators and reserved characters replaced.
pub fn file_name(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            ch if ch.is_control() => '_',
            ch => ch,
        })
        .collect();
    let stem = stem.trim_matches('.');
    if stem.is_empty() {
        format!("{FALLBACK_FILE_STEM}-card.png")
    } else {
        format!("{stem}-card.png")
    }
}

/// Writes the card as a PNG into `options.out_dir`. `None` means nothing is
/// mounted and returns `Ok(None)`.
pub fn export_as_image(
    card: Option<&RenderedCard>,
    options: &ExportOptions,
) -> Result<Option<PathBuf>, ExportError> {
    let Some(card) = card else {
        return Ok(None);
    };
    let canvas = card.rasterize(options)?;

    std::fs::create_dir_all(&options.out_dir).map_err(|source| ExportError::Io {
        path: options.out_dir.clone(),
        source,
    })?;
    let path = options.out_dir.join(file_name(&card.name));
    canvas.save_with_format(&path, ImageFormat::Png)?;
    Ok(Some(path))
}

/// Puts the card on the clipboard. Without a clipboard the call logs and
/// returns `Ok(None)`.
pub fn copy_as_image(
    card: Option<&RenderedCard>,
    options: &ExportOptions,
) -> Result<Option<()>, ExportError> {
    let Some(card) = card else {
        return Ok(None);
    };
    let canvas = card.rasterize(options)?;

    let mut clipboard = match arboard::Clipboard::new() {
        Ok(clipboard) => clipboard,
        Err(err) => {
            tracing::warn!(error = %err, "clipboard not available");
            return Ok(None);
        }
    };
    let (width, height) = canvas.dimensions();
    clipboard
        .set_image(arboard::ImageData {
            width: width as usize,
            height: height as usize,
            bytes: Cow::Owned(canvas.into_raw()),
        })
        .map_err(|err| ExportError::Clipboard(err.to_string()))?;
    Ok(Some(()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_falls_back_to_monster() {
        assert_eq!(file_name(""), "monster-card.png");
        assert_eq!(file_name("   "), "monster-card.png");
        assert_eq!(file_name("Xaracol"), "Xaracol-card.png");
        assert_eq!(file_name("Ogre Mage"), "Ogre Mage-card.png");
    }

    #[test]
    fn file_name_strips_path_characters() {
        assert_eq!(file_name("../etc/passwd"), "_etc_passwd-card.png");
        assert_eq!(file_name("a:b?"), "a_b_-card.png");
    }

    #[test]
    fn nothing_mounted_is_a_no_op() {
        let dir = tempfile::tempdir().expect("tempdir");
        let options = ExportOptions {
            out_dir: dir.path().join("out"),
            ..Default::default()
        };
        assert!(export_as_image(None, &options).expect("export").is_none());
        assert!(copy_as_image(None, &options).expect("copy").is_none());
        assert!(!options.out_dir.exists());
    }

    #[test]
    fn export_writes_scaled_png_when_fonts_exist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let options = ExportOptions {
            out_dir: dir.path().to_path_buf(),
            pixel_ratio: 1.0,
            ..Default::default()
        };
        let record = MonsterRecord {
            name: "Xaracol".into(),
            ..Default::default()
        };
        // Font discovery depends on the host.
        let Ok(card) = prepare_card(&record, Language::En, &options) else {
            return;
        };

        let path = export_as_image(Some(&card), &options)
            .expect("export")
            .expect("path");
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("Xaracol-card.png"));
        let written = image::open(&path).expect("read back");
        assert_eq!(written.width(), 380);
        assert_eq!(written.height(), card.layout.total_height().ceil() as u32);
    }
}
