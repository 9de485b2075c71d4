use crate::core::TextStyle;

pub const DEFAULT_LINE_HEIGHT: f32 = 1.2;

/// Text metrics of a rendering backend, in card pixels.
pub trait TextMeasure {
    fn advance(&self, text: &str, style: &TextStyle) -> f32;

    fn line_height(&self, style: &TextStyle) -> f32 {
        style.size * DEFAULT_LINE_HEIGHT
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn advance(&self, text: &str, style: &TextStyle) -> f32 {
        (**self).advance(text, style)
    }

    fn line_height(&self, style: &TextStyle) -> f32 {
        (**self).line_height(style)
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for Box<T> {
    fn advance(&self, text: &str, style: &TextStyle) -> f32 {
        (**self).advance(text, style)
    }

    fn line_height(&self, style: &TextStyle) -> f32 {
        (**self).line_height(style)
    }
}

/// Every character advances by a fixed fraction of the font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    pub em_ratio: f32,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { em_ratio: 0.5 }
    }
}

impl TextMeasure for FixedAdvance {
    fn advance(&self, text: &str, style: &TextStyle) -> f32 {
        let chars = text.chars().count() as f32;
        chars * (style.size * self.em_ratio + style.letter_spacing)
    }
}

/// Terminal cells: one character per column, one line per row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellMeasure {
    pub col_px: f32,
    pub row_px: f32,
}

impl CellMeasure {
    /// Scale so that `card_width` pixels span `columns` cells.
    pub fn for_columns(card_width: f32, columns: u16, cell_aspect: f32) -> Self {
        let col_px = card_width / f32::from(columns.max(1));
        Self {
            col_px,
            row_px: col_px * cell_aspect,
        }
    }

    pub fn col(&self, px: f32) -> u16 {
        (px / self.col_px).round().max(0.0) as u16
    }

    pub fn row(&self, px: f32) -> u16 {
        (px / self.row_px).round().max(0.0) as u16
    }

    pub fn rows(&self, px: f32) -> u16 {
        (px / self.row_px).ceil().max(0.0) as u16
    }
}

impl TextMeasure for CellMeasure {
    fn advance(&self, text: &str, _style: &TextStyle) -> f32 {
        text.chars().count() as f32 * self.col_px
    }

    fn line_height(&self, _style: &TextStyle) -> f32 {
        self.row_px
    }
}
