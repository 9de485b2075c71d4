pub use crate::background::{BackgroundStack, Segment, SegmentKind};
pub use crate::block::{Block, CardContent, Column, Span, TextBlock};
pub use crate::core::{Align, FitError, Rgb, TextStyle, Weight};
pub use crate::fit::{fit_card, middle_segments, required_height, CardLayout, FitConfig, ScrollArt};
pub use crate::flow::{layout_content, ContentLayout, Placed, PlacedLine, PlacedRun};
pub use crate::measure::{CellMeasure, FixedAdvance, TextMeasure};

#[cfg(feature = "ratatui")]
pub use crate::render::{
    adjust_color, text_style, to_color, CardRenderResult, CardRenderer, PreviewTheme, CELL_ASPECT,
};
