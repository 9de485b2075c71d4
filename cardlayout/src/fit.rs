//! Height fitting: picks how many middle segments the background needs so the
//! content column fits between the top and bottom art.

use crate::background::BackgroundStack;
use crate::block::CardContent;
use crate::core::FitError;
use crate::flow::{layout_content, ContentLayout};
use crate::measure::TextMeasure;

/// Pixel sizes of the scroll artwork at 1x.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollArt {
    pub width: f32,
    pub top: f32,
    pub middle: f32,
    pub bottom: f32,
}

impl Default for ScrollArt {
    fn default() -> Self {
        Self {
            width: 380.0,
            top: 194.92,
            middle: 37.55,
            bottom: 103.77,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitConfig {
    pub art: ScrollArt,
    pub padding_top: f32,
    pub padding_bottom: f32,
    /// Share of the card width given to the content column.
    pub content_ratio: f32,
    pub min_height: f32,
}

impl Default for FitConfig {
    fn default() -> Self {
        let art = ScrollArt::default();
        Self {
            art,
            padding_top: 35.0,
            padding_bottom: 20.0,
            content_ratio: 0.69,
            min_height: art.top + art.middle + art.bottom,
        }
    }
}

impl FitConfig {
    pub fn content_width(&self) -> f32 {
        self.art.width * self.content_ratio
    }

    pub fn content_x(&self) -> f32 {
        (self.art.width - self.content_width()) / 2.0
    }

    pub fn validate(&self) -> Result<(), FitError> {
        let fields = [
            ("width", self.art.width),
            ("top", self.art.top),
            ("middle", self.art.middle),
            ("bottom", self.art.bottom),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(FitError::InvalidArt { field, value });
            }
        }
        for (field, value) in [
            ("padding_top", self.padding_top),
            ("padding_bottom", self.padding_bottom),
            ("min_height", self.min_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FitError::InvalidArt { field, value });
            }
        }
        if !(self.content_ratio > 0.0 && self.content_ratio <= 1.0) {
            return Err(FitError::InvalidContentRatio(self.content_ratio));
        }
        Ok(())
    }
}

pub fn required_height(measured: f32, config: &FitConfig) -> f32 {
    (measured + config.padding_top + config.padding_bottom).max(config.min_height)
}

/// Smallest middle count (at least one) whose stack reaches the required height.
pub fn middle_segments(measured: f32, config: &FitConfig) -> u32 {
    let art = &config.art;
    let required = required_height(measured, config);
    let stack = |count: u32| art.top + art.middle * count as f32 + art.bottom;

    let estimate = ((required - art.top - art.bottom) / art.middle).ceil();
    let mut count = if estimate.is_finite() && estimate > 1.0 {
        estimate as u32
    } else {
        1
    };
    // The division can land one off in either direction near a boundary.
    while stack(count) < required {
        count += 1;
    }
    while count > 1 && stack(count - 1) >= required {
        count -= 1;
    }
    count
}

/// A fitted card: background stack plus content placed inside the padding.
#[derive(Clone, Debug, PartialEq)]
pub struct CardLayout {
    pub width: f32,
    pub background: BackgroundStack,
    pub content: ContentLayout,
    /// Top-left of the content column in card pixels.
    pub origin: (f32, f32),
}

impl CardLayout {
    pub fn total_height(&self) -> f32 {
        self.background.total_height()
    }

    pub fn middle_count(&self) -> u32 {
        self.background.middle_count
    }
}

pub fn fit_card<M: TextMeasure + ?Sized>(
    content: &CardContent,
    measure: &M,
    config: &FitConfig,
) -> Result<CardLayout, FitError> {
    config.validate()?;

    let content = layout_content(content, config.content_width(), measure);
    let count = middle_segments(content.height, config);
    let art = &config.art;

    Ok(CardLayout {
        width: art.width,
        background: BackgroundStack::new(art.top, art.middle, art.bottom, count),
        origin: (config.content_x(), config.padding_top),
        content,
    })
}
