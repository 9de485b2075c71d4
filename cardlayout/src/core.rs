use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    pub const fn hex(value: u32) -> Self {
        Rgb(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Weight {
    #[default]
    Regular,
    Bold,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// Font request for a run of text. Sizes are in card pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: Weight,
    pub italic: bool,
    pub color: Rgb,
    pub letter_spacing: f32,
}

impl TextStyle {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            weight: Weight::Regular,
            italic: false,
            color: Rgb::BLACK,
            letter_spacing: 0.0,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = Weight::Bold;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn letter_spacing(mut self, spacing: f32) -> Self {
        self.letter_spacing = spacing;
        self
    }

    pub fn is_bold(&self) -> bool {
        self.weight == Weight::Bold
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FitError {
    InvalidArt { field: &'static str, value: f32 },
    InvalidContentRatio(f32),
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitError::InvalidArt { field, value } => {
                write!(f, "invalid artwork size: {} = {}", field, value)
            }
            FitError::InvalidContentRatio(ratio) => {
                write!(f, "content width ratio must be in (0, 1], got {}", ratio)
            }
        }
    }
}

impl std::error::Error for FitError {}
