use crate::core::{Align, TextStyle};

#[derive(Clone, Debug, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: TextStyle,
}

impl Span {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// A wrapped paragraph made of styled spans.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub spans: Vec<Span>,
    pub align: Align,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl TextBlock {
    pub fn new(spans: Vec<Span>) -> Self {
        Self {
            spans,
            align: Align::Left,
            margin_top: 0.0,
            margin_bottom: 0.0,
        }
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub fn margins(mut self, top: f32, bottom: f32) -> Self {
        self.margin_top = top;
        self.margin_bottom = bottom;
        self
    }
}

/// One column of an evenly split row; each span sits on its own centered line.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub lines: Vec<Span>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Text(TextBlock),
    Separator {
        height: f32,
        margin_top: f32,
        margin_bottom: f32,
    },
    Columns {
        columns: Vec<Column>,
        margin_top: f32,
        margin_bottom: f32,
    },
}

impl Block {
    pub fn separator(height: f32, margin_top: f32, margin_bottom: f32) -> Self {
        Block::Separator {
            height,
            margin_top,
            margin_bottom,
        }
    }
}

/// Content layer of a card, in visual order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardContent {
    pub blocks: Vec<Block>,
}

impl CardContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    pub fn text(&mut self, block: TextBlock) -> &mut Self {
        self.push(Block::Text(block))
    }

    pub fn separator_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Separator { .. }))
            .count()
    }
}
