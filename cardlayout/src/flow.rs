//! First layout pass: flows content blocks down a fixed-width column and
//! reports the height they occupy.

use crate::block::{Block, CardContent, Column, Span, TextBlock};
use crate::core::{Align, TextStyle};
use crate::measure::TextMeasure;

const WRAP_EPSILON: f32 = 0.01;

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedRun {
    pub x: f32,
    pub width: f32,
    pub text: String,
    pub style: TextStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLine {
    pub y: f32,
    pub height: f32,
    pub runs: Vec<PlacedRun>,
}

impl PlacedLine {
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Placed {
    Line(PlacedLine),
    Separator { y: f32, height: f32, width: f32 },
}

/// Positions are relative to the top-left corner of the content column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentLayout {
    pub width: f32,
    pub height: f32,
    pub items: Vec<Placed>,
}

impl ContentLayout {
    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.items.iter().filter_map(|item| match item {
            Placed::Line(line) => Some(line),
            Placed::Separator { .. } => None,
        })
    }

    pub fn line_texts(&self) -> Vec<String> {
        self.lines().map(PlacedLine::text).collect()
    }

    pub fn separator_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, Placed::Separator { .. }))
            .count()
    }
}

pub fn layout_content<M: TextMeasure + ?Sized>(
    content: &CardContent,
    width: f32,
    measure: &M,
) -> ContentLayout {
    let mut cursor = 0.0;
    let mut items = Vec::new();

    for block in &content.blocks {
        match block {
            Block::Text(text) => {
                cursor += text.margin_top;
                for mut line in wrap_block(text, width, measure) {
                    line.y = cursor;
                    cursor += line.height;
                    items.push(Placed::Line(line));
                }
                cursor += text.margin_bottom;
            }
            Block::Separator {
                height,
                margin_top,
                margin_bottom,
            } => {
                cursor += margin_top;
                items.push(Placed::Separator {
                    y: cursor,
                    height: *height,
                    width,
                });
                cursor += height + margin_bottom;
            }
            Block::Columns {
                columns,
                margin_top,
                margin_bottom,
            } => {
                cursor += margin_top;
                for mut line in layout_columns(columns, width, measure) {
                    line.y = cursor;
                    cursor += line.height;
                    items.push(Placed::Line(line));
                }
                cursor += margin_bottom;
            }
        }
    }

    ContentLayout {
        width,
        height: cursor,
        items,
    }
}

#[derive(Clone, Copy)]
struct Piece<'a> {
    text: &'a str,
    style: TextStyle,
    width: f32,
}

enum Token<'a> {
    Word(Piece<'a>),
    Space(Piece<'a>),
}

fn tokenize<'a, M: TextMeasure + ?Sized>(spans: &'a [Span], measure: &M) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    for span in spans {
        for (i, word) in span.text.split(' ').enumerate() {
            if i > 0 {
                tokens.push(Token::Space(Piece {
                    text: " ",
                    style: span.style,
                    width: measure.advance(" ", &span.style),
                }));
            }
            if !word.is_empty() {
                tokens.push(Token::Word(Piece {
                    text: word,
                    style: span.style,
                    width: measure.advance(word, &span.style),
                }));
            }
        }
    }
    tokens
}

/// Greedy word wrap. A single word wider than the column keeps its own line.
fn wrap_block<M: TextMeasure + ?Sized>(
    block: &TextBlock,
    width: f32,
    measure: &M,
) -> Vec<PlacedLine> {
    let mut lines: Vec<Vec<Piece<'_>>> = Vec::new();
    let mut current: Vec<Piece<'_>> = Vec::new();
    let mut current_width = 0.0;
    let mut pending_space: Option<Piece<'_>> = None;

    for token in tokenize(&block.spans, measure) {
        match token {
            Token::Space(space) => {
                if !current.is_empty() {
                    pending_space = Some(space);
                }
            }
            Token::Word(word) => {
                let space_width = pending_space.map(|s| s.width).unwrap_or(0.0);
                if !current.is_empty()
                    && current_width + space_width + word.width > width + WRAP_EPSILON
                {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                    pending_space = None;
                }
                if let Some(space) = pending_space.take() {
                    current_width += space.width;
                    current.push(space);
                }
                current_width += word.width;
                current.push(word);
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
        .into_iter()
        .map(|pieces| place_pieces(&pieces, width, block.align, measure))
        .collect()
}

fn place_pieces<M: TextMeasure + ?Sized>(
    pieces: &[Piece<'_>],
    width: f32,
    align: Align,
    measure: &M,
) -> PlacedLine {
    let line_width: f32 = pieces.iter().map(|p| p.width).sum();
    let mut x = match align {
        Align::Left => 0.0,
        Align::Center => ((width - line_width) / 2.0).max(0.0),
    };
    let mut height: f32 = 0.0;
    let mut runs: Vec<PlacedRun> = Vec::new();

    for piece in pieces {
        height = height.max(measure.line_height(&piece.style));
        match runs.last_mut() {
            Some(run) if run.style == piece.style => {
                run.text.push_str(piece.text);
                run.width += piece.width;
            }
            _ => runs.push(PlacedRun {
                x,
                width: piece.width,
                text: piece.text.to_string(),
                style: piece.style,
            }),
        }
        x += piece.width;
    }

    PlacedLine {
        y: 0.0,
        height,
        runs,
    }
}

fn layout_columns<M: TextMeasure + ?Sized>(
    columns: &[Column],
    width: f32,
    measure: &M,
) -> Vec<PlacedLine> {
    if columns.is_empty() {
        return Vec::new();
    }
    let column_width = width / columns.len() as f32;
    let rows = columns.iter().map(|c| c.lines.len()).max().unwrap_or(0);

    (0..rows)
        .map(|row| {
            let mut height: f32 = 0.0;
            let mut runs = Vec::new();
            for (index, column) in columns.iter().enumerate() {
                let Some(span) = column.lines.get(row) else {
                    continue;
                };
                let run_width = measure.advance(&span.text, &span.style);
                let left = index as f32 * column_width;
                height = height.max(measure.line_height(&span.style));
                runs.push(PlacedRun {
                    x: left + ((column_width - run_width) / 2.0).max(0.0),
                    width: run_width,
                    text: span.text.clone(),
                    style: span.style,
                });
            }
            PlacedLine {
                y: 0.0,
                height,
                runs,
            }
        })
        .collect()
}
