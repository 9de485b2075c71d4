use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    Frame,
};

use crate::background::{Segment, SegmentKind};
use crate::core::{Rgb, TextStyle};
use crate::fit::CardLayout;
use crate::flow::{Placed, PlacedLine};
use crate::measure::CellMeasure;

pub const CELL_ASPECT: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreviewTheme {
    pub parchment: Color,
    pub edge: Color,
    pub rule: Color,
    pub roll: char,
    pub rule_char: char,
}

impl Default for PreviewTheme {
    fn default() -> Self {
        Self {
            parchment: Color::Rgb(236, 224, 194),
            edge: Color::Rgb(196, 170, 122),
            rule: Color::Rgb(150, 60, 30),
            roll: '═',
            rule_char: '─',
        }
    }
}

/// Where the card landed in the terminal, in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CardRenderResult {
    pub origin_x: u16,
    pub origin_y: u16,
    pub cols: u16,
    /// Rows the whole card needs; more than the area when it is clipped.
    pub rows: u16,
    pub scroll: u16,
}

impl CardRenderResult {
    pub fn max_scroll(&self, visible_rows: u16) -> u16 {
        self.rows.saturating_sub(visible_rows)
    }
}

#[derive(Clone, Debug, Default)]
pub struct CardRenderer {
    theme: PreviewTheme,
}

impl CardRenderer {
    pub fn new(theme: PreviewTheme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &PreviewTheme {
        &self.theme
    }

    /// Draws a card laid out with `cells`. Rows above `scroll` are skipped.
    pub fn render_card(
        &self,
        frame: &mut Frame,
        area: Rect,
        card: &CardLayout,
        cells: &CellMeasure,
        scroll: u16,
    ) -> CardRenderResult {
        self.render_to_buffer(frame.buffer_mut(), area, card, cells, scroll)
    }

    pub fn render_to_buffer(
        &self,
        buf: &mut Buffer,
        area: Rect,
        card: &CardLayout,
        cells: &CellMeasure,
        scroll: u16,
    ) -> CardRenderResult {
        let cols = cells.col(card.width).min(area.width);
        let rows = cells.rows(card.total_height());
        let scroll = scroll.min(rows.saturating_sub(area.height));
        let result = CardRenderResult {
            origin_x: area.x + (area.width.saturating_sub(cols)) / 2,
            origin_y: area.y,
            cols,
            rows,
            scroll,
        };

        if area.width == 0 || area.height == 0 || cols == 0 {
            return result;
        }

        let view = Viewport { area, result };
        for segment in card.background.segments() {
            self.paint_segment(buf, &view, cells, &segment);
        }

        let (left, top) = card.origin;
        for item in &card.content.items {
            match item {
                Placed::Line(line) => self.paint_line(buf, &view, cells, left, top, line),
                Placed::Separator { y, height, width } => {
                    let row = cells.row(top + y + height / 2.0);
                    let start = cells.col(left);
                    let end = cells.col(left + width);
                    let style = Style::default().fg(self.theme.rule);
                    for col in start..end {
                        if let Some(cell) = view.cell(buf, col, row) {
                            cell.set_char(self.theme.rule_char).set_style(style);
                        }
                    }
                }
            }
        }

        result
    }

    fn paint_segment(
        &self,
        buf: &mut Buffer,
        view: &Viewport,
        cells: &CellMeasure,
        segment: &Segment,
    ) {
        let start = cells.row(segment.y);
        let end = cells.row(segment.y + segment.height).max(start + 1);
        let bg = match segment.kind {
            SegmentKind::Top | SegmentKind::Bottom => self.theme.edge,
            SegmentKind::Middle if segment.index % 2 == 1 => adjust_color(self.theme.parchment, -6),
            SegmentKind::Middle => self.theme.parchment,
        };
        let roll_row = match segment.kind {
            SegmentKind::Top => Some(start),
            SegmentKind::Bottom => Some(end - 1),
            SegmentKind::Middle => None,
        };
        let roll_fg = adjust_color(self.theme.edge, -60);

        for row in start..end {
            for col in 0..view.result.cols {
                let Some(cell) = view.cell(buf, col, row) else {
                    continue;
                };
                cell.reset();
                if Some(row) == roll_row {
                    cell.set_char(self.theme.roll).set_fg(roll_fg).set_bg(bg);
                } else {
                    cell.set_char(' ').set_bg(bg);
                }
            }
        }
    }

    fn paint_line(
        &self,
        buf: &mut Buffer,
        view: &Viewport,
        cells: &CellMeasure,
        left: f32,
        top: f32,
        line: &PlacedLine,
    ) {
        let row = cells.row(top + line.y);
        for run in &line.runs {
            let style = text_style(&run.style);
            let mut col = cells.col(left + run.x);
            for ch in run.text.chars() {
                if col >= view.result.cols {
                    break;
                }
                if let Some(cell) = view.cell(buf, col, row) {
                    cell.set_char(ch).set_style(style);
                }
                col += 1;
            }
        }
    }
}

struct Viewport {
    area: Rect,
    result: CardRenderResult,
}

impl Viewport {
    fn cell<'b>(
        &self,
        buf: &'b mut Buffer,
        col: u16,
        row: u16,
    ) -> Option<&'b mut ratatui::buffer::Cell> {
        if row < self.result.scroll || col >= self.result.cols {
            return None;
        }
        let y = self.area.y + (row - self.result.scroll);
        let x = self.result.origin_x + col;
        if y >= self.area.bottom() || x >= self.area.right() {
            return None;
        }
        buf.cell_mut((x, y))
    }
}

pub fn to_color(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

pub fn text_style(style: &TextStyle) -> Style {
    let mut out = Style::default().fg(to_color(style.color));
    if style.is_bold() {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        out = out.add_modifier(Modifier::ITALIC);
    }
    out
}

pub fn adjust_color(color: Color, delta: i16) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let clamp = |v: i16| v.clamp(0, 255) as u8;
            Color::Rgb(
                clamp(r as i16 + delta),
                clamp(g as i16 + delta),
                clamp(b as i16 + delta),
            )
        }
        other => other,
    }
}
