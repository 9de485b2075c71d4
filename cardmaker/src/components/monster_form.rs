use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;
use crate::dictionary::Dictionary;
use crate::form::{FormField, FormRow, Panel, RowKind};
use crate::monster::{is_partial_stat, parse_stat, MonsterRecord};

const LABEL_WIDTH: u16 = 24;
const FOCUS_BG: Color = Color::Rgb(50, 50, 60);
const ACCENT: Color = Color::Rgb(179, 58, 26);

pub struct MonsterFormProps<'a> {
    pub record: &'a MonsterRecord,
    pub dict: &'a Dictionary,
    pub focus: FormField,
    pub is_focused: bool,
}

enum FormLine {
    Heading(&'static str),
    Row(FormRow),
}

/// All form panels in one scrolling list. Only the focused text row owns a
/// live `TextInput`; it is rebuilt whenever focus moves.
pub struct MonsterForm {
    input: TextInput,
    input_field: Option<FormField>,
    /// Number text that does not parse yet, such as a lone `-`.
    draft: Option<String>,
    scroll: u16,
}

impl Default for MonsterForm {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            input_field: None,
            draft: None,
            scroll: 0,
        }
    }
}

impl MonsterForm {
    pub fn new() -> Self {
        Self::default()
    }

    fn input_props<'a>(
        value: &'a str,
        placeholder: &'a str,
        is_focused: bool,
    ) -> <TextInput as Component<Action>>::Props<'a> {
        TextInputProps {
            value,
            placeholder,
            is_focused,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::xy(1, 0),
                    bg: Some(FOCUS_BG),
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: Action::FormTextChange,
            on_submit: |_| Action::FormActivate,
            on_cursor_move: Some(|_| Action::Render),
        }
    }

    /// Fresh input for a newly focused row, cursor at the end of its text.
    fn sync_input(&mut self, focus: FormField, value: &str) {
        if self.input_field == Some(focus) {
            return;
        }
        self.input = TextInput::new();
        self.input_field = Some(focus);
        self.draft = None;
        let end = EventKind::Key(KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        let _ = self
            .input
            .handle_event(&end, Self::input_props(value, "", true))
            .into_iter()
            .count();
    }

    /// Text the focused input shows: the pending draft, else the stored value.
    fn input_value(&self, stored: &str) -> String {
        self.draft.clone().unwrap_or_else(|| stored.to_string())
    }

    /// Holds half-typed numbers back from the record until they parse.
    fn filter_number(&mut self, focus: FormField, action: Action) -> Option<Action> {
        let FormField::Record(field) = focus else {
            return Some(action);
        };
        let Action::FormTextChange(text) = &action else {
            return Some(action);
        };
        if !field.is_numeric() {
            return Some(action);
        }
        if parse_stat(text).is_some() {
            self.draft = None;
            Some(action)
        } else if is_partial_stat(text) {
            self.draft = Some(text.clone());
            Some(Action::Render)
        } else {
            None
        }
    }

    fn lines(record: &MonsterRecord, dict: &Dictionary) -> Vec<FormLine> {
        let mut lines = Vec::new();
        for panel in Panel::ALL {
            lines.push(FormLine::Heading(panel.title(dict)));
            lines.extend(panel.rows(record, dict).into_iter().map(FormLine::Row));
        }
        lines
    }

    fn keep_visible(&mut self, focused_line: usize, height: u16) {
        let line = focused_line as u16;
        if line < self.scroll {
            // keep the panel heading in view when moving up
            self.scroll = line.saturating_sub(1);
        } else if height > 0 && line >= self.scroll + height {
            self.scroll = line + 1 - height;
        }
    }
}

impl Component<Action> for MonsterForm {
    type Props<'a> = MonsterFormProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Tab | KeyCode::Down => return vec![Action::FormFocusNext],
            KeyCode::BackTab | KeyCode::Up => return vec![Action::FormFocusPrev],
            KeyCode::Enter => return vec![Action::FormActivate],
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return match props.focus.entry() {
                    Some(_) => vec![Action::FormRemoveFocused],
                    None => Vec::new(),
                };
            }
            KeyCode::Char(' ') if !props.focus.is_text() => return vec![Action::FormActivate],
            _ => {}
        }

        if !props.focus.is_text() || key.modifiers.contains(KeyModifiers::CONTROL) {
            return Vec::new();
        }

        let row = FormRow::new(props.focus, props.record, props.dict);
        self.sync_input(props.focus, &row.value);
        let value = self.input_value(&row.value);
        let actions: Vec<_> = self
            .input
            .handle_event(event, Self::input_props(&value, row.placeholder, true))
            .into_iter()
            .collect();
        actions
            .into_iter()
            .filter_map(|action| self.filter_number(props.focus, action))
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let border_style = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", props.dict.form));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let lines = Self::lines(props.record, props.dict);
        let focused_line = lines
            .iter()
            .position(|line| matches!(line, FormLine::Row(row) if row.field == props.focus))
            .unwrap_or(0);
        self.keep_visible(focused_line, inner.height);

        let label_width = LABEL_WIDTH.min(inner.width / 2);
        for (offset, line) in lines
            .iter()
            .enumerate()
            .skip(self.scroll as usize)
            .take(inner.height as usize)
        {
            let y = inner.y + (offset as u16 - self.scroll);
            let row_area = Rect::new(inner.x, y, inner.width, 1);
            match line {
                FormLine::Heading(title) => {
                    let heading = Line::from(Span::styled(
                        title.to_uppercase(),
                        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                    ));
                    frame.render_widget(Paragraph::new(heading), row_area);
                }
                FormLine::Row(row) => {
                    let focused = row.field == props.focus;
                    render_row(frame, row_area, label_width, row, focused);
                    if focused && row.field.is_text() {
                        self.sync_input(row.field, &row.value);
                        let value = self.input_value(&row.value);
                        let value_area = Rect::new(
                            row_area.x + label_width,
                            y,
                            row_area.width.saturating_sub(label_width),
                            1,
                        );
                        self.input.render(
                            frame,
                            value_area,
                            Self::input_props(&value, row.placeholder, props.is_focused),
                        );
                    }
                }
            }
        }
    }
}

fn render_row(frame: &mut Frame, area: Rect, label_width: u16, row: &FormRow, focused: bool) {
    let marker = if focused { "› " } else { "  " };
    let label_style = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let label: String = format!("{marker}{}", row.label)
        .chars()
        .take(label_width as usize)
        .collect();

    let value = match &row.kind {
        RowKind::Text | RowKind::Number if row.value.is_empty() => Span::styled(
            format!(" {}", row.placeholder),
            Style::default().fg(Color::DarkGray),
        ),
        RowKind::Text | RowKind::Number => Span::raw(format!(" {}", row.value)),
        RowKind::Toggle(on) => Span::styled(
            if *on { " [x]" } else { " [ ]" },
            Style::default().fg(if *on { Color::Green } else { Color::Gray }),
        ),
        RowKind::Button => Span::raw(""),
    };

    let line = Line::from(vec![
        Span::styled(
            format!("{label:<width$}", width = label_width as usize),
            label_style,
        ),
        value,
    ]);
    let line = if focused && !row.field.is_text() {
        line.style(Style::default().bg(FOCUS_BG))
    } else {
        line
    };
    frame.render_widget(Paragraph::new(line), area);
}
