use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    prelude::{Frame, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{CardPreview, CardPreviewProps, Component, MonsterForm, MonsterFormProps};
use crate::action::Action;
use crate::state::AppState;

/// Props for CardMaker - read-only view of state
pub struct CardMakerProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Form on the left, live card on the right, shortcuts below.
#[derive(Default)]
pub struct CardMaker {
    form: MonsterForm,
    preview: CardPreview,
}

impl CardMaker {
    pub fn new() -> Self {
        Self::default()
    }

    fn form_props<'a>(state: &'a AppState, is_focused: bool) -> MonsterFormProps<'a> {
        MonsterFormProps {
            record: &state.monster,
            dict: state.dict(),
            focus: state.focus,
            is_focused,
        }
    }

    fn preview_props<'a>(state: &'a AppState, is_focused: bool) -> CardPreviewProps<'a> {
        CardPreviewProps {
            record: &state.monster,
            dict: state.dict(),
            scroll: state.preview_scroll,
            is_focused,
        }
    }
}

impl Component<Action> for CardMaker {
    type Props<'a> = CardMakerProps<'a>;

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

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            let global = match key.code {
                KeyCode::Char('e') => Some(Action::ExportPng),
                KeyCode::Char('y') => Some(Action::CopyPng),
                KeyCode::Char('r') => Some(Action::RecordReset),
                KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            };
            if let Some(action) = global {
                return vec![action];
            }
        }
        match key.code {
            KeyCode::Esc => return vec![Action::Quit],
            KeyCode::F(2) => return vec![Action::UiCycleLanguage],
            _ => {}
        }

        let state = props.state;
        let actions: Vec<_> = self
            .preview
            .handle_event(event, Self::preview_props(state, true))
            .into_iter()
            .collect();
        if !actions.is_empty() {
            return actions;
        }
        self.form
            .handle_event(event, Self::form_props(state, true))
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: CardMakerProps<'_>) {
        let state = props.state;
        let dict = state.dict();
        let chunks = Layout::vertical([
            Constraint::Length(1), // Title bar
            Constraint::Min(1),    // Form + preview
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let mut title = vec![
            Span::styled(
                format!(" {} ", dict.title),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}: {} ", dict.language, state.language.label()),
                Style::default().fg(Color::Gray),
            ),
        ];
        if state.rendering {
            title.push(Span::styled(
                format!(" {}", dict.working),
                Style::default().fg(Color::Cyan),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(title)), chunks[0]);

        let body = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);
        self.form
            .render(frame, body[0], Self::form_props(state, props.is_focused));
        self.preview
            .render(frame, body[1], Self::preview_props(state, false));

        let (status, color) = match &state.status {
            Some(note) if note.message.is_error() => (note.message.text(dict), Color::Red),
            Some(note) => (note.message.text(dict), Color::Green),
            None => (String::new(), Color::Reset),
        };
        let status_items = [StatusBarItem::span(Span::styled(
            status.as_str(),
            Style::default().fg(color),
        ))];

        let hints = [
            StatusBarHint::new("^e", dict.export_png),
            StatusBarHint::new("^y", dict.copy_png),
            StatusBarHint::new("^r", dict.reset),
            StatusBarHint::new("^d", dict.remove),
            StatusBarHint::new("F2", dict.language),
            StatusBarHint::new("PgUp/PgDn", dict.scroll),
            StatusBarHint::new("Esc", dict.quit),
        ];

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&hints).with_separator("  "),
                right: StatusBarSection::items(&status_items).with_separator("  "),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
