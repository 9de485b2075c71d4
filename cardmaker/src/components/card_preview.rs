use cardlayout::prelude::{
    fit_card, CardRenderResult, CardRenderer, CellMeasure, FitConfig, CELL_ASPECT,
};
use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;

use super::Component;
use crate::action::Action;
use crate::card::compose_card;
use crate::dictionary::Dictionary;
use crate::monster::MonsterRecord;

/// Widest the preview card gets, in columns.
pub const MAX_CARD_COLUMNS: u16 = 56;
const SCROLL_STEP: i16 = 5;

pub struct CardPreviewProps<'a> {
    pub record: &'a MonsterRecord,
    pub dict: &'a Dictionary,
    pub scroll: u16,
    pub is_focused: bool,
}

/// Live terminal rendition of the card, refitted on every render.
#[derive(Default)]
pub struct CardPreview {
    renderer: CardRenderer,
    fit: FitConfig,
    last: CardRenderResult,
    visible_rows: u16,
}

impl CardPreview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placement from the most recent render.
    pub fn last_render(&self) -> CardRenderResult {
        self.last
    }

    /// Scroll change that keeps the card within the last drawn viewport.
    /// Nothing moves until the card has been drawn once.
    fn scroll_by(&self, scroll: u16, delta: i16) -> Option<Action> {
        let max = self.last.max_scroll(self.visible_rows);
        let target = scroll.min(max).saturating_add_signed(delta).min(max);
        let change = i16::try_from(i32::from(target) - i32::from(scroll)).ok()?;
        (change != 0).then_some(Action::UiPreviewScroll(change))
    }
}

impl Component<Action> for CardPreview {
    type Props<'a> = CardPreviewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::PageDown => self.scroll_by(props.scroll, SCROLL_STEP),
                KeyCode::PageUp => self.scroll_by(props.scroll, -SCROLL_STEP),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", props.dict.preview));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.visible_rows = inner.height;
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let content = compose_card(props.record, props.dict);
        let cells = CellMeasure::for_columns(
            self.fit.art.width,
            inner.width.min(MAX_CARD_COLUMNS),
            CELL_ASPECT,
        );
        match fit_card(&content, &cells, &self.fit) {
            Ok(card) => {
                self.last = self
                    .renderer
                    .render_card(frame, inner, &card, &cells, props.scroll);
            }
            Err(err) => {
                tracing::warn!(error = %err, "card preview layout failed");
                frame.render_widget(
                    Paragraph::new(err.to_string()).style(Style::default().fg(Color::Red)),
                    inner,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Language;
    use crate::monster::MonsterPatch;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn props(record: &MonsterRecord, scroll: u16) -> CardPreviewProps<'_> {
        CardPreviewProps {
            record,
            dict: Language::En.dictionary(),
            scroll,
            is_focused: true,
        }
    }

    fn page(preview: &mut CardPreview, record: &MonsterRecord, code: KeyCode, scroll: u16) -> Vec<Action> {
        let event = EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE));
        preview
            .handle_event(&event, props(record, scroll))
            .into_iter()
            .collect()
    }

    #[test]
    fn page_keys_scroll_the_preview() {
        let mut preview = CardPreview::new();
        let record = MonsterRecord::default();
        assert!(page(&mut preview, &record, KeyCode::PageDown, 0).is_empty());

        let mut render = RenderHarness::new(50, 12);
        render.render_to_string_plain(|frame| {
            let area = frame.area();
            preview.render(frame, area, props(&record, 0));
        });
        let max = preview.last_render().max_scroll(10);
        assert!(max > SCROLL_STEP as u16);

        assert_eq!(
            page(&mut preview, &record, KeyCode::PageDown, 0),
            vec![Action::UiPreviewScroll(SCROLL_STEP)]
        );
        assert!(page(&mut preview, &record, KeyCode::PageUp, 0).is_empty());
    }

    #[test]
    fn scrolling_stops_at_the_card_bottom() {
        let mut preview = CardPreview::new();
        let record = MonsterRecord::default();
        let mut render = RenderHarness::new(50, 12);
        render.render_to_string_plain(|frame| {
            let area = frame.area();
            preview.render(frame, area, props(&record, 0));
        });
        let max = preview.last_render().max_scroll(10);

        assert!(page(&mut preview, &record, KeyCode::PageDown, max).is_empty());
        let near = max - 1;
        assert_eq!(
            page(&mut preview, &record, KeyCode::PageDown, near),
            vec![Action::UiPreviewScroll(1)]
        );
        // Stale scroll left over from a taller card snaps back into range.
        let stale = max + 40;
        assert_eq!(
            page(&mut preview, &record, KeyCode::PageUp, stale),
            vec![Action::UiPreviewScroll(-(40 + SCROLL_STEP))]
        );
    }

    #[test]
    fn renders_title_inside_the_card() {
        let mut preview = CardPreview::new();
        let mut record = MonsterRecord::default();
        record.apply(MonsterPatch::name("Xaracol"));

        let mut render = RenderHarness::new(50, 40);
        let output = render.render_to_string_plain(|frame| {
            let area = frame.area();
            preview.render(
                frame,
                area,
                CardPreviewProps {
                    record: &record,
                    dict: Language::En.dictionary(),
                    scroll: 0,
                    is_focused: false,
                },
            );
        });

        assert!(output.contains("Preview"));
        assert!(output.contains("Xaracol"));
        assert!(output.contains("HP: 10"));
        assert!(preview.last_render().rows > 0);
    }
}
