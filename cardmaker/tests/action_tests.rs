//! Action and state tests using TestHarness

use cardmaker::{
    action::Action,
    components::{CardMaker, CardMakerProps, Component},
    dictionary::Language,
    effect::Effect,
    form::FormField,
    monster::{EntryList, MonsterPatch, MonsterRecord, RecordField},
    reducer::reducer,
    state::{AppState, StatusMessage},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_dispatch::testing::*;
use tui_dispatch::{assert_emitted, assert_not_emitted, EffectStore, EventKind, NumericComponentId};

fn press(maker: &mut CardMaker, state: &AppState, code: KeyCode, modifiers: KeyModifiers) -> Vec<Action> {
    let event = EventKind::Key(KeyEvent::new(code, modifiers));
    let props = CardMakerProps {
        state,
        is_focused: true,
    };
    maker.handle_event(&event, props).into_iter().collect()
}

#[test]
fn test_reducer_record_update_saves() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::RecordUpdate(MonsterPatch::name("Xaracol")));
    assert!(result.changed);
    assert_eq!(store.state().monster.name, "Xaracol");
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(&result.effects[0], Effect::SaveRecord(record) if record.name == "Xaracol"));
}

#[test]
fn test_reducer_entry_lifecycle() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::RecordUpdate(MonsterPatch::section(EntryList::Spells, true)));
    store.dispatch(Action::RecordEntryAdd(EntryList::Spells));
    let id = store.state().monster.spells[0].id.clone();
    assert!(!id.is_empty());

    store.dispatch(Action::RecordEntryRemove {
        list: EntryList::Spells,
        id: id.clone(),
    });
    assert!(store.state().monster.spells.is_empty());

    let result = store.dispatch(Action::RecordEntryRemove {
        list: EntryList::Spells,
        id,
    });
    assert!(!result.changed);
    assert!(result.effects.is_empty());
}

#[test]
fn test_reducer_language_cycle() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert_eq!(store.state().language, Language::En);
    store.dispatch(Action::UiCycleLanguage);
    assert_eq!(store.state().language, Language::PtBr);
    store.dispatch(Action::UiCycleLanguage);
    assert_eq!(store.state().language, Language::En);

    let result = store.dispatch(Action::UiSetLanguage(Language::En));
    assert!(!result.changed);
}

#[test]
fn test_reducer_copy_outcomes() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::CopyPng);
    assert!(store.state().rendering);
    assert!(matches!(result.effects[0], Effect::CopyPng { .. }));

    store.dispatch(Action::CopyDidFinish(false));
    assert!(!store.state().rendering);
    let status = store.state().status.as_ref().map(|note| note.message.clone());
    assert_eq!(status, Some(StatusMessage::ClipboardUnavailable));
}

#[test]
fn test_typing_reaches_the_name_field() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut maker = CardMaker::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("x", |state, event| {
        let props = CardMakerProps {
            state,
            is_focused: true,
        };
        maker
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::FormTextChange("x".into()));
}

#[test]
fn test_shifted_letters_keep_their_case() {
    let mut maker = CardMaker::new();
    let state = AppState::default();

    assert_eq!(
        press(&mut maker, &state, KeyCode::Char('Q'), KeyModifiers::SHIFT),
        vec![Action::FormTextChange("Q".into())]
    );
}

#[test]
fn test_component_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut maker = CardMaker::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("a b c", |state, event| {
        let props = CardMakerProps {
            state,
            is_focused: false,
        };
        maker
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_global_shortcuts() {
    let mut maker = CardMaker::new();
    let state = AppState::default();

    assert_eq!(
        press(&mut maker, &state, KeyCode::Char('e'), KeyModifiers::CONTROL),
        vec![Action::ExportPng]
    );
    assert_eq!(
        press(&mut maker, &state, KeyCode::Char('y'), KeyModifiers::CONTROL),
        vec![Action::CopyPng]
    );
    assert_eq!(
        press(&mut maker, &state, KeyCode::Char('r'), KeyModifiers::CONTROL),
        vec![Action::RecordReset]
    );
    assert_eq!(
        press(&mut maker, &state, KeyCode::F(2), KeyModifiers::NONE),
        vec![Action::UiCycleLanguage]
    );
    assert_eq!(
        press(&mut maker, &state, KeyCode::Esc, KeyModifiers::NONE),
        vec![Action::Quit]
    );
}

#[test]
fn test_keys_fall_through_to_preview_and_form() {
    let mut maker = CardMaker::new();
    let state = AppState::default();

    // The preview only scrolls once it knows how tall the card is.
    let mut render = RenderHarness::new(100, 12);
    render.render_to_string_plain(|frame| {
        let props = CardMakerProps {
            state: &state,
            is_focused: true,
        };
        maker.render(frame, frame.area(), props);
    });

    assert_eq!(
        press(&mut maker, &state, KeyCode::PageDown, KeyModifiers::NONE),
        vec![Action::UiPreviewScroll(5)]
    );
    assert_eq!(
        press(&mut maker, &state, KeyCode::Tab, KeyModifiers::NONE),
        vec![Action::FormFocusNext]
    );
}

#[test]
fn test_action_categories() {
    let update = Action::RecordReset;
    let cycle = Action::UiCycleLanguage;
    let did_finish = Action::ExportDidFinish(None);
    let tick = Action::Tick;

    assert_eq!(update.category(), Some("record"));
    assert_eq!(cycle.category(), Some("ui"));
    assert_eq!(did_finish.category(), None);
    assert_eq!(tick.category(), None);

    assert!(update.is_record());
    assert!(cycle.is_ui());
}

#[test]
fn test_harness_emit_and_drain() {
    let mut harness = TestHarness::<(), Action>::new(());

    harness.emit(Action::ExportPng);
    harness.emit(Action::UiCycleLanguage);
    harness.emit(Action::ExportDidFail("disk full".into()));

    let actions = harness.drain_emitted();
    actions.assert_count(3);
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![
        Action::FormFocus(FormField::Record(RecordField::Hp)),
        Action::ExportDidFinish(Some("Xaracol-card.png".into())),
    ];

    assert_emitted!(actions, Action::FormFocus(FormField::Record(_)));
    assert_emitted!(actions, Action::ExportDidFinish(Some(_)));
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::ExportDidFail(_));
}

#[test]
fn test_new_state_keeps_the_loaded_record() {
    let record = MonsterRecord {
        name: "Xaracol".into(),
        hp: Some(42),
        ..Default::default()
    };

    let state = AppState::new(record.clone(), Language::PtBr);

    assert_eq!(state.monster, record);
    assert_eq!(state.dict().hp, "PV");
    assert_eq!(state.focus, FormField::default());
    assert!(state.status.is_none());
}
