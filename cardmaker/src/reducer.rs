//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::form::{form_fields, normalize_focus, FormField};
use crate::monster::{EntryList, EntryPatch, MonsterPatch, MonsterRecord};
use crate::state::{AppState, StatusMessage};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Form actions =====
        Action::FormFocusNext => move_focus(state, 1),
        Action::FormFocusPrev => move_focus(state, -1),

        Action::FormFocus(field) => {
            if field == state.focus || !form_fields(&state.monster).contains(&field) {
                return DispatchResult::unchanged();
            }
            state.focus = field;
            DispatchResult::changed()
        }

        Action::FormTextChange(text) => match state.focus {
            FormField::Record(field) => match MonsterPatch::from_text(field, &text) {
                Some(patch) => update_record(state, patch),
                None => DispatchResult::unchanged(),
            },
            FormField::EntryName(list, index) | FormField::EntryDesc(list, index) => {
                let Some(id) = state.monster.entries(list).get(index).map(|e| e.id.clone())
                else {
                    return DispatchResult::unchanged();
                };
                let patch = if matches!(state.focus, FormField::EntryName(..)) {
                    EntryPatch::name(text)
                } else {
                    EntryPatch::desc(text)
                };
                update_entry(state, list, &id, patch)
            }
            _ => DispatchResult::unchanged(),
        },

        Action::FormActivate => match state.focus {
            FormField::SectionToggle(list) => {
                let enabled = !state.monster.section_enabled(list);
                update_record(state, MonsterPatch::section(list, enabled))
            }
            FormField::AddEntry(list) => {
                let result = add_entry(state, list);
                let index = state.monster.entries(list).len().saturating_sub(1);
                state.focus = FormField::EntryName(list, index);
                result
            }
            _ => move_focus(state, 1),
        },

        Action::FormRemoveFocused => {
            let Some((list, index)) = state.focus.entry() else {
                return DispatchResult::unchanged();
            };
            let Some(id) = state.monster.entries(list).get(index).map(|e| e.id.clone()) else {
                return DispatchResult::unchanged();
            };
            remove_entry(state, list, &id)
        }

        // ===== Record actions =====
        Action::RecordUpdate(patch) => update_record(state, patch),
        Action::RecordEntryAdd(list) => add_entry(state, list),
        Action::RecordEntryUpdate { list, id, patch } => update_entry(state, list, &id, patch),
        Action::RecordEntryRemove { list, id } => remove_entry(state, list, &id),

        Action::RecordReset => {
            state.monster = MonsterRecord::default();
            state.focus = FormField::default();
            state.preview_scroll = 0;
            state.set_status(StatusMessage::Reset);
            DispatchResult::changed_with(Effect::ClearSaved)
        }

        // ===== UI actions =====
        Action::UiCycleLanguage => {
            state.language = state.language.next();
            DispatchResult::changed()
        }

        Action::UiSetLanguage(language) => {
            if state.language == language {
                return DispatchResult::unchanged();
            }
            state.language = language;
            DispatchResult::changed()
        }

        Action::UiPreviewScroll(delta) => {
            let next = state.preview_scroll.saturating_add_signed(delta);
            if next == state.preview_scroll {
                return DispatchResult::unchanged();
            }
            state.preview_scroll = next;
            DispatchResult::changed()
        }

        // ===== Export actions =====
        Action::ExportPng => {
            state.rendering = true;
            DispatchResult::changed_with(Effect::ExportPng {
                record: state.monster.clone(),
                language: state.language,
            })
        }

        Action::ExportDidFinish(path) => {
            state.rendering = false;
            state.set_status(match path {
                Some(path) => StatusMessage::Exported(path),
                None => StatusMessage::NothingToExport,
            });
            DispatchResult::changed()
        }

        Action::ExportDidFail(reason) | Action::CopyDidFail(reason) => {
            state.rendering = false;
            state.set_status(StatusMessage::Failed(reason));
            DispatchResult::changed()
        }

        // ===== Copy actions =====
        Action::CopyPng => {
            state.rendering = true;
            DispatchResult::changed_with(Effect::CopyPng {
                record: state.monster.clone(),
                language: state.language,
            })
        }

        Action::CopyDidFinish(copied) => {
            state.rendering = false;
            state.set_status(if copied {
                StatusMessage::Copied
            } else {
                StatusMessage::ClipboardUnavailable
            });
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            let Some(note) = state.status.as_mut() else {
                return DispatchResult::unchanged();
            };
            note.ticks_left = note.ticks_left.saturating_sub(1);
            if note.ticks_left == 0 {
                state.status = None;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn move_focus(state: &mut AppState, step: isize) -> DispatchResult<Effect> {
    let fields = form_fields(&state.monster);
    if fields.is_empty() {
        return DispatchResult::unchanged();
    }
    let len = fields.len() as isize;
    let current = fields
        .iter()
        .position(|field| *field == state.focus)
        .map(|index| index as isize)
        .unwrap_or(if step > 0 { -1 } else { 0 });
    let next = (current + step).rem_euclid(len) as usize;
    state.focus = fields[next];
    DispatchResult::changed()
}

fn saved(state: &mut AppState) -> DispatchResult<Effect> {
    state.focus = normalize_focus(&state.monster, state.focus);
    DispatchResult::changed_with(Effect::SaveRecord(state.monster.clone()))
}

fn update_record(state: &mut AppState, patch: MonsterPatch) -> DispatchResult<Effect> {
    state.monster.apply(patch);
    saved(state)
}

fn add_entry(state: &mut AppState, list: EntryList) -> DispatchResult<Effect> {
    state.monster.add_entry(list);
    saved(state)
}

fn update_entry(
    state: &mut AppState,
    list: EntryList,
    id: &str,
    patch: EntryPatch,
) -> DispatchResult<Effect> {
    if !state.monster.update_entry(list, id, patch) {
        return DispatchResult::unchanged();
    }
    saved(state)
}

fn remove_entry(
    state: &mut AppState,
    list: EntryList,
    id: &str,
) -> DispatchResult<Effect> {
    if !state.monster.remove_entry(list, id) {
        return DispatchResult::unchanged();
    }
    saved(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Language;
    use crate::monster::RecordField;
    use crate::state::STATUS_TICKS;

    #[test]
    fn test_text_change_updates_focused_field_and_saves() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::FormTextChange("Xaracol".into()));

        assert!(result.changed);
        assert_eq!(state.monster.name, "Xaracol");
        assert_eq!(result.effects.len(), 1);
        assert!(matches!(&result.effects[0], Effect::SaveRecord(r) if r.name == "Xaracol"));
    }

    #[test]
    fn test_non_numeric_text_is_ignored_for_stats() {
        let mut state = AppState {
            focus: FormField::Record(RecordField::Hp),
            ..Default::default()
        };

        let result = reducer(&mut state, Action::FormTextChange("12".into()));
        assert!(result.changed);
        assert_eq!(state.monster.hp, Some(12));

        let result = reducer(&mut state, Action::FormTextChange("12a".into()));
        assert!(!result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.monster.hp, Some(12));

        reducer(&mut state, Action::FormTextChange(String::new()));
        assert_eq!(state.monster.hp, None);
    }

    #[test]
    fn test_focus_wraps_around() {
        let mut state = AppState::default();
        reducer(&mut state, Action::FormFocusPrev);
        assert_eq!(state.focus, FormField::SectionToggle(EntryList::Spells));

        reducer(&mut state, Action::FormFocusNext);
        assert_eq!(state.focus, FormField::Record(RecordField::Name));

        reducer(&mut state, Action::FormFocusNext);
        assert_eq!(state.focus, FormField::Record(RecordField::SizeType));
    }

    #[test]
    fn test_activate_toggle_then_add_entry() {
        let mut state = AppState {
            focus: FormField::SectionToggle(EntryList::Abilities),
            ..Default::default()
        };

        let result = reducer(&mut state, Action::FormActivate);
        assert!(state.monster.has_abilities);
        assert!(matches!(result.effects[0], Effect::SaveRecord(_)));

        reducer(&mut state, Action::FormFocusNext);
        assert_eq!(state.focus, FormField::AddEntry(EntryList::Abilities));

        reducer(&mut state, Action::FormActivate);
        assert_eq!(state.monster.abilities.len(), 1);
        assert_eq!(state.focus, FormField::EntryName(EntryList::Abilities, 0));

        reducer(&mut state, Action::FormTextChange("Bite".into()));
        reducer(&mut state, Action::FormFocusNext);
        reducer(&mut state, Action::FormTextChange("1d4".into()));
        assert_eq!(state.monster.abilities[0].name, "Bite");
        assert_eq!(state.monster.abilities[0].desc, "1d4");
    }

    #[test]
    fn test_disabling_section_moves_focus_off_hidden_rows() {
        let mut state = AppState::default();
        reducer(&mut state, Action::RecordUpdate(MonsterPatch::section(EntryList::Spells, true)));
        reducer(&mut state, Action::RecordEntryAdd(EntryList::Spells));
        state.focus = FormField::EntryDesc(EntryList::Spells, 0);

        reducer(&mut state, Action::RecordUpdate(MonsterPatch::section(EntryList::Spells, false)));

        assert_eq!(state.focus, FormField::SectionToggle(EntryList::Spells));
        assert_eq!(state.monster.spells.len(), 1);
    }

    #[test]
    fn test_remove_focused_entry() {
        let mut state = AppState::default();
        reducer(&mut state, Action::RecordUpdate(MonsterPatch::section(EntryList::Spells, true)));
        reducer(&mut state, Action::RecordEntryAdd(EntryList::Spells));
        state.focus = FormField::EntryName(EntryList::Spells, 0);

        let result = reducer(&mut state, Action::FormRemoveFocused);

        assert!(result.changed);
        assert!(state.monster.spells.is_empty());
        assert_eq!(state.focus, FormField::AddEntry(EntryList::Spells));

        let result = reducer(&mut state, Action::FormRemoveFocused);
        assert!(!result.changed);
    }

    #[test]
    fn test_unknown_entry_is_a_no_op() {
        let mut state = AppState::default();
        let result = reducer(
            &mut state,
            Action::RecordEntryRemove {
                list: EntryList::Abilities,
                id: "missing".into(),
            },
        );
        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_reset_clears_record_and_saved_snapshot() {
        let mut state = AppState::default();
        reducer(&mut state, Action::RecordUpdate(MonsterPatch::name("Xaracol")));
        state.focus = FormField::Record(RecordField::Magic);

        let result = reducer(&mut state, Action::RecordReset);

        assert_eq!(state.monster, MonsterRecord::default());
        assert_eq!(state.focus, FormField::default());
        assert_eq!(result.effects, vec![Effect::ClearSaved]);
        assert_eq!(
            state.status.as_ref().map(|n| &n.message),
            Some(&StatusMessage::Reset)
        );
    }

    #[test]
    fn test_export_carries_record_and_language() {
        let mut state = AppState::new(MonsterRecord::default(), Language::PtBr);
        let result = reducer(&mut state, Action::ExportPng);
        assert!(state.rendering);
        assert_eq!(
            result.effects,
            vec![Effect::ExportPng {
                record: MonsterRecord::default(),
                language: Language::PtBr,
            }]
        );

        reducer(&mut state, Action::ExportDidFinish(None));
        assert!(!state.rendering);
        assert_eq!(
            state.status.as_ref().map(|n| &n.message),
            Some(&StatusMessage::NothingToExport)
        );
    }

    #[test]
    fn test_tick_expires_status() {
        let mut state = AppState::default();
        assert!(!reducer(&mut state, Action::Tick).changed);

        reducer(&mut state, Action::CopyDidFinish(true));
        for _ in 1..STATUS_TICKS {
            assert!(!reducer(&mut state, Action::Tick).changed);
        }
        assert!(reducer(&mut state, Action::Tick).changed);
        assert!(state.status.is_none());
    }
}
