//! Actions dispatched by the form, the shell and finished tasks

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dictionary::Language;
use crate::form::FormField;
use crate::monster::{EntryList, EntryPatch, MonsterPatch};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Form category =====
    FormFocusNext,
    FormFocusPrev,
    FormFocus(FormField),

    /// New text for the focused row
    FormTextChange(String),

    /// Enter on the focused row: flip a toggle, press a button, or move on
    FormActivate,

    /// Remove the entry owning the focused row
    FormRemoveFocused,

    // ===== Record category =====
    RecordUpdate(MonsterPatch),
    RecordEntryAdd(EntryList),
    RecordEntryUpdate {
        list: EntryList,
        id: String,
        patch: EntryPatch,
    },
    RecordEntryRemove {
        list: EntryList,
        id: String,
    },
    RecordReset,

    // ===== UI category =====
    UiCycleLanguage,
    UiSetLanguage(Language),
    UiPreviewScroll(i16),

    // ===== Export category =====
    ExportPng,

    /// Result: file written, or nothing was mounted to export
    ExportDidFinish(Option<String>),
    ExportDidFail(String),

    // ===== Copy category =====
    CopyPng,

    /// Result: true when the image reached the clipboard
    CopyDidFinish(bool),
    CopyDidFail(String),

    /// Force a re-render (cursor movement)
    Render,

    // ===== Uncategorized (global) =====
    Tick,
    Quit,
}
