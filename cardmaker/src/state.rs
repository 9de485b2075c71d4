//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dictionary::{Dictionary, Language};
use crate::form::FormField;
use crate::monster::MonsterRecord;

pub const TICK_MS: u64 = 100;
/// How long a status note stays in the status bar.
pub const STATUS_TICKS: u32 = 40;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum StatusMessage {
    Exported(String),
    NothingToExport,
    Copied,
    ClipboardUnavailable,
    Failed(String),
    Reset,
}

impl StatusMessage {
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            StatusMessage::Failed(_) | StatusMessage::ClipboardUnavailable
        )
    }

    pub fn text(&self, dict: &Dictionary) -> String {
        match self {
            StatusMessage::Exported(path) => format!("{} {}", dict.exported, path),
            StatusMessage::NothingToExport => dict.nothing_to_export.to_string(),
            StatusMessage::Copied => dict.copied.to_string(),
            StatusMessage::ClipboardUnavailable => dict.clipboard_unavailable.to_string(),
            StatusMessage::Failed(reason) => format!("{}: {}", dict.failed, reason),
            StatusMessage::Reset => dict.reset_done.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatusNote {
    pub message: StatusMessage,
    pub ticks_left: u32,
}

impl StatusNote {
    pub fn new(message: StatusMessage) -> Self {
        Self {
            message,
            ticks_left: STATUS_TICKS,
        }
    }
}

#[derive(Clone, Debug, Default, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "Monster", label = "Record", debug_fmt)]
    pub monster: MonsterRecord,

    #[debug(section = "Ui", label = "Language", debug_fmt)]
    pub language: Language,

    #[debug(section = "Ui", label = "Focus", debug_fmt)]
    pub focus: FormField,

    #[debug(skip)]
    pub preview_scroll: u16,

    /// Export or copy task in flight.
    #[debug(section = "Export", label = "Busy")]
    pub rendering: bool,

    #[debug(section = "Export", label = "Status", debug_fmt)]
    pub status: Option<StatusNote>,
}

impl AppState {
    pub fn new(monster: MonsterRecord, language: Language) -> Self {
        Self {
            monster,
            language,
            ..Self::default()
        }
    }

    pub fn dict(&self) -> &'static Dictionary {
        self.language.dictionary()
    }

    pub fn set_status(&mut self, message: StatusMessage) {
        self.status = Some(StatusNote::new(message));
    }
}
