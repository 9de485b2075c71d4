//! Effects - side effects declared by the reducer, and their handler

use tui_dispatch::EffectContext;

use crate::action::Action;
use crate::config::RuntimeConfig;
use crate::dictionary::Language;
use crate::export::{self, ExportOptions};
use crate::monster::MonsterRecord;
use crate::persist;
use crate::storage::FileStore;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Write the snapshot after a mutation
    SaveRecord(MonsterRecord),
    /// Drop the snapshot on reset
    ClearSaved,
    ExportPng {
        record: MonsterRecord,
        language: Language,
    },
    CopyPng {
        record: MonsterRecord,
        language: Language,
    },
}

/// Persistence runs inline so writes land in dispatch order; rendering runs
/// as keyed tasks on the blocking pool.
pub fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, config: &RuntimeConfig) {
    match effect {
        Effect::SaveRecord(record) => {
            let mut store = FileStore::new(&config.save_dir);
            if let Err(err) = persist::save_snapshot(&mut store, &record) {
                tracing::warn!(error = %err, "failed to save monster");
            }
        }
        Effect::ClearSaved => {
            let mut store = FileStore::new(&config.save_dir);
            if let Err(err) = persist::clear_snapshot(&mut store) {
                tracing::warn!(error = %err, "failed to clear saved monster");
            }
        }
        Effect::ExportPng { record, language } => {
            let options = config.export.clone();
            ctx.tasks().spawn("export", async move {
                let result =
                    tokio::task::spawn_blocking(move || export_record(&record, language, &options))
                        .await;
                match result {
                    Ok(Ok(path)) => Action::ExportDidFinish(path),
                    Ok(Err(err)) => Action::ExportDidFail(err),
                    Err(err) => Action::ExportDidFail(err.to_string()),
                }
            });
        }
        Effect::CopyPng { record, language } => {
            let options = config.export.clone();
            ctx.tasks().spawn("copy", async move {
                let result =
                    tokio::task::spawn_blocking(move || copy_record(&record, language, &options))
                        .await;
                match result {
                    Ok(Ok(copied)) => Action::CopyDidFinish(copied),
                    Ok(Err(err)) => Action::CopyDidFail(err),
                    Err(err) => Action::CopyDidFail(err.to_string()),
                }
            });
        }
    }
}

fn export_record(
    record: &MonsterRecord,
    language: Language,
    options: &ExportOptions,
) -> Result<Option<String>, String> {
    let card = export::prepare_card(record, language, options).map_err(|err| {
        tracing::error!(error = %err, "failed to lay out card for export");
        err.to_string()
    })?;
    match export::export_as_image(Some(&card), options) {
        Ok(path) => {
            if let Some(path) = &path {
                tracing::info!(path = %path.display(), "exported card");
            }
            Ok(path.map(|p| p.display().to_string()))
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to export card");
            Err(err.to_string())
        }
    }
}

fn copy_record(
    record: &MonsterRecord,
    language: Language,
    options: &ExportOptions,
) -> Result<bool, String> {
    let card = export::prepare_card(record, language, options).map_err(|err| {
        tracing::error!(error = %err, "failed to lay out card for copy");
        err.to_string()
    })?;
    match export::copy_as_image(Some(&card), options) {
        Ok(copied) => Ok(copied.is_some()),
        Err(err) => {
            tracing::warn!(error = %err, "failed to copy card");
            Err(err.to_string())
        }
    }
}
