use std::path::PathBuf;

use crate::export::ExportOptions;
use crate::persist;

/// Settings shared by the effect handler and the headless commands.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Directory of the `FileStore` holding the snapshot.
    pub save_dir: PathBuf,
    pub export: ExportOptions,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            save_dir: persist::default_save_dir(),
            export: ExportOptions::default(),
        }
    }
}

impl RuntimeConfig {
    pub fn log_path(&self) -> PathBuf {
        self.save_dir.join("cardmaker.log")
    }
}
