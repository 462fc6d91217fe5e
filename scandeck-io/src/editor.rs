//! Settings editor state

use crate::config::ScannerConfig;
use scandeck_core::{Notice, Result};
use std::path::Path;
use tracing::info;

/// The working configuration being edited, plus the defaults snapshot it can
/// be restored from
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsEditor {
    working: ScannerConfig,
    defaults: ScannerConfig,
}

impl SettingsEditor {
    pub fn new(working: ScannerConfig, defaults: ScannerConfig) -> Self {
        Self { working, defaults }
    }

    /// An editor whose working copy and defaults are both the built-in values
    pub fn builtin() -> Self {
        Self::new(ScannerConfig::default(), ScannerConfig::default())
    }

    pub fn working(&self) -> &ScannerConfig {
        &self.working
    }

    pub fn working_mut(&mut self) -> &mut ScannerConfig {
        &mut self.working
    }

    pub fn defaults(&self) -> &ScannerConfig {
        &self.defaults
    }

    /// Whether the working copy differs from the defaults
    pub fn is_modified(&self) -> bool {
        self.working != self.defaults
    }

    /// Overwrite the working copy wholesale with the defaults snapshot
    pub fn restore_defaults(&mut self) -> Notice {
        self.working = self.defaults.clone();
        info!("configuration restored to defaults");
        Notice::success("Configuration restored to defaults")
    }

    /// Acknowledge a save request.
    ///
    /// Nothing is written anywhere; use [`SettingsEditor::write_to`] to persist.
    pub fn save(&self) -> Notice {
        info!(modified = self.is_modified(), "configuration save requested");
        Notice::success("Configuration saved")
    }

    /// Validate the working copy and write it as pretty JSON
    pub async fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.working.validate()?;
        let json = self.working.to_json_pretty()?;
        tokio::fs::write(path, json).await?;
        info!(path = %path.display(), "configuration written");
        Ok(())
    }
}

impl Default for SettingsEditor {
    fn default() -> Self {
        Self::builtin()
    }
}
