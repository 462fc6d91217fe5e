//! Loading configuration documents with a bounded wait
//!
//! Both documents are read with a per-attempt timeout and a fixed number of
//! retries. When a document cannot be obtained the loader falls back (working
//! copy to the defaults document, defaults document to the built-in values),
//! logs every failure, and reports a single error notice. Loading never hangs.

use crate::config::ScannerConfig;
use crate::editor::SettingsEditor;
use crate::error::IoError;
use scandeck_core::{Notice, Result};
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, warn};

/// File name of the working configuration
pub const WORKING_FILE: &str = "config.json";

/// File name of the defaults snapshot
pub const DEFAULTS_FILE: &str = "config-default.json";

/// Timeout and retry policy for reading a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Limit on a single read attempt
    pub timeout: Duration,
    /// Additional attempts after the first one fails
    pub retries: u32,
    /// Pause between attempts
    pub backoff: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            retries: 2,
            backoff: Duration::from_millis(500),
        }
    }
}

/// Where the working copy ended up coming from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Both documents were read
    Loaded,
    /// The working document failed; it was replaced by the defaults document
    DefaultsDocument,
    /// The defaults document failed; built-in values are in use
    Builtin,
}

/// Result of [`ConfigLoader::load`]
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub editor: SettingsEditor,
    pub origin: ConfigOrigin,
    /// Set once when anything failed to load
    pub notice: Option<Notice>,
}

/// Where configuration documents are read from
pub trait DocumentSource {
    /// Read the whole document at `path` as text
    fn read(&self, path: &Path) -> impl Future<Output = std::io::Result<String>> + Send;
}

/// Reads documents from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl DocumentSource for FsSource {
    fn read(&self, path: &Path) -> impl Future<Output = std::io::Result<String>> + Send {
        tokio::fs::read_to_string(path.to_path_buf())
    }
}

/// Reads `config.json` and `config-default.json` from one directory
#[derive(Debug, Clone)]
pub struct ConfigLoader<S = FsSource> {
    dir: PathBuf,
    config: LoaderConfig,
    source: S,
}

impl ConfigLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_config(dir, LoaderConfig::default())
    }

    pub fn with_config(dir: impl Into<PathBuf>, config: LoaderConfig) -> Self {
        Self::with_source(dir, config, FsSource)
    }
}

impl<S: DocumentSource> ConfigLoader<S> {
    pub fn with_source(dir: impl Into<PathBuf>, config: LoaderConfig, source: S) -> Self {
        Self {
            dir: dir.into(),
            config,
            source,
        }
    }

    pub fn working_path(&self) -> PathBuf {
        self.dir.join(WORKING_FILE)
    }

    pub fn defaults_path(&self) -> PathBuf {
        self.dir.join(DEFAULTS_FILE)
    }

    /// Load both documents, falling back instead of failing
    pub async fn load(&self) -> LoadedSettings {
        let (working, defaults) = tokio::join!(
            self.read_document(self.working_path()),
            self.read_document(self.defaults_path()),
        );

        let mut failures = Vec::new();
        let defaults = match defaults {
            Ok(config) => Some(config),
            Err(e) => {
                error!(error = %e, "failed to load default configuration");
                failures.push(e.to_string());
                None
            }
        };
        let working = match working {
            Ok(config) => Some(config),
            Err(e) => {
                error!(error = %e, "failed to load configuration");
                failures.push(e.to_string());
                None
            }
        };

        let (editor, origin) = match (working, defaults) {
            (Some(working), Some(defaults)) => (SettingsEditor::new(working, defaults), ConfigOrigin::Loaded),
            (None, Some(defaults)) => (
                SettingsEditor::new(defaults.clone(), defaults),
                ConfigOrigin::DefaultsDocument,
            ),
            (Some(working), None) => (
                SettingsEditor::new(working, ScannerConfig::default()),
                ConfigOrigin::Builtin,
            ),
            (None, None) => (SettingsEditor::builtin(), ConfigOrigin::Builtin),
        };

        let notice = (!failures.is_empty()).then(|| {
            warn!(?origin, failures = failures.len(), "configuration fell back");
            Notice::error(format!("Failed to load configuration: {}", failures.join("; ")))
        });

        LoadedSettings { editor, origin, notice }
    }

    /// Read, parse and validate one document under the retry policy
    pub async fn read_document(&self, path: impl AsRef<Path>) -> Result<ScannerConfig> {
        let path = path.as_ref();
        let text = self.read_text(path).await?;
        let config = ScannerConfig::from_json_str(&text).map_err(|source| IoError::Json {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        debug!(path = %path.display(), "configuration document loaded");
        Ok(config)
    }

    async fn read_text(&self, path: &Path) -> std::result::Result<String, IoError> {
        let mut attempt = 0;
        loop {
            let failure = match tokio::time::timeout(self.config.timeout, self.source.read(path)).await {
                Ok(Ok(text)) => return Ok(text),
                Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
                    return Err(IoError::FileNotFound { path: path.display().to_string() });
                }
                Ok(Err(e)) => IoError::Io(e),
                Err(_) => IoError::Timeout {
                    path: path.display().to_string(),
                    millis: self.config.timeout.as_millis() as u64,
                },
            };

            if attempt >= self.config.retries {
                return Err(failure);
            }
            attempt += 1;
            warn!(path = %path.display(), attempt, error = %failure, "retrying configuration read");
            tokio::time::sleep(self.config.backoff).await;
        }
    }
}
