//! Loads the configuration documents, edits them and restores defaults
//!
//! Run with: cargo run --bin settings_editor -- <config-dir>

use anyhow::{Context, Result};
use scandeck_io::{ConfigLoader, ConfigOrigin, LoaderConfig};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let dir = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let loader = ConfigLoader::with_config(
        &dir,
        LoaderConfig {
            timeout: Duration::from_secs(2),
            retries: 1,
            ..LoaderConfig::default()
        },
    );

    let loaded = loader.load().await;
    if let Some(notice) = &loaded.notice {
        warn!(message = %notice.message, "using fallback configuration");
    }
    let mut editor = loaded.editor;

    editor.working_mut().laser.power = 55.0;
    editor.working_mut().camera.auto_focus = false;
    info!(modified = editor.is_modified(), "working copy edited");

    let notice = editor.save();
    info!(message = %notice.message, "save acknowledged");

    let notice = editor.restore_defaults();
    info!(message = %notice.message, modified = editor.is_modified(), "defaults restored");

    if loaded.origin == ConfigOrigin::Builtin {
        editor
            .write_to(loader.working_path())
            .await
            .with_context(|| format!("writing {}", loader.working_path().display()))?;
        info!(path = %loader.working_path().display(), "built-in configuration written");
    }
    Ok(())
}
