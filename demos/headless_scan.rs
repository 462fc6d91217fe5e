//! Runs one scan run end to end without a UI
//!
//! Run with: cargo run --bin headless_scan
//!
//! Environment:
//! - `SCANDECK_CONFIG_DIR`: directory holding `config.json` and `config-default.json` (default `.`)
//! - `SCANDECK_OUT_DIR`: where the transcript and PLY exports are written (default `.`)
//! - `SCANDECK_SEED`: fixed seed for a reproducible run

use anyhow::Result;
use scandeck_core::ScanStatus;
use scandeck_io::{ConfigLoader, PlyWriter, PointCloudWriter, POINT_CLOUD_FILE, TRANSCRIPT_FILE};
use scandeck_sim::{ScanSession, SessionConfig};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,scandeck_sim=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config_dir = std::env::var("SCANDECK_CONFIG_DIR").unwrap_or_else(|_| ".".to_string());
    let out_dir = PathBuf::from(std::env::var("SCANDECK_OUT_DIR").unwrap_or_else(|_| ".".to_string()));
    let seed = std::env::var("SCANDECK_SEED").ok().and_then(|s| s.parse().ok());

    let settings = ConfigLoader::new(&config_dir).load().await;
    if let Some(notice) = &settings.notice {
        warn!(message = %notice.message, "configuration notice");
    }
    info!(origin = ?settings.origin, laser_power = settings.editor.working().laser.power, "configuration ready");

    let mut session = ScanSession::new(SessionConfig { seed, ..SessionConfig::default() });
    let mut updates = session.subscribe();
    session.start();

    let mut last_decile = 0;
    while updates.changed().await.is_ok() {
        let state = *updates.borrow_and_update();
        let decile = (state.progress / 10.0) as u32;
        if decile > last_decile {
            last_decile = decile;
            info!(
                progress = format!("{:.1}", state.progress),
                points = state.points_collected,
                eta = state.estimated_time_remaining,
                "scanning"
            );
        }
        if state.status != ScanStatus::Scanning {
            break;
        }
    }

    let photo = session.capture_photo();
    info!(url = %photo.url, "photo captured");

    let cloud = session.point_cloud();
    let (min, max) = scandeck_core::Drawable::bounding_box(&cloud);
    info!(samples = cloud.len(), ?min, ?max, "point cloud sampled");

    std::fs::create_dir_all(&out_dir)?;
    PlyWriter::write_point_cloud(&cloud, out_dir.join(POINT_CLOUD_FILE))?;
    PlyWriter::write_placeholder(session.state().points_collected, out_dir.join("placeholder.ply"))?;
    {
        let log = session.log();
        let feeder = log.lock();
        scandeck_io::write_log_transcript(feeder.entries(), out_dir.join(TRANSCRIPT_FILE))?;
        info!(entries = feeder.len(), "log exported");
    }

    info!(out = %out_dir.display(), "exports written");
    Ok(())
}
