//! Scan state snapshots

use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress value at which a scan run is complete
pub const PROGRESS_COMPLETE: f64 = 100.0;

/// Points collected per percent of progress
pub const POINTS_PER_PERCENT: f64 = 1000.0;

/// Estimated duration of a fresh scan run, in seconds
pub const INITIAL_TIME_REMAINING: u64 = 300;

/// Lifecycle status of the simulated scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    #[default]
    Idle,
    Scanning,
    /// Reserved for post-processing; no transition is driven internally.
    Processing,
    Complete,
    Error,
}

impl ScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Idle => "idle",
            ScanStatus::Scanning => "scanning",
            ScanStatus::Processing => "processing",
            ScanStatus::Complete => "complete",
            ScanStatus::Error => "error",
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable snapshot of the scanner, published once per mutation.
///
/// `status == Complete` iff `progress == 100`, and `is_scanning` is only
/// true while `status == Scanning`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanState {
    pub is_scanning: bool,
    pub progress: f64,
    pub status: ScanStatus,
    pub points_collected: u64,
    pub estimated_time_remaining: u64,
}

impl ScanState {
    /// The zero state every simulator starts from
    pub fn idle() -> Self {
        Self::default()
    }

    /// State at the beginning of a scan run
    pub fn started() -> Self {
        Self {
            is_scanning: true,
            progress: 0.0,
            status: ScanStatus::Scanning,
            points_collected: 0,
            estimated_time_remaining: INITIAL_TIME_REMAINING,
        }
    }

    /// Number of points implied by a progress value
    pub fn points_for_progress(progress: f64) -> u64 {
        (progress.clamp(0.0, PROGRESS_COMPLETE) * POINTS_PER_PERCENT).floor() as u64
    }

    pub fn is_complete(&self) -> bool {
        self.status == ScanStatus::Complete
    }
}

/// Reference to a placeholder photo taken during a scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRef {
    pub url: String,
    pub captured_at: String,
}

impl PhotoRef {
    /// Base URL of the public placeholder image service
    pub const SERVICE_URL: &'static str = "https://picsum.photos";

    /// Build a reference to a seeded placeholder image of the given size
    pub fn placeholder(seed: u32, width: u32, height: u32, captured_at: String) -> Self {
        Self {
            url: format!("{}/seed/{seed}/{width}/{height}", Self::SERVICE_URL),
            captured_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_for_progress() {
        assert_eq!(ScanState::points_for_progress(0.0), 0);
        assert_eq!(ScanState::points_for_progress(1.23456), 1234);
        assert_eq!(ScanState::points_for_progress(100.0), 100_000);
        assert_eq!(ScanState::points_for_progress(250.0), 100_000);
    }

    #[test]
    fn test_started_state() {
        let state = ScanState::started();
        assert!(state.is_scanning);
        assert_eq!(state.status, ScanStatus::Scanning);
        assert_eq!(state.estimated_time_remaining, 300);
        assert_eq!(state.points_collected, 0);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(ScanStatus::Complete.to_string(), "complete");
        assert_eq!(ScanStatus::default(), ScanStatus::Idle);
    }

    #[test]
    fn test_placeholder_photo_url() {
        let photo = PhotoRef::placeholder(42, 800, 600, "10:00:00".to_string());
        assert_eq!(photo.url, "https://picsum.photos/seed/42/800/600");
    }
}
