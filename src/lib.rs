//! # scandeck
//!
//! A simulated 3D laser-scanner backend for Rust.
//!
//! This is the umbrella crate that provides convenient access to all scandeck functionality.
//! You can use this crate to get everything in one place, or use individual crates for
//! more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Scan state snapshots, log entries, point samples and point clouds
//! - **Sim**: The scan simulator, the activity log, point cloud sampling and timer-driven sessions
//! - **I/O**: Configuration documents, settings editing and export artifacts (transcripts, PLY)
//!
//! ## Quick Start
//!
//! ```rust
//! use scandeck::prelude::*;
//!
//! let mut simulator = ScanSimulator::new();
//! let mut entropy = SeededEntropy::from_seed(7);
//!
//! simulator.start();
//! while simulator.is_scanning() {
//!     simulator.tick(&mut entropy);
//! }
//! assert_eq!(simulator.state().status, ScanStatus::Complete);
//!
//! let cloud = PointCloudSampler::default().sample_state(&simulator.state(), &mut entropy);
//! assert_eq!(cloud.len(), 50_000);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables core, sim and io
//! - `sim`: Simulation components
//! - `io`: Configuration and export support
//! - `all`: Enables all features

// Re-export core functionality
pub use scandeck_core::*;

// Re-export sub-crates
#[cfg(feature = "sim")]
pub use scandeck_sim as sim;

#[cfg(feature = "io")]
pub use scandeck_io as io;

/// Convenient imports for common use cases
pub mod prelude {
    pub use scandeck_core::*;
    
    #[cfg(feature = "sim")]
    pub use scandeck_sim::*;
    
    #[cfg(feature = "io")]
    pub use scandeck_io::{
        write_log_transcript, write_point_cloud, CameraSettings, ConfigLoader, ConfigOrigin,
        DocumentSource, FsSource, IoError, LaserSettings, LoadedSettings, LoaderConfig,
        MotorSettings, PlyWriter, PointCloudWriter, ProcessingSettings, ScannerConfig,
        ScannerSettings, SettingsEditor, DEFAULTS_FILE, POINT_CLOUD_FILE, TRANSCRIPT_FILE,
        WORKING_FILE,
    };
}
