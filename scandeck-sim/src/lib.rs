//! # scandeck simulation
//!
//! The synthetic parts of the scanner dashboard.
//!
//! This crate drives a [`ScanSimulator`] through its lifecycle, feeds a bounded
//! activity log, samples the helical point cloud shown while scanning, and
//! schedules all of it as cancellable timer tasks inside a [`ScanSession`].

pub mod simulator;
pub mod log_feeder;
pub mod sampler;
pub mod task;
pub mod session;

// Re-export commonly used items
pub use simulator::*;
pub use log_feeder::*;
pub use sampler::*;
pub use task::*;
pub use session::*;
