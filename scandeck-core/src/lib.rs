//! Core data structures and traits for scandeck
//! 
//! This crate provides the fundamental types shared by the scan simulator,
//! the log feeder and the exporters: scan state snapshots, log entries,
//! point samples, point clouds, and the injectable entropy and clock sources.

pub mod point;
pub mod point_cloud;
pub mod state;
pub mod log;
pub mod notice;
pub mod entropy;
pub mod clock;
pub mod traits;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use state::*;
pub use log::*;
pub use notice::*;
pub use entropy::*;
pub use clock::*;
pub use traits::*;
pub use error::*;
